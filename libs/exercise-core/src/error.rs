//! Error types for exercise-core.

use thiserror::Error;

use crate::cell::{CellStatus, Side};
use crate::types::ExerciseKind;

/// Result type alias using ExerciseError.
pub type Result<T> = std::result::Result<T, ExerciseError>;

/// Result type alias for tap handling.
pub type TapResult<T> = std::result::Result<T, TapError>;

/// Errors raised while decoding or validating exercise data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExerciseError {
    #[error("missing {kind} payload")]
    MissingPayload { kind: ExerciseKind },

    #[error("pair set is empty")]
    EmptyPairs,

    #[error("empty word in pair set")]
    EmptyWord,

    #[error("duplicate right-hand word: {word}")]
    DuplicateRightWord { word: String },

    #[error("multiple choice has no options")]
    NoOptions,

    #[error("duplicate option: {option}")]
    DuplicateOption { option: String },

    #[error("correct answer {answer} is not among the options")]
    AnswerNotInOptions { answer: String },

    #[error("duplicate exercise ID: {id}")]
    DuplicateExerciseId { id: String },

    #[error("exercise {id} has unsupported kind {kind}")]
    UnsupportedExercise { id: String, kind: ExerciseKind },

    #[error("lesson has no exercises")]
    EmptyLesson,
}

/// Rejected taps.
///
/// `UnknownCell`, `UnknownOption` and `InconsistentSelection` are
/// programming errors on the caller side. The rest are what a UI produces
/// when it forgets to disable inert cells.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TapError {
    #[error("unknown cell {id} tapped in {side} column")]
    UnknownCell { side: Side, id: String },

    #[error("cell {id} in {side} column is {status} and cannot be tapped")]
    CellNotTappable {
        side: Side,
        id: String,
        status: CellStatus,
    },

    #[error("both columns hold a selection while {id} was tapped in {side} column")]
    InconsistentSelection { side: Side, id: String },

    #[error("tap on {id} while a transition is settling")]
    TransitionPending { id: String },

    #[error("tap on {id} after the exercise was completed")]
    ExerciseComplete { id: String },

    #[error("unknown option {id} tapped")]
    UnknownOption { id: String },

    #[error("option {id} is {status} and cannot be tapped")]
    OptionNotTappable { id: String, status: CellStatus },
}

impl TapError {
    /// Whether this rejection means the engine's caller broke an invariant.
    pub fn is_invariant_violation(&self) -> bool {
        !matches!(
            self,
            Self::CellNotTappable { .. }
                | Self::OptionNotTappable { .. }
                | Self::TransitionPending { .. }
                | Self::ExerciseComplete { .. }
        )
    }
}
