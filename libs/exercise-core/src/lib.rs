//! Exercise engine library shared by the backend and clients.
//!
//! Provides:
//! - Exercise payload types and their JSON wire format
//! - Match-the-pairs and multiple-choice interaction engines
//! - A logical timeline for the engines' delayed transitions
//! - Lesson progression across a list of exercises

pub mod cell;
pub mod choice;
pub mod effect;
pub mod error;
pub mod lesson;
pub mod pairs;
pub mod timeline;
pub mod types;

pub use cell::{Cell, CellStatus, Column, Side};
pub use choice::{ChoiceFollowUp, ChoiceSnapshot, MultipleChoiceEngine};
pub use effect::{Effect, TRANSITION_DURATION};
pub use error::{ExerciseError, Result, TapError, TapResult};
pub use lesson::{ExerciseEngine, Lesson, LessonEvent, LessonExercise, LessonFollowUp, Screen};
pub use pairs::{PairFollowUp, PairMatchingEngine, PairsSnapshot};
pub use timeline::Timeline;
pub use types::{
    Exercise, ExerciseData, ExerciseKind, FillInTheBlankData, MatchThePairsData,
    MultipleChoiceData, PairSet, PronunciationData,
};
