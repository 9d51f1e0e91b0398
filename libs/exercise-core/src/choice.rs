//! Multiple-choice engine.
//!
//! Each option is a cell. Tapping the correct option marks it `Matched` and
//! ends the exercise one transition later; a wrong option flashes `Error`
//! and comes back. Other options ignore taps until the transition is over.

use serde::Serialize;

use crate::cell::{Cell, CellStatus, Column};
use crate::effect::Effect;
use crate::error::{Result, TapError, TapResult};
use crate::types::MultipleChoiceData;

/// Delayed transitions scheduled by an option tap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceFollowUp {
    FinalizeMatch { id: String },
    FinalizeError { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceSnapshot {
    pub question: String,
    pub options: Vec<Cell>,
}

#[derive(Debug, Clone)]
pub struct MultipleChoiceEngine {
    question: String,
    correct_answer: String,
    options: Column,
}

impl MultipleChoiceEngine {
    pub fn new(data: MultipleChoiceData) -> Result<Self> {
        data.validate()?;
        Ok(Self {
            options: Column::new(data.options),
            question: data.question,
            correct_answer: data.correct_answer,
        })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn options(&self) -> &Column {
        &self.options
    }

    pub fn status(&self, id: &str) -> Option<CellStatus> {
        self.options.get(id).map(|cell| cell.status)
    }

    /// An option is waiting for its finalizer.
    pub fn is_settling(&self) -> bool {
        self.options.first_with(CellStatus::Matched).is_some()
            || self.options.first_with(CellStatus::Error).is_some()
    }

    /// The correct option has been confirmed.
    pub fn is_complete(&self) -> bool {
        self.options.first_with(CellStatus::Disabled).is_some()
    }

    pub fn snapshot(&self) -> ChoiceSnapshot {
        ChoiceSnapshot {
            question: self.question.clone(),
            options: self.options.cells().to_vec(),
        }
    }

    /// Handle a tap, swallowing rejected taps. Unknown options trip a debug
    /// assertion.
    pub fn tap(&mut self, id: &str) -> Effect<ChoiceFollowUp> {
        match self.try_tap(id) {
            Ok(effect) => effect,
            Err(err) if err.is_invariant_violation() => {
                tracing::error!(%err, "invalid tap on multiple choice exercise");
                debug_assert!(false, "{err}");
                Effect::None
            }
            Err(err) => {
                tracing::debug!(%err, "ignoring tap");
                Effect::None
            }
        }
    }

    pub fn try_tap(&mut self, id: &str) -> TapResult<Effect<ChoiceFollowUp>> {
        let index = self
            .options
            .position(id)
            .ok_or_else(|| TapError::UnknownOption { id: id.to_string() })?;
        let status = self.options.cell_at(index).status;
        if status != CellStatus::Normal {
            return Err(TapError::OptionNotTappable {
                id: id.to_string(),
                status,
            });
        }
        if self.is_settling() {
            return Err(TapError::TransitionPending { id: id.to_string() });
        }
        if self.is_complete() {
            return Err(TapError::ExerciseComplete { id: id.to_string() });
        }

        let id = id.to_string();
        if id == self.correct_answer {
            self.options.set_status(index, CellStatus::Matched);
            Ok(Effect::delayed(ChoiceFollowUp::FinalizeMatch { id }))
        } else {
            self.options.set_status(index, CellStatus::Error);
            Ok(Effect::delayed(ChoiceFollowUp::FinalizeError { id }))
        }
    }

    /// Disable the matched option. Returns `true` when the exercise is
    /// complete as a result.
    pub fn finalize_match(&mut self, id: &str) -> bool {
        self.switch(id, CellStatus::Matched, CellStatus::Disabled)
    }

    pub fn finalize_error(&mut self, id: &str) {
        self.switch(id, CellStatus::Error, CellStatus::Normal);
    }

    /// Run a follow-up. Returns `true` when it completed the exercise.
    pub fn apply(&mut self, follow_up: &ChoiceFollowUp) -> bool {
        match follow_up {
            ChoiceFollowUp::FinalizeMatch { id } => self.finalize_match(id),
            ChoiceFollowUp::FinalizeError { id } => {
                self.finalize_error(id);
                false
            }
        }
    }

    fn switch(&mut self, id: &str, from: CellStatus, to: CellStatus) -> bool {
        match self.options.position(id) {
            Some(index) if self.options.cell_at(index).status == from => {
                self.options.set_status(index, to);
                true
            }
            _ => {
                tracing::trace!(id, %from, "stale option finalize");
                false
            }
        }
    }
}
