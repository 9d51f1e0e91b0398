//! Match-the-pairs interaction engine.
//!
//! Two columns of word cells. The learner selects a cell in one column and
//! then a cell in the other; the pair is checked against the [`PairSet`].
//! A hit turns both cells `Matched` and, after [`TRANSITION_DURATION`],
//! `Disabled`. A miss turns both `Error` and then back to `Normal`.
//!
//! The engine never waits. Match attempts return an [`Effect`] carrying the
//! finalizer to run later; the finalizers re-check the state they expect and
//! do nothing when it is gone. Taps are refused until the pending finalizer
//! has run, so a finalizer always sees the state its tap left.
//!
//! [`TRANSITION_DURATION`]: crate::effect::TRANSITION_DURATION

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::cell::{Cell, CellStatus, Column, Side};
use crate::effect::Effect;
use crate::error::{Result, TapError, TapResult};
use crate::types::{MatchThePairsData, PairSet};

/// Delayed transitions scheduled by a match attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairFollowUp {
    /// Matched pair becomes disabled.
    FinalizeMatch,
    /// Error pair goes back to normal.
    FinalizeMismatch,
}

/// Read-only view for a rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairsSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    pub left: Vec<Cell>,
    pub right: Vec<Cell>,
}

#[derive(Debug, Clone)]
pub struct PairMatchingEngine {
    prompt: Option<String>,
    pairs: PairSet,
    left: Column,
    right: Column,
    settling: bool,
}

impl PairMatchingEngine {
    /// Build the columns, shuffling the right one with the thread RNG.
    pub fn new(data: MatchThePairsData) -> Result<Self> {
        Self::with_rng(data, &mut rand::rng())
    }

    /// Build the columns, shuffling the right one with `rng`.
    pub fn with_rng<R: Rng + ?Sized>(data: MatchThePairsData, rng: &mut R) -> Result<Self> {
        data.validate()?;

        let mut right_words: Vec<&String> = data.pairs.values().collect();
        right_words.shuffle(rng);

        let left = Column::new(data.pairs.keys().cloned());
        let right = Column::new(right_words.into_iter().cloned());

        Ok(Self {
            prompt: data.prompt,
            pairs: data.pairs,
            left,
            right,
            settling: false,
        })
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    pub fn pairs(&self) -> &PairSet {
        &self.pairs
    }

    pub fn column(&self, side: Side) -> &Column {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn column_mut(&mut self, side: Side) -> &mut Column {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn cell(&self, side: Side, id: &str) -> Option<&Cell> {
        self.column(side).get(id)
    }

    pub fn status(&self, side: Side, id: &str) -> Option<CellStatus> {
        self.cell(side, id).map(|cell| cell.status)
    }

    /// A match attempt is waiting for its finalizer.
    pub fn is_settling(&self) -> bool {
        self.settling
    }

    /// Every cell in both columns is disabled.
    pub fn is_complete(&self) -> bool {
        self.left.all(CellStatus::Disabled) && self.right.all(CellStatus::Disabled)
    }

    pub fn snapshot(&self) -> PairsSnapshot {
        PairsSnapshot {
            prompt: self.prompt.clone(),
            left: self.left.cells().to_vec(),
            right: self.right.cells().to_vec(),
        }
    }

    /// Handle a tap, swallowing rejected taps.
    ///
    /// Broken invariants (unknown cell, impossible selection) trip a debug
    /// assertion; release builds log them and leave the state untouched.
    pub fn tap(&mut self, side: Side, id: &str) -> Effect<PairFollowUp> {
        match self.try_tap(side, id) {
            Ok(effect) => effect,
            Err(err) if err.is_invariant_violation() => {
                tracing::error!(%err, "invalid tap on pairs exercise");
                debug_assert!(false, "{err}");
                Effect::None
            }
            Err(err) => {
                tracing::debug!(%err, "ignoring tap");
                Effect::None
            }
        }
    }

    pub fn try_tap(&mut self, side: Side, id: &str) -> TapResult<Effect<PairFollowUp>> {
        let index = self
            .column(side)
            .position(id)
            .ok_or_else(|| TapError::UnknownCell {
                side,
                id: id.to_string(),
            })?;
        let status = self.column(side).cell_at(index).status;
        if !status.is_tappable() {
            return Err(TapError::CellNotTappable {
                side,
                id: id.to_string(),
                status,
            });
        }
        if self.settling {
            return Err(TapError::TransitionPending { id: id.to_string() });
        }

        let other = side.opposite();
        let own_selected = self.column(side).selected();
        let other_selected = self.column(other).selected();

        match (own_selected, other_selected) {
            (None, None) => {
                self.column_mut(side).set_status(index, CellStatus::Selected);
                Ok(Effect::None)
            }
            (Some(selected), _) if selected == index => {
                self.column_mut(side).set_status(index, CellStatus::Normal);
                Ok(Effect::None)
            }
            (Some(selected), None) => {
                let column = self.column_mut(side);
                column.set_status(selected, CellStatus::Normal);
                column.set_status(index, CellStatus::Selected);
                Ok(Effect::None)
            }
            (None, Some(other_index)) => Ok(self.attempt_match(side, index, other_index)),
            (Some(_), Some(_)) => Err(TapError::InconsistentSelection {
                side,
                id: id.to_string(),
            }),
        }
    }

    fn attempt_match(
        &mut self,
        side: Side,
        index: usize,
        other_index: usize,
    ) -> Effect<PairFollowUp> {
        let (left_index, right_index) = match side {
            Side::Left => (index, other_index),
            Side::Right => (other_index, index),
        };
        let left_word = self.left.cell_at(left_index).id();
        let right_word = self.right.cell_at(right_index).id();
        let is_match = self.pairs.get(left_word).is_some_and(|word| word == right_word);

        tracing::debug!(left = left_word, right = right_word, is_match, "match attempt");

        let (status, follow_up) = if is_match {
            (CellStatus::Matched, PairFollowUp::FinalizeMatch)
        } else {
            (CellStatus::Error, PairFollowUp::FinalizeMismatch)
        };
        self.left.set_status(left_index, status);
        self.right.set_status(right_index, status);
        self.settling = true;
        Effect::delayed(follow_up)
    }

    /// Disable the matched pair. No-op when there is none.
    pub fn finalize_match(&mut self) {
        self.switch_pair(CellStatus::Matched, CellStatus::Disabled);
    }

    /// Reset the mismatched pair. No-op when there is none.
    pub fn finalize_mismatch(&mut self) {
        self.switch_pair(CellStatus::Error, CellStatus::Normal);
    }

    pub fn apply(&mut self, follow_up: PairFollowUp) {
        match follow_up {
            PairFollowUp::FinalizeMatch => self.finalize_match(),
            PairFollowUp::FinalizeMismatch => self.finalize_mismatch(),
        }
    }

    fn switch_pair(&mut self, from: CellStatus, to: CellStatus) {
        let (Some(left_index), Some(right_index)) =
            (self.left.first_with(from), self.right.first_with(from))
        else {
            tracing::trace!(%from, "no pair to finalize");
            return;
        };
        self.left.set_status(left_index, to);
        self.right.set_status(right_index, to);
        self.settling = false;
    }
}
