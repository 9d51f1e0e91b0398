//! Follow-up work returned by engines instead of being run by them.

use std::time::Duration;

/// Delay between a match/mismatch and its finalizing transition.
pub const TRANSITION_DURATION: Duration = Duration::from_secs(1);

/// What the caller must do after an engine call.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "delayed follow-ups must be scheduled"]
pub enum Effect<A> {
    None,
    /// Run `action` once `after` has elapsed on the caller's clock.
    Delayed { after: Duration, action: A },
}

impl<A> Effect<A> {
    pub fn delayed(action: A) -> Self {
        Self::Delayed {
            after: TRANSITION_DURATION,
            action,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn map<B>(self, f: impl FnOnce(A) -> B) -> Effect<B> {
        match self {
            Self::None => Effect::None,
            Self::Delayed { after, action } => Effect::Delayed {
                after,
                action: f(action),
            },
        }
    }
}

impl<A> Default for Effect<A> {
    fn default() -> Self {
        Self::None
    }
}
