//! API request and response types

use serde::{Deserialize, Serialize};

// Re-export shared types from exercise-core
pub use exercise_core::types::{Exercise, ExerciseData, ExerciseKind};

/// Query for GET /exercises
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExerciseListQuery {
    /// Wire name of an exercise kind, e.g. `matchThePairs`.
    pub kind: Option<String>,
}

impl ExerciseListQuery {
    /// Parse the kind filter. `Err` carries the unrecognized value.
    pub fn kind(&self) -> Result<Option<ExerciseKind>, String> {
        self.kind
            .as_deref()
            .map(|kind| ExerciseKind::from_str(kind).ok_or_else(|| kind.to_string()))
            .transpose()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseListResponse {
    pub exercises: Vec<Exercise>,
}
