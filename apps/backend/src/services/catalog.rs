//! In-memory exercise catalog.

use std::path::{Path, PathBuf};

use exercise_core::{
    Exercise, ExerciseData, ExerciseError, ExerciseKind, MatchThePairsData, MultipleChoiceData,
    PairSet,
};
use indexmap::IndexMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid exercise {id}: {source}")]
    Invalid { id: String, source: ExerciseError },
    #[error(transparent)]
    Duplicate(ExerciseError),
}

/// Exercises keyed by ID, in catalog order.
#[derive(Debug, Clone)]
pub struct Catalog {
    exercises: IndexMap<String, Exercise>,
}

impl Catalog {
    /// The exercises shipped with the service.
    pub fn builtin() -> Self {
        let exercises = [
            Exercise::new(
                "ex1",
                ExerciseData::MultipleChoice(MultipleChoiceData {
                    question: "What does 'pas' mean in English?".to_string(),
                    options: vec!["dog".to_string(), "cat".to_string(), "bird".to_string()],
                    correct_answer: "dog".to_string(),
                }),
            ),
            Exercise::new(
                "ex2",
                ExerciseData::MatchThePairs(MatchThePairsData {
                    prompt: Some(
                        "Match these Serbian words to their English translations:".to_string(),
                    ),
                    pairs: PairSet::from([
                        ("mačka".to_string(), "cat".to_string()),
                        ("pas".to_string(), "dog".to_string()),
                        ("kuća".to_string(), "house".to_string()),
                    ]),
                }),
            ),
        ];

        Self {
            exercises: exercises
                .into_iter()
                .map(|exercise| (exercise.id.clone(), exercise))
                .collect(),
        }
    }

    /// Build a catalog, validating every exercise and rejecting duplicate IDs.
    pub fn from_exercises(exercises: Vec<Exercise>) -> Result<Self, CatalogError> {
        let mut map = IndexMap::with_capacity(exercises.len());
        for exercise in exercises {
            exercise
                .data
                .validate()
                .map_err(|source| CatalogError::Invalid {
                    id: exercise.id.clone(),
                    source,
                })?;
            if map.contains_key(&exercise.id) {
                return Err(CatalogError::Duplicate(ExerciseError::DuplicateExerciseId {
                    id: exercise.id,
                }));
            }
            map.insert(exercise.id.clone(), exercise);
        }
        Ok(Self { exercises: map })
    }

    /// Parse a JSON array of exercises.
    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let exercises: Vec<Exercise> = serde_json::from_str(content)?;
        Self::from_exercises(exercises)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn get(&self, id: &str) -> Option<&Exercise> {
        self.exercises.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Exercise> {
        self.exercises.values()
    }

    /// Exercises of one kind, in catalog order.
    pub fn of_kind(&self, kind: ExerciseKind) -> impl Iterator<Item = &Exercise> {
        self.iter().filter(move |exercise| exercise.data.kind() == kind)
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }
}
