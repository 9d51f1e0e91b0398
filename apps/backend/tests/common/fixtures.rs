//! Test fixtures and factory functions for creating test data.

use exercise_core::{Exercise, ExerciseData, MatchThePairsData, PairSet, PronunciationData};

/// Match-the-pairs exercise over the given words.
pub fn pairs_exercise(id: &str, pairs: &[(&str, &str)]) -> Exercise {
    Exercise::new(
        id,
        ExerciseData::MatchThePairs(MatchThePairsData {
            prompt: None,
            pairs: pairs
                .iter()
                .map(|(left, right)| (left.to_string(), right.to_string()))
                .collect::<PairSet>(),
        }),
    )
}

pub fn pronunciation_exercise(id: &str, word: &str) -> Exercise {
    Exercise::new(
        id,
        ExerciseData::Pronunciation(PronunciationData {
            prompt: format!("Reci: {}", word),
            correct_answer: word.to_string(),
        }),
    )
}
