//! Exercise payloads shared by the backend and clients.

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ExerciseError, Result};

/// Ground truth for a match-the-pairs exercise: left word to right word.
///
/// Insertion order is kept; it is the order of the Left column.
pub type PairSet = IndexMap<String, String>;

/// For multiple-choice exercises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipleChoiceData {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl MultipleChoiceData {
    /// Check that the options are distinct and contain the correct answer.
    pub fn validate(&self) -> Result<()> {
        if self.options.is_empty() {
            return Err(ExerciseError::NoOptions);
        }
        let mut seen = HashSet::new();
        for option in &self.options {
            if !seen.insert(option.as_str()) {
                return Err(ExerciseError::DuplicateOption {
                    option: option.clone(),
                });
            }
        }
        if !seen.contains(self.correct_answer.as_str()) {
            return Err(ExerciseError::AnswerNotInOptions {
                answer: self.correct_answer.clone(),
            });
        }
        Ok(())
    }
}

/// For fill-in-the-blank exercises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillInTheBlankData {
    pub sentence: String,
    pub correct_answer: String,
}

/// For "match the pairs" exercises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchThePairsData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    pub pairs: PairSet,
}

impl MatchThePairsData {
    /// Check that the pair set can back two columns of uniquely labeled cells.
    pub fn validate(&self) -> Result<()> {
        if self.pairs.is_empty() {
            return Err(ExerciseError::EmptyPairs);
        }
        let mut right_words = HashSet::new();
        for (left, right) in &self.pairs {
            if left.is_empty() || right.is_empty() {
                return Err(ExerciseError::EmptyWord);
            }
            if !right_words.insert(right.as_str()) {
                return Err(ExerciseError::DuplicateRightWord {
                    word: right.clone(),
                });
            }
        }
        Ok(())
    }
}

/// For pronunciation exercises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PronunciationData {
    pub prompt: String,
    pub correct_answer: String,
}

/// Exercise discriminator, as written in the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExerciseKind {
    MultipleChoice,
    FillInTheBlank,
    MatchThePairs,
    Pronunciation,
}

impl ExerciseKind {
    /// Get the kind name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MultipleChoice => "multipleChoice",
            Self::FillInTheBlank => "fillInTheBlank",
            Self::MatchThePairs => "matchThePairs",
            Self::Pronunciation => "pronunciation",
        }
    }

    /// Parse from the wire name.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "multipleChoice" => Some(Self::MultipleChoice),
            "fillInTheBlank" => Some(Self::FillInTheBlank),
            "matchThePairs" => Some(Self::MatchThePairs),
            "pronunciation" => Some(Self::Pronunciation),
            _ => None,
        }
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The different types of exercises, each with its own data struct.
///
/// On the wire the payload sits next to the `type` field under a key equal
/// to the type name:
/// `{"type": "matchThePairs", "matchThePairs": {"pairs": {...}}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ExerciseDataRepr", into = "ExerciseDataRepr")]
pub enum ExerciseData {
    MultipleChoice(MultipleChoiceData),
    FillInTheBlank(FillInTheBlankData),
    MatchThePairs(MatchThePairsData),
    Pronunciation(PronunciationData),
}

impl ExerciseData {
    pub fn kind(&self) -> ExerciseKind {
        match self {
            Self::MultipleChoice(_) => ExerciseKind::MultipleChoice,
            Self::FillInTheBlank(_) => ExerciseKind::FillInTheBlank,
            Self::MatchThePairs(_) => ExerciseKind::MatchThePairs,
            Self::Pronunciation(_) => ExerciseKind::Pronunciation,
        }
    }

    /// Validate the payload. Kinds without rules always pass.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::MultipleChoice(data) => data.validate(),
            Self::MatchThePairs(data) => data.validate(),
            Self::FillInTheBlank(_) | Self::Pronunciation(_) => Ok(()),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExerciseDataRepr {
    #[serde(rename = "type")]
    kind: ExerciseKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    multiple_choice: Option<MultipleChoiceData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fill_in_the_blank: Option<FillInTheBlankData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    match_the_pairs: Option<MatchThePairsData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pronunciation: Option<PronunciationData>,
}

impl ExerciseDataRepr {
    fn empty(kind: ExerciseKind) -> Self {
        Self {
            kind,
            multiple_choice: None,
            fill_in_the_blank: None,
            match_the_pairs: None,
            pronunciation: None,
        }
    }
}

impl TryFrom<ExerciseDataRepr> for ExerciseData {
    type Error = ExerciseError;

    fn try_from(repr: ExerciseDataRepr) -> Result<Self> {
        let kind = repr.kind;
        let data = match kind {
            ExerciseKind::MultipleChoice => repr.multiple_choice.map(Self::MultipleChoice),
            ExerciseKind::FillInTheBlank => repr.fill_in_the_blank.map(Self::FillInTheBlank),
            ExerciseKind::MatchThePairs => repr.match_the_pairs.map(Self::MatchThePairs),
            ExerciseKind::Pronunciation => repr.pronunciation.map(Self::Pronunciation),
        };
        data.ok_or(ExerciseError::MissingPayload { kind })
    }
}

impl From<ExerciseData> for ExerciseDataRepr {
    fn from(data: ExerciseData) -> Self {
        let mut repr = Self::empty(data.kind());
        match data {
            ExerciseData::MultipleChoice(d) => repr.multiple_choice = Some(d),
            ExerciseData::FillInTheBlank(d) => repr.fill_in_the_blank = Some(d),
            ExerciseData::MatchThePairs(d) => repr.match_the_pairs = Some(d),
            ExerciseData::Pronunciation(d) => repr.pronunciation = Some(d),
        }
        repr
    }
}

/// Top-level exercise: an ID and one kind of exercise data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub data: ExerciseData,
}

impl Exercise {
    pub fn new(id: impl Into<String>, data: ExerciseData) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }
}
