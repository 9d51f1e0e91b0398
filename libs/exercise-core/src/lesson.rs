//! Lesson progression: a start screen, the exercises in order, and a
//! completion screen.
//!
//! The lesson owns one engine per exercise and a [`Timeline`] for their
//! delayed follow-ups. Callers forward taps and advance time; the lesson
//! moves to the next exercise once the current one reports completion and
//! shows the completion screen one transition after the last.

use std::time::Duration;

use rand::Rng;

use crate::cell::Side;
use crate::choice::{ChoiceFollowUp, MultipleChoiceEngine};
use crate::effect::TRANSITION_DURATION;
use crate::error::{ExerciseError, Result};
use crate::pairs::{PairFollowUp, PairMatchingEngine};
use crate::timeline::Timeline;
use crate::types::{Exercise, ExerciseData};

/// Interactive state of one exercise.
#[derive(Debug, Clone)]
pub enum ExerciseEngine {
    MatchThePairs(PairMatchingEngine),
    MultipleChoice(MultipleChoiceEngine),
}

impl ExerciseEngine {
    /// Build the engine for an exercise.
    ///
    /// Fill-in-the-blank and pronunciation exercises have no engine.
    pub fn from_exercise<R: Rng + ?Sized>(exercise: &Exercise, rng: &mut R) -> Result<Self> {
        match &exercise.data {
            ExerciseData::MatchThePairs(data) => Ok(Self::MatchThePairs(
                PairMatchingEngine::with_rng(data.clone(), rng)?,
            )),
            ExerciseData::MultipleChoice(data) => Ok(Self::MultipleChoice(
                MultipleChoiceEngine::new(data.clone())?,
            )),
            other => Err(ExerciseError::UnsupportedExercise {
                id: exercise.id.clone(),
                kind: other.kind(),
            }),
        }
    }

    pub fn is_complete(&self) -> bool {
        match self {
            Self::MatchThePairs(engine) => engine.is_complete(),
            Self::MultipleChoice(engine) => engine.is_complete(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LessonExercise {
    pub id: String,
    pub engine: ExerciseEngine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Start,
    Exercise,
    Completed,
}

/// Work parked on the lesson timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonFollowUp {
    Pairs { index: usize, action: PairFollowUp },
    Choice { index: usize, action: ChoiceFollowUp },
    CompleteLesson,
}

/// Signals for the lesson's owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonEvent {
    ExerciseCompleted { id: String },
    Completed,
    Close,
}

#[derive(Debug)]
pub struct Lesson {
    exercises: Vec<LessonExercise>,
    cursor: usize,
    screen: Screen,
    timeline: Timeline<LessonFollowUp>,
}

impl Lesson {
    pub fn new(exercises: &[Exercise]) -> Result<Self> {
        Self::with_rng(exercises, &mut rand::rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(exercises: &[Exercise], rng: &mut R) -> Result<Self> {
        if exercises.is_empty() {
            return Err(ExerciseError::EmptyLesson);
        }
        let exercises = exercises
            .iter()
            .map(|exercise| {
                Ok(LessonExercise {
                    id: exercise.id.clone(),
                    engine: ExerciseEngine::from_exercise(exercise, rng)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            exercises,
            cursor: 0,
            screen: Screen::Start,
            timeline: Timeline::new(),
        })
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn exercises(&self) -> &[LessonExercise] {
        &self.exercises
    }

    /// Share of exercises completed, from 0.0 to 1.0.
    pub fn progress(&self) -> f64 {
        self.cursor as f64 / self.exercises.len() as f64
    }

    /// Exercise on screen, if any.
    pub fn current_exercise(&self) -> Option<&LessonExercise> {
        self.current_index().map(|index| &self.exercises[index])
    }

    fn current_index(&self) -> Option<usize> {
        (self.screen == Screen::Exercise && self.cursor < self.exercises.len())
            .then_some(self.cursor)
    }

    pub fn now(&self) -> Duration {
        self.timeline.now()
    }

    /// Leave the start screen for the first exercise.
    pub fn start(&mut self) {
        if self.screen == Screen::Start {
            self.screen = Screen::Exercise;
        }
    }

    pub fn tap_pair(&mut self, side: Side, id: &str) {
        let Some(index) = self.current_index() else {
            tracing::debug!(id, "pair tap outside of an exercise");
            return;
        };
        let ExerciseEngine::MatchThePairs(engine) = &mut self.exercises[index].engine else {
            tracing::debug!(id, "pair tap on a non-pairs exercise");
            return;
        };
        let effect = engine
            .tap(side, id)
            .map(|action| LessonFollowUp::Pairs { index, action });
        self.timeline.schedule_effect(effect);
    }

    pub fn tap_option(&mut self, id: &str) {
        let Some(index) = self.current_index() else {
            tracing::debug!(id, "option tap outside of an exercise");
            return;
        };
        let ExerciseEngine::MultipleChoice(engine) = &mut self.exercises[index].engine else {
            tracing::debug!(id, "option tap on a non-choice exercise");
            return;
        };
        let effect = engine
            .tap(id)
            .map(|action| LessonFollowUp::Choice { index, action });
        self.timeline.schedule_effect(effect);
    }

    /// Move past the current exercise.
    ///
    /// After the last one the completion screen follows one transition
    /// later; otherwise the next exercise is shown right away.
    pub fn current_exercise_complete(&mut self) -> Option<LessonEvent> {
        let index = self.current_index()?;
        let id = self.exercises[index].id.clone();
        self.cursor += 1;
        tracing::info!(exercise = %id, cursor = self.cursor, "exercise complete");
        if self.cursor == self.exercises.len() {
            self.timeline
                .schedule(TRANSITION_DURATION, LessonFollowUp::CompleteLesson);
        }
        Some(LessonEvent::ExerciseCompleted { id })
    }

    /// Advance the clock, running every follow-up that comes due.
    pub fn advance(&mut self, by: Duration) -> Vec<LessonEvent> {
        let until = self.timeline.now() + by;
        let mut events = Vec::new();
        while let Some(follow_up) = self.timeline.pop_due(until) {
            self.apply(follow_up, &mut events);
        }
        self.timeline.settle(until);
        events
    }

    fn apply(&mut self, follow_up: LessonFollowUp, events: &mut Vec<LessonEvent>) {
        let completed_index = match follow_up {
            LessonFollowUp::Pairs { index, action } => match &mut self.exercises[index].engine {
                ExerciseEngine::MatchThePairs(engine) => {
                    engine.apply(action);
                    engine.is_complete().then_some(index)
                }
                ExerciseEngine::MultipleChoice(_) => None,
            },
            LessonFollowUp::Choice { index, action } => match &mut self.exercises[index].engine {
                ExerciseEngine::MultipleChoice(engine) => engine.apply(&action).then_some(index),
                ExerciseEngine::MatchThePairs(_) => None,
            },
            LessonFollowUp::CompleteLesson => {
                self.screen = Screen::Completed;
                tracing::info!("lesson complete");
                events.push(LessonEvent::Completed);
                None
            }
        };

        if completed_index.is_some() && completed_index == self.current_index() {
            events.extend(self.current_exercise_complete());
        }
    }

    /// Continue from the completion screen.
    pub fn continue_tapped(&mut self) -> Option<LessonEvent> {
        (self.screen == Screen::Completed).then_some(LessonEvent::Close)
    }

    /// Follow-ups still waiting on the timeline.
    pub fn pending(&self) -> usize {
        self.timeline.pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellStatus;
    use crate::types::{FillInTheBlankData, MatchThePairsData, MultipleChoiceData, PairSet};
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn choice() -> Exercise {
        Exercise::new(
            "ex1",
            ExerciseData::MultipleChoice(MultipleChoiceData {
                question: "What does 'pas' mean in English?".into(),
                options: vec!["dog".into(), "cat".into(), "bird".into()],
                correct_answer: "dog".into(),
            }),
        )
    }

    fn pairs() -> Exercise {
        Exercise::new(
            "ex2",
            ExerciseData::MatchThePairs(MatchThePairsData {
                prompt: None,
                pairs: PairSet::from([
                    ("pas".to_string(), "dog".to_string()),
                    ("mačka".to_string(), "cat".to_string()),
                ]),
            }),
        )
    }

    fn lesson() -> Lesson {
        Lesson::with_rng(&[choice(), pairs()], &mut StdRng::seed_from_u64(1)).unwrap()
    }

    fn pairs_status(lesson: &Lesson, side: Side, id: &str) -> Option<CellStatus> {
        match &lesson.current_exercise()?.engine {
            ExerciseEngine::MatchThePairs(engine) => engine.status(side, id),
            ExerciseEngine::MultipleChoice(_) => None,
        }
    }

    #[test]
    fn test_rejects_empty_and_unsupported() {
        assert_eq!(Lesson::new(&[]).unwrap_err(), ExerciseError::EmptyLesson);

        let blank = Exercise::new(
            "ex3",
            ExerciseData::FillInTheBlank(FillInTheBlankData {
                sentence: "Ovo je ___.".into(),
                correct_answer: "pas".into(),
            }),
        );
        assert!(matches!(
            Lesson::new(&[choice(), blank]),
            Err(ExerciseError::UnsupportedExercise { .. })
        ));
    }

    #[test]
    fn test_taps_ignored_before_start() {
        let mut lesson = lesson();
        lesson.tap_option("dog");
        assert_eq!(lesson.pending(), 0);
        assert_eq!(lesson.screen(), Screen::Start);
        assert!(lesson.current_exercise().is_none());
    }

    #[test]
    fn test_full_lesson() {
        let mut lesson = lesson();
        lesson.start();
        assert_eq!(lesson.screen(), Screen::Exercise);
        assert_eq!(lesson.current_exercise().map(|e| e.id.as_str()), Some("ex1"));

        // Wrong answer first, then the right one.
        lesson.tap_option("cat");
        assert!(lesson.advance(TRANSITION_DURATION).is_empty());
        lesson.tap_option("dog");
        assert_eq!(
            lesson.advance(TRANSITION_DURATION),
            vec![LessonEvent::ExerciseCompleted { id: "ex1".into() }]
        );
        assert_eq!(lesson.current_exercise().map(|e| e.id.as_str()), Some("ex2"));
        assert_eq!(lesson.progress(), 0.5);

        lesson.tap_pair(Side::Left, "pas");
        lesson.tap_pair(Side::Right, "dog");
        lesson.tap_pair(Side::Left, "mačka");
        assert_eq!(pairs_status(&lesson, Side::Left, "mačka"), Some(CellStatus::Normal));
        assert!(lesson.advance(TRANSITION_DURATION).is_empty());

        lesson.tap_pair(Side::Left, "mačka");
        lesson.tap_pair(Side::Right, "cat");
        assert_eq!(
            lesson.advance(TRANSITION_DURATION),
            vec![LessonEvent::ExerciseCompleted { id: "ex2".into() }]
        );
        assert_eq!(lesson.progress(), 1.0);
        assert_eq!(lesson.screen(), Screen::Exercise);
        assert_eq!(lesson.continue_tapped(), None);

        assert_eq!(lesson.advance(TRANSITION_DURATION), vec![LessonEvent::Completed]);
        assert_eq!(lesson.screen(), Screen::Completed);
        assert_eq!(lesson.continue_tapped(), Some(LessonEvent::Close));
    }

    #[test]
    fn test_finalize_waits_full_transition() {
        let mut lesson = lesson();
        lesson.start();
        lesson.current_exercise_complete();

        lesson.tap_pair(Side::Left, "pas");
        lesson.tap_pair(Side::Right, "cat");
        assert_eq!(pairs_status(&lesson, Side::Left, "pas"), Some(CellStatus::Error));

        let _ = lesson.advance(Duration::from_millis(900));
        assert_eq!(pairs_status(&lesson, Side::Left, "pas"), Some(CellStatus::Error));
        assert_eq!(pairs_status(&lesson, Side::Right, "cat"), Some(CellStatus::Error));

        let _ = lesson.advance(Duration::from_millis(100));
        assert_eq!(pairs_status(&lesson, Side::Left, "pas"), Some(CellStatus::Normal));
        assert_eq!(pairs_status(&lesson, Side::Right, "cat"), Some(CellStatus::Normal));
    }

    #[test]
    fn test_completion_in_one_long_advance() {
        let mut lesson = lesson();
        lesson.start();
        lesson.tap_option("dog");
        let _ = lesson.advance(TRANSITION_DURATION);

        lesson.tap_pair(Side::Left, "pas");
        lesson.tap_pair(Side::Right, "dog");
        let _ = lesson.advance(TRANSITION_DURATION);
        lesson.tap_pair(Side::Right, "cat");
        lesson.tap_pair(Side::Left, "mačka");

        let events = lesson.advance(Duration::from_secs(5));
        assert_eq!(
            events,
            vec![
                LessonEvent::ExerciseCompleted { id: "ex2".into() },
                LessonEvent::Completed,
            ]
        );
        assert_eq!(lesson.now(), Duration::from_secs(7));
    }

    #[test]
    fn test_wrong_kind_tap_is_ignored() {
        let mut lesson = lesson();
        lesson.start();
        lesson.tap_pair(Side::Left, "pas");
        assert_eq!(lesson.pending(), 0);
    }
}
