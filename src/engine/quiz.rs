use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::content::Question;

/// Derived progress of a quiz session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizPhase {
    /// No answers recorded yet.
    Empty,
    /// Some questions answered, at least one still open.
    InProgress,
    /// Every question answered. The session stays open for review and retake.
    Complete,
}

/// Answer sheet for one topic's quiz.
///
/// `answers` maps question index to the chosen option index. Re-answering a
/// question overwrites the previous choice. `complete` is never written
/// directly; it is recomputed from the distinct answer count every time an
/// answer lands, so answering the same question twice cannot finish a quiz.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSession {
    answers: BTreeMap<usize, usize>,
    complete: bool,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `option` as the answer to `question`. Callers validate both
    /// indices against the catalog before this point.
    pub fn record(&mut self, question: usize, option: usize, question_count: usize) {
        self.answers.insert(question, option);
        self.complete = self.answers.len() == question_count;
    }

    /// Wipe the sheet for a retake. The session itself stays open.
    pub fn clear(&mut self) {
        self.answers.clear();
        self.complete = false;
    }

    pub fn answer(&self, question: usize) -> Option<usize> {
        self.answers.get(&question).copied()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn phase(&self) -> QuizPhase {
        if self.complete {
            QuizPhase::Complete
        } else if self.answers.is_empty() {
            QuizPhase::Empty
        } else {
            QuizPhase::InProgress
        }
    }

    /// First question without an answer, if any. Drives the focus jump after
    /// answering.
    pub fn first_unanswered(&self, question_count: usize) -> Option<usize> {
        (0..question_count).find(|q| !self.answers.contains_key(q))
    }

    /// Percentage of correct answers, rounded half-up. An empty sheet scores
    /// zero, unanswered questions count as wrong.
    pub fn score(&self, questions: &[Question]) -> u8 {
        if questions.is_empty() || self.answers.is_empty() {
            return 0;
        }
        let correct = questions
            .iter()
            .enumerate()
            .filter(|(idx, question)| self.answer(*idx) == Some(question.correct))
            .count();
        ((correct as f64 / questions.len() as f64) * 100.0).round() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions(correct: &[usize]) -> Vec<Question> {
        correct
            .iter()
            .map(|&answer| Question {
                prompt: String::from("?"),
                options: vec![
                    String::from("a"),
                    String::from("b"),
                    String::from("c"),
                    String::from("d"),
                ],
                correct: answer,
            })
            .collect()
    }

    #[test]
    fn test_fresh_session_is_empty() {
        let session = QuizSession::new();
        assert_eq!(session.phase(), QuizPhase::Empty);
        assert_eq!(session.answered_count(), 0);
        assert!(!session.is_complete());
    }

    #[test]
    fn test_reanswering_overwrites() {
        let mut session = QuizSession::new();
        session.record(0, 1, 2);
        session.record(0, 3, 2);
        assert_eq!(session.answer(0), Some(3));
        assert_eq!(session.answered_count(), 1);
    }

    #[test]
    fn test_completion_needs_distinct_questions() {
        let mut session = QuizSession::new();
        session.record(0, 1, 2);
        session.record(0, 2, 2);
        assert_eq!(session.phase(), QuizPhase::InProgress);
        session.record(1, 0, 2);
        assert_eq!(session.phase(), QuizPhase::Complete);
    }

    #[test]
    fn test_clear_reopens_the_sheet() {
        let mut session = QuizSession::new();
        session.record(0, 0, 1);
        assert!(session.is_complete());
        session.clear();
        assert_eq!(session.phase(), QuizPhase::Empty);
        assert_eq!(session.answer(0), None);
    }

    #[test]
    fn test_first_unanswered_skips_recorded() {
        let mut session = QuizSession::new();
        session.record(1, 0, 3);
        assert_eq!(session.first_unanswered(3), Some(0));
        session.record(0, 0, 3);
        assert_eq!(session.first_unanswered(3), Some(2));
        session.record(2, 0, 3);
        assert_eq!(session.first_unanswered(3), None);
    }

    #[test]
    fn test_score_all_correct() {
        let qs = questions(&[2, 1]);
        let mut session = QuizSession::new();
        session.record(0, 2, 2);
        session.record(1, 1, 2);
        assert_eq!(session.score(&qs), 100);
    }

    #[test]
    fn test_score_half_correct() {
        let qs = questions(&[2, 1]);
        let mut session = QuizSession::new();
        session.record(0, 2, 2);
        session.record(1, 0, 2);
        assert_eq!(session.score(&qs), 50);
    }

    #[test]
    fn test_score_empty_sheet_is_zero() {
        let qs = questions(&[0, 0]);
        assert_eq!(QuizSession::new().score(&qs), 0);
    }

    #[test]
    fn test_score_with_no_questions_is_zero() {
        assert_eq!(QuizSession::new().score(&[]), 0);
    }

    #[test]
    fn test_score_counts_unanswered_as_wrong() {
        let qs = questions(&[0, 1, 2]);
        let mut session = QuizSession::new();
        session.record(0, 0, 3);
        assert_eq!(session.score(&qs), 33);
    }

    #[test]
    fn test_score_rounds_half_up() {
        // 1 of 8 correct is 12.5%, which rounds to 13.
        let qs = questions(&[0; 8]);
        let mut session = QuizSession::new();
        for idx in 0..8 {
            session.record(idx, if idx == 0 { 0 } else { 3 }, 8);
        }
        assert_eq!(session.score(&qs), 13);
    }

    #[test]
    fn test_score_rounds_two_thirds_up() {
        let qs = questions(&[0, 0, 0]);
        let mut session = QuizSession::new();
        session.record(0, 0, 3);
        session.record(1, 0, 3);
        session.record(2, 1, 3);
        assert_eq!(session.score(&qs), 67);
    }
}
