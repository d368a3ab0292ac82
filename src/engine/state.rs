use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::content::Catalog;
use crate::engine::exercise::ExerciseBank;
use crate::engine::quiz::QuizSession;
use crate::engine::topic::{Screen, Topic};

/// Where the user is. A quiz is not a flag on top of a screen; while one is
/// open it *is* the view, so "on a screen with a quiz somewhere else" cannot
/// be expressed at all.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum View {
    Screen(Screen),
    Quiz { topic: Topic, session: QuizSession },
}

impl Default for View {
    fn default() -> Self {
        View::Screen(Screen::Intro)
    }
}

/// Every way the lesson state can change, as data. The key handlers build
/// these; `LessonState::apply` is the only interpreter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    GoTo(Screen),
    StartQuiz(Topic),
    CloseQuiz,
    Answer {
        topic: Topic,
        question: usize,
        option: usize,
    },
    Retake(Topic),
    ApplyPasswordCategory(usize),
    SelectBehaviorChoice(usize),
    AcknowledgePhishingItem(usize),
    CollectDataItem(usize),
    MarkDeviceProtected,
}

/// A rejected transition. The state is untouched whenever one of these comes
/// back.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("no quiz in progress for {0}")]
    QuizNotActive(Topic),
    #[error("question {index} out of range for {topic} ({count} questions)")]
    QuestionOutOfRange {
        topic: Topic,
        index: usize,
        count: usize,
    },
    #[error("option {index} out of range for question {question} ({count} options)")]
    OptionOutOfRange {
        question: usize,
        index: usize,
        count: usize,
    },
}

/// The whole lesson in one value: the current view plus exercise progress.
///
/// Exercise progress deliberately lives outside the view. Navigating away,
/// opening a quiz, or retaking one never rolls an exercise back.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonState {
    view: View,
    exercises: ExerciseBank,
}

impl LessonState {
    pub fn new() -> Self {
        Self {
            view: View::default(),
            exercises: ExerciseBank::new(),
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    /// Current screen, `None` while a quiz is open.
    pub fn screen(&self) -> Option<Screen> {
        match self.view {
            View::Screen(screen) => Some(screen),
            View::Quiz { .. } => None,
        }
    }

    pub fn active_quiz(&self) -> Option<(Topic, &QuizSession)> {
        match &self.view {
            View::Quiz { topic, session } => Some((*topic, session)),
            View::Screen(_) => None,
        }
    }

    pub fn exercises(&self) -> &ExerciseBank {
        &self.exercises
    }

    /// Jump straight to a screen. Always succeeds; an open quiz session is
    /// dropped on the floor, answers and all.
    pub fn go_to(&mut self, screen: Screen) {
        self.view = View::Screen(screen);
    }

    /// Open a fresh answer sheet for `topic`. Starting over an already open
    /// quiz restarts it from scratch.
    pub fn start_quiz(&mut self, topic: Topic) {
        self.view = View::Quiz {
            topic,
            session: QuizSession::new(),
        };
    }

    /// Put the quiz away and stand back on the topic screen it belongs to.
    /// Without an open quiz this does nothing.
    pub fn close_quiz(&mut self) {
        if let View::Quiz { topic, .. } = &self.view {
            self.view = View::Screen(Screen::Topic(*topic));
        }
    }

    /// Record an answer on the open quiz. The quiz must be open for the same
    /// topic and both indices must exist in the catalog; any violation is
    /// reported without touching the sheet.
    pub fn answer(
        &mut self,
        catalog: &Catalog,
        topic: Topic,
        question: usize,
        option: usize,
    ) -> Result<(), TransitionError> {
        let active = match &self.view {
            View::Quiz { topic, .. } => *topic,
            View::Screen(_) => return Err(TransitionError::QuizNotActive(topic)),
        };
        if active != topic {
            return Err(TransitionError::QuizNotActive(topic));
        }

        let questions = catalog.questions(topic);
        if question >= questions.len() {
            return Err(TransitionError::QuestionOutOfRange {
                topic,
                index: question,
                count: questions.len(),
            });
        }
        let option_count = questions[question].options.len();
        if option >= option_count {
            return Err(TransitionError::OptionOutOfRange {
                question,
                index: option,
                count: option_count,
            });
        }

        if let View::Quiz { session, .. } = &mut self.view {
            session.record(question, option, questions.len());
        }
        Ok(())
    }

    /// Wipe the open quiz's answers for another attempt. The session stays
    /// open; only the sheet is cleared.
    pub fn retake(&mut self, topic: Topic) -> Result<(), TransitionError> {
        match &mut self.view {
            View::Quiz {
                topic: active,
                session,
            } if *active == topic => {
                session.clear();
                Ok(())
            }
            _ => Err(TransitionError::QuizNotActive(topic)),
        }
    }

    /// Apply one password category's points. Unknown indices are ignored.
    pub fn apply_password_category(&mut self, catalog: &Catalog, index: usize) {
        if let Some(category) = catalog.password_categories.get(index) {
            self.exercises.add_password_points(category.points);
        }
    }

    pub fn select_behavior_choice(&mut self, choice: usize) {
        self.exercises.select_behavior(choice);
    }

    /// Flag a phishing message. Only messages the catalog marks as fake
    /// score; unknown indices are ignored.
    pub fn acknowledge_phishing_item(&mut self, catalog: &Catalog, index: usize) {
        if let Some(message) = catalog.phishing_messages.get(index) {
            self.exercises.acknowledge_phishing(message.fake);
        }
    }

    /// Try to collect a data item. Unsafe items bounce off silently, unknown
    /// indices are ignored.
    pub fn collect_data_item(&mut self, catalog: &Catalog, index: usize) {
        if let Some(item) = catalog.data_items.get(index) {
            self.exercises.collect_data_item(index, item.safe);
        }
    }

    pub fn mark_device_protected(&mut self) {
        self.exercises.mark_device_protected();
    }

    /// Single entry point for every state change. Navigation and exercise
    /// events are infallible; quiz events can be rejected.
    pub fn apply(&mut self, catalog: &Catalog, event: Event) -> Result<(), TransitionError> {
        match event {
            Event::GoTo(screen) => self.go_to(screen),
            Event::StartQuiz(topic) => self.start_quiz(topic),
            Event::CloseQuiz => self.close_quiz(),
            Event::Answer {
                topic,
                question,
                option,
            } => return self.answer(catalog, topic, question, option),
            Event::Retake(topic) => return self.retake(topic),
            Event::ApplyPasswordCategory(index) => self.apply_password_category(catalog, index),
            Event::SelectBehaviorChoice(choice) => self.select_behavior_choice(choice),
            Event::AcknowledgePhishingItem(index) => self.acknowledge_phishing_item(catalog, index),
            Event::CollectDataItem(index) => self.collect_data_item(catalog, index),
            Event::MarkDeviceProtected => self.mark_device_protected(),
        }
        Ok(())
    }
}
