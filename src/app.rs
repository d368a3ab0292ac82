use crate::config::Config;
use crate::content::Catalog;
use crate::engine::topic::{Screen, Topic};
use crate::engine::{Event, LessonState, TransitionError};
use crate::ui::components::exercise::ExercisePanel;
use crate::ui::components::menu::Menu;
use crate::ui::theme::Theme;

/// Top-level application state: the lesson engine plus everything the
/// terminal shell needs around it (catalog, theme, cursors).
///
/// The cursors live here and not in the engine because they are purely a
/// presentation concern. Resetting them on navigation never touches lesson
/// progress.
pub struct App {
    pub state: LessonState,
    pub catalog: Catalog,
    pub config: Config,
    pub theme: &'static Theme,
    pub menu: Menu<'static>,
    pub exercise_cursor: usize,
    pub quiz_focus: usize,
    pub quiz_cursor: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(catalog: Catalog) -> Self {
        let config = Config::load().unwrap_or_default();
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));
        let menu = Menu::from_catalog(theme, &catalog);

        Self {
            state: LessonState::new(),
            catalog,
            config,
            theme,
            menu,
            exercise_cursor: 0,
            quiz_focus: 0,
            quiz_cursor: 0,
            should_quit: false,
        }
    }

    /// Topic under the user's feet, if they stand on a topic screen.
    pub fn current_topic(&self) -> Option<Topic> {
        self.state.screen().and_then(Screen::quiz_topic)
    }

    /// Everything the key handlers do to the lesson goes through here as an
    /// event. Navigation and exercise events cannot fail; quiz events can,
    /// and callers gate their cursor bookkeeping on the result.
    fn dispatch(&mut self, event: Event) -> Result<(), TransitionError> {
        self.state.apply(&self.catalog, event)
    }

    pub fn go_to(&mut self, screen: Screen) {
        let _ = self.dispatch(Event::GoTo(screen));
        self.exercise_cursor = 0;
    }

    pub fn go_next(&mut self) {
        if let Some(next) = self.state.screen().and_then(Screen::next) {
            self.go_to(next);
        }
    }

    pub fn go_prev(&mut self) {
        if let Some(prev) = self.state.screen().and_then(Screen::prev) {
            self.go_to(prev);
        }
    }

    pub fn open_quiz(&mut self) {
        if let Some(topic) = self.current_topic() {
            let _ = self.dispatch(Event::StartQuiz(topic));
            self.quiz_focus = 0;
            self.quiz_cursor = 0;
        }
    }

    pub fn close_quiz(&mut self) {
        let _ = self.dispatch(Event::CloseQuiz);
        self.exercise_cursor = 0;
    }

    /// Clear the sheet for another run. A perfect score keeps the result on
    /// screen; there is nothing left to improve.
    pub fn retake_quiz(&mut self) {
        let Some((topic, session)) = self.state.active_quiz() else {
            return;
        };
        if session.score(self.catalog.questions(topic)) >= 100 {
            return;
        }
        let _ = self.dispatch(Event::Retake(topic));
        self.quiz_focus = 0;
        self.quiz_cursor = 0;
    }

    /// Answer the focused question, then jump focus to the first question
    /// still open so the sheet fills front to back.
    pub fn answer_current(&mut self, option: usize) {
        let Some((topic, session)) = self.state.active_quiz() else {
            return;
        };
        if session.is_complete() {
            return;
        }
        let question = self.quiz_focus;
        let answered = self.dispatch(Event::Answer {
            topic,
            question,
            option,
        });
        if answered.is_ok() {
            if let Some((_, session)) = self.state.active_quiz() {
                if let Some(next) = session.first_unanswered(self.catalog.question_count(topic)) {
                    self.quiz_focus = next;
                    self.quiz_cursor = 0;
                }
            }
        }
    }

    pub fn quiz_focus_next(&mut self) {
        if let Some((topic, _)) = self.state.active_quiz() {
            let count = self.catalog.question_count(topic);
            if count > 0 {
                self.quiz_focus = (self.quiz_focus + 1) % count;
                self.quiz_cursor = 0;
            }
        }
    }

    pub fn quiz_focus_prev(&mut self) {
        if let Some((topic, _)) = self.state.active_quiz() {
            let count = self.catalog.question_count(topic);
            if count > 0 {
                self.quiz_focus = if self.quiz_focus == 0 {
                    count - 1
                } else {
                    self.quiz_focus - 1
                };
                self.quiz_cursor = 0;
            }
        }
    }

    fn focused_option_count(&self) -> usize {
        self.state
            .active_quiz()
            .map(|(topic, _)| {
                self.catalog
                    .questions(topic)
                    .get(self.quiz_focus)
                    .map(|q| q.options.len())
                    .unwrap_or(0)
            })
            .unwrap_or(0)
    }

    pub fn quiz_cursor_next(&mut self) {
        let count = self.focused_option_count();
        if count > 0 {
            self.quiz_cursor = (self.quiz_cursor + 1) % count;
        }
    }

    pub fn quiz_cursor_prev(&mut self) {
        let count = self.focused_option_count();
        if count > 0 {
            self.quiz_cursor = if self.quiz_cursor == 0 {
                count - 1
            } else {
                self.quiz_cursor - 1
            };
        }
    }

    pub fn exercise_item_count(&self) -> usize {
        self.current_topic()
            .map(|topic| ExercisePanel::item_count(topic, &self.catalog))
            .unwrap_or(0)
    }

    pub fn exercise_cursor_next(&mut self) {
        let count = self.exercise_item_count();
        if count > 0 {
            self.exercise_cursor = (self.exercise_cursor + 1) % count;
        }
    }

    pub fn exercise_cursor_prev(&mut self) {
        let count = self.exercise_item_count();
        if count > 0 {
            self.exercise_cursor = if self.exercise_cursor == 0 {
                count - 1
            } else {
                self.exercise_cursor - 1
            };
        }
    }

    /// Fire the exercise row under the cursor. Device steps that only give
    /// advice do nothing here; the one marked as protecting latches the
    /// exercise.
    pub fn activate_exercise_item(&mut self) {
        let Some(topic) = self.current_topic() else {
            return;
        };
        let index = self.exercise_cursor;
        let event = match topic {
            Topic::Passwords => Event::ApplyPasswordCategory(index),
            Topic::Behavior => Event::SelectBehaviorChoice(index),
            Topic::Phishing => Event::AcknowledgePhishingItem(index),
            Topic::Data => Event::CollectDataItem(index),
            Topic::Devices => {
                if self.catalog.protecting_step() != Some(index) {
                    return;
                }
                Event::MarkDeviceProtected
            }
        };
        let _ = self.dispatch(event);
    }

    /// (finished, total) across the five exercises, for the header. The
    /// behavior exercise counts once a safe response is picked.
    pub fn exercises_done(&self) -> (usize, usize) {
        let ex = self.state.exercises();
        let safe_total = self.catalog.safe_item_count();
        let done = [
            ex.password_strength() >= 100,
            ex.behavior_choice().is_some_and(|choice| choice % 2 == 0),
            ex.phishing_score() >= ExercisePanel::phishing_goal(&self.catalog),
            safe_total > 0 && ex.collected_safe_data().len() >= safe_total,
            ex.device_protected(),
        ]
        .iter()
        .filter(|finished| **finished)
        .count();
        (done, Topic::ALL.len())
    }
}
