use std::fmt;

use serde::{Deserialize, Serialize};

/// A quizzable lesson subject. Every topic owns one screen, one embedded
/// exercise, and one ordered question set in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Passwords,
    Behavior,
    Phishing,
    Data,
    Devices,
}

impl Topic {
    /// Lesson order. Indexing is stable: the intro menu, the back/next chain,
    /// and the catalog all rely on it.
    pub const ALL: [Topic; 5] = [
        Topic::Passwords,
        Topic::Behavior,
        Topic::Phishing,
        Topic::Data,
        Topic::Devices,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Topic::Passwords => "passwords",
            Topic::Behavior => "behavior",
            Topic::Phishing => "phishing",
            Topic::Data => "data",
            Topic::Devices => "devices",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the screens a user can stand on. `Intro` and `About` carry no quiz.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    Intro,
    Topic(Topic),
    About,
}

/// The fixed walk through the lesson: intro first, the five topics in order,
/// about last.
pub const LESSON_ORDER: [Screen; 7] = [
    Screen::Intro,
    Screen::Topic(Topic::Passwords),
    Screen::Topic(Topic::Behavior),
    Screen::Topic(Topic::Phishing),
    Screen::Topic(Topic::Data),
    Screen::Topic(Topic::Devices),
    Screen::About,
];

impl Screen {
    fn position(self) -> usize {
        LESSON_ORDER
            .iter()
            .position(|s| *s == self)
            .unwrap_or_default()
    }

    /// Next screen along the lesson chain, `None` past the end.
    pub fn next(self) -> Option<Screen> {
        LESSON_ORDER.get(self.position() + 1).copied()
    }

    /// Previous screen along the lesson chain, `None` before the start.
    pub fn prev(self) -> Option<Screen> {
        let pos = self.position();
        if pos == 0 {
            None
        } else {
            Some(LESSON_ORDER[pos - 1])
        }
    }

    /// The topic whose quiz can be started from this screen.
    pub fn quiz_topic(self) -> Option<Topic> {
        match self {
            Screen::Topic(topic) => Some(topic),
            Screen::Intro | Screen::About => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Screen::Intro => "intro",
            Screen::Topic(topic) => topic.as_str(),
            Screen::About => "about",
        }
    }

    /// Parse a lowercase screen name, as accepted on the command line.
    pub fn parse(name: &str) -> Option<Screen> {
        LESSON_ORDER.iter().copied().find(|s| s.as_str() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_covers_every_screen_once() {
        let mut walked = vec![Screen::Intro];
        let mut current = Screen::Intro;
        while let Some(next) = current.next() {
            walked.push(next);
            current = next;
        }
        assert_eq!(walked, LESSON_ORDER);
    }

    #[test]
    fn test_chain_ends() {
        assert_eq!(Screen::Intro.prev(), None);
        assert_eq!(Screen::About.next(), None);
    }

    #[test]
    fn test_prev_inverts_next() {
        for screen in LESSON_ORDER {
            if let Some(next) = screen.next() {
                assert_eq!(next.prev(), Some(screen));
            }
        }
    }

    #[test]
    fn test_only_topic_screens_are_quizzable() {
        assert_eq!(Screen::Intro.quiz_topic(), None);
        assert_eq!(Screen::About.quiz_topic(), None);
        for topic in Topic::ALL {
            assert_eq!(Screen::Topic(topic).quiz_topic(), Some(topic));
        }
    }

    #[test]
    fn test_names_round_trip() {
        for screen in LESSON_ORDER {
            assert_eq!(Screen::parse(screen.as_str()), Some(screen));
        }
        assert_eq!(Screen::parse("quiz"), None);
        assert_eq!(Screen::parse(""), None);
    }
}
