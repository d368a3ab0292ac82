use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::engine::topic::Topic;

const LESSONS: &str = include_str!("../assets/lessons.json");

fn default_tips_title() -> String {
    String::from("Remember")
}

fn default_warnings_title() -> String {
    String::from("Watch out")
}

/// A single multiple-choice question. `correct` indexes into `options`;
/// `Catalog::load` rejects catalogs where it does not.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct: usize,
}

/// Everything one topic screen shows, plus its quiz questions.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TopicEntry {
    pub id: Topic,
    pub title: String,
    pub tagline: String,
    pub exercise_title: String,
    #[serde(default)]
    pub exercise_hint: Option<String>,
    #[serde(default = "default_tips_title")]
    pub tips_title: String,
    #[serde(default)]
    pub tips: Vec<String>,
    #[serde(default = "default_warnings_title")]
    pub warnings_title: String,
    #[serde(default)]
    pub warnings: Vec<String>,
    pub questions: Vec<Question>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PasswordCategory {
    pub label: String,
    pub points: u8,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BehaviorScenario {
    pub situation: String,
    pub safe: String,
    pub danger: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PhishingMessage {
    pub from: String,
    pub text: String,
    pub fake: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataItem {
    pub label: String,
    pub safe: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeviceStep {
    pub label: String,
    pub protects: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IntroCopy {
    pub title: String,
    pub blurb: String,
    pub prompt: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AboutCopy {
    pub title: String,
    pub paragraphs: Vec<String>,
    pub goals_lead: String,
    pub goals: Vec<String>,
    pub closing: String,
}

/// The embedded lesson catalog.
///
/// All copy, quiz questions, and exercise material live here. The engine
/// treats the catalog as opaque apart from counts and the `points`, `fake`,
/// `safe`, and `protects` markers, so copy edits never touch lesson logic.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Catalog {
    pub topics: Vec<TopicEntry>,
    pub password_categories: Vec<PasswordCategory>,
    pub behavior_scenarios: Vec<BehaviorScenario>,
    pub phishing_messages: Vec<PhishingMessage>,
    pub data_items: Vec<DataItem>,
    pub device_steps: Vec<DeviceStep>,
    pub intro: IntroCopy,
    pub about: AboutCopy,
}

impl Catalog {
    /// Parse the embedded catalog and check the cross-references the rest of
    /// the app assumes. A broken catalog is a packaging bug, so this fails
    /// the whole startup rather than limping along.
    pub fn load() -> Result<Catalog> {
        let catalog: Catalog =
            serde_json::from_str(LESSONS).context("embedded lesson catalog is malformed")?;

        for topic in Topic::ALL {
            let Some(entry) = catalog.topic(topic) else {
                bail!("lesson catalog has no {topic} topic");
            };
            for (idx, question) in entry.questions.iter().enumerate() {
                if question.correct >= question.options.len() {
                    bail!("{topic} question {idx} marks a nonexistent option as correct");
                }
            }
        }

        Ok(catalog)
    }

    pub fn topic(&self, topic: Topic) -> Option<&TopicEntry> {
        self.topics.iter().find(|entry| entry.id == topic)
    }

    /// Question set for a topic. Missing topics read as empty, which the
    /// quiz layer treats as "nothing to answer".
    pub fn questions(&self, topic: Topic) -> &[Question] {
        self.topic(topic)
            .map(|entry| entry.questions.as_slice())
            .unwrap_or_default()
    }

    pub fn question_count(&self, topic: Topic) -> usize {
        self.questions(topic).len()
    }

    pub fn safe_item_count(&self) -> usize {
        self.data_items.iter().filter(|item| item.safe).count()
    }

    pub fn fake_message_count(&self) -> usize {
        self.phishing_messages.iter().filter(|msg| msg.fake).count()
    }

    /// Index of the device step that actually latches protection. Every
    /// other step is advice to act on, not something tracked.
    pub fn protecting_step(&self) -> Option<usize> {
        self.device_steps.iter().position(|step| step.protects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = Catalog::load().unwrap();
        assert_eq!(catalog.topics.len(), Topic::ALL.len());
    }

    #[test]
    fn test_every_topic_has_a_quiz() {
        let catalog = Catalog::load().unwrap();
        for topic in Topic::ALL {
            let questions = catalog.questions(topic);
            assert!(!questions.is_empty(), "{topic} has no questions");
            for question in questions {
                assert!(question.options.len() >= 2);
                assert!(question.correct < question.options.len());
            }
        }
    }

    #[test]
    fn test_password_categories_fill_the_meter() {
        let catalog = Catalog::load().unwrap();
        let total: u32 = catalog
            .password_categories
            .iter()
            .map(|cat| u32::from(cat.points))
            .sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_exercise_material_counts() {
        let catalog = Catalog::load().unwrap();
        assert_eq!(catalog.fake_message_count(), 2);
        assert_eq!(catalog.safe_item_count(), 3);
        assert!(!catalog.behavior_scenarios.is_empty());
    }

    #[test]
    fn test_exactly_one_device_step_protects() {
        let catalog = Catalog::load().unwrap();
        let protecting = catalog
            .device_steps
            .iter()
            .filter(|step| step.protects)
            .count();
        assert_eq!(protecting, 1);
        assert!(catalog.protecting_step().is_some());
    }
}
