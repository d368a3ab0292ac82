use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Points granted for acknowledging one fraudulent message. Fixed per click,
/// independent of catalog content, and deliberately not a divisor of the
/// meter cap: two finds land on 68, a third would clamp at 100.
pub const PHISHING_POINTS: u8 = 34;

/// Progress of the five embedded exercises, one field per topic.
///
/// All fields only ever grow or stay put. Nothing in the lesson resets them;
/// a retaken quiz or a revisited screen finds them exactly as left.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseBank {
    password_strength: u8,
    behavior_choice: Option<usize>,
    phishing_score: u8,
    collected_safe_data: BTreeSet<usize>,
    device_protected: bool,
}

impl ExerciseBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn password_strength(&self) -> u8 {
        self.password_strength
    }

    pub fn behavior_choice(&self) -> Option<usize> {
        self.behavior_choice
    }

    pub fn phishing_score(&self) -> u8 {
        self.phishing_score
    }

    pub fn collected_safe_data(&self) -> &BTreeSet<usize> {
        &self.collected_safe_data
    }

    pub fn device_protected(&self) -> bool {
        self.device_protected
    }

    /// Add a category's points to the strength meter, clamped at 100.
    /// Repeat applications of the same category count again; the meter is a
    /// running total, not a checklist.
    pub fn add_password_points(&mut self, points: u8) {
        self.password_strength = self.password_strength.saturating_add(points).min(100);
    }

    /// Record the latest picked response. There is one slot for the whole
    /// scenario list, so a later pick replaces an earlier one.
    pub fn select_behavior(&mut self, choice: usize) {
        self.behavior_choice = Some(choice);
    }

    /// Credit a message acknowledgment. Only fraudulent messages score;
    /// flagging a genuine one neither scores nor penalizes.
    pub fn acknowledge_phishing(&mut self, fraudulent: bool) {
        if fraudulent {
            self.phishing_score = self.phishing_score.saturating_add(PHISHING_POINTS).min(100);
        }
    }

    /// Put a shareable item into the collection. Items marked unsafe are
    /// dropped silently, and collecting an item twice is a no-op.
    pub fn collect_data_item(&mut self, index: usize, safe: bool) {
        if safe {
            self.collected_safe_data.insert(index);
        }
    }

    /// Latch the device exercise as done. There is no way back.
    pub fn mark_device_protected(&mut self) {
        self.device_protected = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_points_accumulate_and_clamp() {
        let mut bank = ExerciseBank::new();
        for _ in 0..4 {
            bank.add_password_points(25);
        }
        assert_eq!(bank.password_strength(), 100);
        bank.add_password_points(25);
        assert_eq!(bank.password_strength(), 100);
    }

    #[test]
    fn test_password_points_count_repeats() {
        let mut bank = ExerciseBank::new();
        bank.add_password_points(25);
        bank.add_password_points(25);
        assert_eq!(bank.password_strength(), 50);
    }

    #[test]
    fn test_password_strength_never_decreases() {
        let mut bank = ExerciseBank::new();
        let mut last = 0;
        for points in [40, 0, 25, 99, 1] {
            bank.add_password_points(points);
            assert!(bank.password_strength() >= last);
            last = bank.password_strength();
        }
    }

    #[test]
    fn test_phishing_scores_fraudulent_only() {
        let mut bank = ExerciseBank::new();
        bank.acknowledge_phishing(false);
        assert_eq!(bank.phishing_score(), 0);
        bank.acknowledge_phishing(true);
        assert_eq!(bank.phishing_score(), PHISHING_POINTS);
        bank.acknowledge_phishing(true);
        assert_eq!(bank.phishing_score(), 68);
    }

    #[test]
    fn test_phishing_clamps_at_cap() {
        let mut bank = ExerciseBank::new();
        for _ in 0..5 {
            bank.acknowledge_phishing(true);
        }
        assert_eq!(bank.phishing_score(), 100);
    }

    #[test]
    fn test_behavior_choice_last_pick_wins() {
        let mut bank = ExerciseBank::new();
        assert_eq!(bank.behavior_choice(), None);
        bank.select_behavior(3);
        bank.select_behavior(0);
        assert_eq!(bank.behavior_choice(), Some(0));
    }

    #[test]
    fn test_data_collection_ignores_unsafe() {
        let mut bank = ExerciseBank::new();
        bank.collect_data_item(1, false);
        assert!(bank.collected_safe_data().is_empty());
        bank.collect_data_item(0, true);
        bank.collect_data_item(0, true);
        bank.collect_data_item(4, true);
        assert_eq!(
            bank.collected_safe_data().iter().copied().collect::<Vec<_>>(),
            vec![0, 4]
        );
    }

    #[test]
    fn test_device_protection_latches() {
        let mut bank = ExerciseBank::new();
        assert!(!bank.device_protected());
        bank.mark_device_protected();
        bank.mark_device_protected();
        assert!(bank.device_protected());
    }
}
