pub mod exercise;
pub mod menu;
pub mod meter;
pub mod quiz;
pub mod topic;
