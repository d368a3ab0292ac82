// Library target exists solely for integration tests.
// The binary entry point is main.rs; this file re-declares the module tree so
// that test harnesses can import types via `netwise::engine::*` / `netwise::content::*`.
// Most code is only exercised through the binary, so suppress dead_code warnings.
#![allow(dead_code)]

// Public: used directly by integration tests
pub mod content;
pub mod engine;
pub mod ui;

// Private: only the binary drives these; declared here too so both targets
// compile the same module tree.
mod app;
mod config;
mod event;
