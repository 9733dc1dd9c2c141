// Library target exists for the criterion benchmarks and integration tests.
// The binary entry point is main.rs; this file re-declares the module tree so
// that harnesses can import types via `flipdeck::deck::*` / `flipdeck::search::*`.
// Most code is only exercised through the binary, so suppress dead_code warnings.
#![allow(dead_code)]

// Public: used directly by benchmarks and integration tests
pub mod content;
pub mod deck;
pub mod progress;
pub mod search;
pub mod session;

// Private: required transitively (won't compile without them)
mod app;
mod config;
mod event;
mod ui;
