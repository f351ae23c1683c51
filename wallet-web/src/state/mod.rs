//! Reactive application state

pub mod orchestrator;
pub mod session;
