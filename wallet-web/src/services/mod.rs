//! Connection services: connector contract and implementations, provider
//! registry, the session orchestrator, the auto-connect policy and the
//! approval gate.

pub mod api;
pub mod approval;
pub mod autoconnect;
pub mod connector;
pub mod injected;
pub mod orchestrator;
pub mod pairing;
pub mod registry;

#[cfg(test)]
pub(crate) mod testing;
