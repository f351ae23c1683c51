//! # Data Transfer Objects (DTOs)
//!
//! Data structures used for communication between the wallet frontend and
//! the mock backend via the REST API.
//!
//! ## Module Organization
//!
//! - [`dao`] - Trust scoring and DAO approval request/response types
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /api/dao/approve
//! Content-Type: application/json
//!
//! {
//!   "account": "0x1111111111111111111111111111111111111111",
//!   "score": 72.4,
//!   "proposal_id": "demo-proposal-001",
//!   "message": "I approve proposal #demo-proposal-001 at 2026-08-23T10:00:00Z"
//! }
//! ```

pub mod dao;

pub use dao::*;
