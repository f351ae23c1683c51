//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the frontend (wallet-web) and
//! the mock backend API. All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::dao`]**: Trust scoring and DAO approval DTOs
//! - **[`utils`]**: Shared utility functions
//!   - **[`utils::format_address`]**: Format wallet addresses for display
//!   - **[`utils::is_valid_address`]**: Validate 0x-prefixed hex addresses
//!
//! ## Wire Format
//!
//! All DTOs serialize to JSON using default `serde` behavior:
//! - Field names use **snake_case** in Rust, which maps to **snake_case** in JSON
//! - Optional fields serialize as `null` when `None`
//! - All structs implement both `Serialize` and `Deserialize`

pub mod dto;
pub mod utils;
