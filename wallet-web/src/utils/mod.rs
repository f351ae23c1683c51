//! Utility modules

pub mod constants;
pub mod format;
pub mod platform;
pub mod url;
