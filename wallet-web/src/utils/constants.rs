//! Application constants

pub const API_BASE: &str = "http://127.0.0.1:3001";

// The single supported network (Sepolia). Any other chain is treated as
// disconnected.
pub const CHAIN_ID: u64 = 11_155_111;
pub const CHAIN_NAME: &str = "Sepolia";

// Proposal shown by the demo when no `?proposal=` override is present.
pub const DEFAULT_PROPOSAL_ID: &str = "demo-proposal-001";

// sessionStorage key for the one-shot mobile auto-connect flag.
pub const AUTO_CONNECT_ATTEMPTED_KEY: &str = "trustos.auto_connect.attempted";

// Remote pairing is only offered when a project id was configured at build
// time.
pub const PAIRING_PROJECT_ID: Option<&str> = option_env!("PAIRING_PROJECT_ID");
