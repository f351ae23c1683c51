//! Trust scoring and DAO approval DTOs.
//!
//! Both endpoints are mocks: the score is a random number dressed up as
//! "AI analysis" and the approval returns a canned vote tally. The shapes
//! here are still the real wire contract between frontend and backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request body for `POST /api/score`.
///
/// The account is optional: a score can be generated before a wallet is
/// connected, the UI just labels it as anonymous.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub account: Option<String>,
}

/// Response body for `POST /api/score`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResponse {
    /// Mock trust score in the range `0.0..=100.0`.
    pub score: f64,
}

/// Request body for `POST /api/dao/approve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalRequest {
    pub account: Option<String>,
    pub score: Option<f64>,
    pub proposal_id: String,
    /// Human-readable approval statement, e.g.
    /// `"I approve proposal #demo-proposal-001 at 2026-08-23T10:00:00Z"`.
    pub message: String,
}

/// Mock vote tally attached to an approval response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteTally {
    pub yes: u32,
    pub no: u32,
    pub quorum: u32,
}

impl VoteTally {
    /// A proposal passes when yes beats no and turnout meets quorum.
    pub fn passes(&self) -> bool {
        self.yes > self.no && self.yes + self.no >= self.quorum
    }
}

/// Response body for `POST /api/dao/approve`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalResponse {
    pub approved: bool,
    /// Mock transaction reference (`0x`-prefixed hex). Nothing is submitted
    /// on-chain.
    pub tx_ref: String,
    pub votes: VoteTally,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vote_tally_passes_requires_majority_and_quorum() {
        let passing = VoteTally { yes: 10, no: 3, quorum: 12 };
        assert!(passing.passes());

        let no_majority = VoteTally { yes: 3, no: 10, quorum: 12 };
        assert!(!no_majority.passes());

        let no_quorum = VoteTally { yes: 5, no: 1, quorum: 12 };
        assert!(!no_quorum.passes());
    }

    #[test]
    fn approval_request_round_trips_as_snake_case_json() {
        let req = ApprovalRequest {
            account: Some("0x1111111111111111111111111111111111111111".to_string()),
            score: Some(72.4),
            proposal_id: "demo-proposal-001".to_string(),
            message: "I approve proposal #demo-proposal-001".to_string(),
        };

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["proposal_id"], "demo-proposal-001");
        assert_eq!(json["score"], 72.4);

        let back: ApprovalRequest = serde_json::from_value(json).unwrap();
        assert_eq!(back.proposal_id, req.proposal_id);
    }
}
