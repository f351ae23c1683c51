//! Mock scoring and approval handlers.
//!
//! Both endpoints fabricate their data: the "AI trust score" is a random
//! number and the approval returns a randomized vote tally with a fake
//! transaction reference. The request validation is real, the outcomes are
//! not.

use axum::extract::Json;
use chrono::Utc;
use rand::Rng;
use shared::dto::dao::{ApprovalRequest, ApprovalResponse, ScoreRequest, ScoreResponse, VoteTally};
use shared::utils::is_valid_address;
use tracing::info;
use uuid::Uuid;

use crate::error::{AppError, Result};

pub async fn health() -> &'static str {
    "ok"
}

/// `POST /api/score` - generate a mock trust score.
pub async fn generate_score(Json(request): Json<ScoreRequest>) -> Result<Json<ScoreResponse>> {
    if let Some(account) = &request.account {
        if !is_valid_address(account) {
            return Err(AppError::InvalidInput(format!(
                "malformed account address `{}`",
                account
            )));
        }
    }

    let score = (rand::thread_rng().gen_range(0.0..=100.0_f64) * 10.0).round() / 10.0;
    info!(account = ?request.account, score, "generated mock trust score");
    Ok(Json(ScoreResponse { score }))
}

/// `POST /api/dao/approve` - record a mock approval.
///
/// Nothing is submitted on-chain; the tally is random and the `tx_ref` is a
/// fabricated hex reference.
pub async fn approve_proposal(
    Json(request): Json<ApprovalRequest>,
) -> Result<Json<ApprovalResponse>> {
    let Some(score) = request.score else {
        return Err(AppError::InvalidInput(
            "a trust score is required before approval".to_string(),
        ));
    };
    if !(0.0..=100.0).contains(&score) {
        return Err(AppError::InvalidInput(format!(
            "score {} is outside 0..=100",
            score
        )));
    }
    if request.proposal_id.trim().is_empty() {
        return Err(AppError::InvalidInput("proposal_id is required".to_string()));
    }
    if let Some(account) = &request.account {
        if !is_valid_address(account) {
            return Err(AppError::InvalidInput(format!(
                "malformed account address `{}`",
                account
            )));
        }
    }

    let votes = mock_tally();
    let approved = votes.passes();
    let tx_ref = format!("0x{}", Uuid::new_v4().simple());
    info!(
        proposal_id = %request.proposal_id,
        approved,
        yes = votes.yes,
        no = votes.no,
        "recorded mock approval"
    );

    Ok(Json(ApprovalResponse {
        approved,
        tx_ref,
        votes,
        timestamp: Utc::now(),
    }))
}

fn mock_tally() -> VoteTally {
    let mut rng = rand::thread_rng();
    VoteTally {
        yes: rng.gen_range(0..=20),
        no: rng.gen_range(0..=20),
        quorum: 10,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCOUNT: &str = "0x8ba1f109551bD432803012645Ac136ddd64DBA72";

    #[tokio::test]
    async fn score_is_within_range() {
        for _ in 0..50 {
            let Json(response) = generate_score(Json(ScoreRequest { account: None }))
                .await
                .unwrap();
            assert!((0.0..=100.0).contains(&response.score));
        }
    }

    #[tokio::test]
    async fn score_rejects_malformed_account() {
        let err = generate_score(Json(ScoreRequest {
            account: Some("not-an-address".to_string()),
        }))
        .await
        .unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn approval_requires_a_score() {
        let err = approve_proposal(Json(ApprovalRequest {
            account: Some(ACCOUNT.to_string()),
            score: None,
            proposal_id: "demo-proposal-001".to_string(),
            message: "I approve proposal #demo-proposal-001".to_string(),
        }))
        .await
        .unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn approval_requires_a_proposal_id() {
        let err = approve_proposal(Json(ApprovalRequest {
            account: Some(ACCOUNT.to_string()),
            score: Some(72.4),
            proposal_id: "  ".to_string(),
            message: "I approve".to_string(),
        }))
        .await
        .unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn approval_response_is_internally_consistent() {
        for _ in 0..50 {
            let Json(response) = approve_proposal(Json(ApprovalRequest {
                account: Some(ACCOUNT.to_string()),
                score: Some(72.4),
                proposal_id: "demo-proposal-001".to_string(),
                message: "I approve proposal #demo-proposal-001".to_string(),
            }))
            .await
            .unwrap();

            assert_eq!(response.approved, response.votes.passes());
            let hex = response.tx_ref.strip_prefix("0x").unwrap();
            assert_eq!(hex.len(), 32);
            assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }
}
