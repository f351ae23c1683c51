//! Approval gate.
//!
//! Owns the ephemeral score/approval working state and gates the mock DAO
//! submission: no submission without a generated score, and at most one
//! submission in flight at a time (rapid repeated clicks collapse to one
//! network request). The gate trusts the caller-supplied account as of
//! call time; it does not re-validate connection state internally, callers
//! check `ConnectionSession::is_connected()` first.

use std::cell::RefCell;

use shared::dto::dao::{ApprovalRequest, ApprovalResponse, ScoreRequest};
use thiserror::Error;

use super::api::DaoApi;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum GateError {
    /// Precondition: a score must be generated before submitting.
    #[error("generate a trust score before submitting an approval")]
    MissingScore,

    /// Precondition: a prior submission is still in flight.
    #[error("an approval submission is already in flight")]
    SubmissionInFlight,

    /// The collaborator endpoint failed; retry is an explicit user action.
    #[error("{0}")]
    Api(String),
}

/// Ephemeral working state. Not persisted anywhere.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ApprovalWorkingState {
    pub score: Option<f64>,
    pub approval_in_flight: bool,
    pub approval_result: Option<ApprovalResponse>,
}

#[derive(Default)]
pub struct ApprovalGate {
    state: RefCell<ApprovalWorkingState>,
}

impl ApprovalGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ApprovalWorkingState {
        self.state.borrow().clone()
    }

    pub fn score(&self) -> Option<f64> {
        self.state.borrow().score
    }

    /// Fetch a mock trust score. A connected account is not required; the
    /// endpoint scores anonymous requests too.
    pub async fn generate_score(
        &self,
        api: &dyn DaoApi,
        account: Option<String>,
    ) -> Result<f64, GateError> {
        let response = api
            .fetch_score(ScoreRequest { account })
            .await
            .map_err(GateError::Api)?;
        self.state.borrow_mut().score = Some(response.score);
        Ok(response.score)
    }

    /// Submit the mock approval. Refuses without touching the working state
    /// when no score exists or a submission is already in flight.
    pub async fn submit_approval(
        &self,
        api: &dyn DaoApi,
        account: Option<String>,
        proposal_id: &str,
        message: String,
    ) -> Result<ApprovalResponse, GateError> {
        let score = {
            let mut state = self.state.borrow_mut();
            let Some(score) = state.score else {
                return Err(GateError::MissingScore);
            };
            if state.approval_in_flight {
                return Err(GateError::SubmissionInFlight);
            }
            state.approval_in_flight = true;
            score
        };

        let request = ApprovalRequest {
            account,
            score: Some(score),
            proposal_id: proposal_id.to_string(),
            message,
        };
        let result = api.submit_approval(request).await;

        let mut state = self.state.borrow_mut();
        state.approval_in_flight = false;
        match result {
            Ok(response) => {
                state.approval_result = Some(response.clone());
                Ok(response)
            }
            Err(message) => Err(GateError::Api(message)),
        }
    }

    /// Drop score and result, e.g. after the wallet session is cleared.
    pub fn reset(&self) {
        *self.state.borrow_mut() = ApprovalWorkingState::default();
    }
}
