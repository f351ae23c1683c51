//! HTTP client for the mock scoring and approval endpoints.
//!
//! The endpoints are external collaborators: no authentication, advisory
//! responses only. Failures surface as plain messages for the approval
//! gate to display; nothing here retries automatically.

use gloo_net::http::Request;
use shared::dto::dao::{ApprovalRequest, ApprovalResponse, ScoreRequest, ScoreResponse};

use super::connector::LocalBoxFuture;

/// The scoring/approval collaborator contract. Implemented over HTTP in
/// the browser and by a scripted fake in tests.
pub trait DaoApi {
    fn fetch_score(
        &self,
        request: ScoreRequest,
    ) -> LocalBoxFuture<'_, Result<ScoreResponse, String>>;

    fn submit_approval(
        &self,
        request: ApprovalRequest,
    ) -> LocalBoxFuture<'_, Result<ApprovalResponse, String>>;
}

pub struct HttpDaoApi {
    base: String,
}

impl HttpDaoApi {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }
}

impl DaoApi for HttpDaoApi {
    fn fetch_score(
        &self,
        request: ScoreRequest,
    ) -> LocalBoxFuture<'_, Result<ScoreResponse, String>> {
        let url = format!("{}/api/score", self.base);
        Box::pin(async move {
            let response = Request::post(&url)
                .json(&request)
                .map_err(|e| format!("failed to encode score request: {e}"))?
                .send()
                .await
                .map_err(|e| format!("score request failed: {e}"))?;
            if !response.ok() {
                return Err(format!("score request failed ({})", response.status()));
            }
            response
                .json::<ScoreResponse>()
                .await
                .map_err(|e| format!("unexpected score response: {e}"))
        })
    }

    fn submit_approval(
        &self,
        request: ApprovalRequest,
    ) -> LocalBoxFuture<'_, Result<ApprovalResponse, String>> {
        let url = format!("{}/api/dao/approve", self.base);
        Box::pin(async move {
            let response = Request::post(&url)
                .json(&request)
                .map_err(|e| format!("failed to encode approval request: {e}"))?
                .send()
                .await
                .map_err(|e| format!("approval request failed: {e}"))?;
            if !response.ok() {
                let detail = response.text().await.unwrap_or_default();
                return Err(format!(
                    "approval request failed ({}): {}",
                    response.status(),
                    detail
                ));
            }
            response
                .json::<ApprovalResponse>()
                .await
                .map_err(|e| format!("unexpected approval response: {e}"))
        })
    }
}
