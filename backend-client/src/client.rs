use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::{ClientError, ClientResult};
use crate::token::TokenProvider;
use crate::types::{
    ApiEnvelope, BillPayload, BillRecord, PatientRecord, TestPackagePayload, TestPackageRecord,
    TestRecord,
};

/// Request timeout applied to every backend call; a timed-out request is
/// reported once, never auto-retried.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Typed client for the LMS REST backend
///
/// Holds a connection pool, the backend base URL, and the injected token
/// provider. Cheap to clone behind an `Arc` and share across components.
pub struct LmsClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl LmsClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Backend address (e.g., "https://lms.example.com/api")
    /// * `tokens` - Bearer token source for the current session
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenProvider>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        let base_url = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    /// Get full URL for an endpoint
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Search the patient directory, capped at `limit` results
    pub async fn search_patients(
        &self,
        query: &str,
        limit: usize,
    ) -> ClientResult<Vec<PatientRecord>> {
        tracing::debug!(query_len = query.len(), limit, "searching patient directory");
        let request = self
            .http
            .get(self.url("patients"))
            .query(&[("search", query.to_string()), ("limit", limit.to_string())]);
        self.send(request).await
    }

    /// Fetch the full test catalog
    pub async fn list_tests(&self) -> ClientResult<Vec<TestRecord>> {
        self.send(self.http.get(self.url("tests"))).await
    }

    /// Create a bill
    pub async fn create_bill(&self, bill: &BillPayload) -> ClientResult<BillRecord> {
        tracing::debug!(items = bill.items.len(), "creating bill");
        self.send(self.http.post(self.url("bills")).json(bill)).await
    }

    /// Update an existing bill
    pub async fn update_bill(&self, id: i64, bill: &BillPayload) -> ClientResult<BillRecord> {
        tracing::debug!(bill_id = id, "updating bill");
        self.send(self.http.put(self.url(&format!("bills/{id}"))).json(bill))
            .await
    }

    /// Fetch a bill by id
    pub async fn get_bill(&self, id: i64) -> ClientResult<BillRecord> {
        self.send(self.http.get(self.url(&format!("bills/{id}")))).await
    }

    /// Create a test package
    pub async fn create_test_package(
        &self,
        package: &TestPackagePayload,
    ) -> ClientResult<TestPackageRecord> {
        tracing::debug!(
            tests = package.selected_tests.len(),
            "creating test package"
        );
        self.send(self.http.post(self.url("test-packages")).json(package))
            .await
    }

    /// Attach the bearer token, send the request, and unwrap the
    /// `{ success, data }` envelope.
    ///
    /// 401 is mapped to [`ClientError::Unauthorized`] before the body is
    /// touched so callers can react to a dead session distinctly from
    /// ordinary backend failures.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> ClientResult<T> {
        let request = match self.tokens.bearer_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized(
                "bearer token rejected by backend".to_string(),
            ));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "backend request failed");
            return Err(ClientError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ApiEnvelope<T> = response
            .json()
            .await
            .map_err(|e| ClientError::MalformedResponse(e.to_string()))?;

        if !envelope.success {
            return Err(ClientError::Backend {
                status: status.as_u16(),
                message: envelope
                    .message
                    .unwrap_or_else(|| "backend reported failure".to_string()),
            });
        }
        envelope.data.ok_or_else(|| {
            ClientError::MalformedResponse("successful response carried no data".to_string())
        })
    }
}
