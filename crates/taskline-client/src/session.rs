//! Session browsing for the orchestration backend.
//!
//! The backend creates a session server-side for every run; these calls let
//! the client list and inspect them after the fact. Timestamps arrive as
//! naive UTC datetimes (no offset), so they are decoded as such.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::api::{ClientError, OrchestratorClient};

/// Summary of a session, as returned by the listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Session identifier.
    pub id: String,
    /// Session title (derived from the first goal).
    pub title: String,
    /// When the session was created.
    pub created_at: NaiveDateTime,
    /// When the session was last updated.
    pub updated_at: NaiveDateTime,
    /// Number of messages in the session.
    pub message_count: u64,
    /// Preview of the most recent message.
    #[serde(default)]
    pub last_message: Option<String>,
}

/// A full session with its messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDetail {
    /// Session identifier.
    #[serde(alias = "_id")]
    pub id: Option<String>,
    /// Session title.
    pub title: String,
    /// Messages in submission order.
    #[serde(default)]
    pub messages: Vec<SessionMessage>,
    /// When the session was created.
    pub created_at: NaiveDateTime,
    /// When the session was last updated.
    pub updated_at: NaiveDateTime,
}

/// A stored message within a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMessage {
    /// Message role ("user" or "assistant").
    pub role: String,
    /// Message content.
    pub content: String,
    /// When the message was stored.
    pub timestamp: NaiveDateTime,
}

/// Backend health report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    /// Health status ("ok" when the system is up).
    pub status: String,
    /// Backend version.
    pub version: String,
    /// Human-readable status message.
    #[serde(default)]
    pub message: Option<String>,
}

impl OrchestratorClient {
    /// List sessions, most recently updated first.
    pub async fn list_sessions(&self, limit: usize) -> Result<Vec<SessionSummary>, ClientError> {
        let url = format!("{}/api/sessions/", self.base_url());
        let response = self
            .http()
            .get(&url)
            .query(&[("limit", limit)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::status(status.as_u16(), &body));
        }
        response.json().await.map_err(ClientError::Decode)
    }

    /// Fetch one session with all of its messages.
    pub async fn get_session(&self, id: &str) -> Result<SessionDetail, ClientError> {
        let url = format!("{}/api/sessions/{id}", self.base_url());
        let response = self.http().get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::status(status.as_u16(), &body));
        }
        response.json().await.map_err(ClientError::Decode)
    }

    /// Delete a session permanently.
    pub async fn delete_session(&self, id: &str) -> Result<(), ClientError> {
        let url = format!("{}/api/sessions/{id}", self.base_url());
        let response = self.http().delete(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::status(status.as_u16(), &body));
        }
        Ok(())
    }

    /// Check backend health.
    pub async fn health(&self) -> Result<Health, ClientError> {
        let url = format!("{}/health", self.base_url());
        let response = self.http().get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::status(status.as_u16(), &body));
        }
        response.json().await.map_err(ClientError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_sessions() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/sessions/"))
            .and(query_param("limit", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "id": "507f1f77bcf86cd799439011",
                    "title": "Sales Analysis Discussion",
                    "created_at": "2024-01-15T10:30:00",
                    "updated_at": "2024-01-15T10:35:00",
                    "message_count": 4,
                    "last_message": "Here's the analysis..."
                }
            ])))
            .mount(&server)
            .await;

        let client = OrchestratorClient::new(&server.uri());
        let sessions = client.list_sessions(10).await.unwrap();

        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].title, "Sales Analysis Discussion");
        assert_eq!(sessions[0].message_count, 4);
    }

    #[tokio::test]
    async fn test_get_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/sessions/abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_id": "abc123",
                "title": "Trip planning",
                "messages": [
                    {"role": "user", "content": "Plan a trip", "timestamp": "2024-01-15T10:30:00"},
                    {"role": "assistant", "content": "Here's the plan", "timestamp": "2024-01-15T10:32:00"}
                ],
                "created_at": "2024-01-15T10:30:00",
                "updated_at": "2024-01-15T10:35:00"
            })))
            .mount(&server)
            .await;

        let client = OrchestratorClient::new(&server.uri());
        let session = client.get_session("abc123").await.unwrap();

        assert_eq!(session.id.as_deref(), Some("abc123"));
        assert_eq!(session.messages.len(), 2);
        assert_eq!(session.messages[0].role, "user");
    }

    #[tokio::test]
    async fn test_delete_session_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/sessions/missing"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({"detail": "Session not found: missing"})),
            )
            .mount(&server)
            .await;

        let client = OrchestratorClient::new(&server.uri());
        let err = client.delete_session("missing").await.unwrap_err();
        match err {
            ClientError::Status { status, detail } => {
                assert_eq!(status, 404);
                assert!(detail.contains("Session not found"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_health() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ok",
                "version": "2.0.0",
                "message": "System is running normally"
            })))
            .mount(&server)
            .await;

        let client = OrchestratorClient::new(&server.uri());
        let health = client.health().await.unwrap();
        assert_eq!(health.status, "ok");
        assert_eq!(health.version, "2.0.0");
    }
}
