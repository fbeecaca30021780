//! reqwest-backed implementation of every backend endpoint.

use std::future::Future;
use std::time::Duration;

use qwatch_config::QwatchConfig;
use qwatch_protocol::{
    AuthRequest, AuthResponse, DashboardSnapshot, OpResponse, QueryForm, QueryFormRequest,
    QueryRef, QuerySnapshot, Settings, SettingsUpdate, SoundRequest,
    is_access_denied,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::errors::{ApiError, TransportError};
use super::traits::SnapshotFetcher;
use crate::auth::{Gate, Session};

#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("qwatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| TransportError::Request {
                url: base_url.clone(),
                source,
            })?;
        Ok(Self { http, base_url })
    }

    pub fn from_config(config: &QwatchConfig) -> Result<Self, ApiError> {
        Self::new(config.server.url(), config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and return the raw body after the HTTP status check.
    async fn send(&self, request: reqwest::RequestBuilder, url: &str) -> Result<Vec<u8>, ApiError> {
        debug!(event = "core.api.request_started", url = url);

        let response = request
            .send()
            .await
            .map_err(|source| TransportError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| TransportError::Request {
                url: url.to_string(),
                source,
            })?;

        debug!(
            event = "core.api.request_completed",
            url = url,
            bytes = body.len()
        );
        Ok(body.to_vec())
    }

    /// POST a JSON body and decode a JSON reply, mapping the backend's
    /// session-denial envelope to [`ApiError::AuthExpired`].
    async fn post_value<B>(&self, path: &str, body: &B) -> Result<Value, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path);
        let bytes = self.send(self.http.post(&url).json(body), &url).await?;
        let value: Value = serde_json::from_slice(&bytes).map_err(|e| TransportError::Decode {
            url: url.clone(),
            message: e.to_string(),
        })?;

        if is_access_denied(&value) {
            warn!(event = "core.api.session_denied", url = %url);
            return Err(ApiError::AuthExpired {
                message: qwatch_protocol::ACCESS_DENIED.to_string(),
            });
        }
        Ok(value)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let value = self.post_value(path, body).await?;
        decode(&self.endpoint(path), value)
    }

    async fn post_ack<B>(&self, path: &str, body: &B) -> Result<String, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let response: OpResponse = self.post_json(path, body).await?;
        acknowledge(response)
    }

    /// `POST /auth`. A wrong username or password is `Gate::Denied`, not an error.
    pub async fn login(&self, username: &str, password: &str) -> Result<Gate<Session>, ApiError> {
        let request = AuthRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response: AuthResponse = self.post_json("/auth", &request).await?;
        if !response.auth_success || response.token.is_empty() {
            return Ok(Gate::Denied);
        }

        let username = if response.username.is_empty() {
            username.to_string()
        } else {
            response.username
        };
        Ok(Gate::Authorized(Session {
            username,
            token: response.token,
        }))
    }

    /// `POST /verify_session`
    pub async fn verify_session(&self, session: &Session) -> Result<(), ApiError> {
        self.post_ack("/verify_session", &session.request())
            .await
            .map(|_| ())
    }

    /// `POST /get_dashboard`: runs a server scan, so `is_new` is meaningful.
    pub async fn dashboard(&self, session: &Session) -> Result<DashboardSnapshot, ApiError> {
        self.post_json("/get_dashboard", &session.request()).await
    }

    /// `POST /get_all_queries`: reads the query set without scanning.
    pub async fn all_queries(&self, session: &Session) -> Result<DashboardSnapshot, ApiError> {
        self.post_json("/get_all_queries", &session.request()).await
    }

    /// `POST /get_query`
    pub async fn query(&self, session: &Session, uid: &str) -> Result<QuerySnapshot, ApiError> {
        let request = QueryRef {
            session: session.request(),
            uid: uid.to_string(),
        };
        let value = self.post_value("/get_query", &request).await?;
        if value.get("success").and_then(Value::as_bool) == Some(false) {
            let response: OpResponse = decode(&self.endpoint("/get_query"), value)?;
            return Err(rejection(response.msg));
        }
        decode(&self.endpoint("/get_query"), value)
    }

    /// `POST /add_query`
    pub async fn add_query(&self, session: &Session, form: &QueryForm) -> Result<String, ApiError> {
        let session = session.request();
        let request = QueryFormRequest {
            session: &session,
            form,
        };
        self.post_ack("/add_query", &request).await
    }

    /// `POST /edit_query`. The form must carry the uid of the query to edit.
    pub async fn edit_query(
        &self,
        session: &Session,
        form: &QueryForm,
    ) -> Result<String, ApiError> {
        if form.uid.is_none() {
            return Err(ApiError::Rejected {
                message: "edit requires a query uid".to_string(),
            });
        }
        let session = session.request();
        let request = QueryFormRequest {
            session: &session,
            form,
        };
        self.post_ack("/edit_query", &request).await
    }

    /// `POST /delete_query`
    pub async fn delete_query(&self, session: &Session, uid: &str) -> Result<String, ApiError> {
        let request = QueryRef {
            session: session.request(),
            uid: uid.to_string(),
        };
        self.post_ack("/delete_query", &request).await
    }

    /// `POST /save`: persist the backend's in-memory queries.
    pub async fn save(&self, session: &Session) -> Result<String, ApiError> {
        self.post_ack("/save", &session.request()).await
    }

    /// `POST /clean`: drop queries that reached their cycle limit.
    pub async fn clean(&self, session: &Session) -> Result<String, ApiError> {
        self.post_ack("/clean", &session.request()).await
    }

    /// `POST /get_settings`
    pub async fn settings(&self, session: &Session) -> Result<Settings, ApiError> {
        self.post_json("/get_settings", &session.request()).await
    }

    /// `POST /edit_settings`
    pub async fn update_settings(
        &self,
        session: &Session,
        settings: &Settings,
    ) -> Result<String, ApiError> {
        let request = SettingsUpdate {
            session: session.request(),
            settings: settings.clone(),
        };
        self.post_ack("/edit_settings", &request).await
    }

    /// `POST /get_sound`: raw audio bytes for an alert sound id.
    pub async fn sound(&self, session: &Session, sound_id: &str) -> Result<Vec<u8>, ApiError> {
        let url = self.endpoint("/get_sound");
        let request = SoundRequest {
            session: session.request(),
            alert_sound: sound_id.to_string(),
        };
        let bytes = self.send(self.http.post(&url).json(&request), &url).await?;

        // Audio is binary; a JSON body here is an error envelope.
        if let Ok(value) = serde_json::from_slice::<Value>(&bytes) {
            if is_access_denied(&value) {
                return Err(ApiError::AuthExpired {
                    message: qwatch_protocol::ACCESS_DENIED.to_string(),
                });
            }
            let response: OpResponse = decode(&url, value)?;
            return Err(rejection(response.msg));
        }

        if bytes.is_empty() {
            return Err(TransportError::Decode {
                url,
                message: "empty sound body".to_string(),
            }
            .into());
        }
        Ok(bytes)
    }

    /// `GET /ping`
    pub async fn ping(&self) -> Result<bool, ApiError> {
        let url = self.endpoint("/ping");
        let bytes = self.send(self.http.get(&url), &url).await?;
        let response: OpResponse =
            serde_json::from_slice(&bytes).map_err(|e| TransportError::Decode {
                url,
                message: e.to_string(),
            })?;
        Ok(response.success)
    }
}

impl SnapshotFetcher for BackendClient {
    fn fetch(
        &self,
        session: &Session,
    ) -> impl Future<Output = Result<DashboardSnapshot, ApiError>> + Send {
        self.dashboard(session)
    }
}

fn decode<T: DeserializeOwned>(url: &str, value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| {
        TransportError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

fn acknowledge(response: OpResponse) -> Result<String, ApiError> {
    if response.success {
        Ok(response.msg)
    } else {
        Err(rejection(response.msg))
    }
}

fn rejection(msg: String) -> ApiError {
    let message = if msg.is_empty() {
        "request failed".to_string()
    } else {
        msg
    };
    ApiError::Rejected { message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = BackendClient::new("http://127.0.0.1:8080/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8080");
        assert_eq!(
            client.endpoint("/get_dashboard"),
            "http://127.0.0.1:8080/get_dashboard"
        );
    }

    #[test]
    fn test_from_config_uses_server_url() {
        let mut config = QwatchConfig::default();
        config.server.url = Some("https://watch.example".to_string());
        let client = BackendClient::from_config(&config).unwrap();
        assert_eq!(client.base_url(), "https://watch.example");
    }

    #[test]
    fn test_acknowledge() {
        let ok = OpResponse {
            success: true,
            msg: "Saved".to_string(),
        };
        assert_eq!(acknowledge(ok).unwrap(), "Saved");

        let rejected = OpResponse {
            success: false,
            msg: String::new(),
        };
        assert!(matches!(
            acknowledge(rejected),
            Err(ApiError::Rejected { message }) if message == "request failed"
        ));
    }
}
