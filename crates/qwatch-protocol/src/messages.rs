use serde::{Deserialize, Serialize};

use crate::de;
use crate::query::{DisplayValue, QuerySnapshot};

/// Message the backend sends when the session check on an authenticated
/// endpoint fails. It arrives with HTTP 200.
pub const ACCESS_DENIED: &str = "Access Denied";

/// True when a response body is the backend's session-denial envelope
/// (`{"success": false, "msg": "Access Denied"}`).
pub fn is_access_denied(body: &serde_json::Value) -> bool {
    let success = body.get("success").and_then(serde_json::Value::as_bool);
    let msg = body.get("msg").and_then(serde_json::Value::as_str);
    success == Some(false) && msg == Some(ACCESS_DENIED)
}

/// `POST /auth`
#[derive(Debug, Clone, Serialize)]
pub struct AuthRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default, deserialize_with = "de::text")]
    pub username: String,
    #[serde(default, deserialize_with = "de::text")]
    pub token: String,
    #[serde(default, deserialize_with = "de::flag")]
    pub auth_success: bool,
}

/// Body of every endpoint that only needs the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionRequest {
    pub username: String,
    pub token: String,
}

/// Session plus a query uid (`/get_query`, `/delete_query`).
#[derive(Debug, Clone, Serialize)]
pub struct QueryRef {
    #[serde(flatten)]
    pub session: SessionRequest,
    pub uid: String,
}

/// Session plus the sound to fetch (`/get_sound`).
#[derive(Debug, Clone, Serialize)]
pub struct SoundRequest {
    #[serde(flatten)]
    pub session: SessionRequest,
    pub alert_sound: String,
}

/// Generic `{success, msg}` acknowledgement. `msg` is optional on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpResponse {
    #[serde(default, deserialize_with = "de::flag")]
    pub success: bool,
    #[serde(default, deserialize_with = "de::text")]
    pub msg: String,
}

/// Per-user settings kept by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, deserialize_with = "de::flag")]
    pub autosave: bool,
    #[serde(default, deserialize_with = "de::text")]
    pub notes: String,
}

/// `POST /edit_settings`
#[derive(Debug, Clone, Serialize)]
pub struct SettingsUpdate {
    #[serde(flatten)]
    pub session: SessionRequest,
    #[serde(flatten)]
    pub settings: Settings,
}

/// Add/edit payload.
///
/// Every value travels as a string, exactly like the web form the backend
/// was built for; the server parses and validates them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    pub url: String,
    pub sequence: String,
    pub interval: String,
    pub cycles_limit: String,
    pub randomize: String,
    pub eta: String,
    pub mode: String,
    pub is_recurring: String,
    pub alias: String,
    pub cookies_filename: String,
    pub target_url: String,
    pub alert_sound: String,
    pub min_matches: String,
    pub cooldown: String,
    /// Run state owned by the server. An edit re-registers the query, so
    /// these are sent back unchanged or the server resets them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycles: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_run: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_match_datetime: Option<String>,
}

impl Default for QueryForm {
    fn default() -> Self {
        Self {
            uid: None,
            url: String::new(),
            sequence: String::new(),
            interval: String::new(),
            cycles_limit: "0".to_string(),
            randomize: "0".to_string(),
            eta: String::new(),
            mode: "exists".to_string(),
            is_recurring: "false".to_string(),
            alias: String::new(),
            cookies_filename: String::new(),
            target_url: String::new(),
            alert_sound: String::new(),
            min_matches: "1".to_string(),
            cooldown: "0".to_string(),
            cycles: None,
            found: None,
            last_run: None,
            last_match_datetime: None,
        }
    }
}

impl From<&QuerySnapshot> for QueryForm {
    /// Pre-fill an edit form from the current server state.
    fn from(query: &QuerySnapshot) -> Self {
        let opt = |v: Option<i64>, fallback: &str| {
            v.map(|n| n.to_string()).unwrap_or_else(|| fallback.to_string())
        };
        let stamp = |v: &DisplayValue| (!v.is_empty()).then(|| v.to_string());
        Self {
            uid: Some(query.uid.clone()),
            url: query.url.clone(),
            sequence: query.sequence.clone(),
            interval: query.interval.to_string(),
            cycles_limit: opt(query.cycles_limit, "0"),
            randomize: query.randomize.to_string(),
            eta: query.eta.to_string(),
            mode: query.mode.clone(),
            is_recurring: query.is_recurring.to_string(),
            alias: query.alias.clone(),
            cookies_filename: query.cookies_filename.clone(),
            target_url: query.target_url.clone(),
            alert_sound: query.alert_sound.clone(),
            min_matches: opt(query.min_matches, "1"),
            cooldown: query.cooldown.to_string(),
            cycles: Some(opt(query.cycles, "0")),
            found: Some(query.found.to_string()),
            last_run: stamp(&query.last_run),
            last_match_datetime: stamp(&query.last_match_datetime),
        }
    }
}

/// Add/edit body: the form plus the session, flattened into one object.
#[derive(Debug, Clone, Serialize)]
pub struct QueryFormRequest<'a> {
    #[serde(flatten)]
    pub session: &'a SessionRequest,
    #[serde(flatten)]
    pub form: &'a QueryForm,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn session() -> SessionRequest {
        SessionRequest {
            username: "ana".to_string(),
            token: "t0k".to_string(),
        }
    }

    #[test]
    fn test_access_denied_envelope() {
        assert!(is_access_denied(&json!({"success": false, "msg": "Access Denied"})));
        assert!(!is_access_denied(&json!({"success": false, "msg": "Query not found"})));
        assert!(!is_access_denied(&json!({"success": true, "msg": "Access Denied"})));
        assert!(!is_access_denied(&json!({"1": {"uid": 1}})));
    }

    #[test]
    fn test_query_ref_is_flat() {
        let body = serde_json::to_value(QueryRef {
            session: session(),
            uid: "42".to_string(),
        })
        .unwrap();
        assert_eq!(body, json!({"username": "ana", "token": "t0k", "uid": "42"}));
    }

    #[test]
    fn test_settings_update_is_flat() {
        let body = serde_json::to_value(SettingsUpdate {
            session: session(),
            settings: Settings {
                autosave: true,
                notes: "hi".to_string(),
            },
        })
        .unwrap();
        assert_eq!(
            body,
            json!({"username": "ana", "token": "t0k", "autosave": true, "notes": "hi"})
        );
    }

    #[test]
    fn test_op_response_without_msg() {
        let resp: OpResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(resp.success);
        assert_eq!(resp.msg, "");
    }

    #[test]
    fn test_auth_response_decodes() {
        let resp: AuthResponse =
            serde_json::from_str(r#"{"username": "ana", "token": "abc", "auth_success": true}"#)
                .unwrap();
        assert!(resp.auth_success);
        assert_eq!(resp.token, "abc");
    }

    #[test]
    fn test_new_query_form_omits_uid() {
        let session = session();
        let form = QueryForm {
            url: "https://a.example".to_string(),
            sequence: "sold out".to_string(),
            interval: "5".to_string(),
            ..Default::default()
        };
        let body = serde_json::to_value(QueryFormRequest {
            session: &session,
            form: &form,
        })
        .unwrap();
        assert!(body.get("uid").is_none());
        assert_eq!(body["username"], "ana");
        assert_eq!(body["mode"], "exists");
        assert_eq!(body["min_matches"], "1");
        assert_eq!(body["is_recurring"], "false");
    }

    #[test]
    fn test_form_from_snapshot_keeps_uid() {
        let query = QuerySnapshot {
            uid: "7".to_string(),
            url: "https://a.example".to_string(),
            is_recurring: true,
            cycles_limit: Some(-1),
            ..Default::default()
        };
        let form = QueryForm::from(&query);
        assert_eq!(form.uid.as_deref(), Some("7"));
        assert_eq!(form.is_recurring, "true");
        assert_eq!(form.cycles_limit, "-1");
        assert_eq!(form.min_matches, "1");
    }

    #[test]
    fn test_edit_form_carries_run_state() {
        let query = QuerySnapshot {
            uid: "7".to_string(),
            url: "https://a.example".to_string(),
            found: true,
            cycles: Some(12),
            last_run: DisplayValue::from("2026-10-19 12:00:00"),
            last_match_datetime: DisplayValue::from("2026-10-18 08:30:00"),
            ..Default::default()
        };
        let session = session();
        let form = QueryForm::from(&query);
        let body = serde_json::to_value(QueryFormRequest {
            session: &session,
            form: &form,
        })
        .unwrap();

        assert_eq!(body["uid"], "7");
        assert_eq!(body["cycles"], "12");
        assert_eq!(body["found"], "true");
        assert_eq!(body["last_run"], "2026-10-19 12:00:00");
        assert_eq!(body["last_match_datetime"], "2026-10-18 08:30:00");
    }

    #[test]
    fn test_edit_form_omits_unknown_timestamps() {
        let form = QueryForm::from(&QuerySnapshot {
            uid: "7".to_string(),
            ..Default::default()
        });
        let body = serde_json::to_value(&form).unwrap();
        assert_eq!(body["cycles"], "0");
        assert_eq!(body["found"], "false");
        assert!(body.get("last_run").is_none());
        assert!(body.get("last_match_datetime").is_none());
    }

    #[test]
    fn test_new_query_form_leaves_run_state_to_server() {
        let body = serde_json::to_value(QueryForm::default()).unwrap();
        for key in ["cycles", "found", "last_run", "last_match_datetime"] {
            assert!(body.get(key).is_none(), "{key} should be omitted");
        }
    }
}
