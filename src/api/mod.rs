// Typed operation dispatch
// The closed set of simulated endpoints, dispatched through one match
// instead of string path/method comparison. Every call pauses for the
// configured latency, then runs to completion before yielding; the
// fabricated response carries the { ok, status, body } shape of the
// endpoint table.

use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use crate::auth::AuthService;
use crate::catalog::{AppDraft, AppStore};
use crate::config::MarketConfig;
use crate::error::ApiError;
use crate::session::SessionStore;

/// One logical operation against the simulated backend.
#[derive(Debug, Clone)]
pub enum ApiRequest {
    Register { username: String, password: String, role: String },
    Login { username: String, password: String },
    LoginWithGoogle { credential: String },
    Logout,
    ListApps,
    CreateApp { draft: AppDraft },
    GetApp { id: u64 },
    UpdateApp { id: u64, draft: AppDraft },
    DeleteApp { id: u64 },
    ListByDeveloper { username: String },
}

impl ApiRequest {
    /// The endpoint this operation stands in for, for log lines.
    pub fn endpoint(&self) -> String {
        match self {
            ApiRequest::Register { .. } => "POST /users/register".to_string(),
            ApiRequest::Login { .. } => "POST /users/login".to_string(),
            ApiRequest::LoginWithGoogle { .. } => "POST /users/login/google".to_string(),
            ApiRequest::Logout => "POST /users/logout".to_string(),
            ApiRequest::ListApps => "GET /apps".to_string(),
            ApiRequest::CreateApp { .. } => "POST /apps".to_string(),
            ApiRequest::GetApp { id } => format!("GET /apps/{id}"),
            ApiRequest::UpdateApp { id, .. } => format!("PUT /apps/{id}"),
            ApiRequest::DeleteApp { id } => format!("DELETE /apps/{id}"),
            ApiRequest::ListByDeveloper { username } => {
                format!("GET /developers/{username}/apps")
            }
        }
    }
}

/// Fabricated HTTP-like response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub ok: bool,
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn success(status: u16, body: Value) -> Self {
        Self { ok: true, status, body }
    }

    fn failure(err: ApiError) -> Self {
        Self {
            ok: false,
            status: err.status(),
            body: json!({ "success": false, "message": err.to_string() }),
        }
    }
}

/// The whole simulated backend behind one dispatch point.
#[derive(Clone)]
pub struct MarketApi {
    auth: AuthService,
    store: AppStore,
    latency: Duration,
}

impl MarketApi {
    /// Wire up the services around one shared session store.
    pub fn new(config: &MarketConfig) -> Self {
        let sessions = SessionStore::new();
        let auth = AuthService::new(sessions.clone(), config.limits.clone());
        let store = if config.api.seed_catalog {
            AppStore::with_seed_catalog(sessions, config.limits.clone())
        } else {
            AppStore::new(sessions, config.limits.clone())
        };
        Self {
            auth,
            store,
            latency: Duration::from_millis(config.api.simulated_latency_ms),
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        self.auth.sessions()
    }

    pub fn store(&self) -> &AppStore {
        &self.store
    }

    /// Dispatch one operation. The latency pause happens here, once, before
    /// any state is touched; after it the operation runs to completion, so
    /// two calls from the same task never interleave mid-mutation.
    pub async fn dispatch(&self, request: ApiRequest) -> ApiResponse {
        debug!(endpoint = %request.endpoint(), "Simulated API call");
        tokio::time::sleep(self.latency).await;

        match request {
            ApiRequest::Register { username, password, role } => {
                match self.auth.register(&username, &password, &role) {
                    Ok(message) => ApiResponse::success(
                        201,
                        json!({ "success": true, "message": message }),
                    ),
                    Err(err) => ApiResponse::failure(err),
                }
            }
            ApiRequest::Login { username, password } => {
                match self.auth.login(&username, &password) {
                    Ok(login) => ApiResponse::success(
                        200,
                        json!({ "success": true, "user": login.user, "token": login.token }),
                    ),
                    Err(err) => ApiResponse::failure(err),
                }
            }
            ApiRequest::LoginWithGoogle { credential } => {
                match self.auth.login_with_google(&credential) {
                    Ok(login) => ApiResponse::success(
                        200,
                        json!({ "success": true, "user": login.user, "token": login.token }),
                    ),
                    Err(err) => ApiResponse::failure(err),
                }
            }
            ApiRequest::Logout => match self.auth.logout() {
                Ok(()) => ApiResponse::success(200, json!({ "success": true })),
                Err(err) => ApiResponse::failure(err),
            },
            ApiRequest::ListApps => {
                ApiResponse::success(200, serde_json::to_value(self.store.list()).unwrap_or_default())
            }
            ApiRequest::CreateApp { draft } => match self.store.create(draft) {
                Ok(app) => ApiResponse::success(
                    201,
                    json!({
                        "success": true,
                        "message": "App added successfully (Simulated).",
                        "app": app,
                    }),
                ),
                Err(err) => ApiResponse::failure(err),
            },
            ApiRequest::GetApp { id } => match self.store.get_by_id(id) {
                Ok(app) => {
                    ApiResponse::success(200, serde_json::to_value(app).unwrap_or_default())
                }
                Err(err) => ApiResponse::failure(err),
            },
            ApiRequest::UpdateApp { id, draft } => match self.store.update(id, draft) {
                Ok(app) => ApiResponse::success(
                    200,
                    json!({
                        "success": true,
                        "message": "App updated successfully (Simulated).",
                        "app": app,
                    }),
                ),
                Err(err) => ApiResponse::failure(err),
            },
            ApiRequest::DeleteApp { id } => match self.store.delete(id) {
                Ok(()) => ApiResponse::success(
                    200,
                    json!({
                        "success": true,
                        "message": "App deleted successfully (Simulated).",
                    }),
                ),
                Err(err) => ApiResponse::failure(err),
            },
            ApiRequest::ListByDeveloper { username } => {
                match self.store.list_by_developer(&username) {
                    Ok(apps) => ApiResponse::success(
                        200,
                        serde_json::to_value(apps).unwrap_or_default(),
                    ),
                    Err(err) => ApiResponse::failure(err),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MarketConfig;

    fn api() -> MarketApi {
        let mut config = MarketConfig::default();
        config.api.simulated_latency_ms = 0;
        MarketApi::new(&config)
    }

    #[tokio::test]
    async fn test_register_success_shape() {
        let response = api()
            .dispatch(ApiRequest::Register {
                username: "newdev".to_string(),
                password: "secret1".to_string(),
                role: "developer".to_string(),
            })
            .await;
        assert!(response.ok);
        assert_eq!(response.status, 201);
        assert_eq!(response.body["success"], true);
    }

    #[tokio::test]
    async fn test_register_conflict_status() {
        let response = api()
            .dispatch(ApiRequest::Register {
                username: "TESTUSER".to_string(),
                password: "secret1".to_string(),
                role: "user".to_string(),
            })
            .await;
        assert!(!response.ok);
        assert_eq!(response.status, 409);
        assert_eq!(response.body["success"], false);
    }

    #[tokio::test]
    async fn test_login_payload_carries_user_and_token() {
        let response = api()
            .dispatch(ApiRequest::Login {
                username: "dev1".to_string(),
                password: "password".to_string(),
            })
            .await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body["user"]["username"], "dev1");
        assert_eq!(response.body["user"]["role"], "developer");
        assert!(response.body["token"].as_str().unwrap().starts_with("fake-token-"));
    }

    #[tokio::test]
    async fn test_list_apps_is_a_bare_array() {
        let response = api().dispatch(ApiRequest::ListApps).await;
        assert!(response.ok);
        assert_eq!(response.body.as_array().unwrap().len(), 5);
        // Wire field names follow the original payloads
        assert!(response.body[0].get("apkLink").is_some());
    }

    #[tokio::test]
    async fn test_protected_op_without_session_is_401() {
        let response = api()
            .dispatch(ApiRequest::DeleteApp { id: 1 })
            .await;
        assert_eq!(response.status, 401);
    }

    #[tokio::test]
    async fn test_get_missing_app_is_404() {
        let response = api().dispatch(ApiRequest::GetApp { id: 9999 }).await;
        assert!(!response.ok);
        assert_eq!(response.status, 404);
    }

    #[tokio::test]
    async fn test_unseeded_catalog_starts_empty() {
        let mut config = MarketConfig::default();
        config.api.simulated_latency_ms = 0;
        config.api.seed_catalog = false;
        let api = MarketApi::new(&config);
        let response = api.dispatch(ApiRequest::ListApps).await;
        assert!(response.body.as_array().unwrap().is_empty());
    }
}
