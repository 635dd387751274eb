// Client wrapper layer
// One async method per logical operation. Wrappers unwrap the fabricated
// { ok, status, body } responses into plain values and never return an
// error to their caller; page controllers only ever see these shapes.

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::api::{ApiRequest, ApiResponse, MarketApi};
use crate::auth::PublicProfile;
use crate::catalog::{AppDraft, AppRecord};

/// Flat result for operations that only report success or failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Outcome {
    pub success: bool,
    pub message: String,
}

/// Result of a create or update, carrying the affected record on success.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppOutcome {
    pub success: bool,
    pub message: String,
    pub app: Option<AppRecord>,
}

/// Result of a login attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginOutcome {
    pub success: bool,
    pub message: String,
    pub user: Option<PublicProfile>,
    pub token: Option<String>,
}

/// Thin client over the simulated backend.
#[derive(Clone)]
pub struct MarketClient {
    api: MarketApi,
}

impl MarketClient {
    pub fn new(api: MarketApi) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &MarketApi {
        &self.api
    }

    /// Fetch the whole catalog. Degrades to an empty list on failure.
    pub async fn get_apps(&self) -> Vec<AppRecord> {
        let response = self.api.dispatch(ApiRequest::ListApps).await;
        parse_app_list(response, "apps")
    }

    /// Fetch one app. A 404 resolves to `None`, not an error.
    pub async fn get_app_by_id(&self, id: u64) -> Option<AppRecord> {
        let response = self.api.dispatch(ApiRequest::GetApp { id }).await;
        if !response.ok {
            return None;
        }
        serde_json::from_value(response.body).ok()
    }

    /// Fetch every app of one developer. Degrades to an empty list.
    pub async fn get_apps_by_developer(&self, username: &str) -> Vec<AppRecord> {
        let response = self
            .api
            .dispatch(ApiRequest::ListByDeveloper { username: username.to_string() })
            .await;
        parse_app_list(response, "developer apps")
    }

    pub async fn add_app(&self, draft: AppDraft) -> AppOutcome {
        let response = self.api.dispatch(ApiRequest::CreateApp { draft }).await;
        parse_app_outcome(response)
    }

    pub async fn update_app(&self, id: u64, draft: AppDraft) -> AppOutcome {
        let response = self.api.dispatch(ApiRequest::UpdateApp { id, draft }).await;
        parse_app_outcome(response)
    }

    pub async fn delete_app(&self, id: u64) -> Outcome {
        let response = self.api.dispatch(ApiRequest::DeleteApp { id }).await;
        Outcome {
            success: response.ok,
            message: message_of(&response),
        }
    }

    pub async fn register_user(&self, username: &str, password: &str, role: &str) -> Outcome {
        let response = self
            .api
            .dispatch(ApiRequest::Register {
                username: username.to_string(),
                password: password.to_string(),
                role: role.to_string(),
            })
            .await;
        Outcome {
            success: response.ok,
            message: message_of(&response),
        }
    }

    pub async fn login_user(&self, username: &str, password: &str) -> LoginOutcome {
        let response = self
            .api
            .dispatch(ApiRequest::Login {
                username: username.to_string(),
                password: password.to_string(),
            })
            .await;
        parse_login_outcome(response)
    }

    pub async fn login_with_google(&self, credential: &str) -> LoginOutcome {
        let response = self
            .api
            .dispatch(ApiRequest::LoginWithGoogle { credential: credential.to_string() })
            .await;
        parse_login_outcome(response)
    }

    /// Log out. The local session is cleared even if the simulated call
    /// were to misbehave; the result is always a success.
    pub async fn logout_user(&self) -> Outcome {
        let response = self.api.dispatch(ApiRequest::Logout).await;
        self.api.sessions().clear();
        Outcome {
            success: true,
            message: if response.ok {
                "Logged out.".to_string()
            } else {
                message_of(&response)
            },
        }
    }
}

fn message_of(response: &ApiResponse) -> String {
    response.body["message"]
        .as_str()
        .unwrap_or("Unexpected response (Simulated).")
        .to_string()
}

fn parse_app_list(response: ApiResponse, what: &str) -> Vec<AppRecord> {
    if !response.ok {
        error!(status = response.status, "Failed to fetch {what}: {}", message_of(&response));
        return Vec::new();
    }
    serde_json::from_value(response.body).unwrap_or_else(|err| {
        error!("Malformed {what} payload: {err}");
        Vec::new()
    })
}

fn parse_app_outcome(response: ApiResponse) -> AppOutcome {
    let message = message_of(&response);
    let app = if response.ok {
        serde_json::from_value(response.body["app"].clone()).ok()
    } else {
        None
    };
    AppOutcome {
        success: response.ok,
        message,
        app,
    }
}

fn parse_login_outcome(response: ApiResponse) -> LoginOutcome {
    if !response.ok {
        return LoginOutcome {
            success: false,
            message: message_of(&response),
            user: None,
            token: None,
        };
    }
    LoginOutcome {
        success: true,
        message: String::new(),
        user: serde_json::from_value(response.body["user"].clone()).ok(),
        token: response.body["token"].as_str().map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Platform;
    use crate::config::MarketConfig;
    use crate::session::Role;

    fn client() -> MarketClient {
        let mut config = MarketConfig::default();
        config.api.simulated_latency_ms = 0;
        MarketClient::new(MarketApi::new(&config))
    }

    fn draft(name: &str) -> AppDraft {
        AppDraft {
            name: name.to_string(),
            description: "Something useful.".to_string(),
            price: "Free".to_string(),
            platform: Some(Platform::Android),
            ..AppDraft::default()
        }
    }

    #[tokio::test]
    async fn test_get_apps_preserves_records() {
        let client = client();
        let apps = client.get_apps().await;
        assert_eq!(apps.len(), 5);
        assert_eq!(apps[0].name, "GEODE Miner");
        assert_eq!(apps[1].platform, Platform::Ios);
    }

    #[tokio::test]
    async fn test_get_app_by_id_resolves_404_to_none() {
        let client = client();
        assert!(client.get_app_by_id(9999).await.is_none());
        assert!(client.get_app_by_id(3).await.is_some());
    }

    #[tokio::test]
    async fn test_add_app_round_trip() {
        let client = client();
        let login = client.login_user("dev1", "password").await;
        assert!(login.success);
        assert_eq!(login.user.unwrap().role, Role::Developer);

        let outcome = client.add_app(draft("Round Trip")).await;
        assert!(outcome.success);
        let created = outcome.app.unwrap();

        let fetched = client.get_app_by_id(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.developer, "dev1");
    }

    #[tokio::test]
    async fn test_add_app_without_login_is_a_plain_failure() {
        let client = client();
        let outcome = client.add_app(draft("Nope")).await;
        assert!(!outcome.success);
        assert!(outcome.app.is_none());
        assert!(outcome.message.contains("not logged in"));
    }

    #[tokio::test]
    async fn test_failed_login_outcome() {
        let client = client();
        let outcome = client.login_user("dev1", "wrong").await;
        assert!(!outcome.success);
        assert!(outcome.user.is_none());
        assert!(outcome.token.is_none());
        assert!(outcome.message.contains("Invalid username or password"));
    }

    #[tokio::test]
    async fn test_logout_is_always_a_success() {
        let client = client();
        client.login_user("user1", "password").await;
        let first = client.logout_user().await;
        let second = client.logout_user().await;
        assert!(first.success);
        assert!(second.success);
        assert!(!client.api().sessions().is_authenticated());
    }

    #[tokio::test]
    async fn test_get_apps_by_developer_degrades_to_empty_when_logged_out() {
        let client = client();
        assert!(client.get_apps_by_developer("dev1").await.is_empty());

        client.login_user("user1", "password").await;
        assert_eq!(client.get_apps_by_developer("dev1").await.len(), 4);
    }
}
