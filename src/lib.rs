// GEODE Market - simulated marketplace backend
// Everything here imitates a remote API: fixed latency, fake tokens,
// an in-memory catalog, and canned analytics. Nothing is persisted.

pub mod analytics;
pub mod api;
pub mod auth;
pub mod catalog;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod guard;
pub mod nav;
pub mod observability;
pub mod session;

pub use api::{ApiRequest, ApiResponse, MarketApi};
pub use catalog::{AppDraft, AppRecord, AppStore, LogoUpload, Platform};
pub use client::{AppOutcome, LoginOutcome, MarketClient, Outcome};
pub use config::MarketConfig;
pub use error::{ApiError, ApiResult};
pub use session::{Role, SessionStore, UserSession};
