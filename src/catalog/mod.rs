// App Catalog Module
// The one in-memory app list and the simulated CRUD endpoints over it.
// No durability: every new store resets to the fixed seed records.

pub mod validate;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::LimitsConfig;
use crate::error::{ApiError, ApiResult};
use crate::session::{SessionStore, UserSession};

/// Target platform of a published app.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Platform {
    Android,
    #[serde(rename = "iOS")]
    Ios,
    Both,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Android => write!(f, "Android"),
            Platform::Ios => write!(f, "iOS"),
            Platform::Both => write!(f, "Both"),
        }
    }
}

/// One published app. Held only in memory; ids are unique and monotone,
/// `developer` is the ownership key stamped at creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppRecord {
    pub id: u64,
    pub developer: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub platform: Platform,
    pub apk_link: String,
    pub ios_link: String,
    pub logo: String,
    /// Lazily assigned the first time analytics are computed, then stable
    /// for the life of the store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simulated_views: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simulated_downloads: Option<u32>,
}

/// A logo file attached to a create or update call. Only the metadata is
/// carried; real upload handling is out of scope and the file content is
/// never read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogoUpload {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
}

/// Submitted fields for a create or update call.
///
/// Logo policy: `logo_upload`, when present, wins and fabricates a path
/// from the file name. Otherwise `logo: Some("")` clears the stored logo,
/// `Some(url)` sets it, and `None` keeps whatever the record already has.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppDraft {
    pub name: String,
    pub description: String,
    pub price: String,
    pub platform: Option<Platform>,
    pub apk_link: String,
    pub ios_link: String,
    pub logo: Option<String>,
    pub logo_upload: Option<LogoUpload>,
}

/// The simulated apps backend: one list, one id counter, and a handle to
/// the session store for the authorization gate.
#[derive(Clone)]
pub struct AppStore {
    records: Arc<RwLock<Vec<AppRecord>>>,
    next_id: Arc<AtomicU64>,
    sessions: SessionStore,
    limits: LimitsConfig,
}

impl AppStore {
    /// Create an empty store.
    pub fn new(sessions: SessionStore, limits: LimitsConfig) -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            sessions,
            limits,
        }
    }

    /// Create a store pre-populated with the fixed demo records.
    pub fn with_seed_catalog(sessions: SessionStore, limits: LimitsConfig) -> Self {
        let store = Self::new(sessions, limits);
        {
            let mut records = store.records.write();
            for record in seed_records() {
                store.next_id.fetch_add(1, Ordering::Relaxed);
                records.push(record);
            }
        }
        info!(count = store.len(), "Catalog seeded with demo apps");
        store
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// GET /apps — the full list, unfiltered, no auth.
    pub fn list(&self) -> Vec<AppRecord> {
        self.records.read().clone()
    }

    /// GET /apps/{id} — record or not-found, no auth.
    pub fn get_by_id(&self, id: u64) -> ApiResult<AppRecord> {
        self.records
            .read()
            .iter()
            .find(|app| app.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound("App not found (Simulated).".to_string()))
    }

    /// GET /developers/{username}/apps — requires a session.
    ///
    /// Any signed-in user can list any developer's apps; there is no check
    /// that the caller equals the requested developer.
    /// TODO: decide whether this listing should be restricted to the owner.
    pub fn list_by_developer(&self, username: &str) -> ApiResult<Vec<AppRecord>> {
        self.require_session()?;
        Ok(self
            .records
            .read()
            .iter()
            .filter(|app| app.developer == username)
            .cloned()
            .collect())
    }

    /// POST /apps — validate, assign the next id, stamp the acting user as
    /// developer, append.
    pub fn create(&self, draft: AppDraft) -> ApiResult<AppRecord> {
        let session = self.require_session()?;
        validate::validate_draft(&draft, &self.limits)?;

        let logo = match &draft.logo_upload {
            Some(upload) if upload.size_bytes > 0 => fabricate_logo_path(&upload.file_name),
            _ => draft.logo.clone().unwrap_or_default(),
        };

        let record = AppRecord {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            developer: session.username,
            name: draft.name.trim().to_string(),
            description: draft.description.trim().to_string(),
            price: draft.price.trim().to_string(),
            platform: draft.platform.unwrap_or(Platform::Both),
            apk_link: draft.apk_link.trim().to_string(),
            ios_link: draft.ios_link.trim().to_string(),
            logo,
            simulated_views: None,
            simulated_downloads: None,
        };

        self.records.write().push(record.clone());
        info!(id = record.id, name = %record.name, developer = %record.developer, "App added");
        Ok(record)
    }

    /// PUT /apps/{id} — not-found, then ownership, then validation; on
    /// success all mutable fields are replaced, id and developer preserved.
    pub fn update(&self, id: u64, draft: AppDraft) -> ApiResult<AppRecord> {
        let session = self.require_session()?;

        let mut records = self.records.write();
        let existing = records
            .iter_mut()
            .find(|app| app.id == id)
            .ok_or_else(|| ApiError::NotFound("App not found (Simulated).".to_string()))?;

        Self::require_owner(&session, existing)?;
        validate::validate_draft(&draft, &self.limits)?;

        existing.logo = match (&draft.logo_upload, &draft.logo) {
            (Some(upload), _) if upload.size_bytes > 0 => fabricate_logo_path(&upload.file_name),
            (_, Some(logo)) => logo.clone(),
            (_, None) => existing.logo.clone(),
        };
        existing.name = draft.name.trim().to_string();
        existing.description = draft.description.trim().to_string();
        existing.price = draft.price.trim().to_string();
        if let Some(platform) = draft.platform {
            existing.platform = platform;
        }
        existing.apk_link = draft.apk_link.trim().to_string();
        existing.ios_link = draft.ios_link.trim().to_string();

        info!(id, name = %existing.name, "App updated");
        Ok(existing.clone())
    }

    /// DELETE /apps/{id} — not-found, then ownership, then removal.
    pub fn delete(&self, id: u64) -> ApiResult<()> {
        let session = self.require_session()?;

        let mut records = self.records.write();
        let index = records
            .iter()
            .position(|app| app.id == id)
            .ok_or_else(|| ApiError::NotFound("App not found (Simulated).".to_string()))?;

        Self::require_owner(&session, &records[index])?;

        records.remove(index);
        info!(id, "App deleted");
        Ok(())
    }

    /// Apply a closure to every record of the given developer, under the
    /// write lock. Used by the analytics layer to assign the lazy counters
    /// in place.
    pub(crate) fn with_developer_records_mut<F>(&self, developer: &str, mut f: F)
    where
        F: FnMut(&mut AppRecord),
    {
        let mut records = self.records.write();
        for record in records.iter_mut().filter(|app| app.developer == developer) {
            f(record);
        }
    }

    fn require_session(&self) -> ApiResult<UserSession> {
        self.sessions.current().ok_or_else(|| {
            warn!("Rejected catalog mutation: no user logged in");
            ApiError::not_logged_in()
        })
    }

    fn require_owner(session: &UserSession, record: &AppRecord) -> ApiResult<()> {
        if record.developer != session.username {
            warn!(
                acting = %session.username,
                owner = %record.developer,
                id = record.id,
                "Rejected catalog mutation: not the owner"
            );
            return Err(ApiError::Authorization(
                "You do not own this app (Simulated).".to_string(),
            ));
        }
        Ok(())
    }
}

fn fabricate_logo_path(file_name: &str) -> String {
    format!("/uploads/logos/{file_name}")
}

/// The fixed demo catalog, ids 1 through 5.
fn seed_records() -> Vec<AppRecord> {
    let blank = |id: u64, developer: &str, name: &str, description: &str, price: &str,
                 platform: Platform, apk_link: &str, ios_link: &str, logo: &str| AppRecord {
        id,
        developer: developer.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price: price.to_string(),
        platform,
        apk_link: apk_link.to_string(),
        ios_link: ios_link.to_string(),
        logo: logo.to_string(),
        simulated_views: None,
        simulated_downloads: None,
    };

    vec![
        blank(
            1, "dev1", "GEODE Miner",
            "A simple game where you mine precious GEODEs.",
            "Free", Platform::Android, "#", "",
            "https://via.placeholder.com/150/00BCD4/FFFFFF?text=GM",
        ),
        blank(
            2, "dev1", "GEODE Chat",
            "Secure messaging for the GEODE community.",
            "$2.99", Platform::Ios, "", "#",
            "https://via.placeholder.com/150/FF9800/FFFFFF?text=GC",
        ),
        blank(
            3, "dev1", "GEODE Wallet",
            "Manage your GEODE coins securely.",
            "Free", Platform::Both, "#", "#",
            "https://via.placeholder.com/150/1A237E/FFFFFF?text=GW",
        ),
        blank(
            4, "dev1", "Another Dev1 App",
            "Just another app.",
            "$0.99", Platform::Android, "#", "", "",
        ),
        blank(
            5, "anotherdev", "Simple App",
            "A very simple app.",
            "Free", Platform::Ios, "", "#",
            "https://via.placeholder.com/150/757575/FFFFFF?text=SA",
        ),
    ]
}
