// Simulated per-developer analytics
// Views and downloads are invented the first time they are asked for, then
// written back into the catalog so the numbers stay stable for the session.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::AppStore;

/// Usage numbers for a single app.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppUsage {
    pub app_id: u64,
    pub name: String,
    pub views: u32,
    pub downloads: u32,
}

/// Aggregated usage across one developer's apps, plus the per-app series
/// a chart layer would consume.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeveloperAnalytics {
    pub developer: String,
    pub per_app: Vec<AppUsage>,
    pub total_views: u64,
    pub total_downloads: u64,
}

impl DeveloperAnalytics {
    /// App names, in catalog order. Chart x-axis labels.
    pub fn labels(&self) -> Vec<&str> {
        self.per_app.iter().map(|u| u.name.as_str()).collect()
    }

    pub fn views_series(&self) -> Vec<u32> {
        self.per_app.iter().map(|u| u.views).collect()
    }

    pub fn downloads_series(&self) -> Vec<u32> {
        self.per_app.iter().map(|u| u.downloads).collect()
    }
}

/// Compute analytics for one developer, lazily assigning the simulated
/// counters to any record that does not have them yet.
pub fn developer_analytics(store: &AppStore, developer: &str) -> DeveloperAnalytics {
    let mut per_app = Vec::new();

    store.with_developer_records_mut(developer, |record| {
        let views = *record
            .simulated_views
            .get_or_insert_with(|| rand::thread_rng().gen_range(50..1050));
        let downloads = *record
            .simulated_downloads
            .get_or_insert_with(|| rand::thread_rng().gen_range(10..210));

        per_app.push(AppUsage {
            app_id: record.id,
            name: record.name.clone(),
            views,
            downloads,
        });
    });

    let total_views = per_app.iter().map(|u| u.views as u64).sum();
    let total_downloads = per_app.iter().map(|u| u.downloads as u64).sum();

    DeveloperAnalytics {
        developer: developer.to_string(),
        per_app,
        total_views,
        total_downloads,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LimitsConfig;
    use crate::session::SessionStore;

    fn seeded_store() -> AppStore {
        AppStore::with_seed_catalog(SessionStore::new(), LimitsConfig::default())
    }

    #[test]
    fn test_counters_are_assigned_within_bounds() {
        let store = seeded_store();
        let analytics = developer_analytics(&store, "dev1");
        assert_eq!(analytics.per_app.len(), 4);
        for usage in &analytics.per_app {
            assert!((50..1050).contains(&usage.views));
            assert!((10..210).contains(&usage.downloads));
        }
        assert_eq!(
            analytics.total_views,
            analytics.per_app.iter().map(|u| u.views as u64).sum::<u64>()
        );
    }

    #[test]
    fn test_counters_are_stable_across_computations() {
        let store = seeded_store();
        let first = developer_analytics(&store, "dev1");
        let second = developer_analytics(&store, "dev1");
        assert_eq!(first, second);

        // The assigned numbers are also visible on the records themselves
        let record = store.get_by_id(1).unwrap();
        assert_eq!(record.simulated_views, Some(first.per_app[0].views));
    }

    #[test]
    fn test_unknown_developer_yields_empty_analytics() {
        let store = seeded_store();
        let analytics = developer_analytics(&store, "nobody");
        assert!(analytics.per_app.is_empty());
        assert_eq!(analytics.total_views, 0);
        assert_eq!(analytics.total_downloads, 0);
    }

    #[test]
    fn test_chart_series_line_up_with_labels() {
        let store = seeded_store();
        let analytics = developer_analytics(&store, "dev1");
        assert_eq!(analytics.labels().len(), analytics.views_series().len());
        assert_eq!(analytics.labels()[0], "GEODE Miner");
    }
}
