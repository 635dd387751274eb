// CLI Command Implementations
// Scripted walkthrough of the simulated marketplace with colored output

use super::{error, info, success, warning, Commands};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::Duration;

use crate::analytics;
use crate::api::MarketApi;
use crate::catalog::{AppDraft, AppRecord, Platform};
use crate::client::MarketClient;
use crate::config::MarketConfig;
use crate::nav::NavView;

/// Execute a CLI command
pub async fn execute(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Demo { config, .. } => demo_command(config).await,
        Commands::Validate { file } => validate_command(file),
    }
}

/// Run the scripted marketplace walkthrough
async fn demo_command(config_path: String) -> anyhow::Result<()> {
    let config = MarketConfig::load(&config_path)?;
    let client = MarketClient::new(MarketApi::new(&config));

    info("Every call below pauses for the simulated network latency.");
    println!();

    // Registration: one rejected, one accepted (nothing is stored either way)
    let short = with_spinner("Registering 'ab'...", client.register_user("ab", "secret1", "user")).await;
    error(&format!("register('ab'): {}", short.message));

    let ok = with_spinner(
        "Registering 'newdev'...",
        client.register_user("newdev", "secret123", "developer"),
    )
    .await;
    success(&format!("register('newdev'): {}", ok.message));
    println!();

    // Login as the demo developer
    let login = with_spinner("Logging in as dev1...", client.login_user("dev1", "password")).await;
    match &login.user {
        Some(user) => success(&format!(
            "Logged in as {} ({}), token {}",
            user.username.cyan(),
            user.role,
            login.token.as_deref().unwrap_or("-").bright_black()
        )),
        None => {
            error(&login.message);
            return Ok(());
        }
    }

    let nav = NavView::for_session(client.api().sessions().current().as_ref());
    if nav.dev_dashboard {
        info(&format!(
            "Nav: {}",
            nav.username_display.as_deref().unwrap_or_default()
        ));
    }
    println!();

    // Browse the seeded catalog
    let apps = with_spinner("Fetching catalog...", client.get_apps()).await;
    println!("{}", "── Marketplace ──────────────────────────".bright_white());
    for app in &apps {
        print_card(app);
    }
    println!();

    // Publish a new app
    let draft = AppDraft {
        name: "GEODE Radar".to_string(),
        description: "Find geodes near you.".to_string(),
        price: "$1.99".to_string(),
        platform: Some(Platform::Both),
        apk_link: "https://example.com/radar.apk".to_string(),
        ios_link: "https://example.com/radar".to_string(),
        ..AppDraft::default()
    };
    let added = with_spinner("Publishing GEODE Radar...", client.add_app(draft)).await;
    if let Some(app) = &added.app {
        success(&format!("{} (id {})", added.message, app.id));
    } else {
        error(&added.message);
    }

    // Edit it: new price, keep everything else
    if let Some(app) = added.app {
        let edit = AppDraft {
            name: app.name.clone(),
            description: app.description.clone(),
            price: "Free".to_string(),
            platform: Some(app.platform),
            apk_link: app.apk_link.clone(),
            ios_link: app.ios_link.clone(),
            // logo stays None so the stored one is kept
            ..AppDraft::default()
        };
        let updated = with_spinner("Dropping the price...", client.update_app(app.id, edit)).await;
        success(&updated.message);
    }
    println!();

    // Developer analytics (numbers are invented on first computation)
    let stats = analytics::developer_analytics(client.api().store(), "dev1");
    println!("{}", "── dev1 analytics (simulated) ───────────".bright_white());
    for usage in &stats.per_app {
        println!(
            "  {:<20} {} views, {} downloads",
            usage.name,
            usage.views.to_string().yellow(),
            usage.downloads.to_string().yellow()
        );
    }
    println!(
        "  {:<20} {} views, {} downloads",
        "total".bright_white(),
        stats.total_views.to_string().green(),
        stats.total_downloads.to_string().green()
    );
    println!();

    // Ownership check: anotherdev cannot touch dev1's apps
    with_spinner("Switching to anotherdev...", client.logout_user()).await;
    warning("anotherdev is not in the demo credential table, logging in as user1 instead");
    with_spinner("Logging in as user1...", client.login_user("user1", "password")).await;
    let denied = with_spinner("Trying to delete app 1...", client.delete_app(1)).await;
    error(&format!("delete(1) as user1: {}", denied.message));

    // Logout is idempotent
    with_spinner("Logging out...", client.logout_user()).await;
    let again = with_spinner("Logging out again...", client.logout_user()).await;
    success(&format!("Second logout still succeeds: {}", again.success));
    println!();

    info("All state above lived in memory only; rerun the demo and it resets.");
    Ok(())
}

/// Validate a configuration file
fn validate_command(file: String) -> anyhow::Result<()> {
    info(&format!("Validating {}", file.bright_white()));
    match MarketConfig::load(&file) {
        Ok(_) => {
            success("Configuration file is valid");
            Ok(())
        }
        Err(e) => {
            error(&format!("Invalid configuration: {e:#}"));
            Err(e)
        }
    }
}

fn print_card(app: &AppRecord) {
    println!(
        "  #{:<3} {:<20} {:<8} {:<8} by {}",
        app.id,
        app.name.cyan(),
        app.price.yellow(),
        app.platform.to_string(),
        app.developer.bright_black()
    );
}

/// Run a future behind a spinner, standing in for the simulated latency.
async fn with_spinner<F: Future>(message: &str, fut: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));

    let output = fut.await;
    spinner.finish_and_clear();
    output
}
