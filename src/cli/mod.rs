// Command Line Interface Module
// CLI surface for the marketplace demo, using clap

pub mod commands;

use clap::{Parser, Subcommand};
use colored::*;

/// GEODE Market - simulated marketplace backend demo
#[derive(Parser)]
#[command(name = "geode-market")]
#[command(author = "GEODE Team")]
#[command(version = "0.4.0")]
#[command(about = "Simulated marketplace backend: fake auth, in-memory catalog, canned analytics", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the scripted marketplace walkthrough
    Demo {
        /// Configuration file path
        #[arg(short, long, default_value = "geode.toml")]
        config: String,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate configuration file
    Validate {
        /// Configuration file to validate
        #[arg(short, long, default_value = "geode.toml")]
        file: String,
    },
}

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg);
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", "ℹ".blue().bold(), msg);
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{} {}", "⚠".yellow().bold(), msg);
}

/// Print the GEODE Market banner
pub fn print_banner() {
    println!("{}", r#"
╔═══════════════════════════════════════════════════════════╗
║                                                           ║
║   💎  GEODE MARKET  v0.4.0                                ║
║                                                           ║
║   Simulated Marketplace Backend Demo                      ║
║   In-memory catalog, fake auth, canned analytics          ║
║                                                           ║
╚═══════════════════════════════════════════════════════════╝
    "#.bright_cyan().bold());
}
