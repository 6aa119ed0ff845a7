//! Seicho CLI - Dashboard progression from the terminal
//!
//! Check your level, earn XP and browse badges without opening the web UI.

mod api;
mod config;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::Password;

use api::{EvaluateStatsRequest, SeichoClient};
use config::Config;

#[derive(Parser)]
#[command(name = "seicho")]
#[command(about = "Seicho CLI - dashboard progression from the terminal", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Login and store API key
    Login {
        /// API key (will prompt if not provided)
        #[arg(short, long)]
        key: Option<String>,
        /// API base URL
        #[arg(short, long)]
        url: Option<String>,
    },

    /// Show XP, level and badge progress
    Status,

    /// Add XP directly
    Xp {
        /// XP amount (positive)
        amount: u64,
        /// Action tag, informational only
        #[arg(short, long)]
        action: Option<String>,
    },

    /// Record a rewarded action (XP resolved server-side)
    Action {
        /// Action name, e.g. diary_entry, conversation, login
        name: String,
    },

    /// Report statistics for badge evaluation
    Stats {
        #[arg(long)]
        mastered_words: Option<u64>,
        #[arg(long)]
        diary_streak: Option<u64>,
        #[arg(long)]
        diary_count: Option<u64>,
        #[arg(long)]
        conversations: Option<u64>,
        #[arg(long)]
        shadowing: Option<u64>,
        #[arg(long)]
        streak: Option<u64>,
        #[arg(long)]
        daily_goal: bool,
    },

    /// List unlocked and locked badges
    Badges {
        /// Also show locked badges
        #[arg(short, long)]
        all: bool,
    },

    /// Acknowledge the pending badge notification
    Ack,

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Login { key, url } => cmd_login(key, url).await,
        Commands::Status => cmd_status().await,
        Commands::Xp { amount, action } => cmd_xp(amount, action).await,
        Commands::Action { name } => cmd_action(&name).await,
        Commands::Stats {
            mastered_words,
            diary_streak,
            diary_count,
            conversations,
            shadowing,
            streak,
            daily_goal,
        } => {
            let stats = EvaluateStatsRequest {
                mastered_words,
                diary_streak,
                diary_count,
                conversation_count: conversations,
                shadowing_mastered: shadowing,
                streak,
                daily_goal_reached: daily_goal.then_some(true),
            };
            cmd_stats(stats).await
        }
        Commands::Badges { all } => cmd_badges(all).await,
        Commands::Ack => cmd_ack().await,
        Commands::Config => cmd_config(),
    }
}

fn client() -> Result<SeichoClient> {
    let config = Config::load()?;
    let Some(api_key) = config.api_key else {
        bail!("Not logged in. Run {} first.", "seicho login".bold());
    };
    Ok(SeichoClient::new(&config.base_url, &api_key))
}

async fn cmd_login(key: Option<String>, url: Option<String>) -> Result<()> {
    let mut config = Config::load()?;

    if let Some(url) = url {
        config.set_base_url(url);
    }

    let key = match key {
        Some(k) => k,
        None => Password::new().with_prompt("API key").interact()?,
    };
    config.set_api_key(key.clone());

    let client = SeichoClient::new(&config.base_url, &key);
    if !client.health().await.unwrap_or(false) {
        println!(
            "{} could not reach {} - key saved anyway",
            "warning:".yellow(),
            config.base_url
        );
    }

    config.save()?;
    println!("{} logged in", "✓".green());
    Ok(())
}

async fn cmd_status() -> Result<()> {
    let progression = client()?.progression().await?;

    println!(
        "{} level {}  ({} XP total)",
        "成長".bold(),
        progression.progress.level.to_string().cyan().bold(),
        progression.progress.total_xp
    );
    println!(
        "  {:.0}% through this level, {} XP to the next",
        progression.progress.xp_progress, progression.progress.xp_to_next_level
    );
    println!("  today: {} XP", progression.progress.daily_xp);
    println!(
        "  badges: {} unlocked, {} to go",
        progression.unlocked_badges.len().to_string().green(),
        progression.locked_badges.len()
    );

    if let Some(pending) = progression.pending {
        println!(
            "\n{} {} {} - {}",
            "new badge!".yellow().bold(),
            pending.icon,
            pending.name.bold(),
            pending.description
        );
        println!("  (run {} to dismiss)", "seicho ack".bold());
    }

    Ok(())
}

async fn cmd_xp(amount: u64, action: Option<String>) -> Result<()> {
    let gain = client()?.add_xp(amount, action).await?;
    print_gain_summary(gain);
    Ok(())
}

async fn cmd_action(name: &str) -> Result<()> {
    let gain = client()?.record_action(name).await?;
    print_gain_summary(gain);
    Ok(())
}

fn print_gain_summary(gain: api::XpGainResponse) {
    println!(
        "{} now {} XP, level {}",
        "+XP".green().bold(),
        gain.progress.total_xp,
        gain.progress.level
    );
    if gain.leveled_up {
        println!(
            "{} reached level {}!",
            "level up!".cyan().bold(),
            gain.progress.level
        );
    }
    for badge in gain.newly_unlocked {
        println!(
            "{} {} {} - {}",
            "unlocked".yellow(),
            badge.icon,
            badge.name.bold(),
            badge.description
        );
    }
}

async fn cmd_stats(stats: EvaluateStatsRequest) -> Result<()> {
    let result = client()?.evaluate(&stats).await?;

    if result.newly_unlocked.is_empty() {
        println!("No new badges this time");
        return Ok(());
    }

    for badge in result.newly_unlocked {
        println!(
            "{} {} {} ({}) - {}",
            "unlocked".yellow().bold(),
            badge.icon,
            badge.name.bold(),
            badge.rarity,
            badge.description
        );
    }
    Ok(())
}

async fn cmd_badges(all: bool) -> Result<()> {
    let progression = client()?.progression().await?;

    println!("{}", "Unlocked".green().bold());
    if progression.unlocked_badges.is_empty() {
        println!("  (none yet)");
    }
    for badge in &progression.unlocked_badges {
        let when = badge
            .unlocked_at
            .as_deref()
            .map(|at| format!("  [{}]", at))
            .unwrap_or_default();
        println!(
            "  {} {} ({}){}",
            badge.icon,
            badge.name.bold(),
            badge.rarity,
            when.dimmed()
        );
    }

    if all {
        println!("\n{}", "Locked".dimmed().bold());
        for badge in &progression.locked_badges {
            println!(
                "  {} {} ({}) - {}",
                badge.icon,
                badge.name,
                badge.rarity,
                badge.description.dimmed()
            );
        }
    }

    Ok(())
}

async fn cmd_ack() -> Result<()> {
    client()?.acknowledge().await?;
    println!("{} notification cleared", "✓".green());
    Ok(())
}

fn cmd_config() -> Result<()> {
    let config = Config::load()?;
    println!("config file: {:?}", Config::config_path()?);
    println!("base_url:    {}", config.base_url);
    println!(
        "api_key:     {}",
        if config.api_key.is_some() {
            "set".green().to_string()
        } else {
            "not set".red().to_string()
        }
    );
    Ok(())
}
