// wapi-cli/src/main.rs

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

use wapi_common::models::{BotType, CampaignStatus, InboxTab};
use wapi_core::DashboardConfig;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "wapi")]
#[command(author, version, about = "Wapi - WhatsApp business dashboard, from the terminal")]
struct Args {
    /// SQLite file that holds the dashboard's storage.
    #[arg(long, env = "WAPI_DB", global = true)]
    db: Option<String>,

    /// Print collections as JSON.
    #[arg(long, global = true, default_value = "false")]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in with the dashboard account
    Login {
        email: String,
        #[arg(long, env = "WAPI_PASSWORD")]
        password: String,
    },

    /// Clear the session flags
    Logout,

    /// Show who is signed in
    Status,

    /// What the route guard does with a path
    Route { path: String },

    /// Broadcast campaigns
    Campaigns {
        #[command(subcommand)]
        action: CampaignAction,
    },

    /// Keyword reply bots
    Bots {
        #[command(subcommand)]
        action: BotAction,
    },

    /// Support agents
    Agents {
        #[command(subcommand)]
        action: AgentAction,
    },

    /// Third-party integrations
    Integrations {
        #[command(subcommand)]
        action: IntegrationAction,
    },

    /// Chats inbox
    Inbox {
        #[command(subcommand)]
        action: InboxAction,
    },

    /// Reset contact labels to VIP, Customer and Lead
    DefaultLabels,

    /// Write the contacts import template
    SampleCsv {
        #[arg(long, default_value = ".")]
        dir: String,
    },
}

#[derive(Subcommand, Debug)]
enum CampaignAction {
    List {
        #[arg(long, short)]
        search: Option<String>,
    },
    Create {
        name: String,
        #[arg(long, short)]
        template: String,
        #[arg(long, short)]
        message: String,
        /// e.g. "2025-03-01 09:00"; omit for a draft
        #[arg(long)]
        schedule: Option<String>,
        #[arg(long, default_value = "0")]
        contacts: String,
    },
    Schedule { id: String, when: String },
    Status { id: String, status: CampaignStatus },
    Duplicate { id: String },
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
enum BotAction {
    List {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long = "type")]
        bot_type: Option<BotType>,
    },
    Toggle { id: String },
    Duplicate { id: String },
    Delete { id: String },
    /// Which bot would answer an incoming message
    Match { text: String },
}

#[derive(Subcommand, Debug)]
enum AgentAction {
    List,
    Stats,
    Toggle { id: String },
}

#[derive(Subcommand, Debug)]
enum IntegrationAction {
    List {
        #[arg(long, default_value = "1")]
        page: usize,
    },
    Connect {
        id: String,
        #[arg(long, default_value = "")]
        api_key: String,
        #[arg(long, default_value = "")]
        webhook_url: String,
        /// JSON object with extra settings
        #[arg(long, default_value = "")]
        settings: String,
    },
    Disconnect { id: String },
    Test { id: String },
    Sync { id: String },
}

#[derive(Subcommand, Debug)]
enum InboxAction {
    List {
        #[arg(long, default_value = "all")]
        tab: InboxTab,
        #[arg(long, short, default_value = "")]
        search: String,
    },
    Send { id: String, text: String },
}

fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("wapi=info".parse().unwrap_or_default());
    let sub = fmt().with_env_filter(filter).with_writer(std::io::stderr).finish();
    if let Err(e) = tracing::subscriber::set_global_default(sub) {
        eprintln!("Failed to set global subscriber: {e}");
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    init_tracing();
    let args = Args::parse();

    let mut config = DashboardConfig::from_env();
    if let Some(db) = &args.db {
        config.db_path = db.clone();
    }
    info!("using storage at {}", config.db_path);

    if let Err(e) = commands::run(config, args.command, args.json).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
