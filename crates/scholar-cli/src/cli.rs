use std::path::PathBuf;

use clap::{Parser, Subcommand};
use scholar_client::types::ApplicationStatus;

/// Scholar: find scholarships and talk to the scholarship assistant.
#[derive(Parser, Debug)]
#[command(name = "scholar", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error) or a full filter directive.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Print raw JSON instead of a summary.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check that the backend is reachable.
    Health,

    /// Send a single message to the assistant.
    Ask {
        message: String,
        /// Continue an existing chat session.
        #[arg(long)]
        session: Option<String>,
    },

    /// Interactive chat. `/clear`, `/history` and `/quit` are recognised.
    Chat {
        /// Continue an existing chat session.
        #[arg(long)]
        session: Option<String>,
        /// Load the signed-in user's history before the first prompt.
        #[arg(long)]
        history: bool,
    },

    /// Create an account and sign in.
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: Option<String>,
        /// Read from stdin when omitted.
        #[arg(long)]
        password: Option<String>,
    },

    /// Sign in with an existing account.
    Signin {
        #[arg(long)]
        email: String,
        /// Read from stdin when omitted.
        #[arg(long)]
        password: Option<String>,
    },

    /// Sign out and forget stored credentials.
    Signout,

    /// Show the signed-in user.
    Whoami,

    /// Browse the scholarship catalogue.
    Scholarships {
        #[command(subcommand)]
        command: ScholarshipCommand,
    },

    /// Track your applications.
    Applications {
        #[command(subcommand)]
        command: ApplicationCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum ScholarshipCommand {
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        page_size: u32,
    },
    Search {
        #[arg(long)]
        keywords: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        min_amount: Option<u64>,
        #[arg(long)]
        max_amount: Option<u64>,
        #[arg(long)]
        deadline: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        page_size: u32,
    },
    Show {
        id: String,
    },
    /// Scholarships bookmarked by the signed-in user.
    Bookmarks,
}

#[derive(Subcommand, Debug)]
pub enum ApplicationCommand {
    List {
        /// draft, in-progress, submitted, under-review, accepted or rejected.
        #[arg(long, value_parser = parse_status)]
        status: Option<ApplicationStatus>,
    },
    /// Applications with deadlines in the next N days.
    Deadlines {
        #[arg(long)]
        days: Option<u32>,
    },
}

fn parse_status(raw: &str) -> Result<ApplicationStatus, String> {
    serde_json::from_value(serde_json::Value::String(raw.to_ascii_lowercase()))
        .map_err(|_| format!("unknown application status {raw:?}"))
}

pub fn parse() -> Args {
    Args::parse()
}
