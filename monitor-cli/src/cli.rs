//! CLI parser.

use clap::{Parser, Subcommand};
use monitor_storage::MessageType;

#[derive(Parser, Debug)]
#[command(name = "capmon")]
#[command(about = "Message-delivery monitor: stats, hourly timelines, search", long_about = None)]
#[command(version)]
pub struct Cli {
    /// SQLite database path; overrides DATABASE_URL.
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Succeeded/failed totals for published and received messages.
    Stats,
    /// Counts per hour over the last 24 hours, newest first.
    Timeline {
        #[arg(short = 't', long = "type")]
        message_type: MessageType,
        /// Exact status name, e.g. Succeeded or Failed.
        #[arg(short, long, default_value = "Succeeded")]
        status: String,
    },
    /// Filtered, paged message search.
    Search {
        #[arg(short = 't', long = "type")]
        message_type: MessageType,
        #[arg(short, long)]
        status: Option<String>,
        #[arg(short, long)]
        name: Option<String>,
        /// Substring of the message content (case-sensitive).
        #[arg(short, long)]
        content: Option<String>,
        /// Consumer group (received messages only).
        #[arg(short, long)]
        group: Option<String>,
        /// Zero-based page index.
        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        page: i64,
        /// Defaults to DEFAULT_PAGE_SIZE.
        #[arg(long, allow_negative_numbers = true)]
        page_size: Option<i64>,
    },
    /// Fetch one message by id.
    Get {
        #[arg(short = 't', long = "type")]
        message_type: MessageType,
        id: String,
    },
    /// Insert demo messages spread over the last 24 hours.
    Seed {
        #[arg(long, default_value = "50")]
        count: usize,
    },
}
