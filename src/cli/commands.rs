//! CLI command definitions

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mindmate")]
#[command(about = "Mood journal with emotion trend tracking", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new mood journal
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Log a mood entry and get a response
    Log {
        /// Free text of the entry; inline #hashtags become mood tags
        text: Option<String>,

        /// Mood tag (repeatable)
        #[arg(short, long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        /// Optional numeric mood score
        #[arg(short, long)]
        score: Option<f64>,

        /// User id (default: user_id from config)
        #[arg(short, long)]
        user: Option<String>,

        /// Entry time, ISO-8601 (default: now)
        #[arg(long, value_name = "TIMESTAMP")]
        at: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Analyze emotion trends and update stored categories
    Trends {
        /// Days in the current window (default: window_days from config)
        #[arg(short, long)]
        window: Option<u32>,

        /// Days in the comparison window (default: compare_days from config)
        #[arg(short, long)]
        compare: Option<u32>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List tracked emotion categories
    Emotions,

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}
