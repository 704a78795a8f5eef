//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs, referral::ReferralCommands, signup::SignupArgs,
};

#[derive(Parser)]
#[command(name = "tbsignup")]
#[command(author, version, about = "TeamBrains signup wizard")]
#[command(
    long_about = "An interactive wizard that registers student and entrepreneur accounts on the TeamBrains platform."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Session storage directory (default: platform data dir, or TBS_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Base URL of the TeamBrains API (overrides config and TBS_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the signup wizard
    Signup(SignupArgs),

    /// Manage the partner-school referral
    #[command(subcommand)]
    Referral(ReferralCommands),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}
