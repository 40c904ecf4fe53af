// src/cli/mod.rs — CLI definition (clap derive)

pub mod memory;
pub mod progress;
pub mod run;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "distill", about = "Bounded research refinement agent", version)]
pub struct Cli {
    /// Research question (prompted interactively when omitted)
    #[arg(trailing_var_arg = true)]
    pub query: Vec<String>,

    /// Model for both roles (provider/model format)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Iteration cap for this session (overrides config)
    #[arg(short, long)]
    pub iterations: Option<u32>,

    /// Append the final note to the notepad file
    #[arg(long)]
    pub save: bool,

    /// Never append to the notepad file (skips the interactive prompt)
    #[arg(long, conflicts_with = "save")]
    pub no_save: bool,

    /// Suppress progress output (only emit the final note)
    #[arg(long)]
    pub quiet: bool,

    /// Config file path
    #[arg(long)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show or clear the persisted memory snapshot
    Memory {
        /// Delete the snapshot instead of printing it
        #[arg(long)]
        clear: bool,
    },
}
