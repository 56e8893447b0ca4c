//! Command-line arguments.

use std::path::PathBuf;

use blockmark_domain::UnknownTokenPolicy;
use clap::{Parser, Subcommand};

/// Structured Markdown templating: blocks plus variables in, Markdown out.
#[derive(Debug, Parser)]
#[command(name = "blockmark", version, about)]
pub struct Cli {
    /// Settings file to use instead of the platform config directory.
    #[arg(long, global = true, env = "BLOCKMARK_SETTINGS")]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write a sample document to get started.
    New {
        /// Where to write the document.
        path: PathBuf,
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },

    /// Render a document to Markdown.
    Render {
        /// Document to render.
        path: PathBuf,
        /// Write the Markdown to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// How to treat tokens naming no variable: `flag` or `keep`.
        #[arg(long, value_parser = parse_policy)]
        unknown_tokens: Option<UnknownTokenPolicy>,
    },

    /// Show the resolved value of every variable.
    Variables {
        /// Document whose variables to resolve.
        path: PathBuf,
    },

    /// Replace a block's content with generated text, using it as the prompt.
    Generate {
        /// Document to update in place.
        path: PathBuf,
        /// Id of the block to generate content for.
        #[arg(long)]
        block: String,
        /// API key for the content generator (falls back to `API_KEY`).
        #[arg(long, env = "BLOCKMARK_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },
}

fn parse_policy(value: &str) -> Result<UnknownTokenPolicy, String> {
    UnknownTokenPolicy::from_name(value)
        .ok_or_else(|| format!("unknown policy '{value}', expected 'flag' or 'keep'"))
}
