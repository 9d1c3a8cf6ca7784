//! CLI argument parsing using clap v4
//!
//! Defines the command-line interface for work-persona.

use clap::{Parser, Subcommand, ValueEnum};

/// work-persona - find your work style in seven questions
///
/// Answer a short survey, get matched to a work persona and audience
/// segment, and share the result as a link.
#[derive(Parser, Debug)]
#[command(name = "work-persona")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, env = "WORK_PERSONA_CONFIG", global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Take the survey interactively (resumes saved progress)
    Survey {
        /// Discard saved progress and start from the first question
        #[arg(long)]
        fresh: bool,
    },

    /// Score a set of answers without prompting
    Score {
        /// Answers as question=answer pairs, e.g. q1=q1a q2=q2c
        #[arg(required = true, value_name = "QUESTION=ANSWER")]
        answers: Vec<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the result page for a share link
    Results {
        /// Share link, full URL or bare query string
        link: String,

        /// Print the short text meant for sharing instead of the full page
        #[arg(long, conflicts_with = "json")]
        share_text: bool,

        /// Print the decoded result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect or clear saved survey progress
    Progress {
        #[command(subcommand)]
        subcommand: ProgressSubcommand,
    },

    /// List the bundled questions, personas or segments
    Catalog {
        /// What to list
        #[arg(value_enum)]
        section: CatalogSection,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Display version and build information
    Version,
}

/// Progress subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ProgressSubcommand {
    /// Show saved progress
    Show,

    /// Delete saved progress so the next survey starts over
    Clear,
}

/// Catalog sections
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSection {
    Questions,
    Personas,
    Segments,
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigSubcommand {
    /// Display the current configuration
    Show,

    /// Initialize a new configuration file
    Init {
        /// Path where to create the config file
        #[arg(short, long)]
        path: Option<String>,

        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Validate the configuration
    Validate,
}
