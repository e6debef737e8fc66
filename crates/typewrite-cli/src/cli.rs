use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "typewrite",
    about = "Typewrite: type, hold, delete, and cycle through words on one line",
    version
)]
pub struct Cli {
    /// Log more (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a sample typewrite.toml
    Init {
        /// Where to write the config
        #[arg(long, default_value = typewrite_core::DEFAULT_CONFIG_PATH)]
        path: String,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a configuration and summarise it
    Check {
        #[command(flatten)]
        effect: EffectArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the timed frame sequence without waiting
    Trace {
        #[command(flatten)]
        effect: EffectArgs,

        /// Full passes through the word list to record
        #[arg(long, default_value_t = 1, conflicts_with = "frames")]
        cycles: usize,

        /// Record exactly this many frames instead of whole passes
        #[arg(long)]
        frames: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Animate the effect on the terminal until Ctrl-C
    Run {
        #[command(flatten)]
        effect: EffectArgs,

        /// Stop automatically after this many milliseconds
        #[arg(long)]
        for_ms: Option<u64>,

        /// Do not draw the caret after the text
        #[arg(long)]
        no_caret: bool,

        /// Print the run summary as JSON once stopped
        #[arg(long)]
        json: bool,
    },
}

/// Config file plus per-field overrides.
#[derive(Args, Debug, Clone, Default)]
pub struct EffectArgs {
    /// Path to the TOML config (default: typewrite.toml, if present)
    #[arg(long)]
    pub config: Option<String>,

    /// Word to cycle through (repeatable; replaces the configured list)
    #[arg(long = "word")]
    pub words: Vec<String>,

    /// Delay after each typed character, in ms
    #[arg(long, allow_negative_numbers = true)]
    pub typing_ms: Option<i64>,

    /// Delay after each deleted character, in ms
    #[arg(long, allow_negative_numbers = true)]
    pub deleting_ms: Option<i64>,

    /// Hold once a word is fully typed, in ms
    #[arg(long, allow_negative_numbers = true)]
    pub pause_typed_ms: Option<i64>,

    /// Hold once a word is fully deleted, in ms
    #[arg(long, allow_negative_numbers = true)]
    pub pause_deleted_ms: Option<i64>,
}
