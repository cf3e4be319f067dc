use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "brainprint",
    about = "Brainprint — cognitive assessment engine CLI",
    version,
    propagate_version = true
)]
pub struct Cli {
    /// Output raw JSON (for scripting/piping)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show engine configuration and catalog summary
    Status,

    /// Inspect the registered game catalog
    #[command(subcommand)]
    Catalog(CatalogCommand),

    /// Run a game session against the engine
    Play {
        /// Game id, e.g. word-midpoint
        game: String,
        /// Session mode: one-shot, journey, arena, endurance
        #[arg(long, default_value = "one-shot")]
        mode: String,
        /// Deterministic session seed
        #[arg(long, default_value = "cli-session")]
        seed: String,
        /// BCP-47-ish language code
        #[arg(long, default_value = "en")]
        language: String,
        /// Path to a JSON file holding the action list (plain array for
        /// one-shot/journey/endurance, `{action, timestamp_ms}` array for
        /// arena). Omit to run with no actions and see the zero-signal
        /// baseline summary.
        #[arg(long)]
        actions: Option<std::path::PathBuf>,
    },

    /// Semantic scorer operations, useful for ad hoc vocabulary exploration
    #[command(subcommand)]
    Score(ScoreCommand),

    /// Rank a set of scores into a leaderboard view
    Leaderboard {
        /// Path to a JSON file: array of {user_id, score}
        scores: std::path::PathBuf,
    },

    /// Manage CLI configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List every registered game
    List,
    /// Show one game's id, modes, and UI schema
    Show {
        game: String,
    },
}

#[derive(Subcommand)]
pub enum ScoreCommand {
    /// Cosine similarity between two words
    Similarity { word_a: String, word_b: String },
    /// Semantic midpoint score of a word between two anchors
    Midpoint { word: String, anchor_a: String, anchor_b: String },
    /// Frequency/pattern-based rarity of a word
    Rarity {
        word: String,
        /// Optional V/C pattern gate, e.g. CVC
        #[arg(long)]
        pattern: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Key name (embedding_path, default_language)
        key: String,
        /// Value to set
        value: String,
    },
}
