use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "feedwatch")]
#[command(about = "Feed watcher that pushes translated notifications for new items")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check the configured feeds once and push new items
    Run {
        /// Dry run - print what would be pushed without sending or marking anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Fetch the configured feeds and list the merged items
    Items {
        /// Maximum number of items to list
        #[arg(short, long, default_value_t = 50)]
        limit: usize,
    },

    /// Translate a piece of text through the configured services
    Translate {
        /// Text to translate
        text: String,
    },
}
