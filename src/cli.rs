use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use netflex::catalog::CatalogFilter;
use netflex::config::StoreKind;
use netflex::types::{ContentPatch, ContentType, Country, Genre, NewContent};

/// Command-line front end over the mock catalog backend
#[derive(Parser)]
#[command(name = "netflex")]
#[command(about = "Manage the demo catalog and session from the command line", long_about = None)]
pub struct Cli {
    /// Settings file (defaults to the platform config dir)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Slot store backend
    #[arg(long, global = true, value_enum)]
    pub store: Option<StoreKind>,

    /// Database URL for the sqlite backend
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    /// Directory for the file and sqlite backends
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Skip the simulated network delays
    #[arg(long, global = true)]
    pub no_latency: bool,

    /// Print raw response envelopes as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Default log level when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List catalog items, newest first
    List(ListArgs),
    /// Show one item
    Get { id: String },
    /// Add an item
    Create(CreateArgs),
    /// Change some fields of an item
    Update {
        id: String,
        #[command(flatten)]
        fields: UpdateArgs,
    },
    /// Remove an item (succeeds if it is already gone)
    Delete { id: String },
    /// Log in with the admin credentials
    Login { username: String, password: String },
    /// Clear the stored session
    Logout,
    /// Show the current session
    Whoami,
    /// Encode a file as a data URI
    Upload { path: PathBuf },
    /// Search titles, countries, genres and types
    Search { query: String },
    /// Catalog counts by type, country and genre
    Stats,
    /// Newest releases by year
    Releases {
        #[arg(short, long, default_value_t = netflex::catalog::NEW_RELEASES_LIMIT)]
        limit: usize,
    },
    /// Draft a synopsis with the assistant
    Synopsis {
        title: String,
        #[arg(long)]
        genre: Genre,
    },
    /// Ask the assistant what to watch
    Recommend {
        question: String,
        /// Ids of recently watched items, most recent first
        #[arg(long = "watched", value_name = "ID")]
        watched: Vec<String>,
    },
}

#[derive(Args)]
pub struct ListArgs {
    #[arg(long = "type")]
    pub content_type: Option<ContentType>,
    #[arg(long)]
    pub country: Option<Country>,
    #[arg(long)]
    pub genre: Option<Genre>,
    /// Only items flagged popular
    #[arg(long)]
    pub popular: bool,
}

impl ListArgs {
    pub fn filter(&self) -> CatalogFilter {
        CatalogFilter { content_type: self.content_type, country: self.country, genre: self.genre, popular_only: self.popular }
    }
}

#[derive(Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long, default_value = "")]
    pub description: String,
    /// Poster URL or a local image path (encoded inline)
    #[arg(long, default_value = "")]
    pub poster: String,
    #[arg(long, default_value = "")]
    pub video: String,
    #[arg(long = "type", default_value = "Single")]
    pub content_type: ContentType,
    #[arg(long)]
    pub country: Country,
    #[arg(long)]
    pub genre: Genre,
    #[arg(long)]
    pub year: i32,
    #[arg(long)]
    pub popular: bool,
}

impl CreateArgs {
    pub fn into_new(self, poster_path: String) -> NewContent {
        NewContent {
            title: self.title,
            description: self.description,
            poster_path,
            video_path: self.video,
            content_type: self.content_type,
            country: self.country,
            genre: self.genre,
            year: self.year,
            is_popular: self.popular,
        }
    }
}

#[derive(Args)]
pub struct UpdateArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub poster: Option<String>,
    #[arg(long)]
    pub video: Option<String>,
    #[arg(long = "type")]
    pub content_type: Option<ContentType>,
    #[arg(long)]
    pub country: Option<Country>,
    #[arg(long)]
    pub genre: Option<Genre>,
    #[arg(long)]
    pub year: Option<i32>,
    #[arg(long)]
    pub popular: Option<bool>,
}

impl UpdateArgs {
    pub fn into_patch(self, poster_path: Option<String>) -> ContentPatch {
        ContentPatch {
            title: self.title,
            description: self.description,
            poster_path,
            video_path: self.video,
            content_type: self.content_type,
            country: self.country,
            genre: self.genre,
            year: self.year,
            is_popular: self.popular,
        }
    }
}
