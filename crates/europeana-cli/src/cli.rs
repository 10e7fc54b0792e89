//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use europeana_domain::EntityType;

/// Europeana CLI - Look up entities and records in the Europeana APIs.
#[derive(Debug, Parser)]
#[command(name = "europeana")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// API key (overrides the profile key)
    #[arg(long, env = "EUROPEANA_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (identifiers only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Suggest entities matching a text
    Suggest(SuggestArgs),

    /// Retrieve an entity by type and identifier
    Retrieve(RetrieveArgs),

    /// Resolve an external URI (Wikidata, DBpedia, ...) to an entity
    Resolve(ResolveArgs),

    /// Search cultural heritage records
    Search(SearchArgs),

    /// Suggest agents and add biography and place columns
    Agents(AgentsArgs),

    /// Manage configuration profiles
    Profile(ProfileArgs),
}

/// Arguments for the suggest command.
#[derive(Debug, Parser)]
pub struct SuggestArgs {
    /// Text to complete
    pub text: String,

    /// Entity type
    #[arg(short = 't', long = "type", value_enum, default_value = "agent")]
    pub entity_type: EntityTypeArg,

    /// Keep the illustration (isShownBy) columns
    #[arg(long)]
    pub keep_illustrations: bool,
}

/// Field display options shared by retrieve and resolve.
#[derive(Debug, Clone, clap::Args)]
pub struct FieldArgs {
    /// Multilingual field to list per language
    #[arg(long, default_value = "prefLabel")]
    pub field: String,

    /// Keep only the first value per language
    #[arg(long)]
    pub first: bool,
}

/// Arguments for the retrieve command.
#[derive(Debug, Parser)]
pub struct RetrieveArgs {
    /// Entity type
    #[arg(value_enum)]
    pub entity_type: EntityTypeArg,

    /// Identifier or entity URI
    pub id: String,

    #[command(flatten)]
    pub field: FieldArgs,

    /// Also retrieve the broader place (isPartOf)
    #[arg(long)]
    pub follow_part_of: bool,
}

/// Arguments for the resolve command.
#[derive(Debug, Parser)]
pub struct ResolveArgs {
    /// External URI
    pub uri: String,

    #[command(flatten)]
    pub field: FieldArgs,
}

/// Arguments for the search command.
#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// Free-text query
    pub query: Option<String>,

    /// Entity URI every record must reference (repeatable)
    #[arg(short, long = "entity")]
    pub entities: Vec<String>,

    /// Only records with media
    #[arg(long)]
    pub media: bool,

    /// Query refinement (e.g. TYPE:IMAGE)
    #[arg(long)]
    pub qf: Option<String>,

    /// Columns to show
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,
}

/// Arguments for the agents command.
#[derive(Debug, Parser)]
pub struct AgentsArgs {
    /// Text to complete
    pub text: String,

    /// Biography language
    #[arg(short, long, default_value = "en")]
    pub lang: String,

    /// Skip the place of birth and death columns
    #[arg(long)]
    pub no_places: bool,

    /// Leave cells empty instead of failing when a value is missing
    #[arg(long)]
    pub skip_missing: bool,
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,
        /// API key
        #[arg(short, long)]
        key: Option<String>,
        /// Entity API base URL
        #[arg(long)]
        entity_url: Option<String>,
        /// Search API base URL
        #[arg(long)]
        search_url: Option<String>,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

/// Entity type argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum EntityTypeArg {
    /// People and organizations
    Agent,
    /// Places
    Place,
    /// Concepts and subjects
    Concept,
    /// Time periods
    Timespan,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<EntityTypeArg> for EntityType {
    fn from(entity_type: EntityTypeArg) -> Self {
        match entity_type {
            EntityTypeArg::Agent => EntityType::Agent,
            EntityTypeArg::Place => EntityType::Place,
            EntityTypeArg::Concept => EntityType::Concept,
            EntityTypeArg::Timespan => EntityType::Timespan,
        }
    }
}
