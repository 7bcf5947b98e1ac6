use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tfbind")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(about = "Bind attribute trees to service records and reconcile drift", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file (defaults to ~/.config/tfbind/config.toml)
    #[arg(long, global = true, env = "TFBIND_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the attribute tree key for record field names
    Key {
        /// Field names, e.g. GithubInstallationId
        #[arg(required = true)]
        fields: Vec<String>,
    },

    /// Extract a record from a tree document and print it as JSON
    Extract {
        /// Record type
        #[arg(value_enum)]
        record: RecordKind,

        /// Tree document (JSON)
        tree: PathBuf,
    },

    /// Populate a tree document from a record payload
    Populate {
        /// Record type
        #[arg(value_enum)]
        record: RecordKind,

        /// Record payload (JSON)
        payload: PathBuf,

        /// Existing tree document to update instead of a fresh one
        #[arg(long)]
        state: Option<PathBuf>,
    },

    /// Reconcile persisted variables against the observed ones
    Reconcile {
        /// Variables recorded in state (JSON list)
        prior: PathBuf,

        /// Variables read from the service (JSON list)
        observed: PathBuf,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve a name or id against a catalog of entities
    Resolve {
        /// Name or id
        token: String,

        /// Entity list (JSON array of objects with `id` and `name`)
        #[arg(long)]
        catalog: PathBuf,

        /// Entity kind used in messages
        #[arg(long, value_enum)]
        kind: Option<RecordKind>,
    },

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Check the configuration for invalid values
    Validate,

    /// Print the config file path
    Path,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RecordKind {
    Workspace,
    Variable,
    Team,
    SshKey,
}

impl RecordKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Workspace => "workspace",
            Self::Variable => "variable",
            Self::Team => "team",
            Self::SshKey => "ssh key",
        }
    }
}
