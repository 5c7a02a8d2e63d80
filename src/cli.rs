use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Patchbay - configuration console for an API connector layer
#[derive(Parser, Debug, Clone)]
#[command(name = "patchbay", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "PATCHBAY_CONFIG", default_value = "patchbay.toml")]
    pub config: PathBuf,

    /// Number of records the simulator generates
    #[arg(long, env = "PATCHBAY_RECORDS")]
    pub records: Option<usize>,

    /// Use randomized sample values instead of repeatable ones
    #[arg(long, env = "PATCHBAY_RANDOMIZE")]
    pub randomize: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Load and validate the configuration, reporting any problems
    Validate,
    /// List configured data sources, categories, API objects and forms
    List,
    /// Show the user-fillable template variables of an API object
    Variables {
        /// API object id or name
        object_id: String,
    },
    /// Generate a mock response for an API object
    Simulate {
        /// API object id or name
        object_id: String,
        /// Print the bare record array instead of the full envelope
        #[arg(long)]
        records_only: bool,
    },
    /// Resolve the rendered options of a bound form element
    Options {
        /// Form id or name
        form_id: String,
        /// Element id within the form
        element_id: String,
    },
}
