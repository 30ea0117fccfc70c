use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "wib", about = "Create branches for Azure DevOps work items")]
pub struct Cli {
    /// Directory inside the git repository to work in
    #[arg(long, global = true, default_value = ".")]
    pub project: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List work items matching a WIQL query
    List {
        /// WIQL query; defaults to the configured query
        #[arg(long)]
        query: Option<String>,
    },
    /// Create a branch for work items and link it to the first one
    Branch {
        /// Work item ids; the first one gets the branch link
        #[arg(required = true)]
        ids: Vec<i32>,
        /// Check out the new branch locally
        #[arg(long, overrides_with = "no_checkout")]
        checkout: bool,
        /// Do not check out the new branch
        #[arg(long)]
        no_checkout: bool,
    },
    /// Print config path
    ConfigPath,
}

impl Commands {
    /// Checkout flag for `branch`, falling back to `default` when neither flag is given.
    pub fn checkout(&self, default: bool) -> bool {
        match self {
            Commands::Branch {
                checkout,
                no_checkout,
                ..
            } => {
                if *checkout {
                    true
                } else if *no_checkout {
                    false
                } else {
                    default
                }
            }
            _ => default,
        }
    }
}
