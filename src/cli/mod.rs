//! CLI argument definitions for asa.

pub mod prompt;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::{ConfigOverrides, ResourceKind};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("ASA_GIT_COMMIT"),
    " ",
    env!("ASA_BUILD_TIMESTAMP"),
    ")"
);

/// asa - browse Asana workspaces, teams, boards and tasks from the terminal.
///
/// Start with `asa config --init` to pick a default workspace, team and board.
#[derive(Parser, Debug)]
#[command(name = "asa")]
#[command(author, version, long_version = LONG_VERSION, about = "Browse Asana from the terminal", long_about = None)]
pub struct Cli {
    /// Asana personal access token [default: $ASANA_TOKEN]
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Output JSON instead of human-readable text
    #[arg(long, global = true)]
    pub json: bool,

    /// Log requests and responses to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a user's name, id, email and photo
    Who {
        /// User id or "me"
        #[arg(short, long, default_value = "me")]
        user: String,

        /// Open the user's profile page in the browser
        #[arg(short, long)]
        open: bool,
    },

    /// Show your incomplete tasks grouped by project section
    ///
    /// Tasks are grouped by the sections of the projects they belong to,
    /// not by the sections of your My Tasks list. Tasks in no project
    /// section are not shown.
    Me {
        /// Workspace id (default from config)
        #[arg(short, long)]
        workspace: Option<String>,

        /// Only show these sections (id or name, repeatable)
        #[arg(short, long = "column")]
        columns: Vec<String>,
    },

    /// List a user's teams in a workspace
    Teams {
        /// User id or "me"
        #[arg(short, long, default_value = "me")]
        user: String,

        /// Workspace id (default from config)
        #[arg(short, long)]
        workspace: Option<String>,
    },

    /// List the members of a team
    Team {
        /// Team name from config, or team id (default from config)
        #[arg(short, long)]
        team: Option<String>,
    },

    /// List the boards of a team
    Boards {
        /// Team name from config, or team id (default from config)
        #[arg(short, long)]
        team: Option<String>,
    },

    /// Show the incomplete tasks of a board grouped by column
    ///
    /// Columns are shown in the order given with -c, else in the order
    /// configured for the board, else in the order they were found.
    Board {
        /// Board name from config, or board id (default from config)
        #[arg(short, long)]
        board: Option<String>,

        /// Open the board in the browser instead
        #[arg(short, long)]
        open: bool,

        /// Column to show (section id or name, repeatable)
        #[arg(short, long = "column")]
        columns: Vec<String>,
    },

    /// Search the tasks of a board
    Search {
        /// Text to search for
        text: String,

        /// Board name from config, or board id (default from config)
        #[arg(short, long)]
        board: Option<String>,

        /// Workspace id (default from config)
        #[arg(short, long)]
        workspace: Option<String>,
    },

    /// Resolve a configured team or board name to its id
    Resolve {
        /// What kind of name to resolve
        #[arg(value_enum)]
        kind: ResolveKind,

        /// Configured name or raw id
        name: String,
    },

    /// Show or create the configuration file
    Config {
        /// Run the interactive setup and overwrite the config file
        #[arg(long, conflicts_with_all = ["show", "path"])]
        init: bool,

        /// Print the loaded configuration (the default)
        #[arg(long, conflicts_with = "path")]
        show: bool,

        /// Print the config file path
        #[arg(long)]
        path: bool,
    },
}

impl Commands {
    /// Whether the command needs the Asana API.
    pub fn needs_remote(&self) -> bool {
        match self {
            Commands::Resolve { .. } => false,
            Commands::Config { init, .. } => *init,
            _ => true,
        }
    }

    /// Workspace/team/board flags given on the command line.
    pub fn overrides(&self) -> ConfigOverrides {
        let overrides = ConfigOverrides::new();
        match self {
            Commands::Me { workspace, .. } | Commands::Teams { workspace, .. } => {
                with_opt(overrides, workspace, |o, v| o.with_workspace(v))
            }
            Commands::Team { team } | Commands::Boards { team } => {
                with_opt(overrides, team, |o, v| o.with_team(v))
            }
            Commands::Board { board, .. } => with_opt(overrides, board, |o, v| o.with_board(v)),
            Commands::Search {
                board, workspace, ..
            } => {
                let overrides = with_opt(overrides, workspace, |o, v| o.with_workspace(v));
                with_opt(overrides, board, |o, v| o.with_board(v))
            }
            _ => overrides,
        }
    }
}

fn with_opt(
    overrides: ConfigOverrides,
    value: &Option<String>,
    set: fn(ConfigOverrides, String) -> ConfigOverrides,
) -> ConfigOverrides {
    match value {
        Some(v) => set(overrides, v.clone()),
        None => overrides,
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ResolveKind {
    Team,
    Board,
}

impl From<ResolveKind> for ResourceKind {
    fn from(kind: ResolveKind) -> Self {
        match kind {
            ResolveKind::Team => ResourceKind::Team,
            ResolveKind::Board => ResourceKind::Board,
        }
    }
}
