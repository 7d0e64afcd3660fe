//! asa CLI - browse Asana from the terminal.

use std::io;
use std::process;

use asa::asana::{AsanaClient, RemoteData};
use asa::cli::prompt::PromptSelector;
use asa::cli::{Cli, Commands};
use asa::commands::{self, Output};
use asa::config::{self, ConfigRecord, ConfigStore, resolve_token};
use asa::{Error, Result, render};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let cli = Cli::parse();
    let human = !cli.json;

    init_logging(cli.verbose);
    render::init_color();

    if let Err(e) = run(cli) {
        if human {
            eprintln!("Error: {}", e);
        } else {
            eprintln!("{}", serde_json::json!({ "error": e.to_string() }));
        }
        process::exit(1);
    }
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("asa=debug")
        } else {
            EnvFilter::new("asa=warn")
        }
    });

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .init();
}

fn load_store(command: &Commands) -> Result<ConfigStore> {
    match ConfigStore::load_default() {
        // A broken file must not stand in the way of rewriting it.
        Err(Error::ConfigParse {
            path,
            line,
            message,
        }) if matches!(
            command,
            Commands::Config { init: true, .. } | Commands::Config { path: true, .. }
        ) =>
        {
            tracing::warn!(%path, line, %message, "ignoring unreadable config file");
            Ok(ConfigStore::from_record(config::config_path()?, ConfigRecord::new()))
        }
        other => other,
    }
}

fn run(cli: Cli) -> Result<()> {
    let human = !cli.json;
    let mut store = load_store(&cli.command)?;
    let overrides = cli.command.overrides();

    let client = if cli.command.needs_remote() {
        let token = resolve_token(cli.token.as_deref())?;
        tracing::debug!(source = %token.source, "using token");
        Some(AsanaClient::new(token.value))
    } else {
        None
    };
    let remote = client.as_ref().map(|c| c as &dyn RemoteData);

    match cli.command {
        Commands::Who { user, open } => {
            let result = commands::who(require(remote)?, &user)?;
            if open {
                output(&commands::open(result.user.profile_url())?, human);
            } else {
                output(&result, human);
            }
        }
        Commands::Me { columns, .. } => {
            let result =
                commands::my_tasks(require(remote)?, &store, &overrides, "me", &columns)?;
            output(&result, human);
        }
        Commands::Teams { user, .. } => {
            let result = commands::teams(require(remote)?, &store, &overrides, &user)?;
            output(&result, human);
        }
        Commands::Team { .. } => {
            let result = commands::team_members(require(remote)?, &store, &overrides)?;
            output(&result, human);
        }
        Commands::Boards { .. } => {
            let result = commands::boards(require(remote)?, &store, &overrides)?;
            output(&result, human);
        }
        Commands::Board { open, columns, .. } => {
            if open {
                let url = commands::board_url(require(remote)?, &store, &overrides)?;
                output(&commands::open(url)?, human);
            } else {
                let result = commands::board(require(remote)?, &store, &overrides, &columns)?;
                output(&result, human);
            }
        }
        Commands::Search { text, .. } => {
            let result = commands::search(require(remote)?, &store, &overrides, &text)?;
            output(&result, human);
        }
        Commands::Resolve { kind, name } => {
            output(&commands::config_resolve(&store, kind.into(), &name), human);
        }
        Commands::Config { init, path, .. } => {
            if init {
                let stdin = io::stdin();
                let mut selector = PromptSelector::new(stdin.lock(), io::stderr());
                let result = commands::config_init(require(remote)?, &mut selector, &mut store)?;
                output(&result, human);
            } else if path {
                output(&commands::config_path(&store), human);
            } else {
                output(&commands::config_show(&store, cli.token.as_deref()), human);
            }
        }
    }

    Ok(())
}

fn require(remote: Option<&dyn RemoteData>) -> Result<&dyn RemoteData> {
    remote.ok_or(Error::MissingToken)
}

fn output<T: Output>(result: &T, human: bool) {
    if human {
        println!("{}", result.to_human());
    } else {
        println!("{}", result.to_json());
    }
}
