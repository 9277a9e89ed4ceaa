mod capabilities;
mod interactive;
mod render;
mod timers;

use clap::{Parser, Subcommand};
use sarnad_core::{
    Action, AppConfig, CopyField, ExternalOpener, InteractionError, RecordStore, SearchField,
    Session,
};
use tracing_subscriber::EnvFilter;

use crate::capabilities::{SystemClipboard, SystemOpener};
use crate::render::Frame;

#[derive(Debug, Parser)]
#[command(name = "sarnad")]
#[command(about = "SarNad Solutions: find solar panel installers near you")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the installers matching a search, once
    Search {
        /// Field to match against (location or name)
        #[arg(long, default_value = "location")]
        by: SearchField,

        /// Search term; defaults to "Paris". Pass "" for the empty-search view
        term: Option<String>,

        /// Print visible installers as JSON instead of cards
        #[arg(long)]
        json: bool,
    },
    /// Open an installer's address in the configured map service
    Map {
        siret: String,

        /// Print the map URL instead of opening it
        #[arg(long)]
        print: bool,
    },
    /// Copy an installer's phone, email or address to the clipboard
    Copy { siret: String, field: CopyField },
    /// Interactive search session (default)
    Interactive,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = sarnad_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let store = sarnad_core::load_installers(&config.installers_path)?;
    tracing::debug!(env = %config.env, installers = store.len(), "directory loaded");

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Search { by, term, json } => run_search(store, by, term, json),
        Commands::Map { siret, print } => run_map(&store, &config, &siret, print),
        Commands::Copy { siret, field } => run_copy(store, &siret, field),
        Commands::Interactive => interactive::run(Session::new(store), &config).await,
    }
}

fn run_search(
    store: RecordStore,
    by: SearchField,
    term: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let mut session = Session::new(store);
    session.apply(Action::SetField(by));
    if let Some(term) = term {
        session.apply(Action::SetTerm(term));
    }

    let view = session.view();
    if json {
        println!("{}", serde_json::to_string_pretty(&view.visible)?);
    } else {
        println!("{}", Frame::new(view, |_, _| false));
    }
    Ok(())
}

fn run_map(store: &RecordStore, config: &AppConfig, siret: &str, print: bool) -> anyhow::Result<()> {
    let installer = store
        .get(siret)
        .ok_or_else(|| anyhow::anyhow!("no installer with SIRET {siret}"))?;
    let url = sarnad_core::map_url(&config.map_search_url, installer);

    if print {
        println!("{url}");
        return Ok(());
    }

    if let Err(e) = SystemOpener.open_external(&url) {
        tracing::warn!(siret, error = %e, "could not open map");
        println!("{url}");
    }
    Ok(())
}

fn run_copy(store: RecordStore, siret: &str, field: CopyField) -> anyhow::Result<()> {
    let mut session = Session::new(store);
    let mut clipboard = SystemClipboard::one_shot();
    match session.request_copy(&mut clipboard, siret, field) {
        Ok(_) => println!("copied {field} of {siret} to the clipboard"),
        Err(err @ InteractionError::UnknownRecord(_)) => return Err(err.into()),
        // Already logged by the tracker; a failed copy is not a failed run.
        Err(e) => eprintln!("warning: {e}"),
    }
    Ok(())
}
