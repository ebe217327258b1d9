mod render;
mod repl;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lugares_app::{App, ControllerOptions};
use lugares_core::{AppConfig, GeolocationBackend};
use lugares_places::{CatalogSearch, Geolocator, IpGeolocation, StaticGeolocation};

#[derive(Debug, Parser)]
#[command(name = "lugares-cli")]
#[command(about = "Find places near you and keep a list of favorites")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Interactive session (the default).
    Interactive,
    /// Locate, search once, and print the results.
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Print the active place catalog.
    Catalog,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = lugares_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, geo = %config.geo_backend, "configuration loaded");

    let search = build_search(&config)?;
    if let Some(Commands::Catalog) = cli.command {
        println!("{}", render::catalog(search.catalog()));
        return Ok(());
    }

    let geolocation = build_geolocation(&config)?;
    let (app, rx) = App::new(
        geolocation,
        search,
        ControllerOptions::from_app_config(&config),
    );

    match cli.command {
        Some(Commands::Search { query }) => run_search_once(app, rx, &query.join(" ")).await,
        Some(Commands::Interactive | Commands::Catalog) | None => repl::run(app, rx).await,
    }
}

fn build_search(config: &AppConfig) -> anyhow::Result<CatalogSearch> {
    let catalog = match &config.catalog_path {
        Some(path) => lugares_core::load_catalog(path)?,
        None => lugares_core::reference_catalog(),
    };
    tracing::debug!(places = catalog.len(), "catalog loaded");
    Ok(CatalogSearch::new(catalog, config.search_latency()))
}

fn build_geolocation(config: &AppConfig) -> anyhow::Result<Option<Geolocator>> {
    let geolocator = match config.geo_backend {
        GeolocationBackend::Ip => Some(Geolocator::Ip(IpGeolocation::new(
            config.geo_url.clone(),
            &config.user_agent,
        )?)),
        GeolocationBackend::Static => {
            let coordinate = config
                .static_location
                .ok_or_else(|| anyhow::anyhow!("LUGARES_STATIC_LOCATION is not set"))?;
            Some(Geolocator::Static(StaticGeolocation::new(coordinate)))
        }
        GeolocationBackend::None => None,
    };
    Ok(geolocator)
}

async fn run_search_once(
    mut app: repl::CliApp,
    mut rx: tokio::sync::mpsc::UnboundedReceiver<lugares_app::AppEvent>,
    query: &str,
) -> anyhow::Result<()> {
    app.start();
    repl::settle(&mut app, &mut rx).await;
    if let Some(error) = app.location().error() {
        anyhow::bail!("cannot search without a location: {error}");
    }

    app.set_query(query);
    if !app.submit_search() {
        anyhow::bail!("nothing to search for");
    }
    repl::settle(&mut app, &mut rx).await;

    println!("{}", render::page(&app.view()));
    Ok(())
}
