use std::sync::Arc;

use moviedb::{
    console::{self, ConsoleView},
    screen::SearchScreen,
    services::{SearchClient, TcpProbe, TmdbProvider},
    Config,
};
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout belongs to the screen
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("moviedb=info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?;

    let provider = TmdbProvider::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
        config.tmdb_language.clone(),
        config.request_timeout(),
    )?;
    let connectivity = TcpProbe::new(
        config.connectivity_probe_addr.clone(),
        config.connectivity_timeout(),
    );

    let (effects_tx, effects_rx) = mpsc::unbounded_channel();
    let screen = SearchScreen::new(
        SearchClient::new(Arc::new(provider)),
        Arc::new(connectivity),
        effects_tx,
    );

    println!("{}", console::HELP);

    let view = ConsoleView::new(config.image_base_url.clone());
    let output = tokio::spawn(view.present(effects_rx, tokio::io::stdout()));
    let input = tokio::spawn(console::read_commands(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        screen.handle(),
    ));

    // The screen runs on the main task; its state never leaves it.
    // Only the input task sends Close, so it has finished once run returns.
    screen.run().await;

    if let Err(e) = input.await? {
        tracing::error!(error = %e, "Console input failed");
    }
    if let Err(e) = output.await? {
        tracing::error!(error = %e, "Console output failed");
    }

    Ok(())
}
