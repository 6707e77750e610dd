use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use stipple_core::config::CardDeck;
use stipple_core::EngineConfig;

fn main() {
    // Init logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter("info")
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match EngineConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                warn!("ignoring config {path}: {err}");
                EngineConfig::default()
            }
        },
        None => EngineConfig::default(),
    };
    let deck = match args.next() {
        Some(path) => match CardDeck::load(&path) {
            Ok(deck) => deck,
            Err(err) => {
                warn!("ignoring deck {path}: {err}");
                CardDeck::default()
            }
        },
        None => CardDeck::default(),
    };
    let reduced_motion = stipple_platform::reduced_motion_from_env();

    info!(reduced_motion, cards = deck.len(), "Stipple starting");
    if let Err(e) = stipple_ui::run(config, deck, reduced_motion) {
        eprintln!("Stipple error: {e}");
    }
}
