use listings_client::config::Settings;
use listings_client::events::{self, UiEvent};
use listings_client::render::layout;
use listings_client::ui::ids;
use listings_client::{ApiClient, Capabilities, Document, ListingsClient};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let navigation_start = Instant::now();

    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }

    info!("Starting listings client...");

    if settings.api.base_url.is_empty() {
        warn!("api.base_url is empty; requests will fail");
    }

    let api = match ApiClient::new(&settings.api) {
        Ok(api) => api,
        Err(e) => {
            error!("Failed to create HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let document = Document::listings_page(&settings.filters);
    let client = Arc::new(ListingsClient::from_document(
        api,
        &document,
        Capabilities::native(navigation_start),
        &settings,
    ));

    client.init().await;

    let (sender, event_loop) = events::channel();
    sender.send(UiEvent::DocumentReady);
    drop(sender);
    event_loop.run(Arc::clone(&client)).await;

    let region = |id: &str| {
        document
            .get_element_by_id(id)
            .map(|e| e.inner_html())
            .unwrap_or_default()
    };
    let page = layout::page(
        &client.handles().fields.values(),
        &region(ids::STATS),
        &region(ids::LISTINGS),
    );

    println!("{}", page.into_string());
}
