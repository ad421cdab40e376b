// Integration tests for Listings Client

use listings_client::config::Settings;
use listings_client::core::{IntersectionEntry, ANIMATE_IN_CLASS, FADE_IN_CLASS};
use listings_client::events::{self, UiEvent};
use listings_client::ui::{ids, PerformanceTiming, CARD_LIKE_CLASS, FEATURE_CLASS};
use listings_client::{
    ApiClient, ApiError, Capabilities, Document, Element, FilterValues, ListingsClient,
    RefreshOutcome,
};
use mockito::Matcher;
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

fn create_settings(base_url: &str) -> Settings {
    let mut settings = Settings::default();
    settings.api.base_url = base_url.to_string();
    settings
}

fn create_client(base_url: &str, doc: &Document) -> ListingsClient {
    create_client_with(&create_settings(base_url), doc, Capabilities::default())
}

fn create_client_with(
    settings: &Settings,
    doc: &Document,
    capabilities: Capabilities,
) -> ListingsClient {
    let api = ApiClient::new(&settings.api).unwrap();
    ListingsClient::from_document(api, doc, capabilities, settings)
}

fn property_json(id: u64, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "address": "123 Main St",
        "city": "New York",
        "state": "NY",
        "description": "Luxury apartment in the heart of downtown",
        "price": 450000,
        "bedrooms": 2,
        "bathrooms": 2,
        "area": 1200,
        "type": "apartment",
        "features": ["Parking", "Gym"],
        "images": []
    })
}

fn region(doc: &Document, id: &str) -> Element {
    doc.get_element_by_id(id).unwrap()
}

#[tokio::test]
async fn test_init_renders_stats_and_listings() {
    let mut server = mockito::Server::new_async().await;
    let stats = server
        .mock("GET", "/api/stats")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "total_properties": 3,
                "available_properties": 3,
                "average_price": 1234567.8
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;
    let listings = server
        .mock("GET", "/api/properties")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([property_json(1, "Loft"), property_json(2, "Penthouse")]).to_string())
        .expect(1)
        .create_async()
        .await;

    let doc = Document::listings_page(&FilterValues::default());
    let client = create_client(&server.url(), &doc);
    assert!(!client.is_ready());

    client.init().await;

    assert!(client.is_ready());
    stats.assert_async().await;
    listings.assert_async().await;

    let stats_html = region(&doc, ids::STATS).inner_html();
    assert!(stats_html.contains("$1,234,568"));

    let listings_html = region(&doc, ids::LISTINGS).inner_html();
    assert_eq!(listings_html.matches("<article class=\"card\">").count(), 2);
    assert!(listings_html.find("Loft").unwrap() < listings_html.find("Penthouse").unwrap());
}

#[tokio::test]
async fn test_empty_listings_show_no_results() {
    let mut server = mockito::Server::new_async().await;
    let _listings = server
        .mock("GET", "/api/properties")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let doc = Document::listings_page(&FilterValues::default());
    let client = create_client(&server.url(), &doc);

    assert_eq!(client.refresh_listings().await, RefreshOutcome::Empty);

    let listings = region(&doc, ids::LISTINGS);
    assert_eq!(listings.text_content(), "No results found.");
    assert!(!listings.inner_html().contains("card"));
}

#[tokio::test]
async fn test_listings_server_error_shows_failure() {
    let mut server = mockito::Server::new_async().await;
    let _listings = server
        .mock("GET", "/api/properties")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let doc = Document::listings_page(&FilterValues::default());
    let listings = region(&doc, ids::LISTINGS);
    listings.set_inner_html("<article class=\"card\">Previous Listing</article>");

    let client = create_client(&server.url(), &doc);
    assert_eq!(client.refresh_listings().await, RefreshOutcome::Failed);

    assert_eq!(listings.text_content(), "Failed to load properties.");
    assert!(!listings.inner_html().contains("Previous Listing"));
}

#[tokio::test]
async fn test_non_json_listings_show_failure() {
    let mut server = mockito::Server::new_async().await;
    let _listings = server
        .mock("GET", "/api/properties")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let doc = Document::listings_page(&FilterValues::default());
    let client = create_client(&server.url(), &doc);

    assert_eq!(client.refresh_listings().await, RefreshOutcome::Failed);
    assert_eq!(region(&doc, ids::LISTINGS).text_content(), "Failed to load properties.");
}

#[tokio::test]
async fn test_unreachable_api_does_not_block_init() {
    let doc = Document::listings_page(&FilterValues::default());
    let timing = PerformanceTiming::new(Instant::now());
    let client = create_client_with(
        &create_settings("http://127.0.0.1:1"),
        &doc,
        Capabilities {
            intersection_observer: false,
            performance: Some(timing),
        },
    );

    client.init().await;

    assert!(client.is_ready());
    assert_eq!(region(&doc, ids::STATS).inner_html(), "");
    assert_eq!(region(&doc, ids::LISTINGS).text_content(), "Failed to load properties.");
    // Already fired during init
    assert!(client.start_performance_monitoring().is_none());
}

#[tokio::test]
async fn test_stats_failure_keeps_region_and_listings_still_load() {
    let mut server = mockito::Server::new_async().await;
    let _stats = server
        .mock("GET", "/api/stats")
        .with_status(503)
        .create_async()
        .await;
    let _listings = server
        .mock("GET", "/api/properties")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([property_json(1, "Loft")]).to_string())
        .create_async()
        .await;

    let doc = Document::listings_page(&FilterValues::default());
    let stats = region(&doc, ids::STATS);
    stats.set_inner_html("<div class=\"stat-card\">previous</div>");

    let client = create_client(&server.url(), &doc);
    assert_eq!(client.refresh_stats().await, RefreshOutcome::Failed);
    assert_eq!(client.refresh_listings().await, RefreshOutcome::Rendered);

    assert!(stats.inner_html().contains("previous"));
    assert!(region(&doc, ids::LISTINGS).inner_html().contains("Loft"));
}

#[tokio::test]
async fn test_submit_sends_current_filters() {
    let mut server = mockito::Server::new_async().await;
    let listings = server
        .mock("GET", "/api/properties")
        .match_query(Matcher::UrlEncoded("q".into(), "loft".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([property_json(1, "Soho Loft")]).to_string())
        .expect(1)
        .create_async()
        .await;

    let doc = Document::listings_page(&FilterValues::default());
    let client = create_client(&server.url(), &doc);
    client.bind_ui();

    client.handles().fields.q.as_ref().unwrap().set_value("  loft ");
    assert_eq!(client.build_filter_query(), "q=loft");

    assert_eq!(client.on_submit().await, Some(RefreshOutcome::Rendered));
    listings.assert_async().await;
    assert!(region(&doc, ids::LISTINGS).inner_html().contains("Soho Loft"));
}

#[tokio::test]
async fn test_clear_filters_resets_then_refetches() {
    let mut server = mockito::Server::new_async().await;
    let listings = server
        .mock("GET", "/api/properties")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;

    let doc = Document::listings_page(&FilterValues::default());
    let client = create_client(&server.url(), &doc);
    client.bind_ui();

    region(&doc, ids::Q).set_value("loft");
    region(&doc, ids::MIN_PRICE).set_value("100000");

    assert_eq!(client.on_clear_filters().await, Some(RefreshOutcome::Empty));
    listings.assert_async().await;

    assert_eq!(client.build_filter_query(), "");
    assert_eq!(region(&doc, ids::Q).value(), "");
    assert_eq!(region(&doc, ids::LISTINGS).text_content(), "No results found.");
}

#[tokio::test]
async fn test_null_features_and_images_still_render() {
    let mut server = mockito::Server::new_async().await;
    let mut property = property_json(4, "Garden Cottage");
    property["features"] = serde_json::Value::Null;
    property["images"] = serde_json::Value::Null;
    let _listings = server
        .mock("GET", "/api/properties")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([property]).to_string())
        .create_async()
        .await;

    let doc = Document::listings_page(&FilterValues::default());
    let client = create_client(&server.url(), &doc);

    assert_eq!(client.refresh_listings().await, RefreshOutcome::Rendered);

    let html = region(&doc, ids::LISTINGS).inner_html();
    assert!(html.contains("Garden Cottage"));
    assert!(html.contains("via.placeholder.com"));
    assert!(!html.contains("Failed to load properties."));
}

#[tokio::test]
async fn test_missing_form_and_clear_control_are_not_bound() {
    let mut doc = Document::new();
    doc.insert(Element::with_id(ids::LISTINGS));
    let client = create_client("http://127.0.0.1:1", &doc);
    client.bind_ui();

    assert!(client.on_submit().await.is_none());
    assert!(client.on_clear_filters().await.is_none());
    assert_eq!(region(&doc, ids::LISTINGS).inner_html(), "");
}

#[tokio::test]
async fn test_escaping_setting_escapes_server_text() {
    let mut server = mockito::Server::new_async().await;
    let _listings = server
        .mock("GET", "/api/properties")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([property_json(1, "<b>Loft</b>")]).to_string())
        .create_async()
        .await;

    let mut settings = create_settings(&server.url());
    settings.render.escape_html = true;

    let doc = Document::listings_page(&FilterValues::default());
    let client = create_client_with(&settings, &doc, Capabilities::default());
    client.refresh_listings().await;

    let html = region(&doc, ids::LISTINGS).inner_html();
    assert!(html.contains("&lt;b&gt;Loft&lt;/b&gt;"));
    assert!(!html.contains("<b>"));
}

#[tokio::test]
async fn test_event_loop_reveal_effects() {
    let mut doc = Document::new();
    let cards: Vec<Element> = (0..3)
        .map(|_| doc.insert(Element::new().with_class(CARD_LIKE_CLASS)))
        .collect();
    let feature = doc.insert(Element::new().with_class(FEATURE_CLASS));
    let outsider = Element::new();

    let client = Arc::new(create_client_with(
        &create_settings(""),
        &doc,
        Capabilities {
            intersection_observer: true,
            performance: None,
        },
    ));
    client.bind_ui();

    let (sender, event_loop) = events::channel();
    assert!(sender.send(UiEvent::DocumentReady));
    assert!(sender.send(UiEvent::Intersection(vec![
        IntersectionEntry::new(feature.clone(), 0.1),
        IntersectionEntry::new(cards[0].clone(), 0.05),
        IntersectionEntry::new(outsider.clone(), 1.0),
    ])));
    drop(sender);
    event_loop.run(Arc::clone(&client)).await;

    for (i, card) in cards.iter().enumerate() {
        assert!(card.has_class(FADE_IN_CLASS));
        assert_eq!(card.animation_delay(), Some(Duration::from_millis(100 * i as u64)));
    }
    assert!(feature.has_class(ANIMATE_IN_CLASS));
    assert!(!cards[0].has_class(ANIMATE_IN_CLASS));
    assert!(!outsider.has_class(ANIMATE_IN_CLASS));
}

#[tokio::test]
async fn test_get_property_by_id() {
    let mut server = mockito::Server::new_async().await;
    let _found = server
        .mock("GET", "/api/properties/1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(property_json(1, "Loft").to_string())
        .create_async()
        .await;
    let _missing = server
        .mock("GET", "/api/properties/99")
        .with_status(404)
        .with_body(json!({"error": "Property not found"}).to_string())
        .create_async()
        .await;

    let api = ApiClient::new(&create_settings(&server.url()).api).unwrap();

    let property = api.get_property(1).await.unwrap();
    assert_eq!(property.title, "Loft");

    let err = api.get_property(99).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

/// Listings server that answers requests with `q=slow` only after a delay
async fn spawn_delaying_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = vec![0u8; 4096];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]).to_string();

                let body = if request.contains("q=slow") {
                    tokio::time::sleep(Duration::from_millis(300)).await;
                    json!([property_json(1, "Slow Answer")]).to_string()
                } else {
                    json!([property_json(2, "Fast Answer")]).to_string()
                };

                let response = format!(
                    "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_stale_response_is_discarded() {
    let base_url = spawn_delaying_server().await;
    let doc = Document::listings_page(&FilterValues {
        q: "slow".to_string(),
        ..Default::default()
    });
    let client = Arc::new(create_client(&base_url, &doc));

    let first = tokio::spawn({
        let client = Arc::clone(&client);
        async move { client.refresh_listings().await }
    });
    // Let the first request go out before the filter changes
    tokio::time::sleep(Duration::from_millis(50)).await;

    region(&doc, ids::Q).set_value("fast");
    assert_eq!(client.refresh_listings().await, RefreshOutcome::Rendered);
    assert_eq!(first.await.unwrap(), RefreshOutcome::Stale);

    let html = region(&doc, ids::LISTINGS).inner_html();
    assert!(html.contains("Fast Answer"));
    assert!(!html.contains("Slow Answer"));
}
