use std::time::Duration;

use serde_json::json;
use showscout_lib::tmdb_api::{
    Client, DiscoverQuery, Endpoint, ListQuery, Query, RequestOptions, SearchQuery,
};
use showscout_lib::types::TimeWindow;
use showscout_lib::{cache_key, Config, FetchGateway, ResponseCache, ShowClient, ShowError};
use tokio::time::advance;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn listing() -> serde_json::Value {
    json!({
        "page": 1,
        "results": [
            {
                "id": 1396,
                "name": "Breaking Bad",
                "overview": "",
                "poster_path": null,
                "backdrop_path": null,
                "first_air_date": "2008-01-20",
                "vote_average": 8.9
            }
        ],
        "total_pages": 1,
        "total_results": 1
    })
}

fn client(server: &MockServer, token: Option<&str>) -> ShowClient {
    let transport = Client::with_base_url(&server.uri()).unwrap();
    let gateway = FetchGateway::new(transport, ResponseCache::new(32, Duration::from_secs(300)))
        .with_backoff(Duration::from_millis(10));
    ShowClient::with_gateway(gateway, token.map(str::to_string))
}

#[tokio::test]
async fn missing_token_fails_before_any_request() {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server, None);

    let results = [
        client.trending_shows(TimeWindow::Day, None).await.err(),
        client.popular_shows(Some(1)).await.err(),
        client.search_shows(&SearchQuery::new("lost")).await.err(),
        client.discover_shows(&DiscoverQuery::default()).await.err(),
        client.show_details(1396).await.err(),
        client.genres().await.err(),
    ];
    for err in results {
        assert!(matches!(err, Some(ShowError::Configuration(_))));
    }

    assert!(mock_server.received_requests().await.unwrap().is_empty());
    assert_eq!(client.cache_stats().misses, 0);
}

#[tokio::test]
async fn missing_token_wins_over_blank_search() {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server, None);
    let err = client.search_shows(&SearchQuery::new("")).await.unwrap_err();
    assert!(matches!(err, ShowError::Configuration(_)));
}

#[tokio::test]
async fn trending_sends_bearer_token_and_caches() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/trending/tv/week"))
        .and(query_param("page", "2"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server, Some("secret"));
    let first = client
        .trending_shows(TimeWindow::Week, Some(2))
        .await
        .unwrap();
    let second = client
        .trending_shows(TimeWindow::Week, Some(2))
        .await
        .unwrap();

    assert_eq!(first.results[0].name, "Breaking Bad");
    assert_eq!(second.results[0].id, 1396);
    assert_eq!(client.request_stats().requests_made, 1);
    assert_eq!(client.cache_stats().hits, 1);
}

#[tokio::test]
async fn blank_discover_filters_share_the_cache_entry() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/discover/tv"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server, Some("t"));
    client
        .discover_shows(&DiscoverQuery::default().with_page(1).with_genres(""))
        .await
        .unwrap();
    client
        .discover_shows(&DiscoverQuery::default().with_page(1))
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("page=1"));
}

#[tokio::test]
async fn blank_search_is_rejected_without_a_request() {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server, Some("t"));

    let err = client
        .search_shows(&SearchQuery::new("   "))
        .await
        .unwrap_err();
    assert!(matches!(err, ShowError::InvalidInput(_)));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn default_language_is_applied_unless_overridden() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/tv"))
        .and(query_param("language", "de-DE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing()))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search/tv"))
        .and(query_param("language", "fr-FR"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server, Some("t")).with_language("de-DE");
    client
        .search_shows(&SearchQuery::new("dark"))
        .await
        .unwrap();
    client
        .search_shows(&SearchQuery::new("dark").with_language("fr-FR"))
        .await
        .unwrap();
}

#[tokio::test]
async fn invalidate_forces_a_refetch() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/trending/tv/day"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing()))
        .expect(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tv/popular"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server, Some("t"));
    client.trending_shows(TimeWindow::Day, None).await.unwrap();
    client.popular_shows(None).await.unwrap();

    assert_eq!(client.invalidate("/trending/"), 1);
    client.trending_shows(TimeWindow::Day, None).await.unwrap();
    client.popular_shows(None).await.unwrap();
}

#[tokio::test]
async fn clear_cache_resets_stats() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tv/top_rated"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing()))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server, Some("t"));
    client.top_rated_shows(None).await.unwrap();
    client.top_rated_shows(None).await.unwrap();
    assert_eq!(client.cache_stats().size, 1);

    client.clear_cache();
    let stats = client.cache_stats();
    assert_eq!(stats.size, 0);
    assert_eq!(stats.hits, 0);
    assert_eq!(stats.hit_rate, 0.0);
}

#[tokio::test]
async fn details_not_found_surfaces_status() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tv/999999"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "status_code": 34,
            "status_message": "The resource you requested could not be found."
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server, Some("t"));
    let err = client.show_details(999999).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(!err.is_transient());
}

#[tokio::test]
async fn per_show_resources_hit_their_paths() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tv/1396/credits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1396,
            "cast": [{"id": 17419, "name": "Bryan Cranston", "character": "Walter White", "order": 0}],
            "crew": []
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tv/1396/similar"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing()))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tv/1396/recommendations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing()))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tv/1396/watch/providers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1396,
            "results": {"US": {"flatrate": [{"provider_id": 8, "provider_name": "Netflix"}]}}
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/network/213"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 213, "name": "Netflix"})))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tv/on_the_air"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing()))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server, Some("t"));
    let credits = client.show_credits(1396).await.unwrap();
    assert_eq!(credits.cast[0].character, "Walter White");
    assert_eq!(client.similar_shows(1396, None).await.unwrap().results.len(), 1);
    assert_eq!(
        client
            .show_recommendations(1396, Some(1))
            .await
            .unwrap()
            .total_results,
        1
    );
    let providers = client.watch_providers(1396).await.unwrap();
    assert_eq!(providers.region("US").unwrap().flatrate[0].provider_name, "Netflix");
    assert_eq!(client.network(213).await.unwrap().name, "Netflix");
    assert_eq!(client.on_the_air_shows(None).await.unwrap().page, 1);
    assert_eq!(client.cache_stats().size, 6);
}

fn fixture(name: &str) -> serde_json::Value {
    let path = format!(
        "{}/../tmdb_api/tests/fixtures/{}",
        env!("CARGO_MANIFEST_DIR"),
        name
    );
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn operations_store_responses_with_their_resource_ttl() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/tv"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing()))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tv/1396"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture("tv_details.json")))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/genre/tv/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture("genres.json")))
        .mount(&mock_server)
        .await;

    // A short cache default, so only the per-resource TTL keeps entries past a minute.
    let transport = Client::with_base_url(&mock_server.uri()).unwrap();
    let gateway = FetchGateway::new(transport, ResponseCache::new(32, Duration::from_secs(60)));
    let client = ShowClient::with_gateway(gateway, Some("t".to_string()));

    client.search_shows(&SearchQuery::new("dark")).await.unwrap();
    client.show_details(1396).await.unwrap();
    client.genres().await.unwrap();

    let transport = client.gateway().transport();
    let key_for = |url: url::Url| cache_key(&url, &RequestOptions::bearer("t"));
    let search = key_for(
        transport
            .endpoint_url(&Endpoint::Search, Some(&SearchQuery::new("dark")))
            .unwrap(),
    );
    let details = key_for(
        transport
            .endpoint_url(&Endpoint::Details(1396), Some(&ListQuery::default()))
            .unwrap(),
    );
    let genres = key_for(
        transport
            .endpoint_url(&Endpoint::Genres, Some(&ListQuery::default()))
            .unwrap(),
    );
    let cache = client.gateway().cache();

    tokio::time::pause();

    // Search lives five minutes.
    advance(Duration::from_secs(299)).await;
    assert!(cache.has(&search));
    advance(Duration::from_secs(2)).await;
    assert!(!cache.has(&search));
    assert!(cache.has(&details));
    assert!(cache.has(&genres));

    // Details live an hour.
    advance(Duration::from_secs(3600)).await;
    assert!(!cache.has(&details));
    assert!(cache.has(&genres));

    // The genre list lives a day.
    advance(Duration::from_secs(24 * 3600)).await;
    assert!(!cache.has(&genres));
}

#[test]
fn client_from_config_uses_cache_settings() {
    let config = Config::default()
        .with_api_token("t")
        .with_base_url("http://localhost:9/3");
    let config = Config {
        cache_max_size: 7,
        ..config
    };
    let client = ShowClient::new(&config).unwrap();
    assert_eq!(client.cache_stats().max_size, 7);
    assert_eq!(
        client.gateway().cache().default_ttl(),
        Duration::from_secs(300)
    );
}
