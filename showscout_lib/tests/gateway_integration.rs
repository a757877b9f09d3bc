use std::time::{Duration, Instant};

use serde_json::json;
use showscout_lib::{cache_key, FetchGateway, RequestPolicy, ResponseCache, ShowError};
use showscout_lib::tmdb_api::{Client, RequestOptions};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway(server: &MockServer) -> FetchGateway {
    let transport = Client::with_base_url(&server.uri()).unwrap();
    FetchGateway::new(transport, ResponseCache::new(16, Duration::from_secs(300)))
        .with_backoff(Duration::from_millis(20))
}

fn popular_url(server: &MockServer) -> Url {
    Url::parse(&format!("{}/tv/popular?page=1", server.uri())).unwrap()
}

#[tokio::test]
async fn repeated_calls_within_ttl_hit_network_once() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tv/popular"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"page": 1})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gw = gateway(&mock_server);
    let url = popular_url(&mock_server);
    let opts = RequestOptions::bearer("t");

    let first = gw.execute(&url, &opts, RequestPolicy::default()).await.unwrap();
    let second = gw.execute(&url, &opts, RequestPolicy::default()).await.unwrap();
    assert_eq!(first, second);

    let summary = gw.tracker().summary();
    assert_eq!(summary.requests_made, 1);
    let stats = gw.cache().stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
}

#[tokio::test]
async fn equal_options_built_separately_share_a_cache_entry() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tv/popular"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"page": 1})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gw = gateway(&mock_server);
    let url = popular_url(&mock_server);

    gw.execute(&url, &RequestOptions::bearer("t"), RequestPolicy::default())
        .await
        .unwrap();
    let reordered = RequestOptions::new()
        .with_header("Authorization", "Bearer t")
        .with_header("Accept", "application/json");
    gw.execute(&url, &reordered, RequestPolicy::default())
        .await
        .unwrap();
}

#[tokio::test]
async fn skip_ignores_a_fresh_cache_entry_and_does_not_store() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tv/popular"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": "B"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gw = gateway(&mock_server);
    let url = popular_url(&mock_server);
    let opts = RequestOptions::bearer("t");
    let key = cache_key(&url, &opts);
    gw.cache().set(key.clone(), json!({"value": "A"}), None);

    let fresh = gw.execute(&url, &opts, RequestPolicy::bypass()).await.unwrap();
    assert_eq!(fresh, json!({"value": "B"}));

    // The seeded entry is neither read nor overwritten.
    assert_eq!(gw.cache().get(&key), Some(json!({"value": "A"})));
}

#[tokio::test]
async fn custom_ttl_is_stored_with_the_entry() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tv/popular"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"page": 1})))
        .mount(&mock_server)
        .await;

    let gw = gateway(&mock_server);
    let url = popular_url(&mock_server);
    let opts = RequestOptions::bearer("t");

    gw.execute(&url, &opts, RequestPolicy::with_ttl(Duration::ZERO))
        .await
        .unwrap();
    assert!(!gw.cache().has(&cache_key(&url, &opts)));

    gw.execute(&url, &opts, RequestPolicy::with_ttl(Duration::from_secs(3600)))
        .await
        .unwrap();
    assert!(gw.cache().has(&cache_key(&url, &opts)));
}

#[tokio::test]
async fn rate_limit_then_success_retries_once() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tv/popular"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tv/popular"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"payload": "P"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gw = gateway(&mock_server);
    let url = popular_url(&mock_server);
    let opts = RequestOptions::bearer("t");

    let value = gw.execute(&url, &opts, RequestPolicy::default()).await.unwrap();
    assert_eq!(value, json!({"payload": "P"}));

    let summary = gw.tracker().summary();
    assert_eq!(summary.requests_made, 2);
    assert_eq!(summary.requests_rate_limited, 1);
    assert_eq!(summary.requests_succeeded, 1);
    assert_eq!(summary.retries, 1);
    assert_eq!(summary.total_backoff, Duration::from_millis(20));

    // The retry bypasses the cache in both directions.
    assert!(!gw.cache().has(&cache_key(&url, &opts)));
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn second_rate_limit_fails_without_further_retries() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tv/popular"))
        .respond_with(ResponseTemplate::new(429))
        .expect(2)
        .mount(&mock_server)
        .await;

    let gw = gateway(&mock_server);
    let url = popular_url(&mock_server);
    let result = gw
        .execute(&url, &RequestOptions::bearer("t"), RequestPolicy::default())
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, ShowError::RateLimited));
    assert_eq!(err.status(), Some(429));

    let summary = gw.tracker().summary();
    assert_eq!(summary.requests_rate_limited, 2);
    assert_eq!(summary.retries, 1);
}

#[tokio::test]
async fn default_backoff_waits_one_second() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tv/popular"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tv/popular"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let transport = Client::with_base_url(&mock_server.uri()).unwrap();
    let gw = FetchGateway::new(transport, ResponseCache::new(4, Duration::from_secs(60)));
    let started = Instant::now();
    gw.execute(
        &popular_url(&mock_server),
        &RequestOptions::new(),
        RequestPolicy::default(),
    )
    .await
    .unwrap();
    assert!(started.elapsed() >= Duration::from_millis(1000));
}

#[tokio::test]
async fn server_error_is_not_retried() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tv/popular"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gw = gateway(&mock_server);
    let err = gw
        .execute(
            &popular_url(&mock_server),
            &RequestOptions::bearer("t"),
            RequestPolicy::default(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(503));
    assert_eq!(err.to_string(), "HTTP 503: Service Unavailable");
    assert_eq!(gw.tracker().summary().retries, 0);
}

#[tokio::test]
async fn undecodable_body_is_not_cached() {
    #[derive(serde::Deserialize, Debug)]
    #[allow(dead_code)]
    struct Page {
        page: i64,
    }

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tv/popular"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .expect(2)
        .mount(&mock_server)
        .await;

    let gw = gateway(&mock_server);
    let url = popular_url(&mock_server);
    let opts = RequestOptions::bearer("t");

    for _ in 0..2 {
        let result = gw
            .execute_as::<Page>(&url, &opts, RequestPolicy::default())
            .await;
        assert!(matches!(result, Err(ShowError::Decode(_))));
    }
    assert_eq!(gw.cache().size(), 0);
}

#[tokio::test]
async fn transport_failure_is_classified() {
    let transport = Client::with_base_url("http://127.0.0.1:1").unwrap();
    let gw = FetchGateway::new(transport, ResponseCache::new(4, Duration::from_secs(60)));
    let url = Url::parse("http://127.0.0.1:1/tv/popular").unwrap();

    let err = gw
        .execute(&url, &RequestOptions::new(), RequestPolicy::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ShowError::Transport(_)));
    assert!(err.is_transient());
    assert_eq!(gw.tracker().summary().requests_failed, 1);
}
