//! Integration tests for the fetch helper

use achilles::error::AchillesError;
use achilles::fetch::{Fetcher, TimeoutPolicy};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_USER_AGENT: &str = "Achilles-Test/0.1.0";

#[tokio::test]
async fn test_bounded_fetch_returns_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello world"))
        .mount(&mock_server)
        .await;

    let fetcher = Fetcher::new(TimeoutPolicy::bounded_default(), TEST_USER_AGENT)
        .expect("failed to create fetcher");

    let body = fetcher
        .fetch_data(&format!("{}/data", mock_server.uri()))
        .await
        .expect("fetch failed");
    assert_eq!(body, "hello world");
}

#[tokio::test]
async fn test_bounded_fetch_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("too late")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let fetcher = Fetcher::new(
        TimeoutPolicy::Bounded(Duration::from_millis(500)),
        TEST_USER_AGENT,
    )
    .expect("failed to create fetcher");

    let err = fetcher
        .fetch_data(&mock_server.uri())
        .await
        .expect_err("fetch should have timed out");
    assert!(matches!(err, AchillesError::FetchTimeout(_)));
}

#[tokio::test]
async fn test_unbounded_fetch_survives_slow_response() {
    let mock_server = MockServer::start().await;

    // Slower than the bounded test's deadline, yet this call succeeds:
    // no client-side deadline exists to trip.
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("worth the wait")
                .set_delay(Duration::from_secs(1)),
        )
        .mount(&mock_server)
        .await;

    let fetcher = Fetcher::new(TimeoutPolicy::Unbounded, TEST_USER_AGENT)
        .expect("failed to create fetcher");

    let body = fetcher
        .fetch_data(&mock_server.uri())
        .await
        .expect("fetch failed");
    assert_eq!(body, "worth the wait");
}

#[tokio::test]
async fn test_invalid_url_is_rejected() {
    let fetcher = Fetcher::new(TimeoutPolicy::bounded_default(), TEST_USER_AGENT)
        .expect("failed to create fetcher");

    let err = fetcher
        .fetch_data("not a url")
        .await
        .expect_err("fetch should have failed");
    assert!(matches!(err, AchillesError::UrlError(_)));
}

#[tokio::test]
async fn test_request_count() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&mock_server)
        .await;

    let fetcher = Fetcher::new(TimeoutPolicy::bounded_default(), TEST_USER_AGENT)
        .expect("failed to create fetcher");

    assert_eq!(fetcher.request_count(), 0);
    for i in 1..=3 {
        let _ = fetcher
            .fetch_data(&format!("{}/page{}", mock_server.uri(), i))
            .await;
    }
    assert_eq!(fetcher.request_count(), 3);
}
