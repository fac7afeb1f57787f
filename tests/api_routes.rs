//! End-to-end tests of the feed API against a mock provider.

mod common;

use common::*;
use listen_feed::feed::FeedResponse;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_healthz_is_public() {
    let provider = start_mock_provider(|_| (200, ATOM_TWO_SONGS.to_string())).await;
    let api = spawn_api(&test_config(&provider.base_url())).await;

    let res = client().get(api.url("/api/healthz")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "\"OK\"");
}

#[tokio::test]
async fn test_missing_or_unknown_token_is_401() {
    let provider = start_mock_provider(|_| (200, ATOM_TWO_SONGS.to_string())).await;
    let api = spawn_api(&test_config(&provider.base_url())).await;

    let res = client().get(api.url("/api/feed")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client()
        .get(api.url("/api/feed"))
        .bearer_auth("nope")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(provider.requests().is_empty());
}

#[tokio::test]
async fn test_select_feed_requires_admin() {
    let provider = start_mock_provider(|_| (200, ATOM_TWO_SONGS.to_string())).await;
    let config = test_config(&provider.base_url());
    let api = spawn_api(&config).await;

    let res = client()
        .post(api.url("/api/select_feed"))
        .bearer_auth(USER_TOKEN)
        .json(&json!({ "name": "alice" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // The selection is untouched.
    let res = client()
        .get(api.url("/api/feed"))
        .bearer_auth(USER_TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        provider.requests(),
        [format!(
            "/syndication-feed/user/{}/listens?minutes=5000",
            config.api.default_username
        )]
    );
}

#[tokio::test]
async fn test_admin_selects_feed_then_reads_it() {
    let provider = start_mock_provider(|_| (200, ATOM_TWO_SONGS.to_string())).await;
    let api = spawn_api(&test_config(&provider.base_url())).await;

    let res = client()
        .post(api.url("/api/select_feed"))
        .bearer_auth(ADMIN_TOKEN)
        .json(&json!({ "name": "alice" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "\"OK\"");

    let res = client()
        .get(api.url("/api/feed"))
        .bearer_auth(ADMIN_TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: FeedResponse = res.json().await.unwrap();
    assert!(body.write_access);

    let feed = body.feed.unwrap();
    assert_eq!(feed.username, "alice");
    let titles: Vec<_> = feed.songs.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, ["Artist A - Song 1", "Artist B - Song 2"]);

    assert_eq!(
        provider.requests(),
        ["/syndication-feed/user/alice/listens?minutes=5000"]
    );
}

#[tokio::test]
async fn test_regular_user_has_no_write_access() {
    let provider = start_mock_provider(|_| (200, ATOM_TWO_SONGS.to_string())).await;
    let api = spawn_api(&test_config(&provider.base_url())).await;

    let body: FeedResponse = client()
        .get(api.url("/api/feed"))
        .bearer_auth(USER_TOKEN)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!body.write_access);
    assert_eq!(body.feed.unwrap().songs.len(), 2);
}

#[tokio::test]
async fn test_username_is_escaped_in_provider_path() {
    let provider = start_mock_provider(|_| (200, ATOM_TWO_SONGS.to_string())).await;
    let api = spawn_api(&test_config(&provider.base_url())).await;

    let res = client()
        .post(api.url("/api/select_feed"))
        .bearer_auth(ADMIN_TOKEN)
        .json(&json!({ "name": "dj a/b" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    client()
        .get(api.url("/api/feed"))
        .bearer_auth(ADMIN_TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(
        provider.requests(),
        ["/syndication-feed/user/dj%20a%2Fb/listens?minutes=5000"]
    );
}

#[tokio::test]
async fn test_provider_404_is_empty_feed() {
    let provider = start_mock_provider(|_| (404, String::new())).await;
    let api = spawn_api(&test_config(&provider.base_url())).await;

    let res = client()
        .get(api.url("/api/feed"))
        .bearer_auth(USER_TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let feed = res.json::<FeedResponse>().await.unwrap().feed.unwrap();
    assert_eq!(feed.username, "xcrochet");
    assert!(feed.songs.is_empty());
}

#[tokio::test]
async fn test_provider_failure_is_500() {
    let provider = start_mock_provider(|_| (500, "boom".to_string())).await;
    let api = spawn_api(&test_config(&provider.base_url())).await;

    let res = client()
        .get(api.url("/api/feed"))
        .bearer_auth(USER_TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_undecodable_feed_is_500() {
    let provider = start_mock_provider(|_| {
        (200, "<feed><entry><title>no timestamp</title></entry></feed>".to_string())
    })
    .await;
    let api = spawn_api(&test_config(&provider.base_url())).await;

    let res = client()
        .get(api.url("/api/feed"))
        .bearer_auth(USER_TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_unreachable_provider_is_500() {
    let api = spawn_api(&test_config("http://127.0.0.1:9")).await;

    let res = client()
        .get(api.url("/api/feed"))
        .bearer_auth(USER_TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_bad_select_bodies_are_400() {
    let provider = start_mock_provider(|_| (200, ATOM_TWO_SONGS.to_string())).await;
    let api = spawn_api(&test_config(&provider.base_url())).await;

    let res = client()
        .post(api.url("/api/select_feed"))
        .bearer_auth(ADMIN_TOKEN)
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client()
        .post(api.url("/api/select_feed"))
        .bearer_auth(ADMIN_TOKEN)
        .json(&json!({ "name": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_wrong_verb_is_404_after_auth() {
    let provider = start_mock_provider(|_| (200, ATOM_TWO_SONGS.to_string())).await;
    let api = spawn_api(&test_config(&provider.base_url())).await;

    let res = client()
        .get(api.url("/api/select_feed"))
        .bearer_auth(ADMIN_TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client()
        .post(api.url("/api/feed"))
        .bearer_auth(ADMIN_TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client().get(api.url("/api/select_feed")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let provider = start_mock_provider(|_| (200, ATOM_TWO_SONGS.to_string())).await;
    let api = spawn_api(&test_config(&provider.base_url())).await;

    let res = client().get(api.url("/api/nope")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
