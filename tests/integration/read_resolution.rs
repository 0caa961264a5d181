//! Integration tests for ordered read resolution

use crate::integration::mock_server::{
    assert_all, profile_body, MockServerFixture, RawReply, RawServer, READ_PATHS,
};
use campus_profile_client::probe::{HttpMethod, OutcomeKind, ParamEncoding};
use campus_profile_client::{Error, ProfileClient, ProfileRoutes};
use mockito::Matcher;
use serde_json::json;
use std::error::Error as _;

#[tokio::test]
async fn test_first_candidate_answers_with_single_call() {
    let mut fixture = MockServerFixture::new().await;
    let hit = fixture
        .mock_get(READ_PATHS[0], "42", 200, &profile_body("42", "Alice", "Austin"), 1)
        .await;
    let untouched = fixture.mock_untouched_reads(1, 0).await;

    let client = fixture.client();
    let resolution = client.fetch_profile("42").await.unwrap();

    assert_eq!(resolution.winner.path, READ_PATHS[0]);
    assert_eq!(resolution.attempts.len(), 1);
    assert_eq!(resolution.body["data"]["u_name"], "Alice");
    hit.assert_async().await;
    assert_all(&untouched).await;
}

#[tokio::test]
async fn test_fourth_candidate_after_three_not_found() {
    let mut fixture = MockServerFixture::new().await;
    let mut mocks = Vec::new();
    for path in &READ_PATHS[..3] {
        mocks.push(fixture.mock_get(path, "42", 404, r#"{"message":"Not Found"}"#, 1).await);
    }
    mocks.push(
        fixture
            .mock_get(READ_PATHS[3], "42", 200, &profile_body("42", "Alice", "Austin"), 1)
            .await,
    );
    mocks.extend(fixture.mock_untouched_reads(4, 0).await);

    let client = fixture.client();
    let resolution = client.fetch_profile("42").await.unwrap();

    assert_eq!(resolution.winner.path, READ_PATHS[3]);
    let order: Vec<&str> = resolution
        .attempts
        .iter()
        .map(|a| a.candidate.path.as_str())
        .collect();
    assert_eq!(order, READ_PATHS.to_vec());
    assert_eq!(
        resolution.attempts.iter().map(|a| a.http_status).collect::<Vec<_>>(),
        vec![Some(404), Some(404), Some(404), Some(200)]
    );
    assert_all(&mocks).await;
}

#[tokio::test]
async fn test_server_error_aborts_without_trying_fallbacks() {
    let mut fixture = MockServerFixture::new().await;
    let mut mocks = vec![
        fixture.mock_get(READ_PATHS[0], "42", 404, "", 1).await,
        fixture
            .mock_get(READ_PATHS[1], "42", 500, r#"{"message":"Server Error"}"#, 1)
            .await,
    ];
    // The POST variant of the first path would succeed, but must never be tried.
    mocks.push(
        fixture
            .mock_post(READ_PATHS[0], "42", 200, &profile_body("42", "Alice", "Austin"), 0)
            .await,
    );
    mocks.extend(fixture.mock_untouched_reads(2, 1).await);

    let client = fixture.client();
    let err = client.fetch_profile("42").await.unwrap_err();

    match &err {
        Error::Remote { status, class, context, .. } => {
            assert_eq!(*status, 500);
            assert_eq!(class, "server_error");
            assert!(context
                .details
                .as_deref()
                .unwrap_or_default()
                .contains("student-profile-ap (query) -> 404"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(client.view().current().is_none());
    assert_all(&mocks).await;
}

#[tokio::test]
async fn test_empty_identifier_makes_no_request() {
    let mut fixture = MockServerFixture::new().await;
    let untouched = fixture.mock_untouched_reads(0, 0).await;

    let client = fixture.client();
    for id in ["", "   "] {
        let err = client.fetch_profile(id).await.unwrap_err();
        assert!(matches!(err, Error::Validation { .. }), "{err}");
    }
    assert_all(&untouched).await;
}

#[tokio::test]
async fn test_post_multipart_fallback_after_gets_skip() {
    let mut fixture = MockServerFixture::new().await;
    let mut mocks = Vec::new();
    for (i, path) in READ_PATHS.iter().enumerate() {
        let status = if i % 2 == 0 { 404 } else { 405 };
        mocks.push(fixture.mock_get(path, "42", status, "", 1).await);
    }
    mocks.push(
        fixture
            .mock_post(READ_PATHS[0], "42", 200, &profile_body("42", "Alice", "Austin"), 1)
            .await,
    );
    mocks.extend(fixture.mock_untouched_reads(4, 1).await);

    let client = fixture.client();
    let resolution = client.fetch_profile("42").await.unwrap();

    assert_eq!(resolution.winner.method, HttpMethod::Post);
    assert_eq!(resolution.attempts.len(), 5);
    assert_eq!(resolution.attempts[1].http_status, Some(405));
    assert_eq!(resolution.attempts[4].outcome, OutcomeKind::Success);
    assert_all(&mocks).await;
}

#[tokio::test]
async fn test_every_candidate_skipped_is_exhausted() {
    let mut fixture = MockServerFixture::new().await;
    let mut mocks = Vec::new();
    for path in READ_PATHS {
        mocks.push(fixture.mock_get(path, "42", 404, "", 1).await);
    }
    for path in READ_PATHS {
        mocks.push(fixture.mock_post(path, "42", 404, "no such route", 1).await);
    }

    let client = fixture.client();
    let err = client.fetch_profile("42").await.unwrap_err();

    assert!(matches!(err, Error::Exhausted { attempts: 8, .. }), "{err}");
    let cause = err.source().expect("last skip cause");
    assert!(cause.to_string().contains("HTTP 404"));
    assert!(cause.to_string().contains("no such route"));
    assert_all(&mocks).await;
}

#[tokio::test]
async fn test_requests_carry_token_and_request_id() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("GET", READ_PATHS[0])
        .match_query(Matcher::UrlEncoded("u_id".into(), "7".into()))
        .match_header("authorization", "Bearer t0k3n")
        .match_header("x-request-id", Matcher::Regex("^[0-9a-f-]{36}$".into()))
        .with_status(200)
        .with_body(r#"{"u_id":"7","u_name":"Dana"}"#)
        .expect(1)
        .create_async()
        .await;

    let client = fixture.client_with_token(Some("t0k3n"));
    let resolution = client.fetch_profile("7").await.unwrap();

    assert_eq!(resolution.request_id.len(), 36);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_store_tracks_successful_reads_only() {
    let mut fixture = MockServerFixture::new().await;
    let first = fixture
        .mock_get(READ_PATHS[0], "42", 200, &profile_body("42", "Alice", "Austin"), 1)
        .await;
    let no_profile = fixture
        .mock_get(READ_PATHS[0], "43", 200, r#"{"message":"ok"}"#, 1)
        .await;

    let client = fixture.client();
    let view = client.view();
    assert!(view.current().is_none());

    client.fetch_profile("42").await.unwrap();
    let snapshot = view.current().unwrap();
    assert_eq!(snapshot.version, 1);
    assert_eq!(snapshot.profile.s_city.as_deref(), Some("Austin"));
    assert_eq!(snapshot.source.path, READ_PATHS[0]);

    // A payload without a profile object is returned but not published.
    let resolution = client.fetch_profile("43").await.unwrap();
    assert_eq!(resolution.body["message"], "ok");
    assert_eq!(view.version(), 1);
    assert_eq!(view.profile_for("42").unwrap().display_name(), "Alice");

    first.assert_async().await;
    no_profile.assert_async().await;
}

#[tokio::test]
async fn test_connection_closed_after_skip_aborts_with_skip_recorded() {
    let server = RawServer::start(vec![RawReply::Status(404), RawReply::Drop]).await;
    let client = server.client();

    let err = client.fetch_profile("42").await.unwrap_err();

    match &err {
        Error::Aborted { cause, .. } => {
            assert!(matches!(**cause, Error::Transport(_)), "{cause}")
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(
        err.previous_skip(),
        Some("GET /api/admin/student-profile-ap (query) -> 404")
    );
    // The third candidate would answer 200, but is never contacted.
    assert_eq!(server.connections(), 2);
    assert!(client.view().current().is_none());
}

#[tokio::test]
async fn test_refused_connection_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ProfileClient::builder()
        .base_url(format!("http://{}", addr))
        .routes(ProfileRoutes::default())
        .build()
        .unwrap();
    let err = client.fetch_profile("42").await.unwrap_err();

    assert!(matches!(err, Error::Transport(_)), "{err}");
    assert_eq!(err.previous_skip(), None);
}

#[tokio::test]
async fn test_json_body_fallback_route() {
    let routes = ProfileRoutes::from_yaml_str(
        r#"
read:
  primary:
    - { path: /api/student-profile-api, method: GET, encoding: query }
  fallback:
    - { path: /api/student-profile-api, method: POST, encoding: json-body }
write:
  path: /api/admin/student-profile-update
"#,
    )
    .unwrap();

    let mut fixture = MockServerFixture::new().await;
    let get = fixture
        .mock_get(READ_PATHS[3], "42", 405, "", 1)
        .await;
    let post = fixture
        .server
        .mock("POST", READ_PATHS[3])
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({ "u_id": "42" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(profile_body("42", "Alice", "Austin"))
        .expect(1)
        .create_async()
        .await;

    let client = fixture.client_with_routes(routes);
    let resolution = client.fetch_profile("42").await.unwrap();

    assert_eq!(resolution.winner.encoding, ParamEncoding::JsonBody);
    assert_eq!(resolution.winner.method, HttpMethod::Post);
    assert_eq!(resolution.attempts.len(), 2);
    assert_eq!(client.view().profile_for("42").unwrap().display_name(), "Alice");
    get.assert_async().await;
    post.assert_async().await;
}
