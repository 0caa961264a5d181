//! Integration tests for the multipart write path

use crate::integration::mock_server::{profile_body, MockServerFixture, READ_PATHS};
use campus_profile_client::{Error, PhotoSource, ProfileUpdate};
use mockito::Matcher;
use std::io::Write;

fn field(name: &str, value: &str) -> Matcher {
    Matcher::Regex(format!(r#"name="{}"\s+{}\s"#, name, regex::escape(value)))
}

#[tokio::test]
async fn test_write_sends_present_fields() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_write(
            200,
            r#"{"status":true,"message":"Profile updated"}"#,
            vec![
                field("u_id", "42"),
                field("u_name", "Alice"),
                field("s_city", "Austin"),
            ],
        )
        .await;

    let client = fixture.client();
    let mut update = ProfileUpdate::new("42").with_name("Alice").with_city("Austin");
    update.u_email = Some("  ".to_string());
    let body = client.update_profile(&update).await.unwrap();

    assert_eq!(body["message"], "Profile updated");
    assert!(client.view().current().is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_photo_parts_carry_extension_mime_type() {
    let dir = tempfile::tempdir().unwrap();
    let cases = [
        ("avatar.png", "image/png"),
        ("avatar.webp", "image/webp"),
        ("avatar.heic", "image/jpeg"),
        ("avatar", "image/jpeg"),
    ];

    let mut fixture = MockServerFixture::new().await;
    let client = fixture.client();
    for (name, mime) in cases {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"fake-image-bytes").unwrap();

        let mock = fixture
            .mock_write(
                200,
                "{}",
                vec![
                    field("u_id", "42"),
                    Matcher::Regex(format!(
                        r#"(?i)name="u_profile_photo"; filename="{}"\s+content-type: {}\s+fake-image-bytes"#,
                        regex::escape(name),
                        regex::escape(mime)
                    )),
                ],
            )
            .await;

        let update = ProfileUpdate::new("42").with_photo(PhotoSource::LocalFile(path));
        client.update_profile(&update).await.unwrap();
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_remote_photo_is_not_uploaded() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_write(200, "", vec![field("u_id", "42"), field("u_name", "Alice")])
        .await;

    let client = fixture.client();
    let update = ProfileUpdate::new("42")
        .with_name("Alice")
        .with_photo(PhotoSource::parse("https://cdn.example.com/u/42.png"));
    let body = client.update_profile(&update).await.unwrap();

    assert!(body.is_null());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_rejected_write_is_remote_error() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_write(
            422,
            r#"{"message":"The u email must be a valid email address."}"#,
            vec![field("u_id", "42")],
        )
        .await;

    let client = fixture.client();
    let err = client
        .update_profile(&ProfileUpdate::new("42").with_email("nope"))
        .await
        .unwrap_err();

    match err {
        Error::Remote { status, message, .. } => {
            assert_eq!(status, 422);
            assert!(message.contains("valid email"));
        }
        other => panic!("unexpected error: {other}"),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_write_without_identifier_makes_no_request() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = fixture.client();
    let err = client
        .update_profile(&ProfileUpdate::new("").with_name("Alice"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Validation { .. }));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_write_then_read_round_trip() {
    let mut fixture = MockServerFixture::new().await;
    let write = fixture
        .mock_write(
            200,
            r#"{"status":true}"#,
            vec![field("u_name", "Alice"), field("s_city", "Austin")],
        )
        .await;
    let read = fixture
        .mock_get(READ_PATHS[0], "42", 200, &profile_body("42", "Alice", "Austin"), 1)
        .await;

    let client = fixture.client();
    let update = ProfileUpdate::new("42").with_name("Alice").with_city("Austin");
    let resolution = client.update_and_refresh(&update).await.unwrap();

    assert_eq!(resolution.body["data"]["u_name"], "Alice");
    assert_eq!(resolution.body["data"]["s_city"], "Austin");
    let stored = client.view().profile_for("42").unwrap();
    assert_eq!(stored.u_name.as_deref(), Some("Alice"));
    assert_eq!(stored.s_city.as_deref(), Some("Austin"));

    write.assert_async().await;
    read.assert_async().await;
}
