mod common;

use anyhow::Result;
use axum::http::StatusCode;
use common::Part;

const ADD: &str = "/api/v1/photos/add/";

#[tokio::test]
async fn add_returns_the_serialized_photo() -> Result<()> {
    let app = common::TestApp::new();
    let token = app.token(3, "testuser");

    let parts = [
        Part::text("title", "New Photo"),
        Part::text("description", "Test Description"),
        Part::file("image", "new.png", common::png_bytes()),
    ];
    let (status, body) = app.post_multipart(ADD, Some(&token), &parts).await?;

    assert_eq!(status, StatusCode::OK);
    let photo = &body["photo"];
    assert_eq!(photo["title"], "New Photo");
    assert_eq!(photo["description"], "Test Description");
    assert_eq!(photo["count_of_views"], 0);
    assert_eq!(photo["image"], "http://127.0.0.1:8000/static/media/new.png");
    assert_eq!(photo["user"]["id"], 3);
    assert_eq!(photo["user"]["username"], "testuser");
    assert!(photo["date_of_creation"].as_str().is_some());
    assert!(app.media_dir.path().join("new.png").exists());
    Ok(())
}

#[tokio::test]
async fn same_file_name_twice_keeps_both_uploads() -> Result<()> {
    let app = common::TestApp::new();
    let token = app.token(1, "testuser");

    let first = app.add_photo(&token, "one", "same.png").await?;
    let second = app.add_photo(&token, "two", "same.png").await?;

    assert_ne!(first["photo"]["image"], second["photo"]["image"]);
    Ok(())
}

#[tokio::test]
async fn missing_title_and_image_are_both_reported() -> Result<()> {
    let app = common::TestApp::new();
    let token = app.token(1, "testuser");

    let parts = [Part::text("description", "test description")];
    let (status, body) = app.post_multipart(ADD, Some(&token), &parts).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "fail");
    let description = body["description"].as_object().expect("field errors");
    assert!(description.contains_key("title"));
    assert!(description.contains_key("image"));
    Ok(())
}

#[tokio::test]
async fn empty_file_is_rejected() -> Result<()> {
    let app = common::TestApp::new();
    let token = app.token(1, "testuser");

    let parts = [
        Part::text("title", "Test Title"),
        Part::text("description", "Test Description"),
        Part::file("image", "test.txt", Vec::new()),
    ];
    let (status, body) = app.post_multipart(ADD, Some(&token), &parts).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "fail");
    assert!(body["description"].to_string().contains("The submitted file is empty."));
    Ok(())
}

#[tokio::test]
async fn plain_value_for_image_is_not_a_file() -> Result<()> {
    let app = common::TestApp::new();
    let token = app.token(1, "testuser");

    let parts = [
        Part::text("title", "Test Title"),
        Part::text("image", "not a file"),
    ];
    let (status, body) = app.post_multipart(ADD, Some(&token), &parts).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["description"].to_string().contains("submitted data was not a file"));
    Ok(())
}

#[tokio::test]
async fn non_image_file_is_rejected() -> Result<()> {
    let app = common::TestApp::new();
    let token = app.token(1, "testuser");

    let parts = [
        Part::text("title", "test title"),
        Part::file("image", "invalid_file.jpg", b"test".to_vec()),
    ];
    let (status, body) = app.post_multipart(ADD, Some(&token), &parts).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["description"]["image"][0]
        .as_str()
        .unwrap_or_default()
        .starts_with("Upload a valid image."));

    let (_, body) = app.get("/api/v1/photos/gallery/", Some(&token)).await?;
    assert_eq!(body["gallery"].as_array().map(Vec::len), Some(0));
    Ok(())
}

#[tokio::test]
async fn blank_title_is_rejected() -> Result<()> {
    let app = common::TestApp::new();
    let token = app.token(1, "testuser");

    let parts = [
        Part::text("title", ""),
        Part::file("image", "ok.png", common::png_bytes()),
    ];
    let (status, body) = app.post_multipart(ADD, Some(&token), &parts).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["description"]["title"][0], "This field may not be blank.");
    assert!(body["description"].get("image").is_none());
    Ok(())
}

#[tokio::test]
async fn non_multipart_body_is_a_bad_request() -> Result<()> {
    let app = common::TestApp::new();
    let token = app.token(1, "testuser");

    let (status, body) = app
        .post_json(ADD, &token, &serde_json::json!({ "title": "t" }))
        .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "fail");
    Ok(())
}

#[tokio::test]
async fn overlong_file_names_are_shortened_to_fit_storage() -> Result<()> {
    let app = common::TestApp::new();
    let token = app.token(1, "testuser");
    let prefix = "http://127.0.0.1:8000/static/media/";

    let name = format!("a.{}", "p".repeat(150));
    for _ in 0..2 {
        let body = app.add_photo(&token, "long", &name).await?;
        let image = body["photo"]["image"].as_str().unwrap_or_default();
        let stored = image.strip_prefix(prefix).unwrap_or(image);
        assert!(stored.chars().count() <= 100, "stored name {} is too long", stored);
        assert!(app.media_dir.path().join(stored).exists());
    }
    Ok(())
}
