mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn viewing_a_photo_counts_each_view() -> Result<()> {
    let app = common::TestApp::new();
    let token = app.token(1, "testuser");
    app.add_photo(&token, "Test Photo", "test.png").await?;

    for expected in 1..=3 {
        let (status, body) = app.get("/api/v1/photos/photo/1/", Some(&token)).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["photo"]["title"], "Test Photo");
        assert_eq!(body["photo"]["count_of_views"], expected);
    }
    Ok(())
}

#[tokio::test]
async fn viewed_photo_has_exactly_the_public_fields() -> Result<()> {
    let app = common::TestApp::new();
    let token = app.token(7, "testuser");
    app.add_photo(&token, "T", "f.png").await?;

    let (status, body) = app.get("/api/v1/photos/photo/1/", Some(&token)).await?;
    assert_eq!(status, StatusCode::OK);

    let photo = body["photo"].as_object().expect("photo object");
    let keys: Vec<&str> = photo.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        ["title", "description", "count_of_views", "date_of_creation", "image", "user"]
    );
    assert_eq!(photo["description"], "");
    assert_eq!(photo["image"], "http://127.0.0.1:8000/static/media/f.png");
    assert_eq!(photo["user"], json!({ "id": 7, "username": "testuser" }));
    Ok(())
}

#[tokio::test]
async fn other_users_are_forbidden_and_see_nothing() -> Result<()> {
    let app = common::TestApp::new();
    let owner = app.token(1, "testuser1");
    let intruder = app.token(2, "testuser2");
    app.add_photo(&owner, "Private Photo", "private.png").await?;

    let (status, body) = app.get("/api/v1/photos/photo/1/", Some(&intruder)).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "fail");
    assert!(body.get("photo").is_none());
    assert!(!body.to_string().contains("Private Photo"));

    // The refused request did not count as a view
    let (_, body) = app.get("/api/v1/photos/photo/1/", Some(&owner)).await?;
    assert_eq!(body["photo"]["count_of_views"], 1);
    Ok(())
}

#[tokio::test]
async fn unknown_photo_is_not_found() -> Result<()> {
    let app = common::TestApp::new();
    let token = app.token(1, "testuser");

    for uri in ["/api/v1/photos/photo/999/", "/api/v1/photos/photo/abc/"] {
        let (status, body) = app.get(uri, Some(&token)).await?;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(
            body,
            json!({ "message": "fail", "description": "Photo matching query does not exist." })
        );
    }
    Ok(())
}

#[tokio::test]
async fn negative_stored_counts_are_never_shown() -> Result<()> {
    let app = common::TestApp::new();
    let token = app.token(1, "testuser");
    app.add_photo(&token, "T", "t.png").await?;
    app.store.set_views(1, -5).await?;

    let (_, body) = app.get("/api/v1/photos/gallery/", Some(&token)).await?;
    assert_eq!(body["gallery"][0]["count_of_views"], 0);
    Ok(())
}

#[tokio::test]
async fn concurrent_views_are_all_counted() -> Result<()> {
    let app = std::sync::Arc::new(common::TestApp::new());
    let token = app.token(1, "testuser");
    app.add_photo(&token, "Busy", "busy.png").await?;

    let mut handles = Vec::new();
    for _ in 0..20 {
        let app = app.clone();
        let token = token.clone();
        handles.push(tokio::spawn(async move {
            app.get("/api/v1/photos/photo/1/", Some(&token)).await
        }));
    }
    for handle in handles {
        let (status, _) = handle.await??;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = app.get("/api/v1/photos/gallery/", Some(&token)).await?;
    assert_eq!(body["gallery"][0]["count_of_views"], 20);
    Ok(())
}
