//! End-to-end tests for the entry catalogue over HTTP.
//!
//! Each test drives the assembled `/api` scope against the in-memory store
//! with real password hashing and token signing.

#[path = "support/http_app.rs"]
mod http_app;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use bloglist::domain::TRACE_ID_HEADER;
use http_app::{app, create_entry, harness, list_entries, register_and_login};
use rstest::rstest;
use serde_json::{Value, json};

#[rstest]
#[actix_web::test]
async fn entries_are_listed_with_expanded_owners() {
    let harness = harness();
    let app = actix_test::init_service(app(&harness)).await;
    let token = register_and_login(&app, "mluukkai").await;

    for title in ["React patterns", "Go To Statement Considered Harmful"] {
        let (status, _) = create_entry(
            &app,
            &token,
            json!({"title": title, "author": "Edsger", "url": "http://example.com", "likes": 5}),
        )
        .await;
        assert_eq!(status, 201);
    }

    let entries = list_entries(&app).await;
    assert_eq!(entries.len(), 2);
    for entry in &entries {
        assert!(entry["id"].is_string(), "entries expose an `id` field");
        assert!(entry.get("_id").is_none());
        assert_eq!(entry["user"]["username"], "mluukkai");
        assert!(entry["user"].get("passwordHash").is_none());
    }
    assert_eq!(entries[0]["title"], "React patterns");
}

#[rstest]
#[actix_web::test]
async fn entries_are_not_filtered_by_caller() {
    let harness = harness();
    let app = actix_test::init_service(app(&harness)).await;
    let first = register_and_login(&app, "first").await;
    let second = register_and_login(&app, "second").await;

    create_entry(&app, &first, json!({"title": "A", "url": "a"})).await;
    create_entry(&app, &second, json!({"title": "B", "url": "b"})).await;

    let entries = list_entries(&app).await;
    let owners: Vec<&str> = entries
        .iter()
        .filter_map(|entry| entry["user"]["username"].as_str())
        .collect();
    assert_eq!(owners, vec!["first", "second"]);
}

#[rstest]
#[actix_web::test]
async fn creation_defaults_likes_and_records_ownership() {
    let harness = harness();
    let app = actix_test::init_service(app(&harness)).await;
    let token = register_and_login(&app, "root").await;

    let (status, created) =
        create_entry(&app, &token, json!({"title": "No likes", "url": "http://x"})).await;
    assert_eq!(status, 201);
    assert_eq!(created["likes"], 0);
    assert_eq!(created["author"], "");

    let users: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get().uri("/api/users").to_request(),
    )
    .await;
    assert_eq!(users[0]["blogs"], json!([created["id"].clone()]));
}

#[rstest]
#[case(json!({"author": "Nobody", "url": "http://x"}))]
#[case(json!({"title": "Untitled", "author": "Nobody"}))]
#[case(json!({"title": "", "url": "http://x"}))]
#[actix_web::test]
async fn creation_requires_title_and_url(#[case] body: Value) {
    let harness = harness();
    let app = actix_test::init_service(app(&harness)).await;
    let token = register_and_login(&app, "root").await;

    let (status, response) = create_entry(&app, &token, body).await;
    assert_eq!(status, 400);
    assert!(response["error"].is_string());
    assert_eq!(harness.store.entry_count().await, 0);
}

#[rstest]
#[case(None, "token missing")]
#[case(Some("Basic cm9vdDpzYWxhaW5lbg=="), "token missing")]
#[case(Some("Bearer not-a-token"), "token invalid")]
#[actix_web::test]
async fn creation_rejects_missing_or_invalid_tokens(
    #[case] authorization: Option<&str>,
    #[case] message: &str,
) {
    let harness = harness();
    let app = actix_test::init_service(app(&harness)).await;

    let mut req = actix_test::TestRequest::post()
        .uri("/api/entries")
        .set_json(json!({"title": "X", "url": "Y"}));
    if let Some(value) = authorization {
        req = req.insert_header(("Authorization", value));
    }
    let res = actix_test::call_service(&app, req.to_request()).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(res.headers().contains_key(TRACE_ID_HEADER));
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["error"], message);
    assert_eq!(harness.store.entry_count().await, 0);
}

#[rstest]
#[actix_web::test]
async fn only_the_owner_may_delete() {
    let harness = harness();
    let app = actix_test::init_service(app(&harness)).await;
    let owner = register_and_login(&app, "owner").await;
    let stranger = register_and_login(&app, "stranger").await;
    let (_, created) = create_entry(&app, &owner, json!({"title": "Mine", "url": "m"})).await;
    let uri = format!("/api/entries/{}", created["id"].as_str().expect("id"));

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&uri)
            .insert_header(("Authorization", format!("Bearer {stranger}")))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(harness.store.entry_count().await, 1);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&uri)
            .insert_header(("Authorization", format!("Bearer {owner}")))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert_eq!(harness.store.entry_count().await, 0);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri(&uri).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(actix_test::read_body(res).await.is_empty());
}

#[rstest]
#[case(json!({"likes": 12}), 12)]
#[case(json!({"likes": 0}), 0)]
#[case(json!({"likes": null}), 0)]
#[case(json!({}), 0)]
#[actix_web::test]
async fn likes_update_needs_no_token(#[case] body: Value, #[case] expected: i64) {
    let harness = harness();
    let app = actix_test::init_service(app(&harness)).await;
    let token = register_and_login(&app, "root").await;
    let (_, created) = create_entry(
        &app,
        &token,
        json!({"title": "Liked", "url": "l", "likes": 3}),
    )
    .await;
    let id = created["id"].as_str().expect("id");

    let updated: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/entries/{id}"))
            .set_json(body)
            .to_request(),
    )
    .await;
    assert_eq!(updated["likes"], expected);
    assert_eq!(updated["user"], created["user"]["id"]);
}

#[rstest]
#[actix_web::test]
async fn updating_a_deleted_entry_is_not_found() {
    let harness = harness();
    let app = actix_test::init_service(app(&harness)).await;
    let token = register_and_login(&app, "root").await;
    let (_, created) = create_entry(&app, &token, json!({"title": "Gone", "url": "g"})).await;
    let uri = format!("/api/entries/{}", created["id"].as_str().expect("id"));

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&uri)
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&uri)
            .set_json(json!({"likes": 1}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
