mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::{app, app_with, ids, insert_question, send, BrokenStore, GEOGRAPHY, SCIENCE};
use tower::ServiceExt;

#[tokio::test]
async fn lists_seeded_categories_by_id() {
    let (app, _pool) = app().await;

    let (status, body) = send(&app, Method::GET, "/categories", None).await;

    assert_eq!(status, StatusCode::OK);
    let categories = body["categories"].as_object().unwrap();
    assert_eq!(categories.len(), 6);
    assert_eq!(categories["1"], "Science");
    assert_eq!(categories["3"], "Geography");
}

#[tokio::test]
async fn no_categories_is_an_empty_mapping() {
    let app = app_with(Arc::new(BrokenStore));

    let (status, body) = send(&app, Method::GET, "/categories", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["categories"].as_object().unwrap().is_empty());
}

#[tokio::test]
async fn delete_on_categories_is_method_not_allowed() {
    let (app, _pool) = app().await;

    let (status, body) = send(&app, Method::DELETE, "/categories", None).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], 405);
}

#[tokio::test]
async fn category_listing_only_returns_its_questions() {
    let (app, pool) = app().await;
    let lake = insert_question(&pool, "What is the largest lake in Africa?", GEOGRAPHY).await;
    insert_question(&pool, "Who discovered penicillin?", SCIENCE).await;
    let agra = insert_question(&pool, "The Taj Mahal is located in which Indian city?", GEOGRAPHY).await;

    let (status, body) = send(&app, Method::GET, "/categories/3/questions", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![lake, agra]);
    assert_eq!(body["totalQuestions"], 2);
    assert_eq!(body["currentCategory"], "Geography");
    for question in body["questions"].as_array().unwrap() {
        assert_eq!(question["category"], GEOGRAPHY);
    }
}

#[tokio::test]
async fn empty_category_has_no_questions() {
    let (app, _pool) = app().await;

    let (status, body) = send(&app, Method::GET, "/categories/6/questions", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalQuestions"], 0);
    assert_eq!(body["currentCategory"], "Sports");
}

#[tokio::test]
async fn unknown_category_is_not_found() {
    let (app, _pool) = app().await;

    let (status, body) = send(&app, Method::GET, "/categories/99/questions", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], 404);
    assert_eq!(body["message"], "category 99 not found");
}

#[tokio::test]
async fn non_numeric_category_id_is_rejected() {
    let (app, _pool) = app().await;

    let (status, body) = send(&app, Method::GET, "/categories/science/questions", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn unknown_route_uses_error_envelope() {
    let (app, _pool) = app().await;

    let (status, body) = send(&app, Method::GET, "/nowhere", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "resource not found");
}

#[tokio::test]
async fn responses_carry_cors_headers() {
    let (app, _pool) = app().await;

    let request = Request::builder()
        .uri("/categories")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
