//! Category endpoints: listing, upsert semantics, soft delete, usage guard.

mod support;

use attributes_api::AttributesDao;
use axum::http::StatusCode;
use serde_json::{json, Value};
use support::{get, request};

#[tokio::test]
async fn index_returns_all_categories_including_inactive() {
    let (state, store) = support::state();
    support::seed_category(&store, "color", "Color").await;
    let size_id = support::seed_category(&store, "size", "Size").await;

    let path = format!("/categories/{size_id}");
    let (status, _body) = request(&state, "DELETE", &path, Value::Null).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(&state, "/categories").await;
    assert_eq!(status, StatusCode::OK);
    let categories = body["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 2);
    let size = categories.iter().find(|c| c["code"] == "size").unwrap();
    assert_eq!(size["active"], json!(false));
}

#[tokio::test]
async fn show_finds_category_by_id() {
    let (state, store) = support::state();
    let id = support::seed_category(&store, "color", "Color").await;
    let (status, body) = get(&state, &format!("/categories/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"]["id"], json!(id));
    assert_eq!(body["category"]["code"], "color");
}

#[tokio::test]
async fn show_unknown_id_is_404() {
    let (state, store) = support::state();
    support::seed_category(&store, "color", "Color").await;
    let (status, body) = get(&state, "/categories/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Category not found"}));
}

#[tokio::test]
async fn create_applies_contract_defaults() {
    let (state, _store) = support::state();
    let (status, body) = request(
        &state,
        "POST",
        "/categories",
        json!({"code": "color", "label": "Color"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["category"]["code"], "color");
    assert_eq!(body["category"]["label"], "Color");
    assert_eq!(body["category"]["description"], "");
    assert_eq!(body["category"]["sort_order"], json!(0));
    assert_eq!(body["category"]["active"], json!(true));
}

#[tokio::test]
async fn create_then_show_by_returned_id() {
    let (state, _store) = support::state();
    let (_status, body) = request(
        &state,
        "POST",
        "/categories",
        json!({"code": "material", "label": "Material"}),
    )
    .await;
    let id = body["category"]["id"].as_i64().unwrap();

    let (status, body) = get(&state, &format!("/categories/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"]["code"], "material");
    assert_eq!(body["category"]["active"], json!(true));
}

#[tokio::test]
async fn create_rejects_missing_or_empty_fields() {
    let (state, _store) = support::state();
    for body in [
        json!({"code": "color"}),
        json!({"label": "Color"}),
        json!({"code": "", "label": "Color"}),
        json!({}),
        Value::Null,
    ] {
        let (status, response) = request(&state, "POST", "/categories", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            response,
            json!({"error": "Missing required fields: code, label"})
        );
    }
}

#[tokio::test]
async fn create_rejects_mistyped_fields() {
    let (state, store) = support::state();
    let (status, body) = request(
        &state,
        "POST",
        "/categories",
        json!({"code": 7, "label": "Color"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Invalid request body"), "{message}");
    assert!(store.list_categories().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_with_same_code_never_duplicates() {
    let (state, store) = support::state();
    let id = support::seed_category(&store, "color", "Color").await;

    let path = format!("/categories/{id}");
    let (status, body) = request(
        &state,
        "PUT",
        &path,
        json!({"code": "color", "label": "Colour", "sort_order": 5}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"]["id"], json!(id));
    assert_eq!(body["category"]["label"], "Colour");

    let categories = store.list_categories().await.unwrap();
    assert_eq!(categories.iter().filter(|c| c.code == "color").count(), 1);
}

#[tokio::test]
async fn delete_unknown_id_is_404() {
    let (state, _store) = support::state();
    let (status, body) = request(&state, "DELETE", "/categories/42", Value::Null).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Category not found"}));
}

#[tokio::test]
async fn delete_in_use_is_conflict_and_keeps_category_active() {
    let (state, store) = support::state();
    let category_id = support::seed_category(&store, "color", "Color").await;
    let value_id = support::seed_value(&store, category_id, "Red", "red").await;
    support::seed_assignment(&store, "SKU1", category_id, value_id).await;

    let path = format!("/categories/{category_id}");
    let (status, body) = request(&state, "DELETE", &path, Value::Null).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body,
        json!({"error": "Cannot delete category that is in use by products"})
    );

    let categories = store.list_categories().await.unwrap();
    assert!(categories.iter().find(|c| c.id == category_id).unwrap().active);
}

#[tokio::test]
async fn delete_unreferenced_category_soft_deletes() {
    let (state, store) = support::state();
    let id = support::seed_category(&store, "color", "Color").await;

    let path = format!("/categories/{id}");
    let (status, body) = request(&state, "DELETE", &path, Value::Null).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Category deactivated"}));

    let categories = store.list_categories().await.unwrap();
    let category = categories.iter().find(|c| c.id == id).unwrap();
    assert!(!category.active);
}

#[tokio::test]
async fn dao_failure_on_create_maps_to_500_with_prefix() {
    let state = support::failing_state();
    let (status, body) = request(
        &state,
        "POST",
        "/categories",
        json!({"code": "color", "label": "Color"}),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"error": "Failed to create category: storage offline"})
    );
}

#[tokio::test]
async fn dao_failure_on_read_propagates_message() {
    let state = support::failing_state();
    let (status, body) = get(&state, "/categories").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "storage offline"}));
}
