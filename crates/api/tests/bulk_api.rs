//! HTTP-level tests for bulk asset operations.

mod common;

use std::sync::Arc;

use assetboard_core::gateway::AssetGateway;
use assetboard_core::memory::MemoryGateway;
use assetboard_core::models::{AssetFilter, AssetStatus};
use axum::http::StatusCode;
use common::{body_json, post_json, seed_asset, seed_brand};
use serde_json::json;

// ---------------------------------------------------------------------------
// Batch add
// ---------------------------------------------------------------------------

#[tokio::test]
async fn preview_is_empty_until_provider_chosen() {
    let app = common::build_test_app(Arc::new(MemoryGateway::new()));
    let response = post_json(
        app,
        "/api/v1/assets/batch/preview",
        json!({"text": "Sweet Bonanza", "provider": "  "}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["data"].is_null());
}

#[tokio::test]
async fn preview_reports_brand_delta_of_duplicates() {
    let store = Arc::new(MemoryGateway::new());
    let attached = seed_brand(&store, "Casino A").await;
    let fresh = seed_brand(&store, "Casino B").await;
    let sweet = seed_asset(&store, "Sweet Bonanza", "Pragmatic").await;
    store.attach_brands(sweet.id, &[attached.id]).await.unwrap();
    let app = common::build_test_app(store);

    let json = body_json(
        post_json(
            app,
            "/api/v1/assets/batch/preview",
            json!({
                "text": "sweet bonanza\nGates of Olympus\n\n",
                "provider": "Pragmatic",
                "brand_ids": [attached.id, fresh.id],
            }),
        )
        .await,
    )
    .await;

    let data = &json["data"];
    assert_eq!(data["candidate_count"], 2);
    assert_eq!(data["new_titles"], json!(["Gates of Olympus"]));
    assert_eq!(data["duplicates"]["total_items"], 1);
    let dup = &data["duplicates"]["items"][0];
    assert_eq!(dup["asset_id"], sweet.id);
    assert_eq!(dup["new_brand_ids"], json!([fresh.id]));
    assert_eq!(data["nothing_to_add"], false);
}

#[tokio::test]
async fn preview_of_fully_attached_duplicate_has_nothing_to_add() {
    let store = Arc::new(MemoryGateway::new());
    let brand = seed_brand(&store, "Casino A").await;
    let sweet = seed_asset(&store, "Sweet Bonanza", "Pragmatic").await;
    store.attach_brands(sweet.id, &[brand.id]).await.unwrap();
    let app = common::build_test_app(store);

    let json = body_json(
        post_json(
            app,
            "/api/v1/assets/batch/preview",
            json!({"text": "Sweet Bonanza", "provider": "Pragmatic", "brand_ids": [brand.id]}),
        )
        .await,
    )
    .await;
    assert_eq!(json["data"]["nothing_to_add"], true);
}

#[tokio::test]
async fn commit_inserts_new_titles_and_merges_brands() {
    let store = Arc::new(MemoryGateway::new());
    let attached = seed_brand(&store, "Casino A").await;
    let fresh = seed_brand(&store, "Casino B").await;
    let sweet = seed_asset(&store, "Sweet Bonanza", "Pragmatic").await;
    store.attach_brands(sweet.id, &[attached.id]).await.unwrap();
    let app = common::build_test_app(store.clone());

    let response = post_json(
        app,
        "/api/v1/assets/batch/commit",
        json!({
            "text": "Sweet Bonanza\nGates of Olympus\nGates of Olympus",
            "provider": "Pragmatic",
            "brand_ids": [attached.id, fresh.id],
            "template": {"status": "ongoing", "found_by": "Rae"},
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["message"], "1 added, 1 updated, 0 skipped, 0 failed");
    assert_eq!(json["data"]["outcome"], "full_success");
    assert_eq!(json["data"]["created"][0]["status"], "ongoing");

    let all = store.list_assets(&AssetFilter::default()).await.unwrap();
    assert_eq!(all.len(), 2);
    let sweet = store.find_asset(sweet.id).await.unwrap().unwrap();
    assert!(sweet.has_brand(fresh.id));
    assert_eq!(sweet.brands.len(), 2);
}

#[tokio::test]
async fn commit_without_provider_is_rejected_before_any_write() {
    let store = Arc::new(MemoryGateway::new());
    let app = common::build_test_app(store.clone());

    let response = post_json(
        app,
        "/api/v1/assets/batch/commit",
        json!({"text": "Gates of Olympus", "provider": " "}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(store.list_calls(), 0);
}

// ---------------------------------------------------------------------------
// Batch delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn batch_delete_counts_missing_ids() {
    let store = Arc::new(MemoryGateway::new());
    let a = seed_asset(&store, "Crazy Time", "Evolution").await;
    let b = seed_asset(&store, "Lightning Roulette", "Evolution").await;
    let app = common::build_test_app(store.clone());

    let json = body_json(
        post_json(
            app,
            "/api/v1/assets/batch-delete",
            json!({"ids": [a.id, b.id, a.id, 9999]}),
        )
        .await,
    )
    .await;

    assert_eq!(json["data"]["deleted"], 2);
    assert_eq!(json["data"]["not_found"], json!([9999]));
    assert_eq!(json["data"]["outcome"], "full_success");
    assert_eq!(json["data"]["message"], "2 deleted, 0 failed");
    assert!(store
        .list_assets(&AssetFilter::default())
        .await
        .unwrap()
        .is_empty());
}

// ---------------------------------------------------------------------------
// Text-match update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn text_match_updates_only_matched_titles() {
    let store = Arc::new(MemoryGateway::new());
    let gates = seed_asset(&store, "Gates of Olympus", "Pragmatic").await;
    let bass = seed_asset(&store, "Big Bass Bonanza", "Reel Kingdom").await;
    let app = common::build_test_app(store.clone());

    let response = post_json(
        app,
        "/api/v1/assets/bulk-update",
        json!({
            "provider": "Pragmatic",
            "titles": "Gates of Olympus\nBig Bass Bonanza",
            "status": "completed",
            "designer": {"mode": "assign", "designer_id": 4},
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status_updated"], 1);
    assert_eq!(json["data"]["designer_updated"], 1);
    assert_eq!(json["data"]["missing"], json!(["Big Bass Bonanza"]));
    assert_eq!(json["data"]["clear_input"], false);
    assert_eq!(json["data"]["assets"][0]["id"], gates.id);
    assert_eq!(json["data"]["assets"][0]["status"], "completed");
    assert_eq!(json["data"]["assets"][0]["designer_id"], 4);
    assert_eq!(store.designer_calls(), 1);

    let gates = store.find_asset(gates.id).await.unwrap().unwrap();
    assert_eq!(gates.status, AssetStatus::Completed);
    assert_eq!(gates.designer_id, Some(4));
    let bass = store.find_asset(bass.id).await.unwrap().unwrap();
    assert_eq!(bass.status, AssetStatus::NotStarted);
}

#[tokio::test]
async fn text_match_requires_provider() {
    let store = Arc::new(MemoryGateway::new());
    let app = common::build_test_app(store.clone());

    let response = post_json(
        app,
        "/api/v1/assets/bulk-update",
        json!({"provider": "", "titles": "Gates of Olympus", "status": "completed"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(store.list_calls(), 0);
}

// ---------------------------------------------------------------------------
// Range edit
// ---------------------------------------------------------------------------

async fn ten_rows(store: &MemoryGateway) -> Vec<i64> {
    let mut ids = Vec::new();
    for i in 0..10 {
        ids.push(seed_asset(store, &format!("Game {i:02}"), "Pragmatic").await.id);
    }
    ids
}

#[tokio::test]
async fn range_edit_over_view_updates_inclusive_range() {
    let store = Arc::new(MemoryGateway::new());
    let ids = ten_rows(&store).await;
    let app = common::build_test_app(store.clone());

    let json = body_json(
        post_json(
            app,
            "/api/v1/assets/range-edit",
            json!({
                "view": {"provider": "Pragmatic"},
                "start": 5,
                "end": 2,
                "edit": {"field": "status", "value": "uploaded"},
            }),
        )
        .await,
    )
    .await;

    assert_eq!(json["data"]["message"], "4 saved, 0 failed");
    assert_eq!(json["data"]["reconciled"], false);
    assert_eq!(json["data"]["assets"].as_array().unwrap().len(), 4);
    for (index, id) in ids.iter().enumerate() {
        let asset = store.find_asset(*id).await.unwrap().unwrap();
        let expected = if (2..=5).contains(&index) {
            AssetStatus::Uploaded
        } else {
            AssetStatus::NotStarted
        };
        assert_eq!(asset.status, expected, "row {index}");
    }
}

#[tokio::test]
async fn partial_range_failure_triggers_refetch() {
    let store = Arc::new(MemoryGateway::new());
    let ids = ten_rows(&store).await;
    store.fail_designer_updates_for(ids[3]).await;
    let app = common::build_test_app(store.clone());

    let json = body_json(
        post_json(
            app,
            "/api/v1/assets/range-edit",
            json!({
                "asset_ids": ids,
                "start": 2,
                "end": 5,
                "edit": {"field": "designer", "value": 8},
            }),
        )
        .await,
    )
    .await;

    assert_eq!(json["data"]["message"], "3 saved, 1 failed");
    assert_eq!(json["data"]["outcome"], "partial");
    assert_eq!(json["data"]["reconciled"], true);
    // One load for the session, one reconciling re-fetch.
    assert_eq!(store.list_calls(), 2);

    // The returned records are source data: the failed row keeps no designer.
    let assets = json["data"]["assets"].as_array().unwrap();
    assert_eq!(assets.len(), 4);
    for asset in assets {
        let expected = if asset["id"] == ids[3] { json!(null) } else { json!(8) };
        assert_eq!(asset["designer_id"], expected, "asset {}", asset["id"]);
    }
}

#[tokio::test]
async fn range_start_outside_snapshot_is_rejected() {
    let store = Arc::new(MemoryGateway::new());
    let ids = ten_rows(&store).await;
    let app = common::build_test_app(store.clone());

    let response = post_json(
        app,
        "/api/v1/assets/range-edit",
        json!({
            "asset_ids": &ids[..3],
            "start": 7,
            "end": 1,
            "edit": {"field": "status", "value": "ongoing"},
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let untouched = store.find_asset(ids[1]).await.unwrap().unwrap();
    assert_eq!(untouched.status, AssetStatus::NotStarted);
}

#[tokio::test]
async fn single_row_range_is_a_no_op() {
    let store = Arc::new(MemoryGateway::new());
    ten_rows(&store).await;
    let app = common::build_test_app(store.clone());

    let json = body_json(
        post_json(
            app,
            "/api/v1/assets/range-edit",
            json!({"start": 4, "end": 4, "edit": {"field": "status", "value": "ongoing"}}),
        )
        .await,
    )
    .await;

    assert_eq!(json["data"]["outcome"], "nothing_to_do");
    assert_eq!(json["data"]["message"], "0 saved, 0 failed");
}
