
use reqwest::StatusCode;
use serde_json::{json, Value};
use test_utils::*;

#[actix_rt::test]
async fn added_card_lands_at_the_front_of_its_category() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let response = app.add_card(&token, &sample_card("SIGHTS")).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert!(body.get("warning").is_none());

    let cards = app.list_cards(&token, "?category=SIGHTS").await;
    assert_eq!(cards[0]["title"], "Bunkers del Carmel");
    assert_eq!(cards[0]["id"], body["card"]["id"]);
    app.cleanup();
}

#[actix_rt::test]
async fn sights_card_without_image_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let mut request = sample_card("SIGHTS");
    request.as_object_mut().unwrap().remove("imageUrl");

    let response = app.add_card(&token, &request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.unwrap();
    let details = body["details"].as_array().unwrap();
    assert!(details.iter().any(|d| d["field"] == "imageUrl"));
    app.cleanup();
}

#[actix_rt::test]
async fn sights_card_without_link_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let mut request = sample_card("FOOD");
    request.as_object_mut().unwrap().remove("link");

    let response = app.add_card(&token, &request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    app.cleanup();
}

#[actix_rt::test]
async fn info_card_needs_neither_image_nor_link() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let response = app.add_card(&token, &sample_card("INFO")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.unwrap();
    assert!(body["card"].get("imageUrl").is_none());
    assert!(body["card"].get("link").is_none());
    app.cleanup();
}

#[actix_rt::test]
async fn empty_image_url_counts_as_no_image() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    // An empty string in the slot is the same as leaving it out.
    let mut request = sample_card("INFO");
    request["imageUrl"] = Value::String(String::new());

    let response = app.add_card(&token, &request).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.unwrap();
    assert!(body["card"].get("imageUrl").is_none());

    // So a category that needs an image rejects it as missing.
    let mut request = sample_card("SIGHTS");
    request["imageUrl"] = Value::String(String::new());

    let response = app.add_card(&token, &request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.unwrap();
    let details = body["details"].as_array().unwrap();
    assert!(details.iter().any(|d| d["field"] == "imageUrl"));
    app.cleanup();
}

#[actix_rt::test]
async fn info_description_is_capped_at_1000_chars() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let mut request = sample_card("INFO");
    request["description"] = Value::String("x".repeat(1001));

    let response = app.add_card(&token, &request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // The same length is fine outside INFO.
    let mut request = sample_card("SIGHTS");
    request["description"] = Value::String("x".repeat(1001));
    let response = app.add_card(&token, &request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    app.cleanup();
}

#[actix_rt::test]
async fn events_card_stores_event_fields_verbatim() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let response = app.add_card(&token, &sample_card("EVENTS")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["card"]["date"], "2026-04-18");
    assert_eq!(body["card"]["time"], "20:00");
    assert_eq!(body["card"]["price"], "50");
    app.cleanup();
}

#[actix_rt::test]
async fn event_fields_on_a_sights_card_are_kept_but_never_required() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let mut request = sample_card("SIGHTS");
    request["location"] = json!("somewhere");
    request["price"] = json!("12");

    let response = app.add_card(&token, &request).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["card"]["location"], "somewhere");
    assert_eq!(body["card"]["price"], "12");
    app.cleanup();
}

#[actix_rt::test]
async fn update_keeps_id_and_date_added() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let body: Value = app
        .add_card(&token, &sample_card("SIGHTS"))
        .await
        .json()
        .await
        .unwrap();
    let id = body["card"]["id"].as_str().unwrap().to_string();
    let date_added = body["card"]["dateAdded"].clone();

    let response = app
        .patch_card(&token, &id, &json!({"title": "Renamed lookout"}))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["card"]["id"], id.as_str());
    assert_eq!(updated["card"]["dateAdded"], date_added);
    assert_eq!(updated["card"]["title"], "Renamed lookout");

    // The filter sees the new value, never the pre-edit one.
    let cards = app.list_cards(&token, "?category=SIGHTS&search=renamed").await;
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0]["title"], "Renamed lookout");
    app.cleanup();
}

#[actix_rt::test]
async fn category_switch_reapplies_the_target_requirements() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let body: Value = app
        .add_card(&token, &sample_card("INFO"))
        .await
        .json()
        .await
        .unwrap();
    let id = body["card"]["id"].as_str().unwrap().to_string();

    // INFO → SIGHTS without an image or link must fail.
    let response = app.patch_card(&token, &id, &json!({"category": "SIGHTS"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Supplying both in the same patch makes the switch legal.
    let response = app
        .patch_card(
            &token,
            &id,
            &json!({
                "category": "SIGHTS",
                "imageUrl": "https://example.com/new.jpg",
                "link": "https://example.com/new"
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    app.cleanup();
}

#[actix_rt::test]
async fn empty_patch_returns_400() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let cards = app.list_cards(&token, "").await;
    let id = cards[0]["id"].as_str().unwrap().to_string();

    let response = app.patch_card(&token, &id, &json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    app.cleanup();
}

#[actix_rt::test]
async fn patching_an_unknown_card_returns_404() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let response = app
        .patch_card(&token, "no-such-card", &json!({"title": "x"}))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    app.cleanup();
}

#[actix_rt::test]
async fn delete_without_confirmation_changes_nothing() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let before = app.list_cards(&token, "").await;
    let id = before[0]["id"].as_str().unwrap().to_string();

    let declined = app.delete_card(&token, &id, "").await;
    assert_eq!(declined.status(), StatusCode::BAD_REQUEST);

    let declined = app.delete_card(&token, &id, "?confirm=false").await;
    assert_eq!(declined.status(), StatusCode::BAD_REQUEST);

    let after = app.list_cards(&token, "").await;
    assert_eq!(before, after);
    app.cleanup();
}

#[actix_rt::test]
async fn confirmed_delete_removes_exactly_one_card() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let before = app.list_cards(&token, "").await;
    let id = before[0]["id"].as_str().unwrap().to_string();

    let response = app.delete_card(&token, &id, "?confirm=true").await;
    assert_eq!(response.status(), StatusCode::OK);

    let after = app.list_cards(&token, "").await;
    assert_eq!(after.len(), before.len() - 1);
    assert!(after.iter().all(|c| c["id"] != id.as_str()));

    // Deleting it again is a 404, not a second removal.
    let response = app.delete_card(&token, &id, "?confirm=true").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    app.cleanup();
}

#[actix_rt::test]
async fn filter_with_empty_term_returns_the_whole_category() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let sights = app.list_cards(&token, "?category=SIGHTS").await;
    assert_eq!(sights.len(), 2);
    assert!(sights.iter().all(|c| c["category"] == "SIGHTS"));
    app.cleanup();
}

#[actix_rt::test]
async fn search_matches_descriptions_case_insensitively() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    // "queues" appears only in the Sagrada Familia description.
    let hits = app.list_cards(&token, "?category=SIGHTS&search=QUEUES").await;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["title"], "Sagrada Familia");

    let misses = app.list_cards(&token, "?category=SIGHTS&search=flamenco").await;
    assert!(misses.is_empty());
    app.cleanup();
}

#[actix_rt::test]
async fn unknown_category_filter_returns_400() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let response = app
        .client
        .get(format!("{}/api/v1/cards?category=MUSEUMS", app.address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    app.cleanup();
}

#[actix_rt::test]
async fn export_round_trips_the_collection() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    app.add_card(&token, &sample_card("EVENTS")).await;

    let response = app
        .client
        .get(format!("{}/api/v1/cards/export", app.address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let export: Value = response.json().await.unwrap();
    let reloaded: Vec<Value> =
        serde_json::from_str(export["content"].as_str().unwrap()).unwrap();

    let live = app.list_cards(&token, "").await;
    assert_eq!(export["count"].as_u64().unwrap() as usize, live.len());
    assert_eq!(reloaded, live);
    app.cleanup();
}

#[actix_rt::test]
async fn mutations_survive_a_failed_snapshot_write() {
    let app = TestApp::spawn_broken_storage().await;
    let token = app.login().await;

    let response = app.add_card(&token, &sample_card("SIGHTS")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.unwrap();
    assert!(body["warning"].as_str().unwrap().contains("could not be saved"));

    // The in-memory collection stays authoritative for the session.
    let cards = app.list_cards(&token, "?category=SIGHTS").await;
    assert!(cards.iter().any(|c| c["id"] == body["card"]["id"]));
}

#[actix_rt::test]
async fn seed_only_variant_mutates_without_warnings_or_snapshots() {
    let app = TestApp::spawn_seed_only().await;
    let token = app.login().await;

    let response = app.add_card(&token, &sample_card("SIGHTS")).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert!(body.get("warning").is_none());

    let health: Value = app
        .client
        .get(format!("{}/api/v1/system/health", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["storage"]["persistence"], "memory-only");
    assert_eq!(health["storage"]["snapshot_present"], false);
    app.cleanup();
}
