
use std::io::Cursor;

use image::{DynamicImage, RgbImage};
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde_json::Value;
use test_utils::*;

#[actix_rt::test]
async fn dashboard_opens_on_the_sights_grid() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let view: Value = app
        .client
        .get(format!("{}/api/v1/dashboard", app.address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(view["activeCategory"], "SIGHTS");
    assert_eq!(view["layout"], "grid");
    assert_eq!(view["empty"], false);

    let items = view["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    for item in items {
        assert_eq!(item["badge"], "Sights");
        assert!(item["imageUrl"].as_str().unwrap().starts_with("http"));
        assert!(item.get("link").is_some());
    }
    app.cleanup();
}

#[actix_rt::test]
async fn info_tab_renders_a_list_with_full_descriptions() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let view: Value = app
        .client
        .get(format!("{}/api/v1/dashboard?category=INFO", app.address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(view["layout"], "list");
    let items = view["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    // List entries carry the untruncated text and no badge.
    assert!(items[0]["description"].as_str().unwrap().contains("Aerobus"));
    assert!(items[0].get("badge").is_none());
    app.cleanup();
}

#[actix_rt::test]
async fn events_cards_carry_the_structured_sub_block() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    app.add_card(&token, &sample_card("EVENTS")).await;

    let view: Value = app
        .client
        .get(format!("{}/api/v1/dashboard?category=EVENTS", app.address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let items = view["items"].as_array().unwrap();
    let event = &items[0]["event"];
    assert_eq!(event["dateLine"], "2026-04-18 at 20:00");
    assert_eq!(event["location"], "Sala Apolo");
    assert_eq!(event["price"], "50€");
    app.cleanup();
}

#[actix_rt::test]
async fn empty_filter_result_sets_the_empty_flag() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let view: Value = app
        .client
        .get(format!(
            "{}/api/v1/dashboard?category=NIGHTLIFE&search=flamenco",
            app.address
        ))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(view["empty"], true);
    assert!(view["items"].as_array().unwrap().is_empty());
    assert_eq!(view["searchTerm"], "flamenco");
    app.cleanup();
}

#[actix_rt::test]
async fn timeline_serves_the_fixed_trip_plan() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let timeline: Value = app
        .client
        .get(format!("{}/api/v1/timeline", app.address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(timeline["trip"]["destination"], "Barcelona 2026");
    let events = timeline["events"].as_array().unwrap();
    assert_eq!(events.len(), 6);
    assert_eq!(events.last().unwrap()["isReturn"], true);
    app.cleanup();
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::new(width, height));
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, image::ImageFormat::Png)
        .expect("Failed to encode test image");
    bytes.into_inner()
}

#[actix_rt::test]
async fn uploaded_image_is_bounded_and_keeps_its_aspect_ratio() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let form = Form::new().part(
        "image",
        Part::bytes(png_bytes(2000, 1000))
            .file_name("beach.png")
            .mime_str("image/png")
            .unwrap(),
    );

    let response = app
        .client
        .post(format!("{}/api/v1/images", app.address))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["width"], 600);
    assert_eq!(body["height"], 300);
    assert_eq!(body["sourceWidth"], 2000);
    assert_eq!(body["sourceHeight"], 1000);
    assert!(body["dataUrl"]
        .as_str()
        .unwrap()
        .starts_with("data:image/jpeg;base64,"));
    app.cleanup();
}

#[actix_rt::test]
async fn small_uploads_are_never_upscaled() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let form = Form::new().part(
        "image",
        Part::bytes(png_bytes(320, 200))
            .file_name("thumb.png")
            .mime_str("image/png")
            .unwrap(),
    );

    let body: Value = app
        .client
        .post(format!("{}/api/v1/images", app.address))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["width"], 320);
    assert_eq!(body["height"], 200);
    app.cleanup();
}

#[actix_rt::test]
async fn non_image_uploads_are_rejected() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let form = Form::new().part(
        "image",
        Part::bytes(b"not an image at all".to_vec())
            .file_name("notes.txt")
            .mime_str("text/plain")
            .unwrap(),
    );

    let response = app
        .client
        .post(format!("{}/api/v1/images", app.address))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    app.cleanup();
}

#[actix_rt::test]
async fn empty_upload_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let response = app
        .client
        .post(format!("{}/api/v1/images", app.address))
        .bearer_auth(&token)
        .multipart(Form::new())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    app.cleanup();
}
