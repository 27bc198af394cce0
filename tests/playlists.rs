//! 재생목록 멤버십
#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use serde_json::{Value, json};

use common::bearer;

#[actix_web::test]
async fn test_playlist_add_and_remove_are_conditional() {
    let app = init_app!(common::test_state());
    let alice = signup_and_login!(app, "alice");
    let video_id = publish_video!(app, alice, "for the playlist");

    let req = TestRequest::post()
        .uri("/api/v1/playlist")
        .insert_header(bearer(&alice))
        .set_json(json!({ "name": "Favorites", "description": "best of" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let playlist_id = body["data"]["id"].as_str().unwrap().to_string();

    let add = format!("/api/v1/playlist/add/{}/{}", video_id, playlist_id);
    let remove = format!("/api/v1/playlist/remove/{}/{}", video_id, playlist_id);

    let req = TestRequest::patch().uri(&add).insert_header(bearer(&alice)).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["totalVideos"], 1);

    // 중복 추가는 400, 목록은 그대로
    let req = TestRequest::patch().uri(&add).insert_header(bearer(&alice)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = TestRequest::get()
        .uri(&format!("/api/v1/playlist/{}", playlist_id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["videos"].as_array().map(Vec::len), Some(1));

    let req = TestRequest::patch().uri(&remove).insert_header(bearer(&alice)).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["totalVideos"], 0);

    let req = TestRequest::patch().uri(&remove).insert_header(bearer(&alice)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_only_owner_can_change_playlist() {
    let app = init_app!(common::test_state());
    let alice = signup_and_login!(app, "alice");
    let bob = signup_and_login!(app, "bob");

    let req = TestRequest::post()
        .uri("/api/v1/playlist")
        .insert_header(bearer(&alice))
        .set_json(json!({ "name": "Mine", "description": "private picks" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let playlist_id = body["data"]["id"].as_str().unwrap().to_string();

    let req = TestRequest::patch()
        .uri(&format!("/api/v1/playlist/{}", playlist_id))
        .insert_header(bearer(&bob))
        .set_json(json!({ "name": "Stolen" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = TestRequest::delete()
        .uri(&format!("/api/v1/playlist/{}", playlist_id))
        .insert_header(bearer(&alice))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
