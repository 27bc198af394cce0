//! 소유자 전용 변경과 비공개 동영상 노출 범위
#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use serde_json::{Value, json};

use common::bearer;

#[actix_web::test]
async fn test_non_owner_cannot_modify_video() {
    let app = init_app!(common::test_state());
    let alice = signup_and_login!(app, "alice");
    let bob = signup_and_login!(app, "bob");
    let video_id = publish_video!(app, alice, "alice's first video");

    let req = common::MultipartBody::new()
        .text("title", "hijacked")
        .into_request(
            TestRequest::patch()
                .uri(&format!("/api/v1/videos/{}", video_id))
                .insert_header(bearer(&bob)),
        )
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["statusCode"], 403);

    let req = TestRequest::delete()
        .uri(&format!("/api/v1/videos/{}", video_id))
        .insert_header(bearer(&bob))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // 소유자는 수정 가능
    let req = common::MultipartBody::new()
        .text("title", "renamed")
        .into_request(
            TestRequest::patch()
                .uri(&format!("/api/v1/videos/{}", video_id))
                .insert_header(bearer(&alice)),
        )
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["title"], "renamed");
}

#[actix_web::test]
async fn test_non_owner_cannot_modify_tweet() {
    let app = init_app!(common::test_state());
    let alice = signup_and_login!(app, "alice");
    let bob = signup_and_login!(app, "bob");

    let req = TestRequest::post()
        .uri("/api/v1/tweets")
        .insert_header(bearer(&alice))
        .set_json(json!({ "content": "hello world" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let tweet_id = body["data"]["id"].as_str().unwrap().to_string();

    let req = TestRequest::patch()
        .uri(&format!("/api/v1/tweets/{}", tweet_id))
        .insert_header(bearer(&bob))
        .set_json(json!({ "content": "not yours" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = TestRequest::delete()
        .uri(&format!("/api/v1/tweets/{}", tweet_id))
        .insert_header(bearer(&alice))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_unpublished_video_is_hidden_from_others() {
    let app = init_app!(common::test_state());
    let alice = signup_and_login!(app, "alice");
    let bob = signup_and_login!(app, "bob");
    let video_id = publish_video!(app, alice, "draft");

    let req = TestRequest::patch()
        .uri(&format!("/api/v1/videos/toggle/publish/{}", video_id))
        .insert_header(bearer(&alice))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["isPublished"], false);

    let req = TestRequest::get()
        .uri(&format!("/api/v1/videos/{}", video_id))
        .insert_header(bearer(&bob))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = TestRequest::get()
        .uri(&format!("/api/v1/videos/{}", video_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = TestRequest::get()
        .uri(&format!("/api/v1/videos/{}", video_id))
        .insert_header(bearer(&alice))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // 대시보드에는 비공개 동영상도 포함
    let req = TestRequest::get()
        .uri("/api/v1/dashboard/videos")
        .insert_header(bearer(&alice))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
}

#[actix_web::test]
async fn test_invalid_object_id_is_bad_request() {
    let app = init_app!(common::test_state());

    let req = TestRequest::get().uri("/api/v1/videos/not-an-id").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid video ID");
}

#[actix_web::test]
async fn test_non_owner_is_forbidden_even_with_invalid_payload() {
    let app = init_app!(common::test_state());
    let alice = signup_and_login!(app, "alice");
    let bob = signup_and_login!(app, "bob");
    let video_id = publish_video!(app, alice, "alice's video");

    let req = TestRequest::post()
        .uri("/api/v1/tweets")
        .insert_header(bearer(&alice))
        .set_json(json!({ "content": "original" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let tweet_id = body["data"]["id"].as_str().unwrap().to_string();

    let req = TestRequest::post()
        .uri(&format!("/api/v1/comments/{}", video_id))
        .insert_header(bearer(&alice))
        .set_json(json!({ "content": "first!" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let comment_id = body["data"]["id"].as_str().unwrap().to_string();

    let req = TestRequest::post()
        .uri("/api/v1/playlist")
        .insert_header(bearer(&alice))
        .set_json(json!({ "name": "Mine", "description": "picks" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let playlist_id = body["data"]["id"].as_str().unwrap().to_string();

    let req = TestRequest::patch()
        .uri(&format!("/api/v1/tweets/{}", tweet_id))
        .insert_header(bearer(&bob))
        .set_json(json!({ "content": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = TestRequest::patch()
        .uri(&format!("/api/v1/comments/c/{}", comment_id))
        .insert_header(bearer(&bob))
        .set_json(json!({ "content": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = TestRequest::patch()
        .uri(&format!("/api/v1/playlist/{}", playlist_id))
        .insert_header(bearer(&bob))
        .set_json(json!({ "name": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = common::MultipartBody::new()
        .text("title", "   ")
        .into_request(
            TestRequest::patch()
                .uri(&format!("/api/v1/videos/{}", video_id))
                .insert_header(bearer(&bob)),
        )
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // 소유자의 잘못된 요청은 여전히 400
    let req = TestRequest::patch()
        .uri(&format!("/api/v1/tweets/{}", tweet_id))
        .insert_header(bearer(&alice))
        .set_json(json!({ "content": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = common::MultipartBody::new()
        .text("title", "   ")
        .into_request(
            TestRequest::patch()
                .uri(&format!("/api/v1/videos/{}", video_id))
                .insert_header(bearer(&alice)),
        )
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_huge_page_number_returns_empty_list() {
    let app = init_app!(common::test_state());
    let alice = signup_and_login!(app, "alice");
    publish_video!(app, alice, "only one");

    let req = TestRequest::get()
        .uri("/api/v1/videos?page=18446744073709551615&limit=100")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(0));
}
