//! 통합 테스트 공용 도구
//!
//! 메모리 저장소와 메모리 미디어 호스트로 전체 라우트를 조립합니다.
#![allow(dead_code)]

use std::sync::Arc;

use actix_web::http::header;
use actix_web::test::TestRequest;
use serde_json::{Value, json};
use streamhub_backend::config::AppConfig;
use streamhub_backend::core::state::AppState;
use streamhub_backend::repositories::Repositories;
use streamhub_backend::services::media::InMemoryMediaHost;

pub const PASSWORD: &str = "Password123";

/// 개발 설정 + 메모리 저장소 상태
pub fn test_state() -> AppState {
    AppState::new(
        AppConfig::development(),
        Repositories::in_memory(),
        Arc::new(InMemoryMediaHost::default()),
    )
}

/// 전체 라우트를 가진 테스트 서비스 생성
macro_rules! init_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state))
                .configure(streamhub_backend::routes::configure_all_routes),
        )
        .await
    };
}

/// multipart/form-data 본문 생성기
pub struct MultipartBody {
    boundary: String,
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self {
            boundary: "----streamhub-test-boundary".to_string(),
            body: Vec::new(),
        }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                self.boundary, name, value
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                self.boundary, name, file_name, content_type
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// 요청에 Content-Type 헤더와 본문을 붙입니다
    pub fn into_request(mut self, request: TestRequest) -> TestRequest {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());

        request
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", self.boundary),
            ))
            .set_payload(self.body)
    }
}

/// 아바타가 포함된 회원가입 폼
pub fn registration_form(username: &str) -> MultipartBody {
    MultipartBody::new()
        .text("username", username)
        .text("email", &format!("{}@example.com", username))
        .text("fullName", &format!("{} Tester", username))
        .text("password", PASSWORD)
        .file("avatar", "avatar.png", "image/png", b"fake-png-bytes")
}

pub fn login_body(username: &str) -> Value {
    json!({ "username": username, "password": PASSWORD })
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

/// 동영상 업로드 폼
pub fn video_form(title: &str) -> MultipartBody {
    MultipartBody::new()
        .text("title", title)
        .text("description", "a test video")
        .file("videoFile", "clip.mp4", "video/mp4", b"fake-mp4-bytes")
        .file("thumbnail", "thumb.png", "image/png", b"fake-thumb-bytes")
}

/// 가입 후 로그인하고 액세스 토큰을 반환
macro_rules! signup_and_login {
    ($app:expr, $username:expr) => {{
        let req = common::registration_form($username)
            .into_request(actix_web::test::TestRequest::post().uri("/api/v1/auth/register"))
            .to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);

        let req = actix_web::test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(common::login_body($username))
            .to_request();
        let body: serde_json::Value = actix_web::test::call_and_read_body_json(&$app, req).await;
        body["data"]["accessToken"]
            .as_str()
            .expect("access token in login response")
            .to_string()
    }};
}

/// 동영상을 업로드하고 ID를 반환
macro_rules! publish_video {
    ($app:expr, $token:expr, $title:expr) => {{
        let req = common::video_form($title)
            .into_request(
                actix_web::test::TestRequest::post()
                    .uri("/api/v1/videos")
                    .insert_header(common::bearer(&$token)),
            )
            .to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);
        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        body["data"]["id"].as_str().expect("video id").to_string()
    }};
}
