//! Authentication HTTP Handlers
//!
//! 회원가입, 로그인, 토큰 갱신, 로그아웃 엔드포인트입니다.
//! 토큰은 응답 본문과 함께 httpOnly 쿠키(`accessToken`, `refreshToken`)로도 내려갑니다.
//!
//! # Endpoints
//!
//! - `POST /auth/register` (multipart: username, email, fullName, password, avatar, coverImage)
//! - `POST /auth/login`
//! - `GET|POST /auth/refresh-token` (쿠키 또는 본문의 `refreshToken`)
//! - `GET|POST /auth/logout`
use actix_web::cookie::{Cookie, SameSite, time::Duration as CookieDuration};
use actix_web::{HttpRequest, HttpResponse, post, route, web};
use actix_multipart::Multipart;

use crate::config::AppConfig;
use crate::core::errors::AppError;
use crate::core::state::AppState;
use crate::domain::dto::{ApiResponse, LoginRequest, LoginResponse, RefreshTokenRequest, RegisterUserRequest};
use crate::domain::models::{AuthenticatedUser, TokenPair};
use crate::handlers::multipart::MultipartForm;
use crate::middlewares::ACCESS_TOKEN_COOKIE;

pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// 회원가입 핸들러
///
/// # Endpoint
/// `POST /auth/register`
///
/// 아바타 파일은 필수이며 커버 이미지는 선택입니다. 성공하면 201과 함께
/// 비밀번호/토큰이 제거된 사용자 정보를 반환합니다.
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let mut form = MultipartForm::read(payload, state.config.max_upload_bytes).await?;

    let request = RegisterUserRequest {
        username: form.take_text("username"),
        email: form.take_text("email"),
        full_name: form.take_text("fullName"),
        password: form.take_text("password"),
    };
    let avatar = form.take_file("avatar");
    let cover_image = form.take_file("coverImage");

    let user = state.users.register(request, avatar, cover_image).await?;

    Ok(ApiResponse::created(user, "User registered successfully").into_response())
}

/// 로그인 핸들러
///
/// # Endpoint
/// `POST /auth/login`
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let (user, tokens) = state.users.login(payload.into_inner()).await?;

    let body = ApiResponse::ok(LoginResponse::new(&user, &tokens), "User logged in successfully");
    Ok(with_token_cookies(&state.config, &tokens, body.into_response()))
}

/// 토큰 갱신 핸들러
///
/// # Endpoint
/// `GET|POST /auth/refresh-token`
///
/// 쿠키의 리프레시 토큰을 우선 사용하고, 없으면 JSON 본문의 `refreshToken`을 사용합니다.
/// 한 번 사용된 리프레시 토큰은 다시 사용할 수 없습니다.
#[route("/refresh-token", method = "GET", method = "POST")]
pub async fn refresh_token(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: Option<web::Json<RefreshTokenRequest>>,
) -> Result<HttpResponse, AppError> {
    let presented = req
        .cookie(REFRESH_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
        .or_else(|| body.and_then(|b| b.into_inner().refresh_token));

    let (user, tokens) = state.tokens.refresh(presented.as_deref()).await?;
    log::debug!("토큰 갱신: {}", user.id);

    let body = ApiResponse::ok(tokens.clone(), "Access token refreshed");
    Ok(with_token_cookies(&state.config, &tokens, body.into_response()))
}

/// 로그아웃 핸들러
///
/// # Endpoint
/// `GET|POST /auth/logout`
#[route("/logout", method = "GET", method = "POST")]
pub async fn logout(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state.users.logout(user.id()).await?;
    log::info!("로그아웃: {}", user.user.username);

    let mut response = ApiResponse::ok(serde_json::json!({}), "User logged out").into_response();
    for name in [ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE] {
        let mut cookie = token_cookie(&state.config, name, String::new());
        cookie.make_removal();
        // 쿠키 헤더 인코딩 실패는 본문 응답에 영향을 주지 않음
        if let Err(e) = response.add_cookie(&cookie) {
            log::warn!("쿠키 제거 실패 ({}): {}", name, e);
        }
    }

    Ok(response)
}

fn token_cookie(config: &AppConfig, name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build(name, value)
        .path("/")
        .http_only(true)
        .secure(config.cookies.secure)
        .same_site(SameSite::Lax)
        .finish()
}

/// 응답에 토큰 쿠키 두 개를 붙입니다
fn with_token_cookies(config: &AppConfig, tokens: &TokenPair, mut response: HttpResponse) -> HttpResponse {
    let cookies = [
        (ACCESS_TOKEN_COOKIE, tokens.access_token.clone(), config.jwt.access_ttl),
        (REFRESH_TOKEN_COOKIE, tokens.refresh_token.clone(), config.jwt.refresh_ttl),
    ];

    for (name, value, ttl) in cookies {
        let mut cookie = token_cookie(config, name, value);
        cookie.set_max_age(CookieDuration::seconds(ttl.num_seconds()));
        if let Err(e) = response.add_cookie(&cookie) {
            log::warn!("쿠키 설정 실패 ({}): {}", name, e);
        }
    }

    response
}
