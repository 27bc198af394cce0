//! JWT 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 액세스 토큰을 검증하고 요청 사용자를 확정합니다.
//! 라우트마다 `wrap`으로 필수/선택 모드를 지정합니다.

use std::future::{Ready, ready};
use std::rc::Rc;

use actix_web::{
    Error, Result,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
};

use crate::domain::models::auth::AuthMode;
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// JWT 인증 미들웨어
pub struct AuthMiddleware {
    /// 인증 모드 (Required/Optional)
    mode: AuthMode,
}

impl AuthMiddleware {
    pub fn new(mode: AuthMode) -> Self {
        Self { mode }
    }

    /// 필수 인증: 실패하면 401로 응답하고 핸들러를 호출하지 않음
    pub fn required() -> Self {
        Self::new(AuthMode::Required)
    }

    /// 선택적 인증: 실패하면 익명 요청으로 진행
    pub fn optional() -> Self {
        Self::new(AuthMode::Optional)
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode,
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::cookie::Cookie;
    use actix_web::{App, HttpResponse, test, web};

    use super::*;
    use crate::config::AppConfig;
    use crate::core::state::AppState;
    use crate::domain::entities::{MediaAsset, User};
    use crate::domain::models::auth::OptionalUser;
    use crate::middlewares::auth_inner::ACCESS_TOKEN_COOKIE;
    use crate::repositories::Repositories;
    use crate::services::media::InMemoryMediaHost;

    async fn whoami(user: OptionalUser) -> HttpResponse {
        match user.id() {
            Some(id) => HttpResponse::Ok().body(id.to_hex()),
            None => HttpResponse::Ok().body("anonymous"),
        }
    }

    /// 사용자 두 명이 저장된 상태와 각자의 액세스 토큰
    async fn state_with_users() -> (AppState, (User, String), (User, String)) {
        let repositories = Repositories::in_memory();
        let mut issued = Vec::new();
        for name in ["alice", "bob"] {
            let avatar = MediaAsset {
                url: format!("https://media.example/{}.png", name),
                public_id: name.to_string(),
                resource_type: "image".to_string(),
                duration: None,
            };
            let user = repositories
                .users
                .create(User::new(name, &format!("{}@x.com", name), name, "hash".into(), avatar, None))
                .await
                .unwrap();
            issued.push(user);
        }

        let state = AppState::new(
            AppConfig::development(),
            repositories,
            Arc::new(InMemoryMediaHost::default()),
        );

        let bob = issued.pop().unwrap();
        let alice = issued.pop().unwrap();
        let alice_token = state.tokens.issue(&alice).await.unwrap().access_token;
        let bob_token = state.tokens.issue(&bob).await.unwrap().access_token;

        (state, (alice, alice_token), (bob, bob_token))
    }

    #[actix_web::test]
    async fn test_required_mode_rejects_missing_token() {
        let (state, _, _) = state_with_users().await;
        let app = test::init_service(
            App::new().app_data(web::Data::new(state)).service(
                web::resource("/private")
                    .wrap(AuthMiddleware::required())
                    .route(web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get().uri("/private").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["statusCode"], 401);
    }

    #[actix_web::test]
    async fn test_required_mode_accepts_bearer_token() {
        let (state, (alice, token), _) = state_with_users().await;
        let app = test::init_service(
            App::new().app_data(web::Data::new(state)).service(
                web::resource("/private")
                    .wrap(AuthMiddleware::required())
                    .route(web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/private")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;

        assert_eq!(body, alice.id.to_hex());
    }

    #[actix_web::test]
    async fn test_cookie_takes_precedence_over_bearer_header() {
        let (state, (alice, alice_token), (_, bob_token)) = state_with_users().await;
        let app = test::init_service(
            App::new().app_data(web::Data::new(state)).service(
                web::resource("/private")
                    .wrap(AuthMiddleware::required())
                    .route(web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/private")
            .cookie(Cookie::new(ACCESS_TOKEN_COOKIE, alice_token.clone()))
            .insert_header(("Authorization", format!("Bearer {}", bob_token)))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, alice.id.to_hex());

        // 헤더가 깨져 있어도 쿠키만으로 인증
        let req = test::TestRequest::get()
            .uri("/private")
            .cookie(Cookie::new(ACCESS_TOKEN_COOKIE, alice_token))
            .insert_header(("Authorization", "Bearer not-a-jwt"))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, alice.id.to_hex());
    }

    #[actix_web::test]
    async fn test_optional_mode_lets_anonymous_through() {
        let (state, _, _) = state_with_users().await;
        let app = test::init_service(
            App::new().app_data(web::Data::new(state)).service(
                web::resource("/public")
                    .wrap(AuthMiddleware::optional())
                    .route(web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/public")
            .insert_header(("Authorization", "Bearer not-a-jwt"))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;

        assert_eq!(body, "anonymous");
    }
}
