//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, forward_ready};
use actix_web::http::StatusCode;
use actix_web::{Error, HttpMessage, HttpResponse, web};
use futures_util::future::LocalBoxFuture;

use crate::core::errors::{AppError, ErrorBody};
use crate::core::state::AppState;
use crate::domain::models::auth::{AuthMode, AuthenticatedUser};

/// 액세스 토큰 쿠키 이름
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub mode: AuthMode,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let mode = self.mode;

        Box::pin(async move {
            let auth_result = authenticate(&req).await;

            match (&mode, auth_result) {
                // Required 모드에서 인증 실패
                (AuthMode::Required, Err(err)) => {
                    log::warn!("인증 실패: {} {}: {}", req.method(), req.path(), err);
                    let response = HttpResponse::Unauthorized().json(ErrorBody::new(
                        StatusCode::UNAUTHORIZED,
                        "Unauthorized request",
                    ));
                    let (req, _) = req.into_parts();
                    let res = ServiceResponse::new(req, response).map_into_right_body();
                    return Ok(res);
                }
                (_, Ok(user)) => {
                    log::debug!("인증 성공: 사용자 ID {}", user.id());
                    req.extensions_mut().insert(user);
                }
                // Optional 모드에서 인증 실패 (진행 허용)
                (AuthMode::Optional, Err(_)) => {
                    log::debug!("선택적 인증: 유효한 토큰 없음, 익명으로 진행");
                }
            }

            // 다음 서비스로 요청 전달
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// 요청에서 액세스 토큰을 꺼내 검증하고 사용자를 조회
///
/// 쿠키가 Authorization 헤더보다 우선합니다.
async fn authenticate(req: &ServiceRequest) -> Result<AuthenticatedUser, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::InternalError("AppState가 등록되지 않았습니다".to_string()))?;
    let token_service = &state.tokens;

    let token = match req.cookie(ACCESS_TOKEN_COOKIE) {
        Some(cookie) if !cookie.value().is_empty() => cookie.value().to_string(),
        _ => {
            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
                .ok_or_else(|| AppError::AuthenticationError("Unauthorized request".to_string()))?;

            token_service.extract_bearer_token(auth_header)?.to_string()
        }
    };

    let user = token_service.verify_access(&token).await?;
    Ok(AuthenticatedUser { user })
}
