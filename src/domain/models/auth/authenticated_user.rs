use std::future::{Ready, ready};

use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use mongodb::bson::oid::ObjectId;

use crate::core::errors::AppError;
use crate::domain::entities::User;

/// 인증 미들웨어가 확인한 요청 사용자
///
/// 미들웨어가 Request Extensions에 저장하고 핸들러는 추출자로 꺼내 씁니다.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
}

impl AuthenticatedUser {
    pub fn id(&self) -> &ObjectId {
        &self.user.id
    }
}

/// ActixWeb FromRequest trait 구현
impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "Unauthorized request".to_string(),
            )
            .into())),
        }
    }
}

/// 선택적 인증 사용자 추출자
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<AuthenticatedUser>);

impl OptionalUser {
    pub fn id(&self) -> Option<&ObjectId> {
        self.0.as_ref().map(|u| u.id())
    }
}

impl FromRequest for OptionalUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        ready(Ok(OptionalUser(user)))
    }
}
