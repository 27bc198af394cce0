//! 사용자/인증 요청 DTO
use serde::Deserialize;
use validator::{Validate, ValidationError};

/// 회원가입 폼의 텍스트 필드
///
/// multipart 폼에서 읽은 값으로 채워집니다. 파일(avatar, coverImage)은 별도로 전달됩니다.
#[derive(Debug, Clone, Default, Validate)]
pub struct RegisterUserRequest {
    /// 사용자명 (3-30자, 영문/숫자/언더스코어/마침표)
    #[validate(length(min = 3, max = 30, message = "Username must be 3-30 characters"))]
    #[validate(custom(function = "validate_username"))]
    pub username: String,

    #[validate(email(message = "A valid email is required"))]
    pub email: String,

    #[validate(length(min = 1, max = 80, message = "Full name is required"))]
    pub full_name: String,

    #[validate(length(min = 8, max = 128, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// 사용자명 형식 검증
fn validate_username(username: &str) -> Result<(), ValidationError> {
    if !username
        .trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
    {
        return Err(ValidationError::new("invalid_username")
            .with_message("Username may only contain letters, digits, '_' and '.'".into()));
    }
    Ok(())
}

/// 로그인 요청 (이메일 또는 사용자명)
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_login_identifier"))]
pub struct LoginRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

fn validate_login_identifier(req: &LoginRequest) -> Result<(), ValidationError> {
    let has = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
    if !has(&req.email) && !has(&req.username) {
        return Err(ValidationError::new("missing_identifier")
            .with_message("Username or email is required".into()));
    }
    Ok(())
}

/// 토큰 갱신 요청 본문 (쿠키가 없을 때 사용)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Old password is required"))]
    pub old_password: String,
    #[validate(length(min = 8, max = 128, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}

/// 계정 정보 수정 (최소 한 필드 필요)
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_account_update"))]
pub struct UpdateAccountRequest {
    #[validate(length(min = 1, max = 80, message = "Full name cannot be empty"))]
    pub full_name: Option<String>,
    #[validate(email(message = "A valid email is required"))]
    pub email: Option<String>,
}

fn validate_account_update(req: &UpdateAccountRequest) -> Result<(), ValidationError> {
    if req.full_name.is_none() && req.email.is_none() {
        return Err(ValidationError::new("empty_update")
            .with_message("At least one field (fullName or email) is required".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(username: &str, email: &str) -> RegisterUserRequest {
        RegisterUserRequest {
            username: username.to_string(),
            email: email.to_string(),
            full_name: "Alice".to_string(),
            password: "Password123".to_string(),
        }
    }

    #[test]
    fn test_register_request_validation() {
        assert!(register("alice", "alice@x.com").validate().is_ok());
        assert!(register("al", "alice@x.com").validate().is_err());
        assert!(register("alice!", "alice@x.com").validate().is_err());
        assert!(register("alice", "not-an-email").validate().is_err());
    }

    #[test]
    fn test_login_requires_identifier() {
        let req = LoginRequest {
            email: None,
            username: Some("  ".to_string()),
            password: "secret".to_string(),
        };
        assert!(req.validate().is_err());

        let req = LoginRequest {
            email: None,
            username: Some("alice".to_string()),
            password: "secret".to_string(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_account_update_requires_a_field() {
        let req = UpdateAccountRequest { full_name: None, email: None };
        assert!(req.validate().is_err());
    }
}
