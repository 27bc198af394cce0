/// 라우트의 인증 요구 수준
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// 토큰이 없거나 유효하지 않으면 401
    Required,
    /// 유효한 토큰이 있으면 사용자를 확정하고, 없으면 익명으로 진행
    Optional,
}
