//! 사용자 관리 서비스 모듈
//!
//! 회원가입, 로그인/로그아웃, 계정 관리, 채널 프로필, 시청 기록을 담당합니다.
//!
//! # Security
//!
//! - bcrypt 비밀번호 해싱 (cost는 환경별 설정)
//! - 이메일/사용자명 중복 방지 (대소문자 무시)
//! - 응답 DTO에서 비밀번호 해시와 리프레시 토큰 제외

pub mod user_service;

pub use user_service::*;
