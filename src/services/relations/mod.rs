//! 관계(좋아요, 구독) 서비스 모듈

pub mod edge_service;

pub use edge_service::*;
