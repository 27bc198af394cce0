pub mod tweet_service;

pub use tweet_service::*;
