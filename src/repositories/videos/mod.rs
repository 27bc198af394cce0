pub mod video_repo;

pub use video_repo::*;
