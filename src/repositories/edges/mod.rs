pub mod edge_repo;

pub use edge_repo::*;
