pub mod error;
pub mod pagination;
