//! Client for the article curation backend.

mod client;
mod types;

pub use client::{ApiClient, ApiError};
pub use types::{Article, ArticlePage};
