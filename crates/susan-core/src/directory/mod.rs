//! Directory snapshot loading.

mod client;

pub use client::HttpDirectory;

use std::future::Future;

use crate::error::DirectoryError;
use crate::models::directory::{Business, FishType};

/// A source of directory listings.
pub trait DirectorySource {
    /// Fetch the fish-type catalog.
    fn fetch_fish_types(&self) -> impl Future<Output = Result<Vec<FishType>, DirectoryError>> + Send;

    /// Fetch the business directory.
    fn fetch_businesses(&self) -> impl Future<Output = Result<Vec<Business>, DirectoryError>> + Send;
}
