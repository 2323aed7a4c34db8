//! Data models for order drafts, directory entries and configuration.

pub mod config;
pub mod directory;
pub mod order;
