//! Data models shared across the pipeline.

pub mod catalog;
pub mod config;
pub mod invoice;
pub mod matching;
