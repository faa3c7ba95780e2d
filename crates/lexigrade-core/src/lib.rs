//! lexigrade-core — Feed parsing, retry history, and classification.
//!
//! This crate turns raw class-feed text into structured vocabulary-test
//! and practice-card records, reconstructs each student's retry history,
//! and classifies every attempt against a pass threshold.

pub mod analyzer;
pub mod classify;
pub mod error;
pub mod history;
pub mod model;
pub mod parser;
pub mod report;
pub mod summary;
