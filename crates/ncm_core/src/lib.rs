//! NCM Core - conversion pipeline for the NCM to ALAC helper.
//!
//! This crate contains all pipeline logic with zero desktop dependencies.
//! Desktop collaborators (file-manager selection query, clipboard read)
//! live in the application crate and feed this library through the
//! `input::InputProvider` seam.

pub mod config;
pub mod decode;
pub mod extraction;
pub mod input;
pub mod logging;
pub mod models;
pub mod orchestrator;
pub mod probe;
pub mod tools;
pub mod transcode;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
