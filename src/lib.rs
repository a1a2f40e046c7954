//! pagewright - headless page-layout editor
//!
//! The binary wraps `pagewright-app` in an NDJSON stdin/stdout driver.

pub mod headless;

// Re-export main entry point
pub use headless::runner::{run_headless, run_session};
