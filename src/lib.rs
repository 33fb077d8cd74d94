// Library surface for headless use and integration tests.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod config;
pub mod difficulty;
pub mod round_log;
pub mod score_store;
pub mod session;
pub mod util;
