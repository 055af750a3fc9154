// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod category;
pub mod config;
pub mod form;
pub mod logging;
pub mod records;
pub mod runtime;
pub mod tracker;
pub mod util;
