// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod config;
pub mod emotion;
pub mod present;
pub mod random;
pub mod runtime;
pub mod session;
pub mod summary;
pub mod timers;
pub mod trial;
pub mod util;
