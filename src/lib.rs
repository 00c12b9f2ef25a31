// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod clock;
pub mod config;
pub mod diff;
pub mod history;
pub mod passage;
pub mod runtime;
pub mod score;
pub mod session;

/// Display-clock granularity: the runtime emits one tick per second.
pub const TICK_RATE_MS: u64 = 1000;
