//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Persistence: In-memory adapters for the repository ports
//! - Random: d20 roller and wall clock
//! - Config: Application configuration
//! - Telemetry: Tracing subscriber setup
//! - State: Shared application state wiring the services

pub mod config;
pub mod persistence;
pub mod random;
pub mod state;
pub mod telemetry;
