//! Shared observability setup for the router workspace.

pub mod tracing;
