//! Skiff: a minimal HTTP service for demonstrating multi-stage container builds.
//!
//! The binary serves three JSON endpoints (greeting, health, runtime metrics)
//! and shuts down on SIGINT/SIGTERM. This library surface exists so the
//! integration tests can assemble the same router and server the binary runs.

pub mod config;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod stats;

/// Heap figures for `/metrics` come from a counting allocator installed
/// process-wide. Installing it here covers the binary and the test harness.
#[global_allocator]
static ALLOC: stats::TrackingAllocator = stats::TrackingAllocator;
