// ABOUTME: Configuration module for the signal worker
// ABOUTME: Environment loading of credentials and upstream endpoints
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

/// Environment-based configuration
pub mod environment;

pub use environment::{ApiEndpoints, WorkerConfig};
