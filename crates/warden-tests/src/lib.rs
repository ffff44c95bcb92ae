// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Warden Integration Tests
//!
//! This crate provides integration tests for the warden access control
//! stack, plus the shared test utilities they are built from.
//!
//! ## Module Structure
//!
//! - [`common`]: Shared test utilities, fixtures, and helpers
//!   - `fixtures`: Pre-built identities, policies, and config documents
//!   - `builders`: Builder patterns for constructing gates under test
//!   - `assertions`: Custom assertion helpers
//!   - `mocks`: Mock oracle and notice sink implementations
//!
//! ## Running Tests
//!
//! ```bash
//! # Run all integration tests
//! cargo test -p warden-tests
//!
//! # Run specific test suite
//! cargo test -p warden-tests --test integration_core
//! cargo test -p warden-tests --test integration_guard
//! cargo test -p warden-tests --test integration_http
//! cargo test -p warden-tests --test integration_config
//!
//! # Run with verbose output
//! cargo test -p warden-tests -- --nocapture
//! ```
//!
//! ## Test Categories
//!
//! ### Core Tests (`integration_core.rs`)
//! - Evaluation precedence across the full identity/policy grid
//! - Session expiry handling
//! - Admin bypass and resource rule binding
//! - Redirect target construction
//!
//! ### Guard Tests (`integration_guard.rs`)
//! - Navigation gate lifecycle and fail-closed defaults
//! - Concurrent check coalescing
//! - Oracle timeout and failure handling
//! - Denial notification delivery
//!
//! ### HTTP Tests (`integration_http.rs`)
//! - Request gate pass-through and redirect behavior
//! - Identity injection into request extensions
//! - Fail-closed behavior on oracle errors
//!
//! ### Config Tests (`integration_config.rs`)
//! - Configuration parsing (YAML, TOML, JSON)
//! - Validation rules
//! - Conversion into runtime route tables

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod common;

/// Re-export commonly used items for convenience.
pub mod prelude {
    pub use crate::common::assertions::*;
    pub use crate::common::builders::*;
    pub use crate::common::fixtures::*;
    pub use crate::common::mocks::*;
}
