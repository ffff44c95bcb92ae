// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # warden-core
//!
//! Core types and policy evaluation for the WARDEN access control toolkit.
//!
//! This crate is the single source of truth for authorization semantics:
//!
//! - **Identity**: resolved principal with level, role, and session expiry
//! - **Policy**: declarative [`PermissionPolicy`] with per-resource thresholds
//! - **Evaluator**: the pure [`evaluate`] function and its closed
//!   [`DenyReason`] taxonomy
//! - **Oracle**: the [`SessionOracle`] boundary with fail-closed resolution
//! - **Routes**: path-pattern → protection declarations
//! - **Redirect**: target resolution for denied evaluations
//! - **Notify**: classified notice events for a UI collaborator
//!
//! Both enforcement points — the edge-level request gate (`warden-http`) and
//! the client-level navigation gate (`warden-guard`) — build on these types,
//! which keeps precedence rules identical across all guard variants.

#![warn(missing_docs)]
#![deny(unsafe_code)]

// =============================================================================
// Modules
// =============================================================================

pub mod error;
pub mod evaluator;
pub mod identity;
pub mod notify;
pub mod oracle;
pub mod policy;
pub mod redirect;
pub mod routes;

// =============================================================================
// Re-exports for convenience
// =============================================================================

pub use error::{DenyReason, OracleError};
pub use evaluator::{evaluate, evaluate_at, Evaluation};
pub use identity::{Identity, IdentityBuilder, Role};
pub use notify::{AccessNotice, NoOpNoticeSink, NoticeSeverity, NoticeSink, TracingNoticeSink};
pub use oracle::{
    resolve_fail_closed, NullSessionOracle, SessionContext, SessionOracle, StaticSessionOracle,
    DEFAULT_ORACLE_TIMEOUT,
};
pub use policy::{
    AccessAction, LevelRequirement, LevelSource, PermissionPolicy, PolicyBuilder, ResourceRule,
};
pub use redirect::{
    Redirect, RedirectPolicy, DEFAULT_FALLBACK_PATH, DEFAULT_LOGIN_PATH, RETURN_TO_PARAM,
};
pub use routes::{pattern_matches, RouteProtection, RouteRule, RouteTable};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
