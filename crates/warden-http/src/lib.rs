// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Server-side request gate for axum applications.
//!
//! This crate gates full page loads and API requests before handlers run.
//! [`RequestGateLayer`] authenticates requests to protected path prefixes
//! against a session oracle, redirecting unauthenticated browsers to the
//! login page with the original destination preserved. The gate is stateless
//! per request and fails closed: oracle errors and timeouts deny.
//!
//! Handlers downstream of the gate receive the resolved identity through
//! request extensions and the [`CurrentIdentity`] / [`MaybeIdentity`]
//! extractors. Authorization beyond "is logged in" belongs to the handlers
//! and the navigation guards, which know the policy for the resource.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod extract;
pub mod gate;

pub use error::{ErrorDetails, ErrorResponseBody, GateError, GateResult};
pub use extract::{ClientIp, CurrentIdentity, MaybeIdentity};
pub use gate::{RequestGate, RequestGateLayer, SESSION_COOKIE};
