// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Stateful access guards for client-driven navigation.
//!
//! This crate layers a small state machine over the evaluation primitives in
//! `warden-core`. A [`GuardSession`] tracks the lifecycle of permission
//! checks for one guarded scope (idle, checking, resolved) and coalesces
//! concurrent checks into a single oracle query. A [`NavigationGate`] wires
//! a session to an oracle, a policy, and the redirect/notice machinery, and
//! exposes the synchronous `guard()` / asynchronous `check()` pair used at
//! transition boundaries.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use warden_core::StaticSessionOracle;
//! use warden_guard::admin_gate;
//!
//! # async fn example() {
//! let gate = admin_gate(Arc::new(StaticSessionOracle::anonymous()));
//! if !gate.check_permission().await {
//!     let outcome = gate.guard();
//!     // outcome.redirect is the login redirect for an unauthenticated user
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod gate;
pub mod session;

pub use error::{GuardError, GuardResult};
pub use gate::{
    admin_gate, board_gate, level_gate, GuardOptions, GuardOutcome, NavigationGate,
    NavigationGateBuilder,
};
pub use session::{GuardPhase, GuardSession, ResolvedCheck};
