// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Denial taxonomy and oracle error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// DenyReason
// =============================================================================

/// The closed set of reasons an access evaluation can fail.
///
/// Exactly one reason applies per failed evaluation, selected by fixed
/// precedence: missing or expired session first, then the admin-only
/// violation, then the level violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DenyReason {
    /// No identity could be resolved for the request or scope.
    NotLoggedIn,
    /// An identity was resolved but its session has expired.
    TokenExpired,
    /// The identity's level is below the effective threshold.
    InsufficientLevel,
    /// The resource is restricted to administrative roles.
    AdminOnly,
}

impl DenyReason {
    /// Returns the reason code as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            DenyReason::NotLoggedIn => "NOT_LOGGED_IN",
            DenyReason::TokenExpired => "TOKEN_EXPIRED",
            DenyReason::InsufficientLevel => "INSUFFICIENT_LEVEL",
            DenyReason::AdminOnly => "ADMIN_ONLY",
        }
    }

    /// Parses a reason from its code.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "NOT_LOGGED_IN" => Some(DenyReason::NotLoggedIn),
            "TOKEN_EXPIRED" => Some(DenyReason::TokenExpired),
            "INSUFFICIENT_LEVEL" => Some(DenyReason::InsufficientLevel),
            "ADMIN_ONLY" => Some(DenyReason::AdminOnly),
            _ => None,
        }
    }

    /// Returns all reasons in the taxonomy.
    pub fn all() -> &'static [DenyReason] {
        &[
            DenyReason::NotLoggedIn,
            DenyReason::TokenExpired,
            DenyReason::InsufficientLevel,
            DenyReason::AdminOnly,
        ]
    }

    /// Returns `true` if the reason is resolved by (re-)authenticating.
    ///
    /// These reasons map to the authentication entry point with a preserved
    /// return-to path; the remaining reasons map to the fallback target.
    pub fn requires_login(&self) -> bool {
        matches!(self, DenyReason::NotLoggedIn | DenyReason::TokenExpired)
    }

    /// Returns a user-friendly message.
    ///
    /// Safe to show to end users; does not expose evaluation internals.
    pub fn user_message(&self) -> &'static str {
        match self {
            DenyReason::NotLoggedIn => "로그인이 필요합니다",
            DenyReason::TokenExpired => "세션이 만료되었습니다. 다시 로그인해주세요",
            DenyReason::InsufficientLevel => "접근 권한 레벨이 부족합니다",
            DenyReason::AdminOnly => "관리자만 접근할 수 있습니다",
        }
    }
}

impl std::fmt::Display for DenyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// OracleError
// =============================================================================

/// Failures of the session oracle during identity resolution.
///
/// These never reach policy evaluation: the resolution boundary recovers every
/// variant to "absent identity" so that a backend outage fails closed instead
/// of surfacing a raw error to the UI layer.
#[derive(Debug, Error)]
pub enum OracleError {
    /// Transport-level failure while contacting the identity provider.
    #[error("session oracle transport error: {0}")]
    Transport(String),

    /// The oracle did not resolve within the configured deadline.
    #[error("session oracle timed out after {waited_ms}ms")]
    Timeout {
        /// Milliseconds waited before giving up.
        waited_ms: u64,
    },

    /// Any other oracle-internal failure.
    #[error("session oracle internal error: {0}")]
    Internal(String),
}

impl OracleError {
    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

// =============================================================================
// Tests
// =============================================================================
