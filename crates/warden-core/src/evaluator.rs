// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Pure permission evaluation.
//!
//! [`evaluate`] is the single source of truth for authorization semantics;
//! both the navigation gate and higher-level guard variants delegate to it.
//! It is a pure function over its inputs: evaluating twice with identical
//! identity and policy yields a bit-identical [`Evaluation`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DenyReason;
use crate::identity::Identity;
use crate::policy::{AccessAction, LevelSource, PermissionPolicy};

// =============================================================================
// Evaluation
// =============================================================================

/// The outcome of one permission evaluation.
///
/// `has_permission` is meaningful only when `is_authenticated` is true; an
/// unauthenticated evaluation forces it to `false` regardless of policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Whether a valid, non-expired identity was presented.
    pub is_authenticated: bool,
    /// Whether the identity satisfies the policy.
    pub has_permission: bool,
    /// The classified reason on failure, `None` on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deny: Option<DenyReason>,
}

impl Evaluation {
    /// A successful evaluation.
    pub fn allowed() -> Self {
        Self {
            is_authenticated: true,
            has_permission: true,
            deny: None,
        }
    }

    /// A failed evaluation classified by `reason`.
    pub fn denied(reason: DenyReason) -> Self {
        Self {
            is_authenticated: !reason.requires_login(),
            has_permission: false,
            deny: Some(reason),
        }
    }

    /// Returns `true` if access was granted.
    pub fn is_allowed(&self) -> bool {
        self.has_permission
    }
}

// =============================================================================
// evaluate
// =============================================================================

/// Evaluates an identity against a policy for the given action.
///
/// Uses the current wall clock for the expiry check; see [`evaluate_at`] for
/// the pure form.
pub fn evaluate(
    identity: Option<&Identity>,
    policy: &PermissionPolicy,
    action: AccessAction,
) -> Evaluation {
    evaluate_at(identity, policy, action, Utc::now())
}

/// Evaluates an identity against a policy at an explicit instant.
///
/// Precedence is fixed: missing identity, then expired session, then the
/// admin-only check, then the level check. Administrative roles bypass the
/// policy's base level threshold but not an explicit resource threshold; the
/// evaluator never invents an override the policy did not declare.
pub fn evaluate_at(
    identity: Option<&Identity>,
    policy: &PermissionPolicy,
    action: AccessAction,
    now: DateTime<Utc>,
) -> Evaluation {
    let identity = match identity {
        Some(identity) => identity,
        None => {
            tracing::debug!(action = %action, "access denied: no identity");
            return Evaluation::denied(DenyReason::NotLoggedIn);
        }
    };

    if identity.is_expired(now) {
        tracing::debug!(id = %identity.id, action = %action, "access denied: session expired");
        return Evaluation::denied(DenyReason::TokenExpired);
    }

    if policy.admin_only && !identity.role.is_admin() {
        tracing::debug!(
            id = %identity.id,
            role = %identity.role,
            "access denied: admin-only resource"
        );
        return Evaluation::denied(DenyReason::AdminOnly);
    }

    let requirement = policy.effective_requirement(action);
    let bypass = identity.role.is_admin() && requirement.source == LevelSource::Base;

    if !bypass && identity.level < requirement.level {
        tracing::debug!(
            id = %identity.id,
            level = identity.level,
            required = requirement.level,
            action = %action,
            "access denied: insufficient level"
        );
        return Evaluation::denied(DenyReason::InsufficientLevel);
    }

    Evaluation::allowed()
}

// =============================================================================
// Tests
// =============================================================================
