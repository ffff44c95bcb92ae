// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Redirect target resolution for failed evaluations.
//!
//! The core only computes target path strings; performing the navigation or
//! writing the HTTP response is the calling environment's job.

use serde::{Deserialize, Serialize};

use crate::error::DenyReason;

/// Default authentication entry point.
pub const DEFAULT_LOGIN_PATH: &str = "/authentication/login";

/// Default fallback target for authorization (not authentication) failures.
pub const DEFAULT_FALLBACK_PATH: &str = "/";

/// Query parameter carrying the preserved original path.
pub const RETURN_TO_PARAM: &str = "redirect";

// =============================================================================
// RedirectPolicy
// =============================================================================

/// Where failed evaluations are sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedirectPolicy {
    /// Authentication entry point for login-resolvable denials.
    pub login_path: String,
    /// Fallback target for level/admin denials without an explicit target.
    pub fallback_path: String,
}

impl Default for RedirectPolicy {
    fn default() -> Self {
        Self {
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            fallback_path: DEFAULT_FALLBACK_PATH.to_string(),
        }
    }
}

impl RedirectPolicy {
    /// Creates a policy with explicit paths.
    pub fn new(login_path: impl Into<String>, fallback_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
            fallback_path: fallback_path.into(),
        }
    }
}

// =============================================================================
// Redirect
// =============================================================================

/// A resolved redirect target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirect {
    /// Full target, including any preserved return-to parameter.
    pub target: String,
    /// The original path preserved for post-login return, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_to: Option<String>,
}

impl Redirect {
    /// Redirect to the authentication entry point, preserving `original`.
    pub fn to_login(policy: &RedirectPolicy, original: Option<&str>) -> Self {
        match original {
            Some(path) if !path.is_empty() => Self {
                target: format!(
                    "{}?{}={}",
                    policy.login_path,
                    RETURN_TO_PARAM,
                    urlencoding::encode(path)
                ),
                return_to: Some(path.to_string()),
            },
            _ => Self {
                target: policy.login_path.clone(),
                return_to: None,
            },
        }
    }

    /// Redirect to the fallback target.
    pub fn to_fallback(policy: &RedirectPolicy) -> Self {
        Self {
            target: policy.fallback_path.clone(),
            return_to: None,
        }
    }

    /// Redirect to an explicit caller-supplied target.
    pub fn to_target(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            return_to: None,
        }
    }

    /// Resolves the redirect for a denial reason.
    ///
    /// An explicit `override_target` always wins. Otherwise login-resolvable
    /// reasons go to the authentication entry point with the original path
    /// preserved; the rest go to the fallback target.
    pub fn for_denial(
        policy: &RedirectPolicy,
        reason: DenyReason,
        original: Option<&str>,
        override_target: Option<&str>,
    ) -> Self {
        if let Some(target) = override_target {
            return Self::to_target(target);
        }
        if reason.requires_login() {
            Self::to_login(policy, original)
        } else {
            Self::to_fallback(policy)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
