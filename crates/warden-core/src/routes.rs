// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Route protection declarations.
//!
//! A [`RouteTable`] maps path patterns to protection requirements. It is
//! constructed by the caller (usually from configuration) and read-only to
//! the gates: the request gate reads "is this path protected at all", the
//! navigation layer reads the full policy for a route.

use serde::{Deserialize, Serialize};

use crate::policy::PermissionPolicy;

// =============================================================================
// RouteProtection
// =============================================================================

/// The protection requirement attached to a route pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteProtection {
    /// A valid session is required; no level/admin evaluation at this route.
    AuthOnly,
    /// A full permission policy applies.
    Policy(PermissionPolicy),
}

// =============================================================================
// RouteTable
// =============================================================================

/// One pattern → protection rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRule {
    /// Exact path, or a prefix pattern ending in `*`.
    pub pattern: String,
    /// The protection requirement for matching paths.
    pub protection: RouteProtection,
}

/// An ordered set of route protection rules.
///
/// Patterns are matched exactly, or as prefixes when they end in `*`. When
/// several patterns match one path, the longest pattern wins, so
/// `/admin/users/*` shadows `/admin/*`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
}

impl RouteTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule, chained.
    pub fn with_rule(mut self, pattern: impl Into<String>, protection: RouteProtection) -> Self {
        self.rules.push(RouteRule {
            pattern: pattern.into(),
            protection,
        });
        self
    }

    /// Adds an authentication-only rule, chained.
    pub fn with_auth_only(self, pattern: impl Into<String>) -> Self {
        self.with_rule(pattern, RouteProtection::AuthOnly)
    }

    /// Adds a policy rule, chained.
    pub fn with_policy(self, pattern: impl Into<String>, policy: PermissionPolicy) -> Self {
        self.with_rule(pattern, RouteProtection::Policy(policy))
    }

    /// Returns the protection for a path, if any rule matches.
    ///
    /// The most specific (longest) matching pattern wins.
    pub fn lookup(&self, path: &str) -> Option<&RouteProtection> {
        self.rules
            .iter()
            .filter(|rule| pattern_matches(&rule.pattern, path))
            .max_by_key(|rule| rule.pattern.len())
            .map(|rule| &rule.protection)
    }

    /// Returns `true` if any rule matches the path.
    pub fn is_protected(&self, path: &str) -> bool {
        self.lookup(path).is_some()
    }

    /// Returns the declared rules.
    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Matches a path against an exact pattern or a `*`-suffixed prefix pattern.
pub fn pattern_matches(pattern: &str, path: &str) -> bool {
    if let Some(prefix) = pattern.strip_suffix('*') {
        path.starts_with(prefix)
    } else {
        pattern == path
    }
}

// =============================================================================
// Tests
// =============================================================================
