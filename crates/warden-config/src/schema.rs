// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Configuration schema.
//!
//! The schema mirrors what deployments actually declare: the gate section
//! configures the request gate (login redirect, oracle deadline, protected
//! prefixes), and the routes section declares per-pattern protection rules
//! consumed as a [`RouteTable`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

use warden_core::{PermissionPolicy, RedirectPolicy, RouteTable};

use crate::error::{ConfigError, ConfigResult};

/// Default oracle deadline in milliseconds.
pub const DEFAULT_ORACLE_TIMEOUT_MS: u64 = 5000;

// =============================================================================
// WardenConfig
// =============================================================================

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WardenConfig {
    /// Request gate settings.
    #[serde(default)]
    pub gate: GateConfig,

    /// Route protection rules.
    #[serde(default)]
    pub routes: Vec<RouteRuleConfig>,
}

impl WardenConfig {
    /// Validates the whole configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        self.gate.validate()?;
        for (i, route) in self.routes.iter().enumerate() {
            route.validate(i)?;
        }
        Ok(())
    }

    /// Builds the route table declared by the routes section.
    pub fn route_table(&self) -> RouteTable {
        let mut table = RouteTable::new();
        for route in &self.routes {
            if route.auth_only {
                table = table.with_auth_only(&route.pattern);
            } else {
                table = table.with_policy(&route.pattern, route.policy());
            }
        }
        table
    }

    /// Builds the redirect policy declared by the gate section.
    pub fn redirect_policy(&self) -> RedirectPolicy {
        RedirectPolicy::new(&self.gate.login_path, &self.gate.fallback_path)
    }

    /// Returns the oracle deadline.
    pub fn oracle_timeout(&self) -> Duration {
        Duration::from_millis(self.gate.oracle_timeout_ms)
    }
}

// =============================================================================
// GateConfig
// =============================================================================

/// Request gate settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GateConfig {
    /// Login page requests are redirected to when unauthenticated.
    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// Fallback page for denials that login cannot resolve.
    #[serde(default = "default_fallback_path")]
    pub fallback_path: String,

    /// Oracle deadline in milliseconds. Expiry fails closed.
    #[serde(default = "default_oracle_timeout_ms")]
    pub oracle_timeout_ms: u64,

    /// Protected path prefixes for the request gate. Exact paths, or
    /// prefixes ending in `*`.
    #[serde(default)]
    pub protected: Vec<String>,
}

impl GateConfig {
    fn validate(&self) -> ConfigResult<()> {
        if !self.login_path.starts_with('/') {
            return Err(ConfigError::validation(
                "gate.login_path",
                "must start with '/'",
            ));
        }
        if !self.fallback_path.starts_with('/') {
            return Err(ConfigError::validation(
                "gate.fallback_path",
                "must start with '/'",
            ));
        }
        if self.oracle_timeout_ms == 0 {
            return Err(ConfigError::validation(
                "gate.oracle_timeout_ms",
                "must be greater than zero",
            ));
        }
        for path in &self.protected {
            if !path.starts_with('/') {
                return Err(ConfigError::validation(
                    "gate.protected",
                    format!("path '{}' must start with '/'", path),
                ));
            }
        }
        Ok(())
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            login_path: default_login_path(),
            fallback_path: default_fallback_path(),
            oracle_timeout_ms: default_oracle_timeout_ms(),
            protected: Vec::new(),
        }
    }
}

fn default_login_path() -> String {
    "/authentication/login".to_string()
}

fn default_fallback_path() -> String {
    "/".to_string()
}

fn default_oracle_timeout_ms() -> u64 {
    DEFAULT_ORACLE_TIMEOUT_MS
}

// =============================================================================
// RouteRuleConfig
// =============================================================================

/// One declared route protection rule.
///
/// A rule is either authentication-only (`auth_only: true`, no policy
/// fields) or a permission policy built from the remaining fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteRuleConfig {
    /// Exact path, or a prefix pattern ending in `*`.
    pub pattern: String,

    /// Require a valid session only; skip level/admin evaluation.
    #[serde(default)]
    pub auth_only: bool,

    /// Restrict to administrative roles.
    #[serde(default)]
    pub admin_only: bool,

    /// Minimum level required.
    #[serde(default)]
    pub required_level: u32,

    /// Resource read threshold. Binds every role when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_level: Option<u32>,

    /// Resource write threshold. Binds every role when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write_level: Option<u32>,
}

impl RouteRuleConfig {
    fn validate(&self, index: usize) -> ConfigResult<()> {
        let field = format!("routes[{}]", index);

        if self.pattern.is_empty() {
            return Err(ConfigError::validation(
                format!("{}.pattern", field),
                "must not be empty",
            ));
        }
        if !self.pattern.starts_with('/') {
            return Err(ConfigError::validation(
                format!("{}.pattern", field),
                "must start with '/'",
            ));
        }

        let has_policy_fields = self.admin_only
            || self.required_level > 0
            || self.read_level.is_some()
            || self.write_level.is_some();
        if self.auth_only && has_policy_fields {
            return Err(ConfigError::validation(
                field,
                "auth_only rules must not declare policy fields",
            ));
        }

        Ok(())
    }

    /// Builds the permission policy declared by this rule.
    pub fn policy(&self) -> PermissionPolicy {
        let mut builder = PermissionPolicy::builder()
            .required_level(self.required_level)
            .admin_only(self.admin_only);
        if let Some(level) = self.read_level {
            builder = builder.read_level(level);
        }
        if let Some(level) = self.write_level {
            builder = builder.write_level(level);
        }
        builder.build()
    }
}

// =============================================================================
// Tests
// =============================================================================
