// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Declarative permission requirements attached to protected resources.

use serde::{Deserialize, Serialize};

// =============================================================================
// AccessAction
// =============================================================================

/// The kind of access being attempted against a resource.
///
/// Selects which resource-specific threshold applies when a policy carries a
/// [`ResourceRule`]. Plain page views evaluate as [`AccessAction::Read`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessAction {
    /// Reading or viewing a resource.
    Read,
    /// Writing to or acting on a resource.
    Write,
}

impl AccessAction {
    /// Returns the action name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessAction::Read => "read",
            AccessAction::Write => "write",
        }
    }
}

impl Default for AccessAction {
    fn default() -> Self {
        AccessAction::Read
    }
}

impl std::fmt::Display for AccessAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// ResourceRule
// =============================================================================

/// Per-resource read/write level thresholds.
///
/// A threshold left as `None` means "no resource-specific override" for that
/// action, never a zero threshold; the evaluation falls back to the policy's
/// base `required_level`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRule {
    /// Level required to read the resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_level: Option<u32>,
    /// Level required to write to the resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write_level: Option<u32>,
}

impl ResourceRule {
    /// Creates a rule with both thresholds set.
    pub fn new(read_level: u32, write_level: u32) -> Self {
        Self {
            read_level: Some(read_level),
            write_level: Some(write_level),
        }
    }

    /// Creates a write-only rule.
    pub fn write_only(write_level: u32) -> Self {
        Self {
            read_level: None,
            write_level: Some(write_level),
        }
    }

    /// Returns the threshold for the given action, if declared.
    pub fn threshold_for(&self, action: AccessAction) -> Option<u32> {
        match action {
            AccessAction::Read => self.read_level,
            AccessAction::Write => self.write_level,
        }
    }
}

// =============================================================================
// PermissionPolicy
// =============================================================================

/// A declarative protection requirement for a resource.
///
/// Constructed by the caller (a page, an action, configuration) and read-only
/// to the evaluator. Policies are never mutated after construction within one
/// evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionPolicy {
    /// Minimum level required. Defaults to 0 (public).
    #[serde(default)]
    pub required_level: u32,
    /// When set, only administrative roles may pass.
    #[serde(default)]
    pub admin_only: bool,
    /// Optional per-resource read/write thresholds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<ResourceRule>,
}

/// Where an effective level threshold came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelSource {
    /// The policy's base `required_level`. Administrative roles bypass it.
    Base,
    /// An explicit resource rule. Binds every role, including admins.
    Resource,
}

/// An effective level threshold resolved for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelRequirement {
    /// The threshold an identity level is compared against (inclusive).
    pub level: u32,
    /// Which policy field the threshold came from.
    pub source: LevelSource,
}

impl PermissionPolicy {
    /// Creates a policy with no requirements (public resource).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a policy requiring a minimum level.
    pub fn min_level(required_level: u32) -> Self {
        Self {
            required_level,
            ..Self::default()
        }
    }

    /// Creates an admin-only policy.
    pub fn admin_only() -> Self {
        Self {
            admin_only: true,
            ..Self::default()
        }
    }

    /// Creates a policy builder.
    pub fn builder() -> PolicyBuilder {
        PolicyBuilder::new()
    }

    /// Resolves the effective level requirement for the given action.
    ///
    /// A declared resource threshold for the action wins; otherwise the base
    /// `required_level` applies.
    pub fn effective_requirement(&self, action: AccessAction) -> LevelRequirement {
        if let Some(level) = self
            .resource
            .as_ref()
            .and_then(|rule| rule.threshold_for(action))
        {
            return LevelRequirement {
                level,
                source: LevelSource::Resource,
            };
        }

        LevelRequirement {
            level: self.required_level,
            source: LevelSource::Base,
        }
    }

    /// Returns `true` if the policy imposes no requirement at all.
    pub fn is_public(&self) -> bool {
        !self.admin_only && self.required_level == 0 && self.resource.is_none()
    }
}

// =============================================================================
// PolicyBuilder
// =============================================================================

/// Builder for constructing [`PermissionPolicy`] values.
#[derive(Debug, Clone, Default)]
pub struct PolicyBuilder {
    required_level: u32,
    admin_only: bool,
    read_level: Option<u32>,
    write_level: Option<u32>,
}

impl PolicyBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum required level.
    pub fn required_level(mut self, level: u32) -> Self {
        self.required_level = level;
        self
    }

    /// Restricts the resource to administrative roles.
    pub fn admin_only(mut self, admin_only: bool) -> Self {
        self.admin_only = admin_only;
        self
    }

    /// Sets a resource-specific read threshold.
    pub fn read_level(mut self, level: u32) -> Self {
        self.read_level = Some(level);
        self
    }

    /// Sets a resource-specific write threshold.
    pub fn write_level(mut self, level: u32) -> Self {
        self.write_level = Some(level);
        self
    }

    /// Builds the policy.
    ///
    /// A `resource` rule is only attached if at least one resource threshold
    /// was declared.
    pub fn build(self) -> PermissionPolicy {
        let resource = if self.read_level.is_some() || self.write_level.is_some() {
            Some(ResourceRule {
                read_level: self.read_level,
                write_level: self.write_level,
            })
        } else {
            None
        };

        PermissionPolicy {
            required_level: self.required_level,
            admin_only: self.admin_only,
            resource,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
