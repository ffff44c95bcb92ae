// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Resolved principal identity and role definitions.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Role
// =============================================================================

/// Roles a resolved principal can carry.
///
/// Roles are ordered from least to most privileged. Only [`Role::Admin`] and
/// [`Role::SuperAdmin`] count as administrative roles for `admin_only`
/// policies; every other distinction is expressed through levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Unauthenticated visitor.
    Anonymous,
    /// Regular registered user.
    User,
    /// Staff member.
    Staff,
    /// Board or section manager.
    Manager,
    /// Content moderator.
    Moderator,
    /// Site administrator.
    Admin,
    /// Unrestricted administrator.
    SuperAdmin,
}

impl Role {
    /// Returns the role name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Anonymous => "anonymous",
            Role::User => "user",
            Role::Staff => "staff",
            Role::Manager => "manager",
            Role::Moderator => "moderator",
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
        }
    }

    /// Parses a role from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "anonymous" | "guest" => Some(Role::Anonymous),
            "user" | "member" => Some(Role::User),
            "staff" => Some(Role::Staff),
            "manager" => Some(Role::Manager),
            "moderator" | "mod" => Some(Role::Moderator),
            "admin" | "administrator" => Some(Role::Admin),
            "super_admin" | "superadmin" | "root" => Some(Role::SuperAdmin),
            _ => None,
        }
    }

    /// Returns all defined roles.
    pub fn all() -> &'static [Role] {
        &[
            Role::Anonymous,
            Role::User,
            Role::Staff,
            Role::Manager,
            Role::Moderator,
            Role::Admin,
            Role::SuperAdmin,
        ]
    }

    /// Returns `true` if this is an administrative role.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Anonymous
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Identity
// =============================================================================

/// A resolved, authenticated principal.
///
/// Produced by a session oracle, consumed by the evaluator. An `Identity` is
/// immutable for the duration of one guard evaluation and is never persisted
/// by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Principal identifier.
    pub id: String,
    /// Access level. Higher levels satisfy higher thresholds.
    #[serde(default)]
    pub level: u32,
    /// Principal role.
    #[serde(default)]
    pub role: Role,
    /// Session expiry. `None` means the oracle reported no expiry metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_expires_at: Option<DateTime<Utc>>,
}

impl Identity {
    /// Creates a new identity with no expiry metadata.
    pub fn new(id: impl Into<String>, level: u32, role: Role) -> Self {
        Self {
            id: id.into(),
            level,
            role,
            session_expires_at: None,
        }
    }

    /// Creates a builder for constructing identities.
    pub fn builder(id: impl Into<String>) -> IdentityBuilder {
        IdentityBuilder::new(id)
    }

    /// Returns `true` if the session expiry lies strictly in the past.
    ///
    /// An identity without expiry metadata never counts as expired; the
    /// oracle is trusted to have validated such sessions itself.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.session_expires_at {
            Some(expires_at) => expires_at < now,
            None => false,
        }
    }

    /// Returns `true` if the role is administrative.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Returns `true` if the identity meets the given level threshold.
    pub fn has_level(&self, required: u32) -> bool {
        self.level >= required
    }
}

// =============================================================================
// IdentityBuilder
// =============================================================================

/// Builder for constructing [`Identity`] values.
#[derive(Debug, Clone)]
pub struct IdentityBuilder {
    id: String,
    level: u32,
    role: Role,
    session_expires_at: Option<DateTime<Utc>>,
}

impl IdentityBuilder {
    /// Creates a new builder.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            level: 0,
            role: Role::User,
            session_expires_at: None,
        }
    }

    /// Sets the access level.
    pub fn level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    /// Sets the role.
    pub fn role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Sets the absolute session expiry.
    pub fn expires_at(mut self, at: DateTime<Utc>) -> Self {
        self.session_expires_at = Some(at);
        self
    }

    /// Sets the session expiry relative to now.
    pub fn expires_in_secs(mut self, secs: i64) -> Self {
        self.session_expires_at = Some(Utc::now() + Duration::seconds(secs));
        self
    }

    /// Builds the identity.
    pub fn build(self) -> Identity {
        Identity {
            id: self.id,
            level: self.level,
            role: self.role,
            session_expires_at: self.session_expires_at,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
