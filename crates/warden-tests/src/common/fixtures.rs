// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Fixtures
//!
//! Pre-built identities, policies, and configuration documents for
//! consistent testing.

use warden_core::{Identity, PermissionPolicy, Role};

// =============================================================================
// Identity Fixtures
// =============================================================================

/// Pre-built identities.
pub struct IdentityFixtures;

impl IdentityFixtures {
    /// A regular member at level 1.
    pub fn member() -> Identity {
        Identity::new("user-member", 1, Role::User)
    }

    /// A user at a specific level.
    pub fn user_at_level(level: u32) -> Identity {
        Identity::new(format!("user-level-{}", level), level, Role::User)
    }

    /// A staff identity at level 3.
    pub fn staff() -> Identity {
        Identity::new("user-staff", 3, Role::Staff)
    }

    /// A moderator at level 5.
    pub fn moderator() -> Identity {
        Identity::new("user-moderator", 5, Role::Moderator)
    }

    /// An administrator at level 0. Any access it gains comes from role
    /// bypass, never from level.
    pub fn admin() -> Identity {
        Identity::new("user-admin", 0, Role::Admin)
    }

    /// A super administrator at level 0.
    pub fn super_admin() -> Identity {
        Identity::new("user-super", 0, Role::SuperAdmin)
    }

    /// A member whose session expired an hour ago.
    pub fn expired_member() -> Identity {
        Identity::builder("user-expired")
            .level(1)
            .role(Role::User)
            .expires_in_secs(-3600)
            .build()
    }

    /// A member whose session expires an hour from now.
    pub fn fresh_member() -> Identity {
        Identity::builder("user-fresh")
            .level(1)
            .role(Role::User)
            .expires_in_secs(3600)
            .build()
    }
}

// =============================================================================
// Policy Fixtures
// =============================================================================

/// Pre-built permission policies.
pub struct PolicyFixtures;

impl PolicyFixtures {
    /// No requirements at all.
    pub fn public() -> PermissionPolicy {
        PermissionPolicy::new()
    }

    /// Level 1 members and above.
    pub fn members_only() -> PermissionPolicy {
        PermissionPolicy::min_level(1)
    }

    /// Administrative roles only.
    pub fn admin_console() -> PermissionPolicy {
        PermissionPolicy::admin_only()
    }

    /// Board readable at level 1, writable at level 3.
    pub fn board() -> PermissionPolicy {
        PermissionPolicy::builder()
            .read_level(1)
            .write_level(3)
            .build()
    }

    /// Resource rule with explicit thresholds that bind admins too.
    pub fn restricted_archive() -> PermissionPolicy {
        PermissionPolicy::builder()
            .read_level(7)
            .write_level(9)
            .build()
    }
}

// =============================================================================
// Config Fixtures
// =============================================================================

/// Configuration documents in each supported format.
pub struct ConfigFixtures;

impl ConfigFixtures {
    /// A complete YAML configuration.
    pub fn yaml() -> &'static str {
        r#"
gate:
  login_path: /authentication/login
  fallback_path: /
  oracle_timeout_ms: 3000
  protected:
    - /mypage/*
    - /admin/*
routes:
  - pattern: /mypage/*
    auth_only: true
  - pattern: /admin/*
    admin_only: true
  - pattern: /boards/*
    read_level: 1
    write_level: 3
"#
    }

    /// The same configuration in TOML.
    pub fn toml() -> &'static str {
        r#"
[gate]
login_path = "/authentication/login"
fallback_path = "/"
oracle_timeout_ms = 3000
protected = ["/mypage/*", "/admin/*"]

[[routes]]
pattern = "/mypage/*"
auth_only = true

[[routes]]
pattern = "/admin/*"
admin_only = true

[[routes]]
pattern = "/boards/*"
read_level = 1
write_level = 3
"#
    }

    /// The same configuration in JSON.
    pub fn json() -> &'static str {
        r#"{
  "gate": {
    "login_path": "/authentication/login",
    "fallback_path": "/",
    "oracle_timeout_ms": 3000,
    "protected": ["/mypage/*", "/admin/*"]
  },
  "routes": [
    {"pattern": "/mypage/*", "auth_only": true},
    {"pattern": "/admin/*", "admin_only": true},
    {"pattern": "/boards/*", "read_level": 1, "write_level": 3}
  ]
}"#
    }
}
