// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Configuration schema and loading for the access control stack.
//!
//! Deployments declare the request gate settings and per-route protection
//! rules in a YAML, TOML, or JSON file. [`ConfigLoader`] parses and
//! validates the file and applies `WARDEN_*` environment overrides; the
//! resulting [`WardenConfig`] converts directly into the runtime types the
//! gates consume (`RouteTable`, `RedirectPolicy`, the oracle deadline).
//!
//! # Example
//!
//! ```no_run
//! use warden_config::load_config;
//!
//! let config = load_config("warden.yaml").unwrap();
//! let routes = config.route_table();
//! let redirects = config.redirect_policy();
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod loader;
pub mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{load_config, ConfigFormat, ConfigLoader};
pub use schema::{GateConfig, RouteRuleConfig, WardenConfig, DEFAULT_ORACLE_TIMEOUT_MS};
