// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Config Integration Tests
//!
//! Integration tests for warden-config functionality including:
//!
//! - Configuration parsing (YAML, TOML, JSON)
//! - Validation rules
//! - Conversion into runtime route tables and redirect policies
//!
//! ## Test Categories
//!
//! - `test_config_parse_*`: Format parsing tests
//! - `test_config_validate_*`: Validation tests
//! - `test_config_runtime_*`: Runtime conversion tests

use std::io::Write;
use std::time::Duration;

use warden_config::{ConfigError, ConfigFormat, ConfigLoader};
use warden_core::RouteProtection;

use warden_tests::common::fixtures::ConfigFixtures;
use warden_tests::common::init_test_logging;

fn loader() -> ConfigLoader {
    ConfigLoader::new().with_env_vars(false)
}

// =============================================================================
// Parsing Tests
// =============================================================================

#[tokio::test]
async fn test_config_parse_all_formats_agree() {
    init_test_logging();

    let yaml = loader()
        .load_from_str(ConfigFixtures::yaml(), ConfigFormat::Yaml)
        .unwrap();
    let toml = loader()
        .load_from_str(ConfigFixtures::toml(), ConfigFormat::Toml)
        .unwrap();
    let json = loader()
        .load_from_str(ConfigFixtures::json(), ConfigFormat::Json)
        .unwrap();

    assert_eq!(yaml, toml);
    assert_eq!(yaml, json);
}

#[tokio::test]
async fn test_config_parse_from_file() {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .unwrap();
    file.write_all(ConfigFixtures::yaml().as_bytes()).unwrap();

    let config = loader().load(file.path()).unwrap();
    assert_eq!(config.gate.oracle_timeout_ms, 3000);
    assert_eq!(config.routes.len(), 3);
}

#[tokio::test]
async fn test_config_parse_minimal_document_uses_defaults() {
    let config = loader()
        .load_from_str("routes: []", ConfigFormat::Yaml)
        .unwrap();

    assert_eq!(config.gate.login_path, "/authentication/login");
    assert_eq!(config.gate.fallback_path, "/");
    assert_eq!(config.gate.oracle_timeout_ms, 5000);
    assert!(config.gate.protected.is_empty());
}

#[tokio::test]
async fn test_config_parse_rejects_unknown_fields() {
    let result = loader().load_from_str("gates: {}", ConfigFormat::Yaml);
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

// =============================================================================
// Validation Tests
// =============================================================================

#[tokio::test]
async fn test_config_validate_relative_login_path() {
    let result = loader().load_from_str(
        "gate:\n  login_path: authentication/login\n",
        ConfigFormat::Yaml,
    );
    assert!(matches!(result, Err(ConfigError::Validation { .. })));
}

#[tokio::test]
async fn test_config_validate_auth_only_conflict() {
    let doc = r#"
routes:
  - pattern: /mypage/*
    auth_only: true
    admin_only: true
"#;
    let result = loader().load_from_str(doc, ConfigFormat::Yaml);
    assert!(matches!(result, Err(ConfigError::Validation { .. })));
}

#[tokio::test]
async fn test_config_validate_relative_route_pattern() {
    let doc = "routes:\n  - pattern: admin\n";
    let result = loader().load_from_str(doc, ConfigFormat::Yaml);
    assert!(matches!(result, Err(ConfigError::Validation { .. })));
}

// =============================================================================
// Runtime Conversion Tests
// =============================================================================

#[tokio::test]
async fn test_config_runtime_route_table() {
    let config = loader()
        .load_from_str(ConfigFixtures::yaml(), ConfigFormat::Yaml)
        .unwrap();
    let table = config.route_table();

    assert_eq!(
        table.lookup("/mypage/settings"),
        Some(&RouteProtection::AuthOnly)
    );
    match table.lookup("/boards/free") {
        Some(RouteProtection::Policy(policy)) => {
            let resource = policy.resource.expect("resource rule");
            assert_eq!(resource.read_level, Some(1));
            assert_eq!(resource.write_level, Some(3));
        }
        other => panic!("unexpected protection: {:?}", other),
    }
}

#[tokio::test]
async fn test_config_runtime_redirect_policy_and_timeout() {
    let config = loader()
        .load_from_str(ConfigFixtures::yaml(), ConfigFormat::Yaml)
        .unwrap();

    let redirects = config.redirect_policy();
    assert_eq!(redirects.login_path, "/authentication/login");
    assert_eq!(redirects.fallback_path, "/");
    assert_eq!(config.oracle_timeout(), Duration::from_millis(3000));
}
