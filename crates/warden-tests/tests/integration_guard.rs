// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Guard Integration Tests
//!
//! Integration tests for warden-guard functionality including:
//!
//! - Navigation gate lifecycle and fail-closed defaults
//! - Concurrent check coalescing
//! - Oracle timeout and failure handling
//! - Denial notification delivery
//!
//! ## Test Categories
//!
//! - `test_gate_*`: Navigation gate tests
//! - `test_coalesce_*`: Concurrent check tests
//! - `test_notify_*`: Notification tests

use std::sync::Arc;
use std::time::Duration;

use warden_core::{AccessAction, DenyReason, PermissionPolicy};
use warden_guard::GuardPhase;

use warden_tests::common::assertions::{assert_allowed, assert_denied, assert_redirects_to};
use warden_tests::common::builders::TestGateBuilder;
use warden_tests::common::fixtures::{IdentityFixtures, PolicyFixtures};
use warden_tests::common::init_test_logging;

// =============================================================================
// Navigation Gate Tests
// =============================================================================

#[tokio::test]
async fn test_gate_defaults_closed_before_first_check() {
    init_test_logging();

    let test = TestGateBuilder::new()
        .identity(IdentityFixtures::admin())
        .policy(PolicyFixtures::admin_console())
        .path("/admin/page")
        .build();

    // No check has run, so even a would-be-admitted identity is denied.
    let outcome = test.gate.guard();
    assert_denied(&outcome.evaluation, DenyReason::NotLoggedIn);
    assert_redirects_to(&outcome, "/authentication/login?redirect=%2Fadmin%2Fpage");
    assert_eq!(test.oracle.query_count(), 0);
}

#[tokio::test]
async fn test_gate_admits_after_successful_check() {
    let test = TestGateBuilder::new()
        .identity(IdentityFixtures::admin())
        .policy(PolicyFixtures::admin_console())
        .build();

    assert!(test.gate.check_permission().await);

    let outcome = test.gate.guard();
    assert_allowed(&outcome.evaluation);
    assert!(outcome.redirect.is_none());
    assert_eq!(test.gate.session().phase(), GuardPhase::Resolved);
}

#[tokio::test]
async fn test_gate_expired_session_redirects_to_login() {
    let test = TestGateBuilder::new()
        .identity(IdentityFixtures::expired_member())
        .policy(PolicyFixtures::members_only())
        .path("/mypage/settings")
        .build();

    let evaluation = test.gate.check().await;
    assert_denied(&evaluation, DenyReason::TokenExpired);

    let outcome = test.gate.guard();
    assert_redirects_to(
        &outcome,
        "/authentication/login?redirect=%2Fmypage%2Fsettings",
    );
}

#[tokio::test]
async fn test_gate_insufficient_level_falls_back() {
    let test = TestGateBuilder::new()
        .identity(IdentityFixtures::member())
        .policy(PermissionPolicy::min_level(9))
        .path("/restricted")
        .build();

    test.gate.check().await;
    let outcome = test.gate.guard();
    assert_denied(&outcome.evaluation, DenyReason::InsufficientLevel);
    assert_redirects_to(&outcome, "/");
}

#[tokio::test]
async fn test_gate_write_action_uses_write_threshold() {
    let test = TestGateBuilder::new()
        .identity(IdentityFixtures::member())
        .policy(PolicyFixtures::board())
        .action(AccessAction::Write)
        .build();

    assert!(!test.gate.check_permission().await);
    assert_denied(
        &test.gate.guard().evaluation,
        DenyReason::InsufficientLevel,
    );
}

#[tokio::test]
async fn test_gate_oracle_failure_fails_closed() {
    let test = TestGateBuilder::new()
        .identity(IdentityFixtures::admin())
        .policy(PolicyFixtures::admin_console())
        .build();
    test.oracle.fail_all(true);

    assert!(!test.gate.check_permission().await);
    assert_denied(&test.gate.guard().evaluation, DenyReason::NotLoggedIn);
}

#[tokio::test(start_paused = true)]
async fn test_gate_oracle_timeout_fails_closed() {
    let test = TestGateBuilder::new()
        .identity(IdentityFixtures::admin())
        .policy(PolicyFixtures::admin_console())
        .deadline(Duration::from_millis(100))
        .build();
    test.oracle.set_latency(Duration::from_millis(500));

    let evaluation = test.gate.check().await;
    assert_denied(&evaluation, DenyReason::NotLoggedIn);

    // One query went out; the slow answer was abandoned, not retried.
    assert_eq!(test.oracle.query_count(), 1);
}

#[tokio::test]
async fn test_gate_set_policy_discards_previous_resolution() {
    let mut test = TestGateBuilder::new()
        .identity(IdentityFixtures::member())
        .policy(PolicyFixtures::members_only())
        .build();

    assert!(test.gate.check_permission().await);

    test.gate.set_policy(PolicyFixtures::admin_console());
    assert_eq!(test.gate.session().phase(), GuardPhase::Idle);

    // Until re-checked, the gate is closed again.
    assert_denied(&test.gate.guard().evaluation, DenyReason::NotLoggedIn);

    assert!(!test.gate.check_permission().await);
    assert_denied(&test.gate.guard().evaluation, DenyReason::AdminOnly);
}

// =============================================================================
// Coalescing Tests
// =============================================================================

#[tokio::test]
async fn test_coalesce_concurrent_checks_share_one_query() {
    let test = TestGateBuilder::new()
        .identity(IdentityFixtures::member())
        .policy(PolicyFixtures::members_only())
        .build();
    test.oracle.set_latency(Duration::from_millis(20));

    let gate = Arc::new(test.gate);
    let (a, b, c) = tokio::join!(
        gate.check_permission(),
        gate.check_permission(),
        gate.check_permission(),
    );

    assert!(a && b && c);
    assert_eq!(test.oracle.query_count(), 1);
}

#[tokio::test]
async fn test_coalesce_sequential_checks_query_again() {
    let test = TestGateBuilder::new()
        .identity(IdentityFixtures::member())
        .policy(PolicyFixtures::members_only())
        .build();

    assert!(test.gate.check_permission().await);
    assert!(test.gate.check_permission().await);
    assert_eq!(test.oracle.query_count(), 2);
}

#[tokio::test]
async fn test_coalesce_identity_change_visible_to_next_check() {
    let test = TestGateBuilder::new()
        .identity(IdentityFixtures::member())
        .policy(PolicyFixtures::members_only())
        .build();

    assert!(test.gate.check_permission().await);

    test.oracle.set_identity(None);
    assert!(!test.gate.check_permission().await);
    assert_denied(&test.gate.guard().evaluation, DenyReason::NotLoggedIn);
}

// =============================================================================
// Notification Tests
// =============================================================================

#[tokio::test]
async fn test_notify_once_per_resolution() {
    let test = TestGateBuilder::new()
        .policy(PolicyFixtures::members_only())
        .notify_on_error()
        .build();

    test.gate.check().await;

    // Repeated guards against the same resolution emit a single notice.
    test.gate.guard();
    test.gate.guard();
    test.gate.guard();
    assert_eq!(test.notices.len(), 1);
    assert_eq!(test.notices.notices()[0].reason, DenyReason::NotLoggedIn);

    // A fresh resolution earns a fresh notice.
    test.gate.check().await;
    test.gate.guard();
    assert_eq!(test.notices.len(), 2);
}

#[tokio::test]
async fn test_notify_disabled_by_default() {
    let test = TestGateBuilder::new()
        .policy(PolicyFixtures::members_only())
        .build();

    test.gate.check().await;
    test.gate.guard();
    assert!(test.notices.is_empty());
}

#[tokio::test]
async fn test_notify_skipped_for_synthetic_default() {
    let test = TestGateBuilder::new()
        .policy(PolicyFixtures::members_only())
        .notify_on_error()
        .build();

    // No check has resolved; the fail-closed default is not a real denial.
    test.gate.guard();
    assert!(test.notices.is_empty());
}

#[tokio::test]
async fn test_notify_not_emitted_on_success() {
    let test = TestGateBuilder::new()
        .identity(IdentityFixtures::member())
        .policy(PolicyFixtures::members_only())
        .notify_on_error()
        .build();

    test.gate.check().await;
    test.gate.guard();
    assert!(test.notices.is_empty());
}
