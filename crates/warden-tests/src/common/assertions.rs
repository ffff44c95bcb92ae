// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Custom Assertions
//!
//! Assertion helpers producing readable failures for evaluation results
//! and guard outcomes.

use warden_core::{DenyReason, Evaluation};
use warden_guard::GuardOutcome;

/// Asserts that an evaluation granted access.
#[track_caller]
pub fn assert_allowed(evaluation: &Evaluation) {
    assert!(
        evaluation.is_allowed(),
        "expected access granted, got denial: {:?}",
        evaluation.deny
    );
    assert!(evaluation.is_authenticated);
    assert!(evaluation.has_permission);
}

/// Asserts that an evaluation denied access for the given reason.
#[track_caller]
pub fn assert_denied(evaluation: &Evaluation, reason: DenyReason) {
    assert!(
        !evaluation.has_permission,
        "expected denial {:?}, got access granted",
        reason
    );
    assert_eq!(
        evaluation.deny,
        Some(reason),
        "denied for the wrong reason"
    );
    assert_eq!(
        evaluation.is_authenticated,
        !reason.requires_login(),
        "authentication flag inconsistent with denial reason"
    );
}

/// Asserts that a guard outcome redirects to the given target.
#[track_caller]
pub fn assert_redirects_to(outcome: &GuardOutcome, target: &str) {
    match &outcome.redirect {
        Some(redirect) => assert_eq!(redirect.target, target, "wrong redirect target"),
        None => panic!("expected redirect to '{}', got none", target),
    }
}
