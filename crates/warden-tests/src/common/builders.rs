// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Builders
//!
//! Builder patterns for wiring gates under test to mock collaborators.

use std::sync::Arc;
use std::time::Duration;

use warden_core::{AccessAction, Identity, PermissionPolicy, SessionContext};
use warden_guard::NavigationGate;

use super::mocks::{CollectingNoticeSink, MockSessionOracle};

// =============================================================================
// TestGateBuilder
// =============================================================================

/// Builds a [`NavigationGate`] wired to a mock oracle and a collecting
/// notice sink, handing both back for verification.
pub struct TestGateBuilder {
    identity: Option<Identity>,
    policy: PermissionPolicy,
    action: AccessAction,
    path: Option<String>,
    deadline: Option<Duration>,
    notify_on_error: bool,
    redirect_on_error: Option<String>,
}

/// The gate under test plus its mock collaborators.
pub struct TestGate {
    /// The gate under test.
    pub gate: NavigationGate,
    /// The oracle behind the gate.
    pub oracle: Arc<MockSessionOracle>,
    /// The sink receiving denial notices.
    pub notices: Arc<CollectingNoticeSink>,
}

impl TestGateBuilder {
    /// Creates a builder with a public policy and no identity.
    pub fn new() -> Self {
        Self {
            identity: None,
            policy: PermissionPolicy::new(),
            action: AccessAction::Read,
            path: None,
            deadline: None,
            notify_on_error: false,
            redirect_on_error: None,
        }
    }

    /// Sets the identity the oracle resolves.
    pub fn identity(mut self, identity: Identity) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Sets the policy under test.
    pub fn policy(mut self, policy: PermissionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the evaluated action.
    pub fn action(mut self, action: AccessAction) -> Self {
        self.action = action;
        self
    }

    /// Sets the guarded path.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the oracle deadline.
    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Enables denial notices.
    pub fn notify_on_error(mut self) -> Self {
        self.notify_on_error = true;
        self
    }

    /// Sets an explicit redirect target for denials.
    pub fn redirect_on_error(mut self, target: impl Into<String>) -> Self {
        self.redirect_on_error = Some(target.into());
        self
    }

    /// Builds the gate and its collaborators.
    pub fn build(self) -> TestGate {
        let oracle = MockSessionOracle::shared(self.identity);
        let notices = CollectingNoticeSink::shared();

        let mut context = SessionContext::new();
        if let Some(path) = self.path {
            context = context.with_path(path);
        }

        let mut builder = NavigationGate::builder()
            .oracle(oracle.clone())
            .policy(self.policy)
            .action(self.action)
            .context(context)
            .notify_on_error(self.notify_on_error)
            .notice_sink(notices.clone());
        if let Some(deadline) = self.deadline {
            builder = builder.deadline(deadline);
        }
        if let Some(target) = self.redirect_on_error {
            builder = builder.redirect_on_error(target);
        }

        TestGate {
            gate: builder.build().expect("gate under test"),
            oracle,
            notices,
        }
    }
}

impl Default for TestGateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
