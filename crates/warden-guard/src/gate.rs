// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Client-side navigation gate.
//!
//! A [`NavigationGate`] composes the session oracle and the evaluator into a
//! single decision for one guarded scope: a page about to render, a
//! privileged action about to be submitted. Higher-level guard variants
//! (admin-only, minimum-level, board-level) differ only in the policy values
//! they pre-fill; they all flow through the same [`NavigationGate::guard`]
//! and [`NavigationGate::check_permission`], which keeps precedence rules
//! identical across variants.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use warden_core::{
    evaluate, resolve_fail_closed, AccessAction, AccessNotice, Evaluation, DenyReason,
    NoOpNoticeSink, NoticeSink, PermissionPolicy, Redirect, RedirectPolicy, SessionContext,
    SessionOracle, DEFAULT_ORACLE_TIMEOUT,
};

use crate::error::{GuardError, GuardResult};
use crate::session::GuardSession;

// =============================================================================
// GuardOptions
// =============================================================================

/// Per-gate behavior switches.
#[derive(Debug, Clone, Default)]
pub struct GuardOptions {
    /// Explicit redirect target overriding the default denial mapping.
    pub redirect_on_error: Option<String>,
    /// Emit one [`AccessNotice`] per resolved denial.
    pub notify_on_error: bool,
}

// =============================================================================
// GuardOutcome
// =============================================================================

/// The decision produced by [`NavigationGate::guard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardOutcome {
    /// The evaluation backing the decision.
    pub evaluation: Evaluation,
    /// Where the caller should send the user on denial, if anywhere.
    pub redirect: Option<Redirect>,
}

impl GuardOutcome {
    /// Returns `true` if the scope may proceed.
    pub fn is_allowed(&self) -> bool {
        self.evaluation.is_allowed()
    }
}

// =============================================================================
// NavigationGate
// =============================================================================

/// Gate for in-app transitions and programmatic permission checks.
pub struct NavigationGate {
    oracle: Arc<dyn SessionOracle>,
    context: SessionContext,
    policy: PermissionPolicy,
    action: AccessAction,
    options: GuardOptions,
    redirects: RedirectPolicy,
    notices: Arc<dyn NoticeSink>,
    deadline: Duration,
    session: GuardSession,
    last_notified: AtomicU64,
}

impl NavigationGate {
    /// Creates a gate with default options for the given policy.
    pub fn with_policy(oracle: Arc<dyn SessionOracle>, policy: PermissionPolicy) -> Self {
        Self {
            oracle,
            context: SessionContext::new(),
            policy,
            action: AccessAction::default(),
            options: GuardOptions::default(),
            redirects: RedirectPolicy::default(),
            notices: Arc::new(NoOpNoticeSink),
            deadline: DEFAULT_ORACLE_TIMEOUT,
            session: GuardSession::new(),
            last_notified: AtomicU64::new(0),
        }
    }

    /// Creates a builder.
    pub fn builder() -> NavigationGateBuilder {
        NavigationGateBuilder::new()
    }

    /// Returns the session state machine for this gate.
    pub fn session(&self) -> &GuardSession {
        &self.session
    }

    /// Returns the policy currently guarding the scope.
    pub fn policy(&self) -> &PermissionPolicy {
        &self.policy
    }

    /// Swaps the policy and resets the session to `Idle`.
    ///
    /// The next check starts fresh; a check in flight under the old policy is
    /// discarded on arrival.
    pub fn set_policy(&mut self, policy: PermissionPolicy) {
        self.policy = policy;
        self.session.reset();
        self.last_notified.store(0, Ordering::Relaxed);
    }

    /// Synchronously reads the latest decision.
    ///
    /// Before the first resolved check this fails closed: the outcome reports
    /// [`DenyReason::NotLoggedIn`] without emitting a notice. On a resolved
    /// denial the default redirect mapping applies (or the configured
    /// override), and at most one notice is emitted per resolution when
    /// `notify_on_error` is set.
    pub fn guard(&self) -> GuardOutcome {
        let (generation, evaluation) = match self.session.latest_check() {
            Some(check) => (check.generation, check.evaluation),
            None => (0, Evaluation::denied(DenyReason::NotLoggedIn)),
        };

        let redirect = evaluation.deny.map(|reason| {
            Redirect::for_denial(
                &self.redirects,
                reason,
                self.context.path.as_deref(),
                self.options.redirect_on_error.as_deref(),
            )
        });

        if let Some(reason) = evaluation.deny {
            if self.options.notify_on_error && generation != 0 {
                let previous = self.last_notified.swap(generation, Ordering::Relaxed);
                if previous != generation {
                    self.notices.notify(AccessNotice::for_reason(reason));
                }
            }
        }

        GuardOutcome {
            evaluation,
            redirect,
        }
    }

    /// Forces a fresh check and returns the full evaluation.
    ///
    /// Bypasses any cached identity: the oracle is queried again (bounded by
    /// the configured deadline; a timeout fails closed to `NotLoggedIn`),
    /// the evaluator re-runs, and the session resolves. Concurrent callers
    /// coalesce into a single oracle query.
    pub async fn check(&self) -> Evaluation {
        let check_id = Uuid::now_v7();
        let evaluation = self
            .session
            .resolve(|| async {
                let identity =
                    resolve_fail_closed(self.oracle.as_ref(), &self.context, self.deadline).await;
                evaluate(identity.as_ref(), &self.policy, self.action)
            })
            .await;

        tracing::debug!(
            check_id = %check_id,
            allowed = evaluation.has_permission,
            deny = evaluation.deny.map(|r| r.as_str()),
            "permission check resolved"
        );
        evaluation
    }

    /// Forces a fresh check and returns whether access is granted.
    ///
    /// The on-demand verification used right before submitting a privileged
    /// action.
    pub async fn check_permission(&self) -> bool {
        self.check().await.has_permission
    }
}

impl std::fmt::Debug for NavigationGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationGate")
            .field("policy", &self.policy)
            .field("action", &self.action)
            .field("phase", &self.session.phase())
            .finish()
    }
}

// =============================================================================
// NavigationGateBuilder
// =============================================================================

/// Builder for constructing [`NavigationGate`] values.
#[derive(Default)]
pub struct NavigationGateBuilder {
    oracle: Option<Arc<dyn SessionOracle>>,
    context: SessionContext,
    policy: PermissionPolicy,
    action: AccessAction,
    options: GuardOptions,
    redirects: RedirectPolicy,
    notices: Option<Arc<dyn NoticeSink>>,
    deadline: Option<Duration>,
}

impl NavigationGateBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the session oracle (required).
    pub fn oracle(mut self, oracle: Arc<dyn SessionOracle>) -> Self {
        self.oracle = Some(oracle);
        self
    }

    /// Sets the scope's session context.
    pub fn context(mut self, context: SessionContext) -> Self {
        self.context = context;
        self
    }

    /// Sets the permission policy.
    pub fn policy(mut self, policy: PermissionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the access action evaluated against resource thresholds.
    pub fn action(mut self, action: AccessAction) -> Self {
        self.action = action;
        self
    }

    /// Sets an explicit redirect target for denials.
    pub fn redirect_on_error(mut self, target: impl Into<String>) -> Self {
        self.options.redirect_on_error = Some(target.into());
        self
    }

    /// Enables denial notices.
    pub fn notify_on_error(mut self, notify: bool) -> Self {
        self.options.notify_on_error = notify;
        self
    }

    /// Sets the redirect policy.
    pub fn redirect_policy(mut self, redirects: RedirectPolicy) -> Self {
        self.redirects = redirects;
        self
    }

    /// Sets the notice sink.
    pub fn notice_sink(mut self, notices: Arc<dyn NoticeSink>) -> Self {
        self.notices = Some(notices);
        self
    }

    /// Sets the oracle deadline.
    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Builds the gate.
    pub fn build(self) -> GuardResult<NavigationGate> {
        let oracle = self.oracle.ok_or(GuardError::MissingOracle)?;
        let mut gate = NavigationGate::with_policy(oracle, self.policy);
        gate.context = self.context;
        gate.action = self.action;
        gate.options = self.options;
        gate.redirects = self.redirects;
        if let Some(notices) = self.notices {
            gate.notices = notices;
        }
        if let Some(deadline) = self.deadline {
            gate.deadline = deadline;
        }
        Ok(gate)
    }
}

// =============================================================================
// Guard variants
// =============================================================================

/// Gate for admin-only resources.
pub fn admin_gate(oracle: Arc<dyn SessionOracle>) -> NavigationGate {
    NavigationGate::with_policy(oracle, PermissionPolicy::admin_only())
}

/// Gate requiring a minimum level.
pub fn level_gate(oracle: Arc<dyn SessionOracle>, required_level: u32) -> NavigationGate {
    NavigationGate::with_policy(oracle, PermissionPolicy::min_level(required_level))
}

/// Gate for a board with distinct read/write thresholds.
pub fn board_gate(
    oracle: Arc<dyn SessionOracle>,
    read_level: u32,
    write_level: u32,
    action: AccessAction,
) -> NavigationGate {
    let mut gate = NavigationGate::with_policy(
        oracle,
        PermissionPolicy::builder()
            .read_level(read_level)
            .write_level(write_level)
            .build(),
    );
    gate.action = action;
    gate
}

// =============================================================================
// Tests
// =============================================================================
