// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Mock Implementations
//!
//! Mock implementations for testing warden components in isolation.
//!
//! ## Design Principles
//!
//! - Configurable behavior for different test scenarios
//! - Recording of interactions for verification
//! - Thread-safe for concurrent testing
//! - Easy to set up error injection

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use warden_core::{
    AccessNotice, Identity, NoticeSink, OracleError, SessionContext, SessionOracle,
};

// =============================================================================
// Mock Session Oracle
// =============================================================================

/// A configurable mock session oracle for testing.
#[derive(Debug)]
pub struct MockSessionOracle {
    /// The identity to resolve. `None` resolves as anonymous.
    identity: Mutex<Option<Identity>>,

    /// Simulated resolution latency.
    latency: Mutex<Duration>,

    /// Force next query to fail.
    fail_next: AtomicBool,

    /// Force all queries to fail.
    fail_all: AtomicBool,

    /// Query count for verification.
    query_count: AtomicU64,

    /// Contexts seen, for verification.
    contexts: Mutex<Vec<SessionContext>>,
}

impl MockSessionOracle {
    /// Create a mock oracle resolving no identity.
    pub fn anonymous() -> Self {
        Self {
            identity: Mutex::new(None),
            latency: Mutex::new(Duration::ZERO),
            fail_next: AtomicBool::new(false),
            fail_all: AtomicBool::new(false),
            query_count: AtomicU64::new(0),
            contexts: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock oracle resolving the given identity.
    pub fn with_identity(identity: Identity) -> Self {
        let oracle = Self::anonymous();
        *oracle.identity.lock() = Some(identity);
        oracle
    }

    /// Shared constructor for gate wiring.
    pub fn shared(identity: Option<Identity>) -> Arc<Self> {
        let oracle = Self::anonymous();
        *oracle.identity.lock() = identity;
        Arc::new(oracle)
    }

    /// Replace the resolved identity.
    pub fn set_identity(&self, identity: Option<Identity>) {
        *self.identity.lock() = identity;
    }

    /// Set simulated resolution latency.
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock() = latency;
    }

    /// Force the next query to fail with a transport error.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Force all queries to fail with a transport error.
    pub fn fail_all(&self, fail: bool) {
        self.fail_all.store(fail, Ordering::SeqCst);
    }

    /// Number of queries the oracle has served.
    pub fn query_count(&self) -> u64 {
        self.query_count.load(Ordering::SeqCst)
    }

    /// Contexts the oracle has seen.
    pub fn contexts(&self) -> Vec<SessionContext> {
        self.contexts.lock().clone()
    }
}

#[async_trait]
impl SessionOracle for MockSessionOracle {
    async fn current_identity(
        &self,
        ctx: &SessionContext,
    ) -> Result<Option<Identity>, OracleError> {
        self.query_count.fetch_add(1, Ordering::SeqCst);
        self.contexts.lock().push(ctx.clone());

        let latency = *self.latency.lock();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        if self.fail_all.load(Ordering::SeqCst) || self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(OracleError::Transport("mock transport failure".to_string()));
        }

        Ok(self.identity.lock().clone())
    }
}

// =============================================================================
// Collecting Notice Sink
// =============================================================================

/// A notice sink recording every notice it receives.
#[derive(Debug, Default)]
pub struct CollectingNoticeSink {
    notices: Mutex<Vec<AccessNotice>>,
}

impl CollectingNoticeSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared constructor for gate wiring.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Notices received so far.
    pub fn notices(&self) -> Vec<AccessNotice> {
        self.notices.lock().clone()
    }

    /// Number of notices received.
    pub fn len(&self) -> usize {
        self.notices.lock().len()
    }

    /// Returns `true` if no notices were received.
    pub fn is_empty(&self) -> bool {
        self.notices.lock().is_empty()
    }
}

impl NoticeSink for CollectingNoticeSink {
    fn notify(&self, notice: AccessNotice) {
        self.notices.lock().push(notice);
    }
}
