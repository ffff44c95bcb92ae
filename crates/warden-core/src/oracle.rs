// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Session oracle boundary.
//!
//! The oracle is the external collaborator that resolves "who is making this
//! request" — a session store, an identity provider client, anything that can
//! answer with an [`Identity`] or its absence. This crate consumes the oracle;
//! it never issues, refreshes, or stores tokens itself.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::OracleError;
use crate::identity::Identity;

/// Default bound on one oracle resolution.
pub const DEFAULT_ORACLE_TIMEOUT: Duration = Duration::from_millis(5000);

// =============================================================================
// SessionContext
// =============================================================================

/// Per-scope snapshot handed to the oracle.
///
/// The request gate fills this from request headers; the navigation gate
/// carries one snapshot for its guarded scope. The oracle decides which
/// fields it needs.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    /// Opaque session token, if the scope presented one.
    pub token: Option<String>,
    /// Client IP address, if known.
    pub client_ip: Option<IpAddr>,
    /// The path being accessed, used for return-to preservation and logging.
    pub path: Option<String>,
}

impl SessionContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the session token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the client IP.
    pub fn with_client_ip(mut self, ip: IpAddr) -> Self {
        self.client_ip = Some(ip);
        self
    }

    /// Sets the accessed path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

// =============================================================================
// SessionOracle
// =============================================================================

/// Resolves the current identity for a scope.
///
/// Implementations may fail with a transport error; callers must route
/// resolution through [`resolve_fail_closed`] so that failures and timeouts
/// degrade to "absent identity" instead of propagating.
#[async_trait]
pub trait SessionOracle: Send + Sync {
    /// Returns the authenticated identity for the context, or `None` when the
    /// scope carries no valid session.
    async fn current_identity(
        &self,
        ctx: &SessionContext,
    ) -> Result<Option<Identity>, OracleError>;
}

// =============================================================================
// resolve_fail_closed
// =============================================================================

/// Resolves an identity with a bounded deadline, failing closed.
///
/// Any oracle error and any timeout become `None`: under a backend outage the
/// caller sees an anonymous scope, never a raw error. This is the single
/// resolution path shared by the request gate and the navigation gate.
pub async fn resolve_fail_closed(
    oracle: &dyn SessionOracle,
    ctx: &SessionContext,
    deadline: Duration,
) -> Option<Identity> {
    match tokio::time::timeout(deadline, oracle.current_identity(ctx)).await {
        Ok(Ok(identity)) => identity,
        Ok(Err(error)) => {
            tracing::warn!(error = %error, "session oracle failed, treating as absent identity");
            None
        }
        Err(_) => {
            tracing::warn!(
                deadline_ms = deadline.as_millis() as u64,
                "session oracle timed out, treating as absent identity"
            );
            None
        }
    }
}

// =============================================================================
// Null oracle
// =============================================================================

/// An oracle that never resolves an identity.
///
/// Useful as a default collaborator and in tests of anonymous flows.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSessionOracle;

#[async_trait]
impl SessionOracle for NullSessionOracle {
    async fn current_identity(
        &self,
        _ctx: &SessionContext,
    ) -> Result<Option<Identity>, OracleError> {
        Ok(None)
    }
}

/// An oracle that returns a fixed identity.
#[derive(Debug, Clone)]
pub struct StaticSessionOracle {
    identity: Option<Identity>,
}

impl StaticSessionOracle {
    /// Creates an oracle resolving to the given identity.
    pub fn new(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    /// Creates an oracle resolving to no identity.
    pub fn anonymous() -> Self {
        Self { identity: None }
    }
}

#[async_trait]
impl SessionOracle for StaticSessionOracle {
    async fn current_identity(
        &self,
        _ctx: &SessionContext,
    ) -> Result<Option<Identity>, OracleError> {
        Ok(self.identity.clone())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Role;

    struct FailingOracle;

    #[async_trait]
    impl SessionOracle for FailingOracle {
        async fn current_identity(
            &self,
            _ctx: &SessionContext,
        ) -> Result<Option<Identity>, OracleError> {
            Err(OracleError::transport("connection refused"))
        }
    }

    struct SlowOracle;

    #[async_trait]
    impl SessionOracle for SlowOracle {
        async fn current_identity(
            &self,
            _ctx: &SessionContext,
        ) -> Result<Option<Identity>, OracleError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Some(Identity::new("late", 0, Role::User)))
        }
    }

    #[tokio::test]
    async fn test_resolve_passes_identity_through() {
        let oracle = StaticSessionOracle::new(Identity::new("u", 2, Role::User));
        let resolved =
            resolve_fail_closed(&oracle, &SessionContext::new(), DEFAULT_ORACLE_TIMEOUT).await;
        assert_eq!(resolved.map(|i| i.id), Some("u".to_string()));
    }

    #[tokio::test]
    async fn test_resolve_maps_error_to_absent() {
        let resolved =
            resolve_fail_closed(&FailingOracle, &SessionContext::new(), DEFAULT_ORACLE_TIMEOUT)
                .await;
        assert!(resolved.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolve_times_out_to_absent() {
        let resolved = resolve_fail_closed(
            &SlowOracle,
            &SessionContext::new(),
            Duration::from_millis(100),
        )
        .await;
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn test_null_oracle_is_anonymous() {
        let resolved = resolve_fail_closed(
            &NullSessionOracle,
            &SessionContext::new(),
            DEFAULT_ORACLE_TIMEOUT,
        )
        .await;
        assert!(resolved.is_none());
    }
}
