// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Request gate middleware.
//!
//! The request gate authenticates full page loads before any application
//! handler runs. It is deliberately narrower than the in-app guards: it only
//! answers "does this request carry a live session", redirecting to the
//! login page when it does not. Level and admin evaluation stays with the
//! handlers and the navigation guards, where the policy for the specific
//! resource is known.
//!
//! The gate fails closed. An oracle transport error or timeout is treated
//! the same as an absent session.

use std::future::Future;
use std::net::{IpAddr, SocketAddr};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{header, Request},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tower::{Layer, Service};
use uuid::Uuid;

use warden_core::{
    resolve_fail_closed, DenyReason, Redirect, RedirectPolicy, SessionContext, SessionOracle,
    DEFAULT_ORACLE_TIMEOUT,
};

/// Cookie carrying the session token when no Authorization header is present.
pub const SESSION_COOKIE: &str = "session";

// =============================================================================
// RequestGateLayer
// =============================================================================

/// Layer for session authentication on protected path prefixes.
///
/// This layer wraps services to authenticate incoming requests. Requests to
/// paths outside the protected set pass through untouched; requests inside
/// it must resolve a live identity or are redirected to the login page.
#[derive(Clone)]
pub struct RequestGateLayer {
    oracle: Arc<dyn SessionOracle>,
    protected_paths: Arc<Vec<String>>,
    redirects: Arc<RedirectPolicy>,
    deadline: Duration,
}

impl RequestGateLayer {
    /// Creates a new request gate layer with no protected paths.
    pub fn new(oracle: Arc<dyn SessionOracle>) -> Self {
        Self {
            oracle,
            protected_paths: Arc::new(Vec::new()),
            redirects: Arc::new(RedirectPolicy::default()),
            deadline: DEFAULT_ORACLE_TIMEOUT,
        }
    }

    /// Sets the protected paths. Exact paths, or prefixes ending in `*`.
    pub fn with_protected_paths(mut self, paths: Vec<String>) -> Self {
        self.protected_paths = Arc::new(paths);
        self
    }

    /// Sets the redirect policy used for unauthenticated requests.
    pub fn with_redirect_policy(mut self, redirects: RedirectPolicy) -> Self {
        self.redirects = Arc::new(redirects);
        self
    }

    /// Sets the oracle deadline. Expiry fails closed.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }
}

impl<S> Layer<S> for RequestGateLayer {
    type Service = RequestGate<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestGate {
            inner,
            oracle: self.oracle.clone(),
            protected_paths: self.protected_paths.clone(),
            redirects: self.redirects.clone(),
            deadline: self.deadline,
        }
    }
}

// =============================================================================
// RequestGate
// =============================================================================

/// Middleware for session authentication.
#[derive(Clone)]
pub struct RequestGate<S> {
    inner: S,
    oracle: Arc<dyn SessionOracle>,
    protected_paths: Arc<Vec<String>>,
    redirects: Arc<RedirectPolicy>,
    deadline: Duration,
}

impl<S> RequestGate<S> {
    /// Checks if a path falls under a protected prefix.
    fn is_protected_path(&self, path: &str) -> bool {
        for protected in self.protected_paths.iter() {
            if let Some(prefix) = protected.strip_suffix('*') {
                if path.starts_with(prefix) {
                    return true;
                }
            } else if protected == path {
                return true;
            }
        }
        false
    }
}

impl<S> Service<Request<Body>> for RequestGate<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let oracle = self.oracle.clone();
        let redirects = self.redirects.clone();
        let deadline = self.deadline;
        let is_protected = self.is_protected_path(req.uri().path());
        let mut inner = self.inner.clone();

        Box::pin(async move {
            if !is_protected {
                return inner.call(req).await;
            }

            let request_id = Uuid::now_v7();
            let original = req
                .uri()
                .path_and_query()
                .map(|pq| pq.as_str().to_string())
                .unwrap_or_else(|| req.uri().path().to_string());

            let mut ctx = SessionContext::new().with_path(original.clone());
            if let Some(token) = extract_session_token(&req) {
                ctx = ctx.with_token(token);
            }
            if let Some(ip) = extract_client_ip(&req) {
                ctx = ctx.with_client_ip(ip);
            }

            // An expired session authenticates nothing; treat it like an
            // absent one.
            let identity = resolve_fail_closed(oracle.as_ref(), &ctx, deadline)
                .await
                .filter(|identity| !identity.is_expired(Utc::now()));

            match identity {
                Some(identity) => {
                    tracing::debug!(
                        request_id = %request_id,
                        principal = %identity.id,
                        path = %original,
                        "request authenticated"
                    );
                    req.extensions_mut().insert(identity);
                    inner.call(req).await
                }
                None => {
                    let redirect = Redirect::to_login(&redirects, Some(&original));
                    tracing::debug!(
                        request_id = %request_id,
                        path = %original,
                        reason = DenyReason::NotLoggedIn.as_str(),
                        target = %redirect.target,
                        "unauthenticated request redirected to login"
                    );
                    Ok(axum::response::Redirect::temporary(&redirect.target).into_response())
                }
            }
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Extracts the session token from the Authorization header or the session
/// cookie. The header wins when both are present.
fn extract_session_token<B>(req: &Request<B>) -> Option<String> {
    extract_bearer_token(req).or_else(|| extract_cookie(req, SESSION_COOKIE))
}

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token<B>(req: &Request<B>) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer ").map(|s| s.to_string()))
}

/// Extracts a named cookie value from the Cookie header.
fn extract_cookie<B>(req: &Request<B>, name: &str) -> Option<String> {
    let cookies = req.headers().get(header::COOKIE)?.to_str().ok()?;
    for pair in cookies.split(';') {
        let mut parts = pair.trim().splitn(2, '=');
        if parts.next() == Some(name) {
            return parts.next().map(|v| v.to_string());
        }
    }
    None
}

/// Extracts the client IP from forwarding headers or the connection info.
fn extract_client_ip<B>(req: &Request<B>) -> Option<IpAddr> {
    if let Some(forwarded) = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
    {
        if let Some(ip) = forwarded
            .split(',')
            .next()
            .and_then(|first| first.trim().parse().ok())
        {
            return Some(ip);
        }
    }

    if let Some(ip) = req
        .headers()
        .get("x-real-ip")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
    {
        return Some(ip);
    }

    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0.ip())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, StatusCode};
    use tower::ServiceExt;
    use warden_core::{Identity, Role, StaticSessionOracle};

    /// Inner service answering 200 to everything.
    #[derive(Clone)]
    struct Echo;

    impl Service<Request<Body>> for Echo {
        type Response = Response;
        type Error = std::convert::Infallible;
        type Future = std::future::Ready<Result<Response, Self::Error>>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, _req: Request<Body>) -> Self::Future {
            std::future::ready(Ok(Response::new(Body::empty())))
        }
    }

    fn gate_with(oracle: Arc<dyn SessionOracle>, protected: Vec<&str>) -> RequestGate<Echo> {
        RequestGateLayer::new(oracle)
            .with_protected_paths(protected.into_iter().map(String::from).collect())
            .layer(Echo)
    }

    #[test]
    fn test_extract_bearer_token() {
        let mut req = Request::builder().uri("/test").body(Body::empty()).unwrap();

        assert!(extract_bearer_token(&req).is_none());

        req.headers_mut()
            .insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert!(extract_bearer_token(&req).is_none());

        req.headers_mut().insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer mytoken123"),
        );
        assert_eq!(extract_bearer_token(&req), Some("mytoken123".to_string()));
    }

    #[test]
    fn test_extract_session_cookie() {
        let mut req = Request::builder().uri("/test").body(Body::empty()).unwrap();

        req.headers_mut().insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; session=abc123; lang=ko"),
        );
        assert_eq!(extract_session_token(&req), Some("abc123".to_string()));
    }

    #[test]
    fn test_protected_paths() {
        let gate = gate_with(
            Arc::new(StaticSessionOracle::anonymous()),
            vec!["/account", "/admin/*"],
        );

        assert!(gate.is_protected_path("/account"));
        assert!(gate.is_protected_path("/admin/users"));
        assert!(!gate.is_protected_path("/account/settings"));
        assert!(!gate.is_protected_path("/about"));
    }

    #[tokio::test]
    async fn test_unprotected_path_passes_through() {
        let gate = gate_with(Arc::new(StaticSessionOracle::anonymous()), vec!["/admin/*"]);

        let response = gate
            .oneshot(Request::builder().uri("/public").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unauthenticated_redirects_to_login() {
        let gate = gate_with(Arc::new(StaticSessionOracle::anonymous()), vec!["/admin/*"]);

        let response = gate
            .oneshot(
                Request::builder()
                    .uri("/admin/page")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/authentication/login?redirect=%2Fadmin%2Fpage"
        );
    }

    #[tokio::test]
    async fn test_redirect_preserves_query_string() {
        let gate = gate_with(Arc::new(StaticSessionOracle::anonymous()), vec!["/admin/*"]);

        let response = gate
            .oneshot(
                Request::builder()
                    .uri("/admin/page?tab=2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/authentication/login?redirect=%2Fadmin%2Fpage%3Ftab%3D2"
        );
    }

    #[tokio::test]
    async fn test_expired_session_redirects_to_login() {
        let expired = Identity::builder("u-9")
            .level(3)
            .role(Role::User)
            .expires_in_secs(-3600)
            .build();
        let gate = gate_with(Arc::new(StaticSessionOracle::new(expired)), vec!["/admin/*"]);

        let response = gate
            .oneshot(
                Request::builder()
                    .uri("/admin/page")
                    .header(header::AUTHORIZATION, "Bearer stale")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/authentication/login?redirect=%2Fadmin%2Fpage"
        );
    }

    #[tokio::test]
    async fn test_authenticated_request_passes_with_identity() {
        let identity = Identity::new("u-1", 3, Role::User);
        let oracle = Arc::new(StaticSessionOracle::new(identity.clone()));

        let inner = tower::service_fn(move |req: Request<Body>| {
            let seen = req.extensions().get::<Identity>().cloned();
            async move {
                assert_eq!(seen.map(|i| i.id), Some("u-1".to_string()));
                Ok::<_, std::convert::Infallible>(Response::new(Body::empty()))
            }
        });

        let gate = RequestGateLayer::new(oracle)
            .with_protected_paths(vec!["/admin/*".to_string()])
            .layer(inner);

        let response = gate
            .oneshot(
                Request::builder()
                    .uri("/admin/page")
                    .header(header::AUTHORIZATION, "Bearer valid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
