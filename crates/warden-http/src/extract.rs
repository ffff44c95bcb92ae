// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Custom extractors for gated handlers.

use std::net::{IpAddr, SocketAddr};

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::request::Parts,
};

use warden_core::Identity;

use crate::error::GateError;

// =============================================================================
// Identity Extractor
// =============================================================================

/// Extractor for authenticated requests.
///
/// Extracts the [`Identity`] placed in the request extensions by the request
/// gate. Returns 401 if the request was not authenticated.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(CurrentIdentity(identity): CurrentIdentity) -> impl IntoResponse {
///     format!("Hello, {}", identity.id)
/// }
/// ```
pub struct CurrentIdentity(pub Identity);

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = GateError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(CurrentIdentity)
            .ok_or_else(|| GateError::unauthorized("no session identity"))
    }
}

// =============================================================================
// Optional Identity Extractor
// =============================================================================

/// Extractor for optionally authenticated requests.
///
/// Yields `None` when the request did not pass through the gate or carried
/// no session.
pub struct MaybeIdentity(pub Option<Identity>);

impl<S> FromRequestParts<S> for MaybeIdentity
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeIdentity(parts.extensions.get::<Identity>().cloned()))
    }
}

// =============================================================================
// Client IP Extractor
// =============================================================================

/// Extractor for the client IP address.
///
/// Prefers `X-Forwarded-For`, then `X-Real-IP`, then the connection peer.
pub struct ClientIp(pub Option<IpAddr>);

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let from_headers = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .and_then(|first| first.trim().parse().ok())
            .or_else(|| {
                parts
                    .headers
                    .get("x-real-ip")
                    .and_then(|value| value.to_str().ok())
                    .and_then(|value| value.parse().ok())
            });

        let ip = from_headers.or_else(|| {
            parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ci| ci.0.ip())
        });

        Ok(ClientIp(ip))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use warden_core::Role;

    fn parts_with_identity(identity: Option<Identity>) -> Parts {
        let mut req = Request::builder().uri("/test").body(()).unwrap();
        if let Some(identity) = identity {
            req.extensions_mut().insert(identity);
        }
        req.into_parts().0
    }

    #[tokio::test]
    async fn test_current_identity_requires_session() {
        let mut parts = parts_with_identity(None);
        let result = CurrentIdentity::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(GateError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_current_identity_extracts() {
        let mut parts = parts_with_identity(Some(Identity::new("u-1", 3, Role::User)));
        let CurrentIdentity(identity) = CurrentIdentity::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(identity.id, "u-1");
    }

    #[tokio::test]
    async fn test_maybe_identity_is_infallible() {
        let mut parts = parts_with_identity(None);
        let MaybeIdentity(identity) =
            MaybeIdentity::from_request_parts(&mut parts, &()).await.unwrap();
        assert!(identity.is_none());
    }

    #[tokio::test]
    async fn test_client_ip_prefers_forwarded_header() {
        let req = Request::builder()
            .uri("/test")
            .header("x-forwarded-for", "10.0.0.9, 192.168.0.1")
            .body(())
            .unwrap();
        let (mut parts, _) = req.into_parts();

        let ClientIp(ip) = ClientIp::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(ip, Some("10.0.0.9".parse().unwrap()));
    }
}
