// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Notification surface for failed evaluations.
//!
//! The core never renders UI. On a denied evaluation it can emit one
//! classified [`AccessNotice`] to a [`NoticeSink`] collaborator (a toast
//! surface, a logger); what to display is the collaborator's decision.

use serde::{Deserialize, Serialize};

use crate::error::DenyReason;

// =============================================================================
// NoticeSeverity
// =============================================================================

/// Severity attached to a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeSeverity {
    /// Informational notice.
    Info,
    /// Recoverable problem.
    Warning,
    /// Denied access.
    Error,
}

// =============================================================================
// AccessNotice
// =============================================================================

/// A user-visible classification of a denied evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessNotice {
    /// Notice severity. Denials are always [`NoticeSeverity::Error`].
    pub severity: NoticeSeverity,
    /// The classified denial reason.
    pub reason: DenyReason,
    /// End-user message describing the reason.
    pub message: String,
}

impl AccessNotice {
    /// Builds the standard notice for a denial reason.
    pub fn for_reason(reason: DenyReason) -> Self {
        Self {
            severity: NoticeSeverity::Error,
            reason,
            message: reason.user_message().to_string(),
        }
    }

    /// Overrides the message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

// =============================================================================
// NoticeSink
// =============================================================================

/// Receiver of access notices.
pub trait NoticeSink: Send + Sync {
    /// Delivers one notice. Must not block.
    fn notify(&self, notice: AccessNotice);
}

/// A sink that drops every notice.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpNoticeSink;

impl NoticeSink for NoOpNoticeSink {
    fn notify(&self, _notice: AccessNotice) {}
}

/// A sink that records notices to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNoticeSink;

impl NoticeSink for TracingNoticeSink {
    fn notify(&self, notice: AccessNotice) {
        tracing::warn!(
            reason = %notice.reason,
            message = %notice.message,
            "access denied notice"
        );
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_for_reason() {
        let notice = AccessNotice::for_reason(DenyReason::AdminOnly);
        assert_eq!(notice.severity, NoticeSeverity::Error);
        assert_eq!(notice.reason, DenyReason::AdminOnly);
        assert_eq!(notice.message, DenyReason::AdminOnly.user_message());
    }

    #[test]
    fn test_notice_message_override() {
        let notice = AccessNotice::for_reason(DenyReason::NotLoggedIn)
            .with_message("로그인 후 이용해주세요");
        assert_eq!(notice.message, "로그인 후 이용해주세요");
        assert_eq!(notice.reason, DenyReason::NotLoggedIn);
    }
}
