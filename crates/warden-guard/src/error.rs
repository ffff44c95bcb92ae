// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Guard construction errors.

use thiserror::Error;

/// Result type alias for guard operations.
pub type GuardResult<T> = Result<T, GuardError>;

/// Errors raised while constructing a guard.
///
/// Evaluation itself never errors: oracle failures fail closed into an
/// anonymous evaluation instead of surfacing here.
#[derive(Debug, Error)]
pub enum GuardError {
    /// The builder was finalized without a session oracle.
    #[error("a session oracle is required to build a navigation gate")]
    MissingOracle,
}
