// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Per-scope guard session state machine.
//!
//! A [`GuardSession`] tracks the lifecycle of permission checks for one
//! guarded scope: `Idle` until the first check, `Checking` while an
//! evaluation is in flight, `Resolved` once a result landed. Failure is
//! encoded inside the [`Evaluation`], never in the phase.
//!
//! Only one check may be in flight per session. Concurrent callers coalesce:
//! the first caller leads and performs the evaluation, later callers join and
//! await the same result, so rapid re-renders cost exactly one session
//! lookup. If the leading future is dropped mid-flight the pending result is
//! discarded and joiners re-elect a leader.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};
use tokio::sync::watch;

use warden_core::Evaluation;

// =============================================================================
// GuardPhase
// =============================================================================

/// Lifecycle phase of a guard session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardPhase {
    /// No check has been performed yet.
    Idle,
    /// An asynchronous evaluation is in flight.
    Checking,
    /// The latest check has resolved; see [`GuardSession::latest`].
    Resolved,
}

// =============================================================================
// GuardSession
// =============================================================================

/// A resolved check together with its generation number.
///
/// Generations start at 1 and increase with every resolution; they let
/// callers emit per-resolution side effects (a notification, a redirect)
/// exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedCheck {
    /// Monotonic resolution counter for this session.
    pub generation: u64,
    /// The evaluation that resolved this check.
    pub evaluation: Evaluation,
}

/// Runtime state owned by one guarded scope.
pub struct GuardSession {
    phase: watch::Sender<GuardPhase>,
    latest: RwLock<Option<ResolvedCheck>>,
    in_flight: Mutex<Option<watch::Receiver<Option<Evaluation>>>>,
    generation: AtomicU64,
    epoch: AtomicU64,
}

enum Entry {
    Lead(watch::Sender<Option<Evaluation>>),
    Join(watch::Receiver<Option<Evaluation>>),
}

impl GuardSession {
    /// Creates a fresh session in the `Idle` phase.
    pub fn new() -> Self {
        let (phase, _) = watch::channel(GuardPhase::Idle);
        Self {
            phase,
            latest: RwLock::new(None),
            in_flight: Mutex::new(None),
            generation: AtomicU64::new(0),
            epoch: AtomicU64::new(0),
        }
    }

    /// Returns the current phase.
    pub fn phase(&self) -> GuardPhase {
        *self.phase.borrow()
    }

    /// Returns `true` while a check is in flight.
    pub fn is_loading(&self) -> bool {
        self.phase() == GuardPhase::Checking
    }

    /// Subscribes to phase changes (the UI loading signal).
    pub fn subscribe(&self) -> watch::Receiver<GuardPhase> {
        self.phase.subscribe()
    }

    /// Returns the most recent resolved evaluation without blocking.
    pub fn latest(&self) -> Option<Evaluation> {
        (*self.latest.read()).map(|check| check.evaluation)
    }

    /// Returns the most recent resolved check with its generation.
    pub fn latest_check(&self) -> Option<ResolvedCheck> {
        *self.latest.read()
    }

    /// Discards the resolved state and returns to `Idle`.
    ///
    /// Used when the policy for the scope changes. A check still in flight
    /// when `reset` is called belongs to the old epoch: its result is handed
    /// to callers already awaiting it but is not written into the session.
    pub fn reset(&self) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
        *self.latest.write() = None;
        self.phase.send_replace(GuardPhase::Idle);
    }

    /// Runs one coalesced check.
    ///
    /// If no check is in flight the closure is invoked and its evaluation
    /// resolves the session. Otherwise the caller awaits the in-flight
    /// result; the closure is not invoked, which is what bounds concurrent
    /// callers to a single oracle query.
    pub async fn resolve<F, Fut>(&self, run: F) -> Evaluation
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Evaluation>,
    {
        loop {
            let entry = {
                let mut slot = self.in_flight.lock();
                match slot.as_ref() {
                    Some(rx) => Entry::Join(rx.clone()),
                    None => {
                        let (tx, rx) = watch::channel(None);
                        *slot = Some(rx);
                        Entry::Lead(tx)
                    }
                }
            };

            match entry {
                Entry::Lead(tx) => {
                    let lead = Lead {
                        session: self,
                        epoch: self.epoch.load(Ordering::Acquire),
                        completed: false,
                    };
                    // send_replace stores the phase even with no subscribers.
                    self.phase.send_replace(GuardPhase::Checking);
                    let evaluation = run().await;
                    return lead.complete(tx, evaluation);
                }
                Entry::Join(mut rx) => {
                    match rx.wait_for(|result| result.is_some()).await {
                        Ok(result) => {
                            if let Some(evaluation) = *result {
                                return evaluation;
                            }
                        }
                        // Leader was dropped mid-flight; elect a new one.
                        Err(_) => continue,
                    }
                }
            }
        }
    }
}

impl Default for GuardSession {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GuardSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuardSession")
            .field("phase", &self.phase())
            .field("latest", &self.latest_check())
            .finish()
    }
}

// =============================================================================
// Lead
// =============================================================================

/// Cleanup guard held by the leading caller.
///
/// Dropping it without completion (the leading future was cancelled) clears
/// the in-flight slot and reverts the phase, so joiners re-elect and nothing
/// is written to the torn-down scope.
struct Lead<'a> {
    session: &'a GuardSession,
    epoch: u64,
    completed: bool,
}

impl Lead<'_> {
    fn complete(mut self, tx: watch::Sender<Option<Evaluation>>, evaluation: Evaluation) -> Evaluation {
        self.completed = true;

        // A reset during the check moves the session to a new epoch; the
        // stale result is delivered to waiting callers but not recorded.
        let current_epoch = self.session.epoch.load(Ordering::Acquire);
        if current_epoch == self.epoch {
            let generation = self.session.generation.fetch_add(1, Ordering::AcqRel) + 1;
            *self.session.latest.write() = Some(ResolvedCheck {
                generation,
                evaluation,
            });
            self.session.phase.send_replace(GuardPhase::Resolved);
        }

        *self.session.in_flight.lock() = None;
        let _ = tx.send(Some(evaluation));
        evaluation
    }
}

impl Drop for Lead<'_> {
    fn drop(&mut self) {
        if !self.completed {
            *self.session.in_flight.lock() = None;
            let current_epoch = self.session.epoch.load(Ordering::Acquire);
            if current_epoch == self.epoch {
                let phase = if self.session.latest.read().is_some() {
                    GuardPhase::Resolved
                } else {
                    GuardPhase::Idle
                };
                self.session.phase.send_replace(phase);
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
