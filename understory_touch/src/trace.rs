// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Explainability helpers for contact classification.
//!
//! The classifier does not keep a history of how a contact was classified.
//! When an embedder wants to answer "why did this contact end as a hold and
//! not a tap?", it can pass a [`ContactTrace`] to the `*_with_trace` variants
//! of the classifier operations, such as
//! [`ContactClassifier::on_contact_end_with_trace`](crate::ContactClassifier::on_contact_end_with_trace).
//!
//! [`TransitionLog`] is a small recorder that keeps everything it is told.
//! `()` is the no-op trace used by the plain operations.

use alloc::vec::Vec;

use crate::classifier::{ContactOutcome, ContactState};

/// A callback sink for classifier tracing.
pub trait ContactTrace {
    /// Called whenever the observable [`ContactState`] changes.
    fn transition(&mut self, from: ContactState, to: ContactState);

    /// Called once per contact, when it ends, with the lifetime that decided the outcome.
    fn outcome(&mut self, outcome: ContactOutcome, lifetime: f64);
}

impl ContactTrace for () {
    fn transition(&mut self, _from: ContactState, _to: ContactState) {}

    fn outcome(&mut self, _outcome: ContactOutcome, _lifetime: f64) {}
}

/// Records every transition and outcome reported to it.
#[derive(Debug, Default, Clone)]
pub struct TransitionLog {
    transitions: Vec<(ContactState, ContactState)>,
    outcomes: Vec<(ContactOutcome, f64)>,
}

impl TransitionLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all recorded entries.
    pub fn clear(&mut self) {
        self.transitions.clear();
        self.outcomes.clear();
    }

    /// Recorded `(from, to)` transitions, oldest first.
    #[must_use]
    pub fn transitions(&self) -> &[(ContactState, ContactState)] {
        &self.transitions
    }

    /// Recorded `(outcome, lifetime)` pairs, oldest first.
    #[must_use]
    pub fn outcomes(&self) -> &[(ContactOutcome, f64)] {
        &self.outcomes
    }

    /// The most recent outcome, if any contact has ended.
    #[must_use]
    pub fn last_outcome(&self) -> Option<ContactOutcome> {
        self.outcomes.last().map(|(outcome, _)| *outcome)
    }
}

impl ContactTrace for TransitionLog {
    fn transition(&mut self, from: ContactState, to: ContactState) {
        self.transitions.push((from, to));
    }

    fn outcome(&mut self, outcome: ContactOutcome, lifetime: f64) {
        self.outcomes.push((outcome, lifetime));
    }
}

impl<T: ContactTrace + ?Sized> ContactTrace for &mut T {
    fn transition(&mut self, from: ContactState, to: ContactState) {
        (**self).transition(from, to);
    }

    fn outcome(&mut self, outcome: ContactOutcome, lifetime: f64) {
        (**self).outcome(outcome, lifetime);
    }
}
