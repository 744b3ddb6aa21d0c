// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Semantic events emitted by the classifier, and the sink they are delivered to.
//!
//! Events are pushed synchronously, in emission order, into a [`ContactSink`].
//! `Vec<ContactEvent>` collects them, `()` discards them, and [`FnSink`] adapts
//! any closure.
//!
//! ```
//! use understory_touch::event::{ContactEvent, ContactSink, FnSink};
//!
//! let mut clicks = 0;
//! let mut sink = FnSink(|event: ContactEvent| {
//!     if matches!(event, ContactEvent::Click { .. }) {
//!         clicks += 1;
//!     }
//! });
//! sink.receive(ContactEvent::Click { tap_count: 1 });
//! sink.receive(ContactEvent::PointerUp);
//! assert_eq!(clicks, 1);
//! ```

use alloc::vec::Vec;

use kurbo::{Point, Vec2};

use crate::interaction::Interaction;

/// A semantic event produced while classifying a contact.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ContactEvent {
    /// The contact went down.
    PointerDown,
    /// The contact was lifted or canceled. Always the last event of a contact.
    PointerUp,
    /// The contact ended as a tap.
    Click {
        /// Successive taps reported by the platform.
        tap_count: u32,
    },
    /// The tracked position moved.
    PositionChanged {
        /// New position.
        position: Point,
    },
    /// A hold began; emitted on every contact start.
    HoldStarted,
    /// The pending hold was abandoned.
    HoldCanceled,
    /// The contact was held without movement past the tap threshold.
    HoldCompleted,
    /// The contact moved and is now a manipulation.
    ManipulationStarted,
    /// The contact moved again while manipulating.
    ManipulationUpdated {
        /// Delta reported by the platform for this sample.
        delta: Vec2,
    },
    /// The manipulation was abandoned.
    ManipulationCanceled,
    /// The manipulation ended after the tap threshold.
    ManipulationCompleted {
        /// Delta reported by the final sample.
        delta: Vec2,
    },
}

impl ContactEvent {
    /// The interaction channel this event belongs to.
    #[must_use]
    pub fn interaction(&self) -> Interaction {
        match self {
            Self::PointerDown | Self::PointerUp | Self::Click { .. } => Interaction::Press,
            Self::PositionChanged { .. } => Interaction::PointerPosition,
            Self::HoldStarted | Self::HoldCanceled | Self::HoldCompleted => Interaction::Hold,
            Self::ManipulationStarted
            | Self::ManipulationUpdated { .. }
            | Self::ManipulationCanceled
            | Self::ManipulationCompleted { .. } => Interaction::Manipulation,
        }
    }
}

/// Receives classifier events.
pub trait ContactSink {
    /// Called once per emitted event, in order.
    fn receive(&mut self, event: ContactEvent);
}

impl ContactSink for Vec<ContactEvent> {
    fn receive(&mut self, event: ContactEvent) {
        self.push(event);
    }
}

impl ContactSink for () {
    fn receive(&mut self, _event: ContactEvent) {}
}

impl<S: ContactSink + ?Sized> ContactSink for &mut S {
    fn receive(&mut self, event: ContactEvent) {
        (**self).receive(event);
    }
}

/// Adapts a closure into a [`ContactSink`].
#[derive(Debug)]
pub struct FnSink<F>(pub F);

impl<F: FnMut(ContactEvent)> ContactSink for FnSink<F> {
    fn receive(&mut self, event: ContactEvent) {
        (self.0)(event);
    }
}
