// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contact classifier: turn one contact's samples into tap, hold, and manipulation events.
//!
//! ## Usage
//!
//! 1) Call [`ContactClassifier::on_contact_start`] when the platform reports a new contact.
//! 2) Call [`ContactClassifier::on_contact_sample`] once per frame while it is down.
//! 3) Call [`ContactClassifier::on_contact_end`] when it is lifted or canceled.
//!
//! Each contact ends in exactly one [`ContactOutcome`], and every start is
//! paired with exactly one [`ContactEvent::PointerUp`].
//!
//! ## Classification
//!
//! A contact starts out *holding*. The first `Moved` sample cancels the hold
//! and turns the contact into a *manipulation*. When the contact ends, its
//! accumulated lifetime decides the outcome:
//!
//! - below [`ClassifierConfig::contact_epsilon`]: noise, everything is canceled;
//! - below [`ClassifierConfig::max_tap_contact_time`]: everything is canceled, then a click;
//! - otherwise the pending hold or manipulation completes.
//!
//! A `Canceled` (or any non-`Ended`) final phase cancels whatever is pending.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_touch::{ClassifierConfig, ContactClassifier, ContactEvent, ContactOutcome};
//! use understory_touch::phase::{ContactSample, TouchPhase};
//!
//! let config = ClassifierConfig::default().with_contact_epsilon(0.01);
//! let mut classifier = ContactClassifier::new(config);
//! let mut events: Vec<ContactEvent> = Vec::new();
//!
//! classifier.on_contact_start(&mut events).unwrap();
//! let end = ContactSample::new(TouchPhase::Ended, Point::new(10.0, 10.0))
//!     .with_tap_count(1)
//!     .with_delta_time(0.2);
//! let outcome = classifier.on_contact_end(end, &mut events).unwrap();
//!
//! assert_eq!(outcome, ContactOutcome::Click);
//! assert_eq!(events, vec![
//!     ContactEvent::PointerDown,
//!     ContactEvent::HoldStarted,
//!     ContactEvent::HoldCanceled,
//!     ContactEvent::Click { tap_count: 1 },
//!     ContactEvent::PointerUp,
//! ]);
//! ```

use core::fmt;

use crate::event::{ContactEvent, ContactSink};
use crate::interaction::InteractionState;
use crate::phase::{ContactSample, TouchPhase};
use crate::trace::ContactTrace;

/// Default [`ClassifierConfig::max_tap_contact_time`], in seconds.
pub const DEFAULT_MAX_TAP_CONTACT_TIME: f64 = 0.5;

/// Default [`ClassifierConfig::contact_epsilon`].
///
/// This is the noise floor touch controllers have historically shipped with.
/// Measured against a lifetime in seconds it is far larger than
/// [`DEFAULT_MAX_TAP_CONTACT_TIME`], so with both defaults the noise branch
/// shadows the tap branch and a default classifier never emits a click.
/// Configure it explicitly (for example to a few milliseconds) to get taps.
pub const DEFAULT_CONTACT_EPSILON: f64 = 30.0;

/// Timing thresholds for [`ContactClassifier`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClassifierConfig {
    /// Contacts ending before this many seconds are taps rather than completed holds or manipulations.
    pub max_tap_contact_time: f64,
    /// Contacts ending before this lifetime are treated as noise: canceled without a click.
    pub contact_epsilon: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            max_tap_contact_time: DEFAULT_MAX_TAP_CONTACT_TIME,
            contact_epsilon: DEFAULT_CONTACT_EPSILON,
        }
    }
}

impl ClassifierConfig {
    /// Returns the config with `max_tap_contact_time` set, in seconds.
    #[must_use]
    pub fn with_max_tap_contact_time(mut self, seconds: f64) -> Self {
        self.max_tap_contact_time = seconds;
        self
    }

    /// Returns the config with `contact_epsilon` set.
    #[must_use]
    pub fn with_contact_epsilon(mut self, epsilon: f64) -> Self {
        self.contact_epsilon = epsilon;
        self
    }
}

/// Error returned when an operation is invoked in the wrong contact state.
///
/// Every variant means the caller's event stream is malformed; the classifier
/// state is left untouched and nothing is emitted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ContactError {
    /// A contact start arrived while a contact is already active.
    AlreadyActive,
    /// A sample or end arrived with no active contact.
    NotActive,
    /// A sample carried a negative or non-finite `delta_time`.
    InvalidTime,
}

impl fmt::Display for ContactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyActive => f.write_str("contact started while another contact is active"),
            Self::NotActive => f.write_str("contact operation invoked with no active contact"),
            Self::InvalidTime => {
                f.write_str("contact sample has a negative or non-finite delta time")
            }
        }
    }
}

impl core::error::Error for ContactError {}

/// Terminal classification of a contact.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ContactOutcome {
    /// Ended before the noise floor; no click or completion was emitted.
    Noise,
    /// Ended quickly; a click was emitted.
    Click,
    /// Held without movement past the tap threshold.
    HoldCompleted,
    /// Moved, and ended past the tap threshold.
    ManipulationCompleted,
    /// Canceled by the platform; any pending hold or manipulation was canceled.
    Canceled,
}

/// Observable state of a classifier between operations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum ContactState {
    /// No active contact.
    #[default]
    Idle,
    /// Active, not yet moved.
    Holding,
    /// Active and tracked as a drag.
    Manipulating,
    /// Active, but neither holding nor manipulating.
    Touched,
}

/// Classifies a single contact.
///
/// Use one classifier per simultaneous contact; see
/// [`ContactTracker`](crate::ContactTracker) for routing several.
#[derive(Clone, Debug, Default)]
pub struct ContactClassifier {
    config: ClassifierConfig,
    lifetime: f64,
    interactions: InteractionState,
}

impl ContactClassifier {
    /// Creates an idle classifier with the given thresholds.
    #[must_use]
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            lifetime: 0.0,
            interactions: InteractionState::default(),
        }
    }

    /// The thresholds in use.
    #[must_use]
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Replaces the thresholds; takes effect at the next contact end.
    pub fn set_config(&mut self, config: ClassifierConfig) {
        self.config = config;
    }

    /// Seconds accumulated by the active contact; zero when idle.
    #[must_use]
    pub fn lifetime(&self) -> f64 {
        self.lifetime
    }

    /// Returns `true` while a contact is active.
    #[must_use]
    pub fn is_touched(&self) -> bool {
        self.interactions.pressed
    }

    /// Returns `true` while the active contact is an unresolved hold.
    #[must_use]
    pub fn is_holding(&self) -> bool {
        self.interactions.holding
    }

    /// Returns `true` while the active contact is a manipulation.
    #[must_use]
    pub fn is_manipulating(&self) -> bool {
        self.interactions.manipulating
    }

    /// Live interaction channel data.
    #[must_use]
    pub fn interactions(&self) -> &InteractionState {
        &self.interactions
    }

    /// Summarizes the current state.
    #[must_use]
    pub fn state(&self) -> ContactState {
        let i = &self.interactions;
        if !i.pressed {
            ContactState::Idle
        } else if i.manipulating {
            ContactState::Manipulating
        } else if i.holding {
            ContactState::Holding
        } else {
            ContactState::Touched
        }
    }

    /// Begins a contact: emits `PointerDown` then `HoldStarted`.
    pub fn on_contact_start<S>(&mut self, sink: &mut S) -> Result<(), ContactError>
    where
        S: ContactSink + ?Sized,
    {
        self.on_contact_start_with_trace(sink, &mut ())
    }

    /// Like [`on_contact_start`](Self::on_contact_start), reporting to `trace`.
    pub fn on_contact_start_with_trace<S, T>(
        &mut self,
        sink: &mut S,
        trace: &mut T,
    ) -> Result<(), ContactError>
    where
        S: ContactSink + ?Sized,
        T: ContactTrace + ?Sized,
    {
        if self.is_touched() {
            return Err(ContactError::AlreadyActive);
        }
        let before = self.state();

        sink.receive(ContactEvent::PointerDown);
        self.interactions.pressed = true;
        sink.receive(ContactEvent::HoldStarted);
        self.interactions.holding = true;

        self.report_transition(before, trace);
        Ok(())
    }

    /// Feeds one frame of the active contact.
    ///
    /// Accumulates `sample.delta_time` into the lifetime. Only `Moved`
    /// samples produce events; other phases just advance time. A negative or
    /// non-finite `delta_time` is rejected with [`ContactError::InvalidTime`].
    pub fn on_contact_sample<S>(
        &mut self,
        sample: ContactSample,
        sink: &mut S,
    ) -> Result<(), ContactError>
    where
        S: ContactSink + ?Sized,
    {
        self.on_contact_sample_with_trace(sample, sink, &mut ())
    }

    /// Like [`on_contact_sample`](Self::on_contact_sample), reporting to `trace`.
    pub fn on_contact_sample_with_trace<S, T>(
        &mut self,
        sample: ContactSample,
        sink: &mut S,
        trace: &mut T,
    ) -> Result<(), ContactError>
    where
        S: ContactSink + ?Sized,
        T: ContactTrace + ?Sized,
    {
        if !self.is_touched() {
            return Err(ContactError::NotActive);
        }
        check_delta_time(&sample)?;
        let before = self.state();

        self.lifetime += sample.delta_time;

        if sample.phase == TouchPhase::Moved {
            if self.interactions.set_position(sample.position) {
                sink.receive(ContactEvent::PositionChanged {
                    position: sample.position,
                });
            }

            if self.interactions.holding {
                sink.receive(ContactEvent::HoldCanceled);
                self.interactions.holding = false;
            }

            if !self.interactions.manipulating {
                sink.receive(ContactEvent::ManipulationStarted);
                self.interactions.manipulating = true;
            } else {
                // The delta is cumulative, so it is reported even when unchanged.
                self.interactions.manipulation_delta = sample.delta_position;
                sink.receive(ContactEvent::ManipulationUpdated {
                    delta: sample.delta_position,
                });
            }
        }

        self.report_transition(before, trace);
        Ok(())
    }

    /// Ends the active contact, classifying it, and resets to idle.
    ///
    /// The final sample's `delta_time` is counted toward the lifetime before
    /// classifying; a negative or non-finite one is rejected with
    /// [`ContactError::InvalidTime`] and the contact stays active. Otherwise
    /// always emits `PointerUp` last.
    pub fn on_contact_end<S>(
        &mut self,
        sample: ContactSample,
        sink: &mut S,
    ) -> Result<ContactOutcome, ContactError>
    where
        S: ContactSink + ?Sized,
    {
        self.on_contact_end_with_trace(sample, sink, &mut ())
    }

    /// Like [`on_contact_end`](Self::on_contact_end), reporting to `trace`.
    pub fn on_contact_end_with_trace<S, T>(
        &mut self,
        sample: ContactSample,
        sink: &mut S,
        trace: &mut T,
    ) -> Result<ContactOutcome, ContactError>
    where
        S: ContactSink + ?Sized,
        T: ContactTrace + ?Sized,
    {
        if !self.is_touched() {
            return Err(ContactError::NotActive);
        }
        check_delta_time(&sample)?;
        let before = self.state();

        self.lifetime += sample.delta_time;
        let lifetime = self.lifetime;

        let outcome = if sample.phase == TouchPhase::Ended {
            if lifetime < self.config.contact_epsilon {
                self.cancel_pending(sink);
                ContactOutcome::Noise
            } else if lifetime < self.config.max_tap_contact_time {
                self.cancel_pending(sink);
                sink.receive(ContactEvent::Click {
                    tap_count: sample.tap_count,
                });
                ContactOutcome::Click
            } else if self.interactions.holding {
                sink.receive(ContactEvent::HoldCompleted);
                ContactOutcome::HoldCompleted
            } else if self.interactions.manipulating {
                sink.receive(ContactEvent::ManipulationCompleted {
                    delta: sample.delta_position,
                });
                ContactOutcome::ManipulationCompleted
            } else {
                ContactOutcome::Canceled
            }
        } else {
            // Only one of hold/manipulation can be pending here.
            if self.interactions.holding {
                sink.receive(ContactEvent::HoldCanceled);
            } else if self.interactions.manipulating {
                sink.receive(ContactEvent::ManipulationCanceled);
            }
            ContactOutcome::Canceled
        };

        sink.receive(ContactEvent::PointerUp);
        self.reset();

        trace.outcome(outcome, lifetime);
        self.report_transition(before, trace);
        Ok(outcome)
    }

    /// Drops any active contact without emitting events.
    pub fn reset(&mut self) {
        self.lifetime = 0.0;
        self.interactions.clear();
    }

    fn cancel_pending<S>(&self, sink: &mut S)
    where
        S: ContactSink + ?Sized,
    {
        if self.interactions.holding {
            sink.receive(ContactEvent::HoldCanceled);
        }
        if self.interactions.manipulating {
            sink.receive(ContactEvent::ManipulationCanceled);
        }
    }

    fn report_transition<T>(&self, before: ContactState, trace: &mut T)
    where
        T: ContactTrace + ?Sized,
    {
        let after = self.state();
        if before != after {
            trace.transition(before, after);
        }
    }
}

fn check_delta_time(sample: &ContactSample) -> Result<(), ContactError> {
    if sample.has_valid_delta_time() {
        Ok(())
    } else {
        Err(ContactError::InvalidTime)
    }
}
