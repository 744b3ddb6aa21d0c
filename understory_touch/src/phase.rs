// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input data model: the per-frame sample a platform reports for one contact.

use kurbo::{Point, Vec2};

/// Phase of a contact as reported by the platform for the current sample.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum TouchPhase {
    /// The contact touched the surface this frame.
    #[default]
    Began,
    /// The contact moved since the previous sample.
    Moved,
    /// The contact is down but did not move.
    Stationary,
    /// The contact was lifted.
    Ended,
    /// The platform stopped tracking the contact (focus loss, too many touches, ...).
    Canceled,
}

impl TouchPhase {
    /// Returns `true` for phases that terminate a contact.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ended | Self::Canceled)
    }
}

/// One platform sample for a single contact.
///
/// `delta_position` is forwarded exactly as the platform reports it; some
/// platforms report it relative to the previous sample, others accumulate it.
/// The classifier never resets it.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct ContactSample {
    /// Current position of the contact.
    pub position: Point,
    /// Movement reported alongside this sample.
    pub delta_position: Vec2,
    /// Phase of the contact for this sample.
    pub phase: TouchPhase,
    /// Number of rapid successive taps reported by the platform.
    pub tap_count: u32,
    /// Seconds elapsed since the previous sample.
    pub delta_time: f64,
}

impl ContactSample {
    /// Creates a sample at `position` with the given phase and no movement, taps or elapsed time.
    #[must_use]
    pub fn new(phase: TouchPhase, position: Point) -> Self {
        Self {
            position,
            delta_position: Vec2::ZERO,
            phase,
            tap_count: 0,
            delta_time: 0.0,
        }
    }

    /// Returns the sample with `delta_position` set.
    #[must_use]
    pub fn with_delta(mut self, delta_position: Vec2) -> Self {
        self.delta_position = delta_position;
        self
    }

    /// Returns the sample with `tap_count` set.
    #[must_use]
    pub fn with_tap_count(mut self, tap_count: u32) -> Self {
        self.tap_count = tap_count;
        self
    }

    /// Returns `true` if `delta_time` is finite and not negative.
    #[must_use]
    pub fn has_valid_delta_time(&self) -> bool {
        self.delta_time.is_finite() && self.delta_time >= 0.0
    }

    /// Returns the sample with `delta_time` set, in seconds.
    #[must_use]
    pub fn with_delta_time(mut self, delta_time: f64) -> Self {
        self.delta_time = delta_time;
        self
    }
}
