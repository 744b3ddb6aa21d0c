// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_touch --heading-base-level=0

//! Understory Touch: classify touch and pointer contacts into taps, holds, and manipulations.
//!
//! A touch platform reports, for every contact, a stream of samples: a
//! position, a phase (`Began`, `Moved`, `Stationary`, `Ended`, `Canceled`),
//! a tap count, and the time since the previous sample. This crate turns that
//! stream into semantic input events:
//!
//! - [`ContactClassifier`]: a small state machine for a single contact. It
//!   emits pointer down/up, hold started/canceled/completed, manipulation
//!   started/updated/canceled/completed, position changes, and clicks.
//! - [`ContactTracker`]: routes samples for several simultaneous contacts,
//!   keyed by the platform's touch id, to one classifier each.
//! - [`interaction`]: the four channels a touch contact drives (position,
//!   press, hold, manipulation) and their live values.
//! - [`trace`]: optional hooks that explain how a contact was classified.
//!
//! ## Classification rules
//!
//! Every contact starts as a pending *hold*. The first `Moved` sample cancels
//! the hold and starts a *manipulation*. At the end of the contact its
//! accumulated lifetime decides the outcome:
//!
//! | Final phase | Lifetime                                 | Events before `PointerUp`            |
//! |-------------|------------------------------------------|--------------------------------------|
//! | `Ended`     | `< contact_epsilon`                      | cancel pending hold/manipulation     |
//! | `Ended`     | `< max_tap_contact_time`                 | cancel pending, then `Click`         |
//! | `Ended`     | otherwise, still holding                 | `HoldCompleted`                      |
//! | `Ended`     | otherwise, manipulating                  | `ManipulationCompleted`              |
//! | other       | any                                      | cancel pending hold/manipulation     |
//!
//! Every `PointerDown` is paired with exactly one `PointerUp`, and the
//! classifier returns to its initial state after each contact.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use understory_touch::{ClassifierConfig, ContactClassifier, ContactEvent, ContactOutcome};
//! use understory_touch::phase::{ContactSample, TouchPhase};
//!
//! let config = ClassifierConfig::default().with_contact_epsilon(0.01);
//! let mut classifier = ContactClassifier::new(config);
//! let mut events: Vec<ContactEvent> = Vec::new();
//!
//! classifier.on_contact_start(&mut events).unwrap();
//!
//! // Drag for a while.
//! let moved = ContactSample::new(TouchPhase::Moved, Point::new(20.0, 0.0))
//!     .with_delta(Vec2::new(20.0, 0.0))
//!     .with_delta_time(0.4);
//! classifier.on_contact_sample(moved, &mut events).unwrap();
//! assert!(classifier.is_manipulating());
//!
//! // Lift after the tap threshold: the manipulation completes.
//! let lifted = ContactSample::new(TouchPhase::Ended, Point::new(30.0, 0.0))
//!     .with_delta(Vec2::new(30.0, 0.0))
//!     .with_delta_time(0.4);
//! let outcome = classifier.on_contact_end(lifted, &mut events).unwrap();
//!
//! assert_eq!(outcome, ContactOutcome::ManipulationCompleted);
//! assert_eq!(events.last(), Some(&ContactEvent::PointerUp));
//! ```
//!
//! ## Threshold defaults
//!
//! `max_tap_contact_time` defaults to half a second. `contact_epsilon`
//! defaults to [`DEFAULT_CONTACT_EPSILON`], the value touch controllers have
//! historically shipped with; with both defaults the noise floor is larger
//! than the tap threshold, so configure it explicitly if clicks are wanted.
//!
//! ## Features
//!
//! - `std` (default): forward `std` to Kurbo.
//! - `libm`: use `libm` for Kurbo's float math in `no_std` builds.
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

pub mod classifier;
pub mod event;
pub mod interaction;
pub mod phase;
pub mod trace;
pub mod tracker;

pub use classifier::{
    ClassifierConfig, ContactClassifier, ContactError, ContactOutcome, ContactState,
    DEFAULT_CONTACT_EPSILON, DEFAULT_MAX_TAP_CONTACT_TIME,
};
pub use event::{ContactEvent, ContactSink, FnSink};
pub use tracker::ContactTracker;
