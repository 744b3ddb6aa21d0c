// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multi-contact routing: one [`ContactClassifier`] per platform touch identifier.
//!
//! Platforms report every active contact each frame, keyed by a touch id.
//! [`ContactTracker`] keeps an independent classifier per id, creates it when
//! the contact begins, and drops it when the contact ends. Events are delivered
//! to a closure together with the id they belong to.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_touch::{ContactEvent, ContactTracker};
//! use understory_touch::phase::{ContactSample, TouchPhase};
//!
//! let mut tracker = ContactTracker::<u32>::default();
//! let mut events = Vec::new();
//! let mut sink = |id: u32, event: ContactEvent| events.push((id, event));
//!
//! tracker.handle(7, ContactSample::new(TouchPhase::Began, Point::ZERO), &mut sink).unwrap();
//! tracker.handle(9, ContactSample::new(TouchPhase::Began, Point::ZERO), &mut sink).unwrap();
//! assert_eq!(tracker.len(), 2);
//!
//! tracker.handle(7, ContactSample::new(TouchPhase::Canceled, Point::ZERO), &mut sink).unwrap();
//! assert!(!tracker.contains(&7));
//! assert!(tracker.contains(&9));
//! assert_eq!(events.last(), Some(&(7, ContactEvent::PointerUp)));
//! ```

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;

use crate::classifier::{ClassifierConfig, ContactClassifier, ContactError, ContactOutcome};
use crate::event::{ContactEvent, FnSink};
use crate::phase::{ContactSample, TouchPhase};

/// Routes samples for several simultaneous contacts to per-contact classifiers.
#[derive(Clone, Debug)]
pub struct ContactTracker<K> {
    config: ClassifierConfig,
    contacts: HashMap<K, ContactClassifier>,
}

impl<K> Default for ContactTracker<K> {
    fn default() -> Self {
        Self {
            config: ClassifierConfig::default(),
            contacts: HashMap::new(),
        }
    }
}

impl<K> ContactTracker<K>
where
    K: Copy + Eq + Hash,
{
    /// Creates an empty tracker; new contacts use `config`.
    #[must_use]
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            contacts: HashMap::new(),
        }
    }

    /// The thresholds applied to newly started contacts.
    #[must_use]
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Replaces the thresholds for new contacts; active contacts keep theirs.
    pub fn set_config(&mut self, config: ClassifierConfig) {
        self.config = config;
    }

    /// Number of active contacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    /// Returns `true` when no contact is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Returns `true` if `id` is an active contact.
    #[must_use]
    pub fn contains(&self, id: &K) -> bool {
        self.contacts.contains_key(id)
    }

    /// The classifier tracking `id`, if active.
    #[must_use]
    pub fn get(&self, id: &K) -> Option<&ContactClassifier> {
        self.contacts.get(id)
    }

    /// Ids of all active contacts, in unspecified order.
    pub fn ids(&self) -> impl Iterator<Item = K> + '_ {
        self.contacts.keys().copied()
    }

    /// Starts tracking `id`.
    ///
    /// Returns [`ContactError::AlreadyActive`] if `id` is already tracked.
    pub fn begin<F>(&mut self, id: K, sink: &mut F) -> Result<(), ContactError>
    where
        F: FnMut(K, ContactEvent),
    {
        if self.contacts.contains_key(&id) {
            return Err(ContactError::AlreadyActive);
        }
        let mut classifier = ContactClassifier::new(self.config);
        classifier.on_contact_start(&mut FnSink(|event: ContactEvent| sink(id, event)))?;
        self.contacts.insert(id, classifier);
        Ok(())
    }

    /// Feeds a sample to `id` without looking at its phase.
    ///
    /// Terminal phases are not special here: an `Ended` or `Canceled` sample
    /// only advances the lifetime and the contact stays tracked. Use
    /// [`handle`](Self::handle) for phase-aware dispatch, or [`end`](Self::end).
    ///
    /// Returns [`ContactError::NotActive`] if `id` is not tracked.
    pub fn sample<F>(
        &mut self,
        id: K,
        sample: ContactSample,
        sink: &mut F,
    ) -> Result<(), ContactError>
    where
        F: FnMut(K, ContactEvent),
    {
        let classifier = self.contacts.get_mut(&id).ok_or(ContactError::NotActive)?;
        classifier.on_contact_sample(sample, &mut FnSink(|event: ContactEvent| sink(id, event)))
    }

    /// Ends `id` with its final sample and stops tracking it.
    ///
    /// Returns [`ContactError::NotActive`] if `id` is not tracked. If the
    /// classifier rejects the sample, the contact stays tracked.
    pub fn end<F>(
        &mut self,
        id: K,
        sample: ContactSample,
        sink: &mut F,
    ) -> Result<ContactOutcome, ContactError>
    where
        F: FnMut(K, ContactEvent),
    {
        let classifier = self.contacts.get_mut(&id).ok_or(ContactError::NotActive)?;
        let mut tagged = FnSink(|event: ContactEvent| sink(id, event));
        let outcome = classifier.on_contact_end(sample, &mut tagged)?;
        self.contacts.remove(&id);
        Ok(outcome)
    }

    /// Dispatches a platform sample by phase.
    ///
    /// `Began` starts the contact and then feeds the sample, so its elapsed
    /// time counts toward the lifetime. `Moved` and `Stationary` feed the
    /// sample. `Ended` and `Canceled` end the contact and return its outcome.
    pub fn handle<F>(
        &mut self,
        id: K,
        sample: ContactSample,
        sink: &mut F,
    ) -> Result<Option<ContactOutcome>, ContactError>
    where
        F: FnMut(K, ContactEvent),
    {
        match sample.phase {
            TouchPhase::Began => {
                if !sample.has_valid_delta_time() {
                    return Err(ContactError::InvalidTime);
                }
                self.begin(id, sink)?;
                self.sample(id, sample, sink)?;
                Ok(None)
            }
            TouchPhase::Moved | TouchPhase::Stationary => {
                self.sample(id, sample, sink)?;
                Ok(None)
            }
            TouchPhase::Ended | TouchPhase::Canceled => self.end(id, sample, sink).map(Some),
        }
    }

    /// Cancels every active contact, returning the ids that were ended.
    ///
    /// Each contact receives a `Canceled` sample at its last tracked position.
    pub fn cancel_all<F>(&mut self, sink: &mut F) -> Vec<K>
    where
        F: FnMut(K, ContactEvent),
    {
        let mut ended = Vec::with_capacity(self.contacts.len());
        for (id, mut classifier) in self.contacts.drain() {
            let position = classifier.interactions().position;
            let cancel = ContactSample::new(TouchPhase::Canceled, position);
            let mut tagged = FnSink(|event: ContactEvent| sink(id, event));
            let result = classifier.on_contact_end(cancel, &mut tagged);
            debug_assert!(result.is_ok(), "tracked contact failed to cancel: {result:?}");
            if result.is_ok() {
                ended.push(id);
            }
        }
        ended
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use kurbo::Point;

    fn at(phase: TouchPhase, dt: f64) -> ContactSample {
        ContactSample::new(phase, Point::new(1.0, 1.0)).with_delta_time(dt)
    }

    #[test]
    fn contacts_are_independent() {
        let config = ClassifierConfig::default().with_contact_epsilon(0.01);
        let mut tracker = ContactTracker::new(config);
        let mut events = Vec::new();
        let mut sink = |id: u8, e: ContactEvent| events.push((id, e));

        tracker.begin(1, &mut sink).unwrap();
        tracker.begin(2, &mut sink).unwrap();
        tracker.sample(1, at(TouchPhase::Moved, 0.1), &mut sink).unwrap();

        assert!(tracker.get(&1).unwrap().is_manipulating());
        assert!(tracker.get(&2).unwrap().is_holding());

        let outcome = tracker.end(2, at(TouchPhase::Ended, 0.7), &mut sink).unwrap();
        assert_eq!(outcome, ContactOutcome::HoldCompleted);
        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.ids().collect::<Vec<_>>(), vec![1]);

        let ids_for_2: Vec<_> = events
            .iter()
            .filter(|(id, _)| *id == 2)
            .map(|(_, e)| *e)
            .collect();
        assert_eq!(
            ids_for_2,
            vec![
                ContactEvent::PointerDown,
                ContactEvent::HoldStarted,
                ContactEvent::HoldCompleted,
                ContactEvent::PointerUp,
            ]
        );
    }

    #[test]
    fn duplicate_begin_and_unknown_ids_are_errors() {
        let mut tracker = ContactTracker::<u8>::default();
        let mut sink = |_: u8, _: ContactEvent| {};

        tracker.begin(1, &mut sink).unwrap();
        assert_eq!(tracker.begin(1, &mut sink), Err(ContactError::AlreadyActive));
        assert_eq!(
            tracker.sample(5, at(TouchPhase::Moved, 0.1), &mut sink),
            Err(ContactError::NotActive)
        );
        assert_eq!(
            tracker.end(5, at(TouchPhase::Ended, 0.1), &mut sink),
            Err(ContactError::NotActive)
        );
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn handle_counts_began_elapsed_time() {
        let mut tracker = ContactTracker::<u8>::default();
        let mut sink = |_: u8, _: ContactEvent| {};

        assert_eq!(tracker.handle(3, at(TouchPhase::Began, 0.125), &mut sink), Ok(None));
        assert_eq!(
            tracker.handle(3, at(TouchPhase::Stationary, 0.125), &mut sink),
            Ok(None)
        );
        assert_eq!(tracker.get(&3).unwrap().lifetime(), 0.25);
    }

    #[test]
    fn handle_ends_and_removes() {
        let mut tracker = ContactTracker::<u8>::default();
        let mut sink = |_: u8, _: ContactEvent| {};

        tracker.handle(3, at(TouchPhase::Began, 0.0), &mut sink).unwrap();
        assert_eq!(
            tracker.handle(3, at(TouchPhase::Canceled, 0.0), &mut sink),
            Ok(Some(ContactOutcome::Canceled))
        );
        assert!(tracker.is_empty());
        assert_eq!(
            tracker.handle(3, at(TouchPhase::Moved, 0.0), &mut sink),
            Err(ContactError::NotActive)
        );
    }

    #[test]
    fn sample_does_not_end_on_terminal_phase() {
        let mut tracker = ContactTracker::<u8>::default();
        let mut events = Vec::new();
        let mut sink = |id: u8, e: ContactEvent| events.push((id, e));

        tracker.begin(4, &mut sink).unwrap();
        tracker.sample(4, at(TouchPhase::Ended, 0.25), &mut sink).unwrap();

        assert!(tracker.contains(&4));
        assert_eq!(tracker.get(&4).unwrap().lifetime(), 0.25);
        assert!(!events.contains(&(4, ContactEvent::PointerUp)));
    }

    #[test]
    fn began_with_bad_delta_time_starts_nothing() {
        let mut tracker = ContactTracker::<u8>::default();
        let mut events = Vec::new();
        let mut sink = |id: u8, e: ContactEvent| events.push((id, e));

        assert_eq!(
            tracker.handle(2, at(TouchPhase::Began, -1.0), &mut sink),
            Err(ContactError::InvalidTime)
        );
        assert!(tracker.is_empty());
        assert!(events.is_empty());
    }

    #[test]
    fn rejected_end_keeps_contact_tracked() {
        let mut tracker = ContactTracker::<u8>::default();
        let mut sink = |_: u8, _: ContactEvent| {};

        tracker.begin(6, &mut sink).unwrap();
        assert_eq!(
            tracker.end(6, at(TouchPhase::Ended, f64::NAN), &mut sink),
            Err(ContactError::InvalidTime)
        );
        assert!(tracker.contains(&6));
        assert_eq!(
            tracker.end(6, at(TouchPhase::Canceled, 0.0), &mut sink),
            Ok(ContactOutcome::Canceled)
        );
        assert!(tracker.is_empty());
    }

    #[test]
    fn cancel_all_ends_every_contact() {
        let mut tracker = ContactTracker::<u8>::default();
        let mut events = Vec::new();
        let mut sink = |id: u8, e: ContactEvent| events.push((id, e));

        tracker.begin(1, &mut sink).unwrap();
        tracker.begin(2, &mut sink).unwrap();
        tracker.sample(2, at(TouchPhase::Moved, 0.1), &mut sink).unwrap();

        let mut ended = tracker.cancel_all(&mut sink);
        ended.sort_unstable();
        assert_eq!(ended, vec![1, 2]);
        assert!(tracker.is_empty());

        assert!(events.contains(&(1, ContactEvent::HoldCanceled)));
        assert!(events.contains(&(2, ContactEvent::ManipulationCanceled)));
        let ups = events
            .iter()
            .filter(|(_, e)| *e == ContactEvent::PointerUp)
            .count();
        assert_eq!(ups, 2);
    }

    #[test]
    fn config_applies_to_new_contacts_only() {
        let mut tracker = ContactTracker::<u8>::default();
        let mut sink = |_: u8, _: ContactEvent| {};

        tracker.begin(1, &mut sink).unwrap();
        let fast = ClassifierConfig::default().with_max_tap_contact_time(0.1);
        tracker.set_config(fast);
        tracker.begin(2, &mut sink).unwrap();

        assert_eq!(tracker.config(), &fast);
        assert_eq!(tracker.get(&1).unwrap().config(), &ClassifierConfig::default());
        assert_eq!(tracker.get(&2).unwrap().config(), &fast);
    }
}
