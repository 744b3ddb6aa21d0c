// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction channels exposed by a touch contact.
//!
//! A touch controller publishes four channels: the pointer position, a
//! digital press, a digital hold, and a dual-axis manipulation delta.
//! [`InteractionState`] holds the live data for each channel and is the
//! classifier's only mutable state besides the contact lifetime.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_touch::interaction::{AxisKind, Interaction, InteractionState};
//!
//! assert_eq!(Interaction::Hold.axis(), AxisKind::Digital);
//!
//! let mut state = InteractionState::default();
//! assert!(state.set_position(Point::new(4.0, 2.0)));
//! // Same position again: nothing changed.
//! assert!(!state.set_position(Point::new(4.0, 2.0)));
//! ```

use kurbo::{Point, Vec2};

/// The shape of the data carried by an interaction channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AxisKind {
    /// A boolean on/off channel.
    Digital,
    /// A two-component channel.
    DualAxis,
}

/// One of the channels a touch contact drives.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Interaction {
    /// Screen position of the contact.
    PointerPosition,
    /// Whether the contact is down.
    Press,
    /// Whether the contact is being held without movement.
    Hold,
    /// Movement delta of a contact classified as a drag.
    Manipulation,
}

impl Interaction {
    /// All channels, ordered by [`Interaction::id`].
    pub const ALL: [Self; 4] = [
        Self::PointerPosition,
        Self::Press,
        Self::Hold,
        Self::Manipulation,
    ];

    /// Stable index of the channel within a touch controller's mapping table.
    #[must_use]
    pub fn id(self) -> u32 {
        match self {
            Self::PointerPosition => 0,
            Self::Press => 1,
            Self::Hold => 2,
            Self::Manipulation => 3,
        }
    }

    /// Looks up a channel by [`Interaction::id`].
    #[must_use]
    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.get(usize::try_from(id).ok()?).copied()
    }

    /// Human-readable name, suitable for binding UIs.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::PointerPosition => "Touch Pointer Position",
            Self::Press => "Touch Press",
            Self::Hold => "Touch Hold",
            Self::Manipulation => "Touch Manipulation",
        }
    }

    /// The data shape of the channel.
    #[must_use]
    pub fn axis(self) -> AxisKind {
        match self {
            Self::Press | Self::Hold => AxisKind::Digital,
            Self::PointerPosition | Self::Manipulation => AxisKind::DualAxis,
        }
    }
}

/// Live data of every interaction channel for one contact.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct InteractionState {
    /// Last tracked pointer position; [`Point::ZERO`] when idle.
    pub position: Point,
    /// Press channel: the contact is active.
    pub pressed: bool,
    /// Hold channel: the contact has not moved and the hold is still pending.
    pub holding: bool,
    /// The contact has moved and is tracked as a manipulation.
    pub manipulating: bool,
    /// Manipulation channel data: last reported delta while manipulating.
    pub manipulation_delta: Vec2,
}

impl InteractionState {
    /// Stores a new pointer position, returning `true` if it differs from the previous one.
    pub fn set_position(&mut self, position: Point) -> bool {
        let changed = self.position != position;
        self.position = position;
        changed
    }

    /// Returns the on/off value of `interaction`, or `None` for the pointer position.
    ///
    /// The manipulation channel is dual-axis but also carries an active flag.
    #[must_use]
    pub fn digital(&self, interaction: Interaction) -> Option<bool> {
        match interaction {
            Interaction::Press => Some(self.pressed),
            Interaction::Hold => Some(self.holding),
            Interaction::Manipulation => Some(self.manipulating),
            Interaction::PointerPosition => None,
        }
    }

    /// Returns the two-component value of `interaction`, or `None` for digital channels.
    #[must_use]
    pub fn dual_axis(&self, interaction: Interaction) -> Option<Vec2> {
        match interaction {
            Interaction::PointerPosition => Some(self.position.to_vec2()),
            Interaction::Manipulation => Some(self.manipulation_delta),
            Interaction::Press | Interaction::Hold => None,
        }
    }

    /// Clears every channel back to its idle value.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
