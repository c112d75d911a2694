//! Published calibration state and the engagement automaton.

use crate::calibration::common::error::{CalibrationError, Result};
use crate::calibration::transform::types::{Estimate, Health, Transform};

/// Two-state engagement automaton driven by toggle edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Engagement {
    #[default]
    Disengaged,
    Engaged,
}

impl Engagement {
    /// The state a toggle edge leads to.
    pub fn toggled(self) -> Self {
        match self {
            Engagement::Disengaged => Engagement::Engaged,
            Engagement::Engaged => Engagement::Disengaged,
        }
    }

    pub fn is_engaged(self) -> bool {
        self == Engagement::Engaged
    }
}

/// The single authoritative copy of what is published downstream.
///
/// Fields are private so the identity-while-disengaged invariant holds for
/// every value a caller can observe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationState {
    transform: Transform,
    health: Health,
    engagement: Engagement,
}

impl CalibrationState {
    pub fn new() -> Self {
        Self {
            transform: Transform::IDENTITY,
            health: 0.0,
            engagement: Engagement::Disengaged,
        }
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Health of the last accepted estimate, 0 before any acceptance.
    pub fn health(&self) -> Health {
        self.health
    }

    pub fn engagement(&self) -> Engagement {
        self.engagement
    }

    pub fn is_engaged(&self) -> bool {
        self.engagement.is_engaged()
    }

    pub(crate) fn engage(&mut self) {
        self.engagement = Engagement::Engaged;
    }

    pub(crate) fn disengage(&mut self) {
        self.engagement = Engagement::Disengaged;
        self.transform = Transform::IDENTITY;
    }

    /// Replaces transform and health with an accepted estimate.
    pub(crate) fn accept(&mut self, estimate: &Estimate) -> Result<()> {
        if !self.is_engaged() {
            return Err(CalibrationError::NotEngaged);
        }
        self.transform = estimate.transform;
        self.health = estimate.health;
        Ok(())
    }
}

impl Default for CalibrationState {
    fn default() -> Self {
        Self::new()
    }
}
