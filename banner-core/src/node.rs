//! Banner node surface
//!
//! [`BannerNode`] is what the messaging collaborator talks to. It routes
//! property sets and broadcasts into the intake, follows the bus lifecycle,
//! and drives the coordinator from the run-loop.

use banner_protocol::{parse_int, Property, PropertyDescriptor, ADVERTISED_PROPERTIES};

use crate::config::BannerConfig;
use crate::coordinator::{DisplayCoordinator, Drained};
use crate::error::Fatal;
use crate::intake::UpdateIntake;
use crate::state::{LifecycleEvent, LifecycleState};
use crate::traits::{DisplayDriver, Publisher};

/// One banner node: intake, coordinator and lifecycle behind one owner
pub struct BannerNode<D: DisplayDriver, P: Publisher> {
    intake: UpdateIntake,
    coordinator: DisplayCoordinator<D>,
    lifecycle: LifecycleState,
    publisher: P,
}

impl<D: DisplayDriver, P: Publisher> BannerNode<D, P> {
    pub fn new(driver: D, publisher: P, config: &BannerConfig) -> Self {
        Self {
            intake: UpdateIntake::new(),
            coordinator: DisplayCoordinator::new(driver, config),
            lifecycle: LifecycleState::Booting,
            publisher,
        }
    }

    /// Start the display and return the properties to advertise
    pub fn setup(&mut self) -> Result<&'static [PropertyDescriptor], D::Error> {
        self.coordinator.start()?;
        Ok(&ADVERTISED_PROPERTIES)
    }

    /// Handle a property set from the bus
    ///
    /// Returns `Ok(true)` if the property is known, whether or not its value
    /// was accepted, and `Ok(false)` otherwise, so the co-processor can
    /// tell unknown properties apart instead of having every set
    /// acknowledged. Setting `reboot` raises
    /// [`Fatal::RebootRequested`].
    pub fn handle_input(&mut self, property: &str, value: &str) -> Result<bool, Fatal> {
        let Some(property) = Property::from_id(property) else {
            return Ok(false);
        };

        match property {
            Property::Message => {
                self.intake.submit_text(value);
            }
            Property::Speed => {
                self.intake.submit_speed(parse_int(value));
            }
            Property::Brightness => {
                self.intake.submit_brightness(parse_int(value));
            }
            Property::Reboot => {
                self.lifecycle = self.lifecycle.transition(LifecycleEvent::RebootRequested);
                return Err(Fatal::RebootRequested);
            }
        }
        Ok(true)
    }

    /// Handle a broadcast; it is shown as `"{level}: {value}"`
    pub fn handle_broadcast(&mut self, level: &str, value: &str) -> bool {
        self.intake.submit_broadcast(level, value);
        true
    }

    /// Follow a bus lifecycle event
    pub fn on_event(&mut self, event: LifecycleEvent) -> Result<(), Fatal> {
        if let LifecycleEvent::NormalMode(settings) = event {
            self.intake.submit_settings(&settings);
        }

        self.lifecycle = self.lifecycle.transition(event);
        match self.lifecycle.restart_reason() {
            Some(reason) => Err(reason),
            None => Ok(()),
        }
    }

    /// Run one coordinator tick
    pub fn poll(&mut self) -> Result<Drained, D::Error> {
        self.coordinator.tick(&mut self.intake, &mut self.publisher)
    }

    pub fn lifecycle(&self) -> LifecycleState {
        self.lifecycle
    }

    pub fn intake(&self) -> &UpdateIntake {
        &self.intake
    }

    pub fn coordinator(&self) -> &DisplayCoordinator<D> {
        &self.coordinator
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }
}
