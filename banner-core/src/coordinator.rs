//! Animation-boundary coordinator
//!
//! The coordinator owns the display driver and is the only place the
//! active [`DisplayState`] changes. Each tick it asks the driver whether
//! the current animation cycle has completed. Only then does it drain the
//! intake, apply whatever was staged, and publish the confirmed values.

use core::fmt::Write;

use heapless::String;

use banner_protocol::Property;

use crate::config::BannerConfig;
use crate::intake::{MessageText, UpdateIntake};
use crate::traits::{DisplayDriver, Publisher, TextAlign, TextEffect};

/// Values currently shown on the display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    pub text: MessageText,
    /// Frame delay in milliseconds
    pub speed_ms: u16,
    pub brightness: u8,
}

/// Which fields a tick applied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Drained {
    pub text: bool,
    pub speed: bool,
    pub brightness: bool,
}

impl Drained {
    /// Whether anything was applied
    pub fn any(&self) -> bool {
        self.text || self.speed || self.brightness
    }
}

/// Applies staged updates to the display at animation boundaries
pub struct DisplayCoordinator<D: DisplayDriver> {
    driver: D,
    state: DisplayState,
    align: TextAlign,
    pause_ms: u16,
    effect_in: TextEffect,
    effect_out: TextEffect,
}

impl<D: DisplayDriver> DisplayCoordinator<D> {
    /// Create a coordinator showing the configured welcome text
    ///
    /// The driver is not touched until [`start`](Self::start).
    pub fn new(driver: D, config: &BannerConfig) -> Self {
        Self {
            driver,
            state: DisplayState {
                text: config.welcome_text(),
                speed_ms: config.speed_ms,
                brightness: config.brightness,
            },
            align: config.align,
            pause_ms: config.pause_ms,
            effect_in: config.effect_in,
            effect_out: config.effect_out,
        }
    }

    /// Initialize the driver and load the current state
    pub fn start(&mut self) -> Result<(), D::Error> {
        self.driver.begin()?;
        self.driver.set_intensity(self.state.brightness)?;
        self.load_text()
    }

    /// Run one scheduler iteration
    ///
    /// Does nothing unless the driver reports a completed animation cycle.
    /// Otherwise applies staged text, speed and brightness in that order,
    /// publishing each applied value, then restarts the animation.
    ///
    /// On a driver error the field being applied has already left its slot
    /// and the state keeps its previous value.
    pub fn tick<P: Publisher>(
        &mut self,
        intake: &mut UpdateIntake,
        publisher: &mut P,
    ) -> Result<Drained, D::Error> {
        let mut drained = Drained::default();

        if !self.driver.display_animate()? {
            return Ok(drained);
        }

        if let Some(text) = intake.take_text() {
            self.driver.display_text(
                &text,
                self.align,
                self.state.speed_ms,
                self.pause_ms,
                self.effect_in,
                self.effect_out,
            )?;
            self.state.text = text;
            publisher.publish(Property::Message, &self.state.text);
            drained.text = true;
        }

        if let Some(speed) = intake.take_speed() {
            self.driver.set_speed(speed)?;
            self.state.speed_ms = speed;
            publish_int(publisher, Property::Speed, i32::from(speed));
            drained.speed = true;
        }

        if let Some(brightness) = intake.take_brightness() {
            self.driver.set_intensity(brightness)?;
            self.state.brightness = brightness;
            publish_int(publisher, Property::Brightness, i32::from(brightness));
            drained.brightness = true;
        }

        self.driver.display_reset();
        Ok(drained)
    }

    /// Currently applied values
    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    fn load_text(&mut self) -> Result<(), D::Error> {
        self.driver.display_text(
            &self.state.text,
            self.align,
            self.state.speed_ms,
            self.pause_ms,
            self.effect_in,
            self.effect_out,
        )
    }
}

fn publish_int<P: Publisher>(publisher: &mut P, property: Property, value: i32) {
    let mut buf: String<12> = String::new();
    // i32 always fits in 11 characters
    let _ = write!(buf, "{}", value);
    publisher.publish(property, &buf);
}
