//! Hand-written collaborator mocks for host tests

use std::string::String;
use std::vec::Vec;

use banner_protocol::Property;

use crate::traits::{DisplayDriver, Publisher, TextAlign, TextEffect};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCall {
    Begin,
    SetIntensity(u8),
    SetSpeed(u16),
    DisplayText {
        text: String,
        speed_ms: u16,
        pause_ms: u16,
    },
    Animate,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

/// Records every call; reports a completed cycle unless told otherwise
pub struct MockDriver {
    pub calls: Vec<DriverCall>,
    pub cycle_done: bool,
    pub fail_set_speed: bool,
}

impl MockDriver {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            cycle_done: true,
            fail_set_speed: false,
        }
    }
}

impl DisplayDriver for MockDriver {
    type Error = MockError;

    fn begin(&mut self) -> Result<(), MockError> {
        self.calls.push(DriverCall::Begin);
        Ok(())
    }

    fn set_intensity(&mut self, level: u8) -> Result<(), MockError> {
        self.calls.push(DriverCall::SetIntensity(level));
        Ok(())
    }

    fn set_speed(&mut self, frame_delay_ms: u16) -> Result<(), MockError> {
        if self.fail_set_speed {
            return Err(MockError);
        }
        self.calls.push(DriverCall::SetSpeed(frame_delay_ms));
        Ok(())
    }

    fn display_text(
        &mut self,
        text: &str,
        _align: TextAlign,
        speed_ms: u16,
        pause_ms: u16,
        _effect_in: TextEffect,
        _effect_out: TextEffect,
    ) -> Result<(), MockError> {
        self.calls.push(DriverCall::DisplayText {
            text: text.into(),
            speed_ms,
            pause_ms,
        });
        Ok(())
    }

    fn display_animate(&mut self) -> Result<bool, MockError> {
        self.calls.push(DriverCall::Animate);
        Ok(self.cycle_done)
    }

    fn display_reset(&mut self) {
        self.calls.push(DriverCall::Reset);
    }
}

#[derive(Default)]
pub struct MockPublisher {
    pub published: Vec<(Property, String)>,
}

impl Publisher for MockPublisher {
    fn publish(&mut self, property: Property, value: &str) {
        self.published.push((property, value.into()));
    }
}
