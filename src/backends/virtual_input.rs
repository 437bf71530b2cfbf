use std::collections::VecDeque;

use crate::backends::{RawSample, SampleSource};
use crate::error::{InputError, Result};
use crate::gamepad::{AxisSlot, GamepadButton};

/// In-memory [`SampleSource`]: whatever is fed comes out on the next poll.
#[derive(Debug, Default)]
pub struct VirtualSource {
    pending: VecDeque<RawSample>,
    disconnected: bool,
}

impl VirtualSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inject a raw sample.
    pub fn feed(&mut self, sample: RawSample) {
        self.pending.push_back(sample);
    }

    pub fn press_button(&mut self, index: usize) {
        self.feed(RawSample::Button { index, pressed: true });
    }

    pub fn release_button(&mut self, index: usize) {
        self.feed(RawSample::Button { index, pressed: false });
    }

    pub fn press(&mut self, button: GamepadButton) {
        self.feed(RawSample::Mapped { button, pressed: true });
    }

    pub fn release(&mut self, button: GamepadButton) {
        self.feed(RawSample::Mapped { button, pressed: false });
    }

    pub fn set_axis(&mut self, slot: AxisSlot, value: i32) {
        self.feed(RawSample::Axis { slot, value });
    }

    pub fn set_hat(&mut self, value: i32) {
        self.feed(RawSample::Hat { value });
    }

    /// Make the next poll fail, as if the device was unplugged.
    pub fn disconnect(&mut self) {
        self.disconnected = true;
    }
}

impl SampleSource for VirtualSource {
    fn poll(&mut self, out: &mut Vec<RawSample>) -> Result<()> {
        out.extend(self.pending.drain(..));
        if self.disconnected {
            return Err(InputError::DeviceUnavailable("virtual source disconnected".into()));
        }
        Ok(())
    }
}
