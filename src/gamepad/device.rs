//! Registry-backed gamepad device.
//!
//! [`GamepadDevice`] owns the per-device normalizer state: the resolved
//! layout, one [`AxisChannel`] per mapped axis element, the hat switch, the
//! last state of every canonical button and the trigger flags.
//! Every raw path ends in [`GamepadDevice::handle_button_value_change`],
//! the only place that produces events.
//!
//! ## Trigger dedup
//! Some controllers report a trigger both as a digital button and as an
//! analog axis. When the device has an axis element whose slot resolves to a
//! trigger, the axis wins and the digital button path ignores that trigger.

use std::sync::Arc;

use crate::backends::{RawSample, SampleSource};
use crate::device::{impl_input_device, ControllerType, DeviceCore, DeviceId};
use crate::error::Result;
use crate::event::EventKind;
use crate::metadata::DeviceMeta;
use crate::registry::{Completion, Registry};
use crate::settings::InputSettings;

use super::config::GamepadConfig;
use super::normalizer::{AxisChannel, ButtonChange, Calibration, HatSwitch};
use super::{AxisSlot, ButtonState, GamepadAxis, GamepadButton};

/// One axis element reported by the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisElement {
    pub slot: AxisSlot,
    pub min: i32,
    pub max: i32,
    /// Current value when the device was opened, if the platform reports it.
    pub value: Option<i32>,
}

impl AxisElement {
    pub fn new(slot: AxisSlot, min: i32, max: i32) -> Self {
        Self {
            slot,
            min,
            max,
            value: None,
        }
    }
}

/// Hat switch element. `min` is the raw value of the Up position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HatElement {
    pub min: i32,
}

/// What platform glue learned about a gamepad while opening it.
///
/// Building this is where construction can fail (handle cannot be opened,
/// capabilities cannot be queried); nothing is registered until a descriptor
/// exists.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GamepadDescriptor {
    pub meta: DeviceMeta,
    pub axes: Vec<AxisElement>,
    pub hat: Option<HatElement>,
}

impl GamepadDescriptor {
    pub fn vendor_id(&self) -> u16 {
        self.meta.vid.unwrap_or(0)
    }

    pub fn product_id(&self) -> u16 {
        self.meta.pid.unwrap_or(0)
    }
}

pub struct GamepadDevice {
    core: DeviceCore,
    config: GamepadConfig,
    buttons: [ButtonState; GamepadButton::COUNT],
    axes: [Option<AxisChannel>; 6],
    hat: Option<HatSwitch>,
    has_left_trigger: bool,
    has_right_trigger: bool,
    changes: Vec<ButtonChange>,
    samples: Vec<RawSample>,
}

impl GamepadDevice {
    /// Build a gamepad with an explicit layout and deadzone.
    pub fn new(
        registry: Arc<Registry>,
        id: DeviceId,
        descriptor: &GamepadDescriptor,
        config: GamepadConfig,
        deadzone: f32,
    ) -> Result<Self> {
        let mut axes: [Option<AxisChannel>; 6] = Default::default();
        let mut has_left_trigger = false;
        let mut has_right_trigger = false;

        for element in &descriptor.axes {
            let axis = config.axis(element.slot);
            if axis == GamepadAxis::None {
                log::trace!("{id}: dropping unmapped axis {:?}", element.slot);
                continue;
            }
            match axis {
                GamepadAxis::LeftTrigger => has_left_trigger = true,
                GamepadAxis::RightTrigger => has_right_trigger = true,
                _ => {}
            }
            let (negative, positive) = axis.buttons();
            let mut channel = AxisChannel::new(
                negative,
                positive,
                Calibration::new(element.min, element.max),
                deadzone,
            );
            if let Some(value) = element.value {
                channel = channel.with_initial(value);
            }
            axes[element.slot.index()] = Some(channel);
        }

        let core = DeviceCore::attach(
            registry,
            id,
            ControllerType::Gamepad,
            descriptor.meta.clone(),
        )?;

        Ok(Self {
            core,
            config,
            buttons: [ButtonState::default(); GamepadButton::COUNT],
            axes,
            hat: descriptor.hat.map(|h| HatSwitch::new(h.min)),
            has_left_trigger,
            has_right_trigger,
            changes: Vec::new(),
            samples: Vec::new(),
        })
    }

    /// Build a gamepad whose layout is resolved from its vendor/product id.
    pub fn detect(
        registry: Arc<Registry>,
        id: DeviceId,
        descriptor: &GamepadDescriptor,
        settings: &InputSettings,
    ) -> Result<Self> {
        let table = settings.config_table();
        let (name, config) = table.resolve_named(descriptor.vendor_id(), descriptor.product_id());
        log::debug!(
            "{id}: {:04x}:{:04x} uses layout \"{name}\"",
            descriptor.vendor_id(),
            descriptor.product_id()
        );
        Self::new(registry, id, descriptor, *config, settings.thumb_deadzone)
    }

    #[inline]
    pub fn config(&self) -> &GamepadConfig {
        &self.config
    }

    #[inline]
    pub fn has_left_trigger(&self) -> bool {
        self.has_left_trigger
    }

    #[inline]
    pub fn has_right_trigger(&self) -> bool {
        self.has_right_trigger
    }

    pub fn button_state(&self, button: GamepadButton) -> ButtonState {
        self.buttons[button.index()]
    }

    /// Record the new state of `button` and submit a `GamepadButtonChange`.
    ///
    /// Returns `None` for [`GamepadButton::None`].
    pub fn handle_button_value_change(
        &mut self,
        button: GamepadButton,
        pressed: bool,
        value: f32,
    ) -> Option<Completion> {
        if button == GamepadButton::None {
            return None;
        }
        let state = &mut self.buttons[button.index()];
        let previous = *state;
        *state = ButtonState { pressed, value };

        Some(self.core.submit(EventKind::GamepadButtonChange {
            button,
            pressed,
            previous_pressed: previous.pressed,
            value,
            previous_value: previous.value,
        }))
    }

    /// Digital button by raw index, resolved through the layout.
    pub fn handle_button(&mut self, index: usize, pressed: bool) {
        let button = self.config.button(index);
        self.handle_digital(button, pressed);
    }

    /// Digital button whose canonical meaning the source already knows.
    pub fn handle_mapped_button(&mut self, button: GamepadButton, pressed: bool) {
        self.handle_digital(button, pressed);
    }

    fn handle_digital(&mut self, button: GamepadButton, pressed: bool) {
        match button {
            GamepadButton::LeftTrigger if self.has_left_trigger => return,
            GamepadButton::RightTrigger if self.has_right_trigger => return,
            _ => {}
        }
        // Digital sources may repeat their current state; only edges are events.
        if self.buttons[button.index()].pressed == pressed {
            return;
        }
        self.handle_button_value_change(button, pressed, if pressed { 1.0 } else { 0.0 });
    }

    /// Raw axis sample for a physical slot. Unmapped slots are ignored.
    pub fn handle_axis(&mut self, slot: AxisSlot, raw: i32) {
        let Some(channel) = self.axes[slot.index()].as_mut() else {
            return;
        };
        channel.update(raw, &mut self.changes);
        self.flush_changes();
    }

    /// Raw hat sample. Ignored when the descriptor had no hat.
    pub fn handle_hat(&mut self, raw: i32) {
        let Some(hat) = self.hat.as_mut() else {
            return;
        };
        hat.update(raw, &mut self.changes);
        self.flush_changes();
    }

    /// Changes produced by an external normalizer (e.g. XInput).
    pub fn handle_changes(&mut self, changes: &[ButtonChange]) {
        for c in changes {
            self.handle_button_value_change(c.button, c.pressed, c.value);
        }
    }

    pub fn handle_sample(&mut self, sample: RawSample) {
        match sample {
            RawSample::Button { index, pressed } => self.handle_button(index, pressed),
            RawSample::Mapped { button, pressed } => self.handle_mapped_button(button, pressed),
            RawSample::Axis { slot, value } => self.handle_axis(slot, value),
            RawSample::Hat { value } => self.handle_hat(value),
        }
    }

    /// Drain `source` and handle every sample. Returns how many were read.
    ///
    /// An error means the source is gone; drop this device to disconnect it.
    pub fn pump(&mut self, source: &mut dyn SampleSource) -> Result<usize> {
        let mut samples = std::mem::take(&mut self.samples);
        samples.clear();
        let polled = source.poll(&mut samples);
        for sample in &samples {
            self.handle_sample(*sample);
        }
        let count = samples.len();
        self.samples = samples;
        polled.map(|()| count)
    }

    fn flush_changes(&mut self) {
        let mut changes = std::mem::take(&mut self.changes);
        for c in changes.drain(..) {
            self.handle_button_value_change(c.button, c.pressed, c.value);
        }
        self.changes = changes;
    }
}

impl_input_device!(GamepadDevice);
