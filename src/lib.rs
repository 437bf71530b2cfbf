//! inputcore: cross-platform input core.
//!
//! Platform code creates device objects ([`KeyboardDevice`], [`MouseDevice`],
//! [`TouchpadDevice`], [`GamepadDevice`]) against a shared [`Registry`] and
//! feeds them raw input. Devices turn that into semantic [`Event`]s on the
//! registry's event queue; the application drains them, usually through an
//! [`InputManager`], and answers with [`Command`]s on the command queue.
//!
//! Gamepad input is normalized to a canonical [`GamepadButton`] set. The
//! layout comes from the controller's vendor/product id; see [`gamepad`].
//!
//! # Feature flags
//! - **`hid`**: `hidapi` helpers in [`backends::hid`].
//! - **`xinput`**: Windows XInput slot poller.

pub mod backends;
pub mod command;
pub mod device;
pub mod error;
pub mod event;
pub mod eventbus;
pub mod filtered_listener;
pub mod gamepad;
pub mod geometry;
pub mod keyboard;
pub mod logger;
pub mod manager;
pub mod metadata;
pub mod mouse;
pub mod registry;
pub mod settings;
pub mod snapshot;
pub mod touchpad;

pub use command::{dispatch_commands, Command, CommandExecutor, CommandType, CursorImage, Motor};
pub use device::{ControllerType, DeviceId, InputDevice, Lifecycle};
pub use error::{InputError, Result};
pub use event::{Event, EventKind, EventType};
pub use eventbus::{EventDispatcher, EventFilter, InputListener, ListenerId};
pub use filtered_listener::FilteredListener;
pub use gamepad::{GamepadAxis, GamepadButton, GamepadConfig, GamepadDescriptor, GamepadDevice};
pub use geometry::{CoordinateTransform, Vector2};
pub use keyboard::{Key, KeyboardDevice};
pub use logger::EventLogger;
pub use manager::InputManager;
pub use metadata::DeviceMeta;
pub use mouse::{MouseButton, MouseDevice};
pub use registry::{Completion, CompletionToken, DeviceRecord, Registry, ResourceId};
pub use settings::InputSettings;
pub use snapshot::{DeviceState, Snapshot};
pub use touchpad::TouchpadDevice;
