//! Windows input backends.
//!
//! Only the XInput slot poller lives here. HID and Raw Input ingestion is
//! done by the host application, which forwards samples through
//! [`crate::backends::hid`] or calls the keyboard/mouse device handlers
//! directly from its `WM_INPUT` handling.

pub mod xinput;

pub use xinput::{XInputBackend, XINPUT_SLOTS};
