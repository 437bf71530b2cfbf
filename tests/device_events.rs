use std::collections::HashSet;
use std::sync::Arc;

use inputcore::gamepad::{AxisElement, AxisSlot, HatElement};
use inputcore::geometry::WindowTransform;
use inputcore::{
    ControllerType, DeviceMeta, Event, EventKind, GamepadButton, GamepadDescriptor, GamepadDevice,
    InputDevice, InputSettings, KeyboardDevice, Lifecycle, MouseButton, MouseDevice,
    Registry, TouchpadDevice, Vector2,
};

fn drain(registry: &Registry) -> Vec<Event> {
    registry
        .drain_events()
        .into_iter()
        .map(|(event, token)| {
            token.resolve(false);
            event
        })
        .collect()
}

fn button_changes(events: &[Event]) -> Vec<(GamepadButton, bool)> {
    events
        .iter()
        .filter_map(|e| match e.kind {
            EventKind::GamepadButtonChange { button, pressed, .. } => Some((button, pressed)),
            _ => None,
        })
        .collect()
}

fn xbox_descriptor() -> GamepadDescriptor {
    GamepadDescriptor {
        meta: DeviceMeta::usb(0x045e, 0x028e, "Controller (XBOX 360 For Windows)"),
        axes: vec![
            AxisElement::new(AxisSlot::X, -32768, 32767),
            AxisElement::new(AxisSlot::Y, -32768, 32767),
            AxisElement::new(AxisSlot::Z, 0, 255),
            AxisElement::new(AxisSlot::Rz, 0, 255),
        ],
        hat: Some(HatElement { min: 0 }),
    }
}

#[test]
fn gamepad_button_change_follows_connect() {
    let registry = Arc::new(Registry::new());
    let id = registry.next_device_id();
    let mut pad = GamepadDevice::detect(
        registry.clone(),
        id,
        &xbox_descriptor(),
        &InputSettings::default(),
    )
    .unwrap();
    assert_eq!(pad.lifecycle(), Lifecycle::Connected);

    pad.handle_button_value_change(GamepadButton::FaceBottom, true, 1.0);
    assert_eq!(pad.lifecycle(), Lifecycle::Active);

    let events = drain(&registry);
    assert_eq!(events.len(), 2);
    assert_eq!(
        events[0].kind,
        EventKind::DeviceConnect { controller_type: ControllerType::Gamepad }
    );
    assert_eq!(events[1].device_id, id);
    assert_eq!(
        events[1].kind,
        EventKind::GamepadButtonChange {
            button: GamepadButton::FaceBottom,
            pressed: true,
            previous_pressed: false,
            value: 1.0,
            previous_value: 0.0,
        }
    );
}

#[test]
fn keyboard_construct_and_drop() {
    let registry = Arc::new(Registry::new());
    let keyboard = KeyboardDevice::new(registry.clone(), registry.next_device_id()).unwrap();
    let id = keyboard.id();
    assert_eq!(registry.device_count(), 1);
    drop(keyboard);
    assert_eq!(registry.device_count(), 0);
    assert!(registry.lookup_device(id).is_none());

    let kinds: Vec<_> = drain(&registry).into_iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            EventKind::DeviceConnect { controller_type: ControllerType::Keyboard },
            EventKind::DeviceDisconnect { controller_type: ControllerType::Keyboard },
        ]
    );
}

#[test]
fn live_device_ids_are_unique() {
    let registry = Arc::new(Registry::new());
    let transform = Arc::new(WindowTransform::new(1920.0, 1080.0));
    let keyboard = KeyboardDevice::new(registry.clone(), registry.next_device_id()).unwrap();
    let mouse = MouseDevice::new(registry.clone(), registry.next_device_id(), transform.clone()).unwrap();
    let touch =
        TouchpadDevice::new(registry.clone(), registry.next_device_id(), true, transform).unwrap();
    let pad = GamepadDevice::detect(
        registry.clone(),
        registry.next_device_id(),
        &xbox_descriptor(),
        &InputSettings::default(),
    )
    .unwrap();

    let ids: HashSet<_> = [keyboard.id(), mouse.id(), touch.id(), pad.id()].into_iter().collect();
    assert_eq!(ids.len(), 4);
    assert_eq!(registry.devices().len(), 4);

    // A stale id cannot be registered twice.
    assert!(KeyboardDevice::new(registry.clone(), keyboard.id()).is_err());
}

#[test]
fn hat_sweep_through_device() {
    let registry = Arc::new(Registry::new());
    let mut pad = GamepadDevice::detect(
        registry.clone(),
        registry.next_device_id(),
        &xbox_descriptor(),
        &InputSettings::default(),
    )
    .unwrap();
    drain(&registry);

    pad.handle_hat(0);
    pad.handle_hat(2);
    pad.handle_hat(8);

    assert_eq!(
        button_changes(&drain(&registry)),
        vec![
            (GamepadButton::DpadUp, true),
            (GamepadButton::DpadRight, true),
            (GamepadButton::DpadUp, false),
            (GamepadButton::DpadRight, false),
        ]
    );
}

#[test]
fn repeated_axis_sample_emits_once() {
    let registry = Arc::new(Registry::new());
    let mut pad = GamepadDevice::detect(
        registry.clone(),
        registry.next_device_id(),
        &xbox_descriptor(),
        &InputSettings::default(),
    )
    .unwrap();
    drain(&registry);

    pad.handle_axis(AxisSlot::Rz, 255);
    pad.handle_axis(AxisSlot::Rz, 255);
    assert_eq!(
        button_changes(&drain(&registry)),
        vec![(GamepadButton::RightTrigger, true)]
    );
}

#[test]
fn unknown_controller_uses_generic_layout() {
    let registry = Arc::new(Registry::new());
    let descriptor = GamepadDescriptor {
        meta: DeviceMeta::usb(0x1234, 0x5678, "No-name pad"),
        axes: vec![AxisElement::new(AxisSlot::Rx, 0, 255)],
        hat: None,
    };
    let mut pad = GamepadDevice::detect(
        registry.clone(),
        registry.next_device_id(),
        &descriptor,
        &InputSettings::default(),
    )
    .unwrap();
    drain(&registry);

    pad.handle_button(1, true);
    pad.handle_axis(AxisSlot::Rx, 255);
    assert_eq!(
        button_changes(&drain(&registry)),
        vec![(GamepadButton::FaceBottom, true)]
    );
}

#[test]
fn settings_override_changes_layout() {
    let settings = InputSettings::from_json_str(
        r#"{
            "thumb_deadzone": 0.3,
            "mappings": [{
                "vendor_id": 4660,
                "product_id": 22136,
                "name": "Remapped pad",
                "config": {
                    "button_map": ["Start", "None", "None", "None", "None", "None",
                                   "None", "None", "None", "None", "None", "None",
                                   "None", "None", "None", "None", "None", "None",
                                   "None", "None", "None", "None", "None", "None"],
                    "axis_map": ["None", "None", "None", "None", "None", "None"]
                }
            }]
        }"#,
    )
    .unwrap();

    let registry = Arc::new(Registry::new());
    let descriptor = GamepadDescriptor {
        meta: DeviceMeta::usb(0x1234, 0x5678, "Remapped pad"),
        ..Default::default()
    };
    let mut pad =
        GamepadDevice::detect(registry.clone(), registry.next_device_id(), &descriptor, &settings)
            .unwrap();
    drain(&registry);

    pad.handle_button(0, true);
    assert_eq!(
        button_changes(&drain(&registry)),
        vec![(GamepadButton::Start, true)]
    );
}

#[test]
fn mouse_and_touch_positions_are_normalized() {
    let registry = Arc::new(Registry::new());
    let transform = Arc::new(WindowTransform::new(800.0, 600.0));
    let mut mouse =
        MouseDevice::new(registry.clone(), registry.next_device_id(), transform.clone()).unwrap();
    let mut touch =
        TouchpadDevice::new(registry.clone(), registry.next_device_id(), true, transform).unwrap();
    drain(&registry);

    mouse.handle_button_press(MouseButton::Left, Vector2::new(400.0, 300.0));
    touch.handle_touch_begin(1, Vector2::new(200.0, 150.0), 0.5);

    let kinds: Vec<_> = drain(&registry).into_iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            EventKind::MouseButtonPress {
                button: MouseButton::Left,
                position: Vector2::new(0.5, 0.5),
            },
            EventKind::TouchBegin {
                touch_id: 1,
                position: Vector2::new(0.25, 0.25),
                force: 0.5,
            },
        ]
    );
    assert_eq!(touch.controller_type(), ControllerType::Touchpad);
}
