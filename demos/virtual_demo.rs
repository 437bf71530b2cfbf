use inputcore::backends::virtual_input::VirtualSource;
use inputcore::gamepad::{AxisElement, AxisSlot, GamepadDescriptor, HatElement};
use inputcore::{DeviceMeta, Event, EventFilter, GamepadDevice, InputManager, InputSettings};

fn main() -> inputcore::Result<()> {
    let mut manager = InputManager::default();
    let registry = manager.registry().clone();

    manager.add_listener(
        |event: &Event| {
            println!("{}: {:?}", event.device_id, event.kind);
            true
        },
        EventFilter::All,
        None,
    );

    // An Xbox 360 pad: 16-bit sticks, 8-bit triggers on Z/Rz, one hat.
    let descriptor = GamepadDescriptor {
        meta: DeviceMeta::usb(0x045e, 0x028e, "Virtual Xbox 360 pad"),
        axes: vec![
            AxisElement::new(AxisSlot::X, -32768, 32767),
            AxisElement::new(AxisSlot::Y, -32768, 32767),
            AxisElement::new(AxisSlot::Z, 0, 255),
            AxisElement::new(AxisSlot::Rz, 0, 255),
        ],
        hat: Some(HatElement { min: 0 }),
    };
    let mut pad = GamepadDevice::detect(
        registry.clone(),
        registry.next_device_id(),
        &descriptor,
        &InputSettings::default(),
    )?;

    let mut source = VirtualSource::new();
    source.press_button(0);
    source.set_axis(AxisSlot::X, 32767);
    source.set_axis(AxisSlot::Rz, 200);
    source.set_hat(1);
    source.set_hat(8);
    source.release_button(0);

    pad.pump(&mut source)?;
    manager.poll_events();

    drop(pad);
    manager.poll_events();
    Ok(())
}
