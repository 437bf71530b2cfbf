use std::sync::Arc;
use std::thread;

use inputcore::command::SystemCursor;
use inputcore::{
    dispatch_commands, Command, CommandType, CursorImage, DeviceRecord, Event, EventFilter,
    EventKind, EventLogger, FilteredListener, InputDevice, InputManager, Key, KeyboardDevice,
    Motor, Registry, ResourceId,
};

#[test]
fn producer_thread_and_consumer_loop() {
    let mut manager = InputManager::default();
    let registry = manager.registry().clone();

    manager.add_listener(EventLogger::new(), EventFilter::All, None);
    manager.add_listener(
        FilteredListener::new(
            |e: &Event| matches!(e.kind, EventKind::KeyPress { key: Key::Enter }),
            |_: &Event| true,
        ),
        EventFilter::Keyboard,
        None,
    );

    let producer = {
        let registry = registry.clone();
        thread::spawn(move || {
            let mut keyboard =
                KeyboardDevice::new(registry.clone(), registry.next_device_id()).unwrap();
            let handled = keyboard.handle_key_press(Key::Enter);
            let ignored = keyboard.handle_key_press(Key::Tab);
            (keyboard, handled, ignored)
        })
    };
    let (keyboard, handled, ignored) = producer.join().unwrap();

    assert_eq!(manager.poll_events(), 3);
    assert!(handled.wait());
    assert!(!ignored.wait());

    let state = manager.snapshot().get(keyboard.id()).unwrap();
    assert!(state.is_key_down(Key::Enter));
    assert!(state.is_key_down(Key::Tab));

    drop(keyboard);
    manager.poll_events();
    assert!(manager.snapshot().is_empty());
}

#[test]
fn many_producers_keep_per_device_order() {
    let registry = Arc::new(Registry::new());
    let producers: Vec<_> = (0..4)
        .map(|_| {
            let registry = registry.clone();
            thread::spawn(move || {
                let mut keyboard =
                    KeyboardDevice::new(registry.clone(), registry.next_device_id()).unwrap();
                for key in [Key::A, Key::B, Key::C] {
                    keyboard.handle_key_press(key);
                }
                keyboard
            })
        })
        .collect();
    let keyboards: Vec<_> = producers.into_iter().map(|p| p.join().unwrap()).collect();

    let events: Vec<Event> = registry.drain_events().into_iter().map(|(e, _)| e).collect();
    assert_eq!(events.len(), 16);
    for keyboard in &keyboards {
        let keys: Vec<_> = events
            .iter()
            .filter(|e| e.device_id == keyboard.id())
            .filter_map(|e| match e.kind {
                EventKind::KeyPress { key } => Some(key),
                _ => None,
            })
            .collect();
        assert_eq!(keys, vec![Key::A, Key::B, Key::C]);
    }
}

#[test]
fn dropped_token_reports_ignored() {
    let registry = Arc::new(Registry::new());
    let mut keyboard = KeyboardDevice::new(registry.clone(), registry.next_device_id()).unwrap();
    let mut completion = keyboard.handle_key_release(Key::Escape);
    assert_eq!(completion.try_outcome(), None);
    drop(registry.drain_events());
    assert_eq!(completion.try_outcome(), Some(false));
}

#[test]
fn commands_reach_the_executor_once() {
    let manager = InputManager::default();
    let registry = manager.registry().clone();
    let keyboard = KeyboardDevice::new(registry.clone(), registry.next_device_id()).unwrap();
    let id = keyboard.id();

    manager.start_device_discovery();
    manager.show_virtual_keyboard(id);
    manager.set_vibration(id, Motor::Right, 0.5);
    let cursor = manager.create_cursor(CursorImage::System(SystemCursor::Crosshair));
    manager.set_cursor(id, cursor);
    manager.set_cursor_locked(id, true);

    let mut executed = Vec::new();
    let mut executor = |command: &Command, target: Option<&DeviceRecord>| {
        if let Some(record) = target {
            assert_eq!(record.id, id);
        }
        executed.push(command.command_type());
    };
    assert_eq!(dispatch_commands(&registry, &mut executor), 6);
    assert_eq!(
        executed,
        vec![
            CommandType::StartDeviceDiscovery,
            CommandType::ShowVirtualKeyboard,
            CommandType::SetVibration,
            CommandType::InitCursor,
            CommandType::SetCursor,
            CommandType::SetCursorLocked,
        ]
    );

    // Device gone: its queued commands are dropped, global ones still run.
    drop(keyboard);
    manager.hide_virtual_keyboard(id);
    manager.destroy_cursor(cursor);
    let mut count = 0;
    let mut counter = |_: &Command, _: Option<&DeviceRecord>| count += 1;
    assert_eq!(dispatch_commands(&registry, &mut counter), 1);
    assert_eq!(count, 1);
    assert_eq!(registry.allocate_resource_id(), ResourceId(1));
}
