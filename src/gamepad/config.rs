//! Canonical gamepad layouts keyed by USB vendor/product id.
//!
//! HID gamepads number their buttons and axes however the firmware author
//! liked. A [`GamepadConfig`] assigns a canonical meaning to each of the first
//! 24 button slots and to the six Generic Desktop axis slots (X, Y, Z, Rx, Ry,
//! Rz). [`resolve_config`] walks a fixed, ordered list of known controllers and
//! falls back to [`GENERIC_CONFIG`] for everything else, so it never fails.
//!
//! ## Generic fallback
//! Unknown controllers are read with the Logitech DirectInput layout, which is
//! what most cheap DirectInput pads copy. Its Rx/Ry slots are unassigned, so
//! any axis an unknown device reports there is dropped rather than forwarded
//! under a guessed meaning.
//!
//! ## Overrides
//! [`GamepadConfigTable`] layers user-supplied [`MappingOverride`]s (usually
//! loaded from [`InputSettings`](crate::settings::InputSettings)) on top of the
//! built-in list. Overrides are consulted first, in insertion order.

use serde::{Deserialize, Serialize};

use super::{AxisSlot, GamepadAxis, GamepadButton};

/// Number of mappable button slots.
pub const BUTTON_SLOTS: usize = 24;
/// Number of mappable axis slots (X, Y, Z, Rx, Ry, Rz).
pub const AXIS_SLOTS: usize = 6;

/// Immutable button/axis layout for one family of controllers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamepadConfig {
    /// Canonical button for each raw button index.
    pub button_map: [GamepadButton; BUTTON_SLOTS],
    /// Canonical axis for each [`AxisSlot`], indexed by [`AxisSlot::index`].
    pub axis_map: [GamepadAxis; AXIS_SLOTS],
}

impl GamepadConfig {
    /// Canonical button for a raw button index (`None` when out of range).
    #[inline]
    pub fn button(&self, index: usize) -> GamepadButton {
        self.button_map
            .get(index)
            .copied()
            .unwrap_or(GamepadButton::None)
    }

    #[inline]
    pub fn axis(&self, slot: AxisSlot) -> GamepadAxis {
        self.axis_map[slot.index()]
    }

    /// Whether any axis slot carries the given trigger.
    pub fn has_axis(&self, axis: GamepadAxis) -> bool {
        self.axis_map.contains(&axis)
    }
}

const fn layout(buttons: &[GamepadButton], axis_map: [GamepadAxis; AXIS_SLOTS]) -> GamepadConfig {
    let mut button_map = [GamepadButton::None; BUTTON_SLOTS];
    let mut i = 0;
    while i < buttons.len() && i < BUTTON_SLOTS {
        button_map[i] = buttons[i];
        i += 1;
    }
    GamepadConfig {
        button_map,
        axis_map,
    }
}

use GamepadAxis as A;
use GamepadButton as B;

const XBOX_AXES: [GamepadAxis; AXIS_SLOTS] = [
    A::LeftThumbX,
    A::LeftThumbY,
    A::LeftTrigger,
    A::RightThumbX,
    A::RightThumbY,
    A::RightTrigger,
];

const DIRECT_INPUT_BUTTONS: [GamepadButton; 12] = [
    B::FaceLeft,
    B::FaceBottom,
    B::FaceRight,
    B::FaceTop,
    B::LeftShoulder,
    B::RightShoulder,
    B::LeftTrigger,
    B::RightTrigger,
    B::Back,
    B::Start,
    B::LeftThumb,
    B::RightThumb,
];

const DIRECT_INPUT_AXES: [GamepadAxis; AXIS_SLOTS] = [
    A::LeftThumbX,
    A::LeftThumbY,
    A::RightThumbX,
    A::None,
    A::None,
    A::RightThumbY,
];

pub static PLAYSTATION_3_CONFIG: GamepadConfig = layout(
    &[
        B::Back,
        B::LeftThumb,
        B::RightThumb,
        B::Start,
        B::DpadUp,
        B::DpadRight,
        B::DpadDown,
        B::DpadLeft,
        B::LeftTrigger,
        B::RightTrigger,
        B::LeftShoulder,
        B::RightShoulder,
        B::FaceTop,
        B::FaceRight,
        B::FaceBottom,
        B::FaceLeft,
        B::Pause,
    ],
    [
        A::LeftThumbX,
        A::LeftThumbY,
        A::RightThumbX,
        A::None,
        A::None,
        A::RightThumbY,
    ],
);

// Button 13 is the touchpad click, left unmapped.
pub static PLAYSTATION_4_CONFIG: GamepadConfig = layout(
    &[
        B::FaceLeft,
        B::FaceBottom,
        B::FaceRight,
        B::FaceTop,
        B::LeftShoulder,
        B::RightShoulder,
        B::LeftTrigger,
        B::RightTrigger,
        B::Back,
        B::Start,
        B::LeftThumb,
        B::RightThumb,
        B::Pause,
    ],
    [
        A::LeftThumbX,
        A::LeftThumbY,
        A::RightThumbX,
        A::LeftTrigger,
        A::RightTrigger,
        A::RightThumbY,
    ],
);

pub static XBOX_ONE_CONFIG: GamepadConfig = layout(
    &[
        B::FaceBottom,
        B::FaceRight,
        B::FaceLeft,
        B::FaceTop,
        B::LeftShoulder,
        B::RightShoulder,
        B::Back,
        B::Start,
        B::LeftThumb,
        B::RightThumb,
        B::Pause,
        B::DpadUp,
        B::DpadDown,
        B::DpadLeft,
        B::DpadRight,
    ],
    XBOX_AXES,
);

pub static XBOX_360_CONFIG: GamepadConfig = layout(
    &[
        B::FaceBottom,
        B::FaceRight,
        B::FaceLeft,
        B::FaceTop,
        B::LeftShoulder,
        B::RightShoulder,
        B::LeftThumb,
        B::RightThumb,
        B::Start,
        B::Back,
        B::Pause,
        B::DpadUp,
        B::DpadDown,
        B::DpadLeft,
        B::DpadRight,
    ],
    XBOX_AXES,
);

pub static LOGITECH_DIRECT_INPUT_CONFIG: GamepadConfig =
    layout(&DIRECT_INPUT_BUTTONS, DIRECT_INPUT_AXES);

/// Layout used for every controller not listed in [`BUILTIN_CONFIGS`].
pub static GENERIC_CONFIG: GamepadConfig = layout(&DIRECT_INPUT_BUTTONS, DIRECT_INPUT_AXES);

/// Name reported for controllers that fell through to [`GENERIC_CONFIG`].
pub const GENERIC_NAME: &str = "Generic gamepad";

/// One exact vendor/product match.
#[derive(Debug)]
pub struct ConfigEntry {
    pub vendor_id: u16,
    pub product_id: u16,
    pub name: &'static str,
    pub config: &'static GamepadConfig,
}

const fn entry(
    vendor_id: u16,
    product_id: u16,
    name: &'static str,
    config: &'static GamepadConfig,
) -> ConfigEntry {
    ConfigEntry {
        vendor_id,
        product_id,
        name,
        config,
    }
}

const SONY: u16 = 0x054c;
const MICROSOFT: u16 = 0x045e;
const LOGITECH: u16 = 0x046d;

/// Known controllers, checked top to bottom.
pub static BUILTIN_CONFIGS: &[ConfigEntry] = &[
    entry(SONY, 0x0268, "PlayStation 3 controller", &PLAYSTATION_3_CONFIG),
    entry(SONY, 0x05c4, "PlayStation 4 controller", &PLAYSTATION_4_CONFIG),
    entry(SONY, 0x09cc, "PlayStation 4 controller (2nd gen)", &PLAYSTATION_4_CONFIG),
    entry(MICROSOFT, 0x02d1, "Xbox One controller", &XBOX_ONE_CONFIG),
    entry(MICROSOFT, 0x02dd, "Xbox One controller (2015)", &XBOX_ONE_CONFIG),
    entry(MICROSOFT, 0x02e3, "Xbox One Elite controller", &XBOX_ONE_CONFIG),
    entry(MICROSOFT, 0x02ea, "Xbox One S controller", &XBOX_ONE_CONFIG),
    entry(MICROSOFT, 0x028e, "Xbox 360 controller", &XBOX_360_CONFIG),
    entry(MICROSOFT, 0x028f, "Xbox 360 wireless controller", &XBOX_360_CONFIG),
    entry(MICROSOFT, 0x0719, "Xbox 360 wireless receiver", &XBOX_360_CONFIG),
    entry(LOGITECH, 0xc21d, "Logitech Gamepad F310", &XBOX_360_CONFIG),
    entry(LOGITECH, 0xc21e, "Logitech Gamepad F510", &XBOX_360_CONFIG),
    entry(LOGITECH, 0xc21f, "Logitech Gamepad F710", &XBOX_360_CONFIG),
    entry(LOGITECH, 0xc242, "Logitech ChillStream", &XBOX_360_CONFIG),
    entry(0x0738, 0x4716, "Mad Catz wired Xbox 360 controller", &XBOX_360_CONFIG),
    entry(0x0738, 0x4726, "Mad Catz Xbox 360 controller", &XBOX_360_CONFIG),
    entry(0x0738, 0xb726, "Mad Catz Xbox controller - MW2", &XBOX_360_CONFIG),
    entry(0x0e6f, 0x0113, "Afterglow AX.1 gamepad", &XBOX_360_CONFIG),
    entry(0x0e6f, 0x0201, "Pelican PL-3601 TSZ", &XBOX_360_CONFIG),
    entry(0x0e6f, 0x0213, "Afterglow gamepad for Xbox 360", &XBOX_360_CONFIG),
    entry(0x0e6f, 0x021f, "Rock Candy gamepad for Xbox 360", &XBOX_360_CONFIG),
    entry(0x0f0d, 0x000a, "Hori Co. DOA4 FightStick", &XBOX_360_CONFIG),
    entry(0x0f0d, 0x000d, "Hori Fighting Stick EX2", &XBOX_360_CONFIG),
    entry(0x0f0d, 0x0016, "Hori Real Arcade Pro.EX", &XBOX_360_CONFIG),
    entry(0x12ab, 0x0004, "Honey Bee Xbox 360 dancepad", &XBOX_360_CONFIG),
    entry(0x146b, 0x0601, "BigBen Interactive XBOX 360 controller", &XBOX_360_CONFIG),
    entry(0x1532, 0x0037, "Razer Sabertooth", &XBOX_360_CONFIG),
    entry(0x15e4, 0x3f00, "Power A Mini Pro Elite", &XBOX_360_CONFIG),
    entry(0x162e, 0xbeef, "Joytech Neo-Se Take2", &XBOX_360_CONFIG),
    entry(0x1689, 0xfd00, "Razer Onza Tournament Edition", &XBOX_360_CONFIG),
    entry(0x1689, 0xfd01, "Razer Onza Classic Edition", &XBOX_360_CONFIG),
    entry(0x1bad, 0xf016, "Mad Catz Xbox 360 controller", &XBOX_360_CONFIG),
    entry(0x1bad, 0xf023, "MLG Pro Circuit controller (Xbox)", &XBOX_360_CONFIG),
    entry(0x1bad, 0xf900, "Harmonix Xbox 360 controller", &XBOX_360_CONFIG),
    entry(0x24c6, 0x5300, "PowerA MINI PROEX", &XBOX_360_CONFIG),
    entry(0x24c6, 0x5303, "Xbox Airflo wired controller", &XBOX_360_CONFIG),
    entry(0x24c6, 0x531a, "PowerA Pro Ex", &XBOX_360_CONFIG),
    entry(0x24c6, 0x5500, "Hori XBOX 360 EX 2 with Turbo", &XBOX_360_CONFIG),
    entry(0x24c6, 0x5501, "Hori Real Arcade Pro VX-SA", &XBOX_360_CONFIG),
    entry(LOGITECH, 0xc216, "Logitech Dual Action", &LOGITECH_DIRECT_INPUT_CONFIG),
    entry(LOGITECH, 0xc218, "Logitech RumblePad 2", &LOGITECH_DIRECT_INPUT_CONFIG),
    entry(LOGITECH, 0xc219, "Logitech Cordless RumblePad 2", &LOGITECH_DIRECT_INPUT_CONFIG),
];

/// Look up the built-in entry for a controller, if any.
pub fn find_builtin(vendor_id: u16, product_id: u16) -> Option<&'static ConfigEntry> {
    BUILTIN_CONFIGS
        .iter()
        .find(|e| e.vendor_id == vendor_id && e.product_id == product_id)
}

/// Layout for a vendor/product pair. Never fails: unknown pairs get [`GENERIC_CONFIG`].
pub fn resolve_config(vendor_id: u16, product_id: u16) -> &'static GamepadConfig {
    find_builtin(vendor_id, product_id)
        .map(|e| e.config)
        .unwrap_or(&GENERIC_CONFIG)
}

/// User-supplied layout for one vendor/product pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MappingOverride {
    pub vendor_id: u16,
    pub product_id: u16,
    #[serde(default)]
    pub name: Option<String>,
    pub config: GamepadConfig,
}

/// Built-in layouts plus user overrides.
#[derive(Clone, Debug, Default)]
pub struct GamepadConfigTable {
    overrides: Vec<MappingOverride>,
}

impl GamepadConfigTable {
    /// Table with only the built-in layouts.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overrides(overrides: Vec<MappingOverride>) -> Self {
        Self { overrides }
    }

    pub fn push(&mut self, mapping: MappingOverride) {
        self.overrides.push(mapping);
    }

    pub fn overrides(&self) -> &[MappingOverride] {
        &self.overrides
    }

    /// Layout and controller name for a vendor/product pair.
    pub fn resolve_named(&self, vendor_id: u16, product_id: u16) -> (&str, &GamepadConfig) {
        if let Some(o) = self
            .overrides
            .iter()
            .find(|o| o.vendor_id == vendor_id && o.product_id == product_id)
        {
            return (o.name.as_deref().unwrap_or("Custom mapping"), &o.config);
        }
        match find_builtin(vendor_id, product_id) {
            Some(e) => (e.name, e.config),
            None => (GENERIC_NAME, &GENERIC_CONFIG),
        }
    }

    pub fn resolve(&self, vendor_id: u16, product_id: u16) -> GamepadConfig {
        *self.resolve_named(vendor_id, product_id).1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn all_configs() -> Vec<(&'static str, &'static GamepadConfig)> {
        let mut out: Vec<_> = BUILTIN_CONFIGS.iter().map(|e| (e.name, e.config)).collect();
        out.push((GENERIC_NAME, &GENERIC_CONFIG));
        out
    }

    #[test]
    fn button_slots_never_alias() {
        for (name, config) in all_configs() {
            let mut seen = HashSet::new();
            for b in config.button_map.iter().filter(|b| **b != GamepadButton::None) {
                assert!(seen.insert(*b), "{name}: {b:?} mapped twice");
            }
        }
    }

    #[test]
    fn axis_buttons_only_overlap_button_slots_for_triggers() {
        for (name, config) in all_configs() {
            let digital: HashSet<_> = config.button_map.iter().copied().collect();
            for axis in config.axis_map {
                let (neg, pos) = axis.buttons();
                for b in [neg, pos] {
                    if b == GamepadButton::None || !digital.contains(&b) {
                        continue;
                    }
                    assert!(
                        matches!(b, GamepadButton::LeftTrigger | GamepadButton::RightTrigger),
                        "{name}: axis {axis:?} collides with digital {b:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn builtin_entries_are_unique() {
        let mut seen = HashSet::new();
        for e in BUILTIN_CONFIGS {
            assert!(
                seen.insert((e.vendor_id, e.product_id)),
                "duplicate entry {:04x}:{:04x}",
                e.vendor_id,
                e.product_id
            );
        }
    }

    #[test]
    fn known_controllers_resolve() {
        assert_eq!(resolve_config(0x054c, 0x05c4), &PLAYSTATION_4_CONFIG);
        assert_eq!(resolve_config(0x045e, 0x02d1), &XBOX_ONE_CONFIG);
        assert_eq!(resolve_config(0x045e, 0x028e), &XBOX_360_CONFIG);
        assert_eq!(resolve_config(0x054c, 0x0268).button(14), GamepadButton::FaceBottom);
    }

    #[test]
    fn unknown_controller_gets_generic_layout() {
        let config = resolve_config(0xdead, 0xbeef);
        assert_eq!(config, &GENERIC_CONFIG);
        assert_eq!(config.axis(AxisSlot::Rx), GamepadAxis::None);
        assert_eq!(config.button(40), GamepadButton::None);
    }

    #[test]
    fn overrides_take_priority() {
        let mut custom = GENERIC_CONFIG;
        custom.button_map[0] = GamepadButton::FaceBottom;
        custom.button_map[1] = GamepadButton::FaceLeft;
        let table = GamepadConfigTable::with_overrides(vec![MappingOverride {
            vendor_id: 0x045e,
            product_id: 0x028e,
            name: Some("Remapped pad".into()),
            config: custom,
        }]);

        let (name, config) = table.resolve_named(0x045e, 0x028e);
        assert_eq!(name, "Remapped pad");
        assert_eq!(config.button(0), GamepadButton::FaceBottom);
        assert_eq!(table.resolve(0x045e, 0x02d1), XBOX_ONE_CONFIG);
        assert_eq!(table.resolve_named(1, 2).0, GENERIC_NAME);
    }
}
