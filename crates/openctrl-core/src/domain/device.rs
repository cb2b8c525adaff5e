//! Device class identifiers.
//!
//! A device class is one category of emulated input device.  Each class has
//! its own report layout (see [`crate::report`]), its own codec function (see
//! [`crate::codec`]), and, at runtime, its own exclusive send channel.
//!
//! Adding a class means adding a variant here, a report type, and a codec
//! function; nothing else in the routing path needs to change.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One category of emulated USB HID input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Keyboard,
    Mouse,
    Gamepad,
    /// Pen digitizer (stylus with pressure).
    Pen,
    /// Single-contact touch digitizer.
    Touch,
}

impl DeviceClass {
    /// Every device class, in routing-table order.
    pub const ALL: [DeviceClass; 5] = [
        DeviceClass::Keyboard,
        DeviceClass::Mouse,
        DeviceClass::Gamepad,
        DeviceClass::Pen,
        DeviceClass::Touch,
    ];

    /// Lowercase identifier used in routes, log fields and config keys.
    pub fn name(self) -> &'static str {
        match self {
            DeviceClass::Keyboard => "keyboard",
            DeviceClass::Mouse => "mouse",
            DeviceClass::Gamepad => "gamepad",
            DeviceClass::Pen => "pen",
            DeviceClass::Touch => "touch",
        }
    }

    /// Capitalised label used in human-readable responses.
    pub fn display_name(self) -> &'static str {
        match self {
            DeviceClass::Keyboard => "Keyboard",
            DeviceClass::Mouse => "Mouse",
            DeviceClass::Gamepad => "Gamepad",
            DeviceClass::Pen => "Pen",
            DeviceClass::Touch => "Touch",
        }
    }

    /// Size in bytes of one report for this class.
    pub fn report_len(self) -> usize {
        use crate::report::{
            GAMEPAD_REPORT_LEN, KEYBOARD_REPORT_LEN, MOUSE_REPORT_LEN, PEN_REPORT_LEN,
            TOUCH_REPORT_LEN,
        };
        match self {
            DeviceClass::Keyboard => KEYBOARD_REPORT_LEN,
            DeviceClass::Mouse => MOUSE_REPORT_LEN,
            DeviceClass::Gamepad => GAMEPAD_REPORT_LEN,
            DeviceClass::Pen => PEN_REPORT_LEN,
            DeviceClass::Touch => TOUCH_REPORT_LEN,
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
