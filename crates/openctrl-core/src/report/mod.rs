//! Fixed-layout USB HID input reports, one type per device class.
//!
//! Every report type is a plain struct whose fields are all required, so a
//! report can only ever exist fully populated.  Each type knows how to
//! serialise itself into the exact byte layout written to the gadget device.
//!
//! | Class    | Length | Layout                                                        |
//! |----------|--------|---------------------------------------------------------------|
//! | Keyboard | 8      | `modifiers, reserved, k0..k5`                                 |
//! | Mouse    | 5      | `buttons, dx, dy, wheel, pan`                                 |
//! | Gamepad  | 11     | `lx, ly, rx, ry, lt, rt, hat, buttons (u32 LE)`               |
//! | Pen      | 8      | `in_range, x (u16 LE), y (u16 LE), pressure (u16 LE), tip`    |
//! | Touch    | 8      | `contact_id, x (u16 LE), y (u16 LE), contact_count, in_range, tip` |

pub mod digitizer;
pub mod gamepad;
pub mod keyboard;
pub mod mouse;

pub use digitizer::{PenReport, TouchReport, PEN_REPORT_LEN, TOUCH_REPORT_LEN};
pub use gamepad::{GamepadReport, GAMEPAD_REPORT_LEN};
pub use keyboard::{KeyboardReport, Modifiers, KEYBOARD_REPORT_LEN, KEY_SLOTS};
pub use mouse::{MouseButtons, MouseReport, MOUSE_REPORT_LEN};

use crate::domain::device::DeviceClass;

/// A fully-built report for any device class.
///
/// Produced by [`crate::codec::build_report`] and consumed immediately by the
/// matching device channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    Keyboard(KeyboardReport),
    Mouse(MouseReport),
    Gamepad(GamepadReport),
    Pen(PenReport),
    Touch(TouchReport),
}

impl Report {
    /// The device class this report belongs to.
    pub fn class(&self) -> DeviceClass {
        match self {
            Report::Keyboard(_) => DeviceClass::Keyboard,
            Report::Mouse(_) => DeviceClass::Mouse,
            Report::Gamepad(_) => DeviceClass::Gamepad,
            Report::Pen(_) => DeviceClass::Pen,
            Report::Touch(_) => DeviceClass::Touch,
        }
    }

    /// Serialises the report into its on-wire byte layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Report::Keyboard(r) => r.to_bytes().to_vec(),
            Report::Mouse(r) => r.to_bytes().to_vec(),
            Report::Gamepad(r) => r.to_bytes().to_vec(),
            Report::Pen(r) => r.to_bytes().to_vec(),
            Report::Touch(r) => r.to_bytes().to_vec(),
        }
    }
}

impl From<KeyboardReport> for Report {
    fn from(r: KeyboardReport) -> Self {
        Report::Keyboard(r)
    }
}

impl From<MouseReport> for Report {
    fn from(r: MouseReport) -> Self {
        Report::Mouse(r)
    }
}

impl From<GamepadReport> for Report {
    fn from(r: GamepadReport) -> Self {
        Report::Gamepad(r)
    }
}

impl From<PenReport> for Report {
    fn from(r: PenReport) -> Self {
        Report::Pen(r)
    }
}

impl From<TouchReport> for Report {
    fn from(r: TouchReport) -> Self {
        Report::Touch(r)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_matches_variant() {
        assert_eq!(Report::from(KeyboardReport::released()).class(), DeviceClass::Keyboard);
        assert_eq!(Report::from(MouseReport::default()).class(), DeviceClass::Mouse);
        assert_eq!(Report::from(GamepadReport::default()).class(), DeviceClass::Gamepad);
        assert_eq!(Report::from(PenReport::default()).class(), DeviceClass::Pen);
        assert_eq!(Report::from(TouchReport::default()).class(), DeviceClass::Touch);
    }

    #[test]
    fn test_to_bytes_length_matches_class_report_len() {
        let reports = [
            Report::from(KeyboardReport::released()),
            Report::from(MouseReport::default()),
            Report::from(GamepadReport::default()),
            Report::from(PenReport::default()),
            Report::from(TouchReport::default()),
        ];
        for report in reports {
            assert_eq!(report.to_bytes().len(), report.class().report_len());
        }
    }
}
