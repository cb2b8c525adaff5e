//! Request-to-report codec.
//!
//! One pure function per device class turns a decoded request body into a
//! fully populated report:
//!
//! ```text
//! JSON body ──► RawFieldSet ──► per-field default + width truncation ──► Report
//! ```
//!
//! # Permissiveness policy
//!
//! The bridge favours availability over strict validation.  Only a body whose
//! top level is not a key/value mapping is rejected
//! ([`ValidationError::WrongShape`]).  Everything else degrades gracefully:
//!
//! - A missing field takes the neutral default listed in [`defaults`].
//! - A numeric value wider than the report field is reduced to the field's bit
//!   width with two's-complement wrap-around, the same as a narrowing integer
//!   cast.  `leftX = 200` becomes `-56`; `hat = 257` becomes `1`.
//! - Keyboard key lists longer than [`KEY_SLOTS`] keep only the first six
//!   entries.
//!
//! None of these functions has side effects.

pub mod fields;

pub use fields::{FieldValue, RawFieldSet};

use serde_json::Value;
use thiserror::Error;

use crate::domain::device::DeviceClass;
use crate::report::{
    GamepadReport, KeyboardReport, Modifiers, MouseReport, PenReport, Report, TouchReport,
    KEY_SLOTS,
};

/// Errors that reject a request body outright.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The body is not a key/value mapping.
    #[error("request body must be a JSON object, got {found}")]
    WrongShape { found: &'static str },
}

/// Neutral values used for every absent field.
pub mod defaults {
    pub const MODIFIERS: i64 = 0;

    pub const MOUSE_DX: i64 = 0;
    pub const MOUSE_DY: i64 = 0;
    pub const MOUSE_WHEEL: i64 = 0;
    pub const MOUSE_PAN: i64 = 0;
    pub const MOUSE_BUTTONS: i64 = 0;

    pub const GAMEPAD_AXIS: i64 = 0;
    pub const GAMEPAD_TRIGGER: i64 = 0;
    pub const GAMEPAD_HAT: i64 = crate::report::gamepad::hat::CENTERED as i64;
    pub const GAMEPAD_BUTTONS: i64 = 0;

    pub const TIP: bool = false;
    pub const IN_RANGE: bool = false;
    pub const COORDINATE: i64 = 0;
    pub const PRESSURE: i64 = 0;
    pub const CONTACT_ID: i64 = 0;
    pub const CONTACT_COUNT: i64 = 0;
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Builds the report for `class` from a decoded request body.
///
/// # Errors
///
/// Returns [`ValidationError::WrongShape`] if `body` is not a JSON object
/// (or `null`, which is treated as an empty object).
///
/// # Examples
///
/// ```rust
/// use openctrl_core::{build_report, DeviceClass, Report};
/// use serde_json::json;
///
/// let report = build_report(DeviceClass::Mouse, &json!({"dx": 10})).unwrap();
/// assert!(matches!(report, Report::Mouse(m) if m.dx == 10));
/// ```
pub fn build_report(class: DeviceClass, body: &Value) -> Result<Report, ValidationError> {
    let fields = RawFieldSet::from_json(body)?;
    let report = match class {
        DeviceClass::Keyboard => keyboard_from_fields(&fields).into(),
        DeviceClass::Mouse => mouse_from_fields(&fields).into(),
        DeviceClass::Gamepad => gamepad_from_fields(&fields).into(),
        DeviceClass::Pen => pen_from_fields(&fields).into(),
        DeviceClass::Touch => touch_from_fields(&fields).into(),
    };
    tracing::trace!(%class, fields = fields.len(), "built report");
    Ok(report)
}

/// Builds a keyboard report from `{"modifiers": int, "keys": [int]}`.
///
/// # Errors
///
/// Returns [`ValidationError::WrongShape`] if `body` is not a JSON object.
pub fn build_keyboard(body: &Value) -> Result<KeyboardReport, ValidationError> {
    RawFieldSet::from_json(body).map(|f| keyboard_from_fields(&f))
}

/// Builds a mouse report from `{"dx", "dy", "wheel", "pan", "buttons"}`.
///
/// # Errors
///
/// Returns [`ValidationError::WrongShape`] if `body` is not a JSON object.
pub fn build_mouse(body: &Value) -> Result<MouseReport, ValidationError> {
    RawFieldSet::from_json(body).map(|f| mouse_from_fields(&f))
}

/// Builds a gamepad report from the stick, trigger, hat and button fields.
///
/// # Errors
///
/// Returns [`ValidationError::WrongShape`] if `body` is not a JSON object.
pub fn build_gamepad(body: &Value) -> Result<GamepadReport, ValidationError> {
    RawFieldSet::from_json(body).map(|f| gamepad_from_fields(&f))
}

/// Builds a pen report from `{"tip", "inRange", "x", "y", "pressure"}`.
///
/// # Errors
///
/// Returns [`ValidationError::WrongShape`] if `body` is not a JSON object.
pub fn build_pen(body: &Value) -> Result<PenReport, ValidationError> {
    RawFieldSet::from_json(body).map(|f| pen_from_fields(&f))
}

/// Builds a touch report from
/// `{"tip", "inRange", "contactId", "x", "y", "contactCount"}`.
///
/// # Errors
///
/// Returns [`ValidationError::WrongShape`] if `body` is not a JSON object.
pub fn build_touch(body: &Value) -> Result<TouchReport, ValidationError> {
    RawFieldSet::from_json(body).map(|f| touch_from_fields(&f))
}

// ── Field extraction ──────────────────────────────────────────────────────────

/// Builds a keyboard report from an already-decoded field set.
///
/// `modifiers` wraps to 8 bits; `keys` fills the six slots in order, extra
/// entries are dropped and each code wraps to 8 bits.
pub fn keyboard_from_fields(fields: &RawFieldSet) -> KeyboardReport {
    let mut keys = [0u8; KEY_SLOTS];
    for (slot, code) in keys.iter_mut().zip(fields.int_sequence("keys")) {
        *slot = code as u8;
    }
    KeyboardReport {
        modifiers: Modifiers(fields.int_or("modifiers", defaults::MODIFIERS) as u8),
        keys,
    }
}

/// Builds a mouse report from an already-decoded field set.
///
/// `buttons` wraps to 8 bits; `dx`, `dy`, `wheel` and `pan` wrap to `i8`.
pub fn mouse_from_fields(fields: &RawFieldSet) -> MouseReport {
    MouseReport {
        buttons: fields.int_or("buttons", defaults::MOUSE_BUTTONS) as u8,
        dx: fields.int_or("dx", defaults::MOUSE_DX) as i8,
        dy: fields.int_or("dy", defaults::MOUSE_DY) as i8,
        wheel: fields.int_or("wheel", defaults::MOUSE_WHEEL) as i8,
        pan: fields.int_or("pan", defaults::MOUSE_PAN) as i8,
    }
}

/// Builds a gamepad report from an already-decoded field set.
///
/// Axes and triggers wrap to `i8`, `hat` to `u8` and `buttons` to `u32`.
pub fn gamepad_from_fields(fields: &RawFieldSet) -> GamepadReport {
    let axis = |name| fields.int_or(name, defaults::GAMEPAD_AXIS) as i8;
    let trigger = |name| fields.int_or(name, defaults::GAMEPAD_TRIGGER) as i8;
    GamepadReport {
        left_x: axis("leftX"),
        left_y: axis("leftY"),
        right_x: axis("rightX"),
        right_y: axis("rightY"),
        left_trigger: trigger("leftTrigger"),
        right_trigger: trigger("rightTrigger"),
        hat: fields.int_or("hat", defaults::GAMEPAD_HAT) as u8,
        buttons: fields.int_or("buttons", defaults::GAMEPAD_BUTTONS) as u32,
    }
}

/// Builds a pen report from an already-decoded field set.
///
/// `x`, `y` and `pressure` wrap to `u16`; `tip` and `inRange` must be JSON
/// booleans or they take their defaults.
pub fn pen_from_fields(fields: &RawFieldSet) -> PenReport {
    PenReport {
        in_range: fields.bool_or("inRange", defaults::IN_RANGE),
        tip: fields.bool_or("tip", defaults::TIP),
        x: fields.int_or("x", defaults::COORDINATE) as u16,
        y: fields.int_or("y", defaults::COORDINATE) as u16,
        pressure: fields.int_or("pressure", defaults::PRESSURE) as u16,
    }
}

/// Builds a touch report from an already-decoded field set.
///
/// Coordinates wrap to `u16`, `contactId` and `contactCount` to `u8`.
pub fn touch_from_fields(fields: &RawFieldSet) -> TouchReport {
    TouchReport {
        contact_id: fields.int_or("contactId", defaults::CONTACT_ID) as u8,
        x: fields.int_or("x", defaults::COORDINATE) as u16,
        y: fields.int_or("y", defaults::COORDINATE) as u16,
        contact_count: fields.int_or("contactCount", defaults::CONTACT_COUNT) as u8,
        in_range: fields.bool_or("inRange", defaults::IN_RANGE),
        tip: fields.bool_or("tip", defaults::TIP),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::gamepad::hat;
    use serde_json::json;

    // ── Keyboard ──────────────────────────────────────────────────────────────

    #[test]
    fn test_keyboard_pads_short_key_list_with_zeros() {
        // Arrange
        let body = json!({"modifiers": 2, "keys": [4, 5]});

        // Act
        let report = build_keyboard(&body).unwrap();

        // Assert
        assert_eq!(report.modifiers, Modifiers(2));
        assert_eq!(report.keys, [4, 5, 0, 0, 0, 0]);
    }

    #[test]
    fn test_keyboard_ignores_keys_beyond_six() {
        let body = json!({"keys": [1, 2, 3, 4, 5, 6, 7, 8]});
        let report = build_keyboard(&body).unwrap();
        assert_eq!(report.keys, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_keyboard_empty_body_is_released() {
        let report = build_keyboard(&json!({})).unwrap();
        assert!(report.is_released());
    }

    #[test]
    fn test_keyboard_keys_wrap_to_one_byte() {
        let report = build_keyboard(&json!({"keys": [260], "modifiers": 513})).unwrap();
        assert_eq!(report.keys[0], 4);
        assert_eq!(report.modifiers, Modifiers(1));
    }

    #[test]
    fn test_keyboard_non_array_keys_yields_no_keys() {
        let report = build_keyboard(&json!({"keys": "abc", "modifiers": 1})).unwrap();
        assert_eq!(report.keys, [0; KEY_SLOTS]);
        assert_eq!(report.modifiers, Modifiers(1));
    }

    // ── Mouse ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_mouse_empty_body_is_all_defaults() {
        let report = build_mouse(&json!({})).unwrap();
        assert_eq!(report, MouseReport::default());
    }

    #[test]
    fn test_mouse_reads_all_fields() {
        let body = json!({"dx": 10, "dy": -5, "wheel": 1, "pan": -1, "buttons": 1});
        let report = build_mouse(&body).unwrap();
        assert_eq!(
            report,
            MouseReport {
                buttons: 1,
                dx: 10,
                dy: -5,
                wheel: 1,
                pan: -1,
            }
        );
    }

    #[test]
    fn test_mouse_deltas_wrap_to_signed_byte() {
        let report = build_mouse(&json!({"dx": 200, "dy": -129})).unwrap();
        assert_eq!(report.dx, -56);
        assert_eq!(report.dy, 127);
    }

    // ── Gamepad ───────────────────────────────────────────────────────────────

    #[test]
    fn test_gamepad_partial_body_defaults_missing_axes() {
        // Arrange
        let body = json!({"buttons": 1, "leftX": 0, "hat": 0});

        // Act
        let report = build_gamepad(&body).unwrap();

        // Assert
        assert_eq!(
            report,
            GamepadReport {
                buttons: 1,
                hat: hat::CENTERED,
                ..GamepadReport::default()
            }
        );
    }

    #[test]
    fn test_gamepad_axis_200_truncates_to_minus_56() {
        let report = build_gamepad(&json!({"leftX": 200})).unwrap();
        assert_eq!(report.left_x, -56);
    }

    #[test]
    fn test_gamepad_buttons_use_full_32_bits() {
        let report = build_gamepad(&json!({"buttons": 0x8000_0001u32})).unwrap();
        assert_eq!(report.buttons, 0x8000_0001);
    }

    #[test]
    fn test_gamepad_triggers_and_hat_map_to_their_slots() {
        let body = json!({"leftTrigger": -10, "rightTrigger": 10, "hat": 257, "rightY": -3});
        let report = build_gamepad(&body).unwrap();
        assert_eq!(report.left_trigger, -10);
        assert_eq!(report.right_trigger, 10);
        assert_eq!(report.hat, 1);
        assert_eq!(report.right_y, -3);
    }

    // ── Pen / Touch ───────────────────────────────────────────────────────────

    #[test]
    fn test_pen_reads_flags_and_wide_coordinates() {
        let body = json!({"tip": true, "inRange": true, "x": 1000, "y": 70000, "pressure": 512});
        let report = build_pen(&body).unwrap();
        assert!(report.tip);
        assert!(report.in_range);
        assert_eq!(report.x, 1000);
        assert_eq!(report.y, (70000u32 & 0xFFFF) as u16);
        assert_eq!(report.pressure, 512);
    }

    #[test]
    fn test_touch_defaults_when_empty() {
        let report = build_touch(&json!({})).unwrap();
        assert_eq!(report, TouchReport::default());
    }

    #[test]
    fn test_touch_reads_contact_fields() {
        let body = json!({"contactId": 2, "contactCount": 1, "x": 300, "y": 400, "tip": true});
        let report = build_touch(&body).unwrap();
        assert_eq!(report.contact_id, 2);
        assert_eq!(report.contact_count, 1);
        assert_eq!((report.x, report.y), (300, 400));
        assert!(report.tip);
        assert!(!report.in_range);
    }

    // ── Shape rejection ───────────────────────────────────────────────────────

    #[test]
    fn test_every_class_rejects_array_body() {
        for class in DeviceClass::ALL {
            let result = build_report(class, &json!([1, 2]));
            assert_eq!(
                result,
                Err(ValidationError::WrongShape { found: "array" }),
                "{class} must reject a non-object body"
            );
        }
    }

    #[test]
    fn test_build_report_returns_matching_class() {
        for class in DeviceClass::ALL {
            let report = build_report(class, &json!({})).unwrap();
            assert_eq!(report.class(), class);
        }
    }

    #[test]
    fn test_build_report_null_body_is_defaults() {
        let report = build_report(DeviceClass::Mouse, &Value::Null).unwrap();
        assert_eq!(report, Report::Mouse(MouseReport::default()));
    }

    #[test]
    fn test_from_fields_accepts_a_hand_built_field_set() {
        // Arrange: mixed numeric kinds, no JSON involved
        let mut fields = RawFieldSet::new();
        fields.insert("dx", FieldValue::Float(-3.9));
        fields.insert("dy", FieldValue::Unsigned(300));
        fields.insert("buttons", FieldValue::Text("left".into()));

        // Act
        let report = mouse_from_fields(&fields);

        // Assert
        assert_eq!(report.dx, -3);
        assert_eq!(report.dy, 44);
        assert_eq!(report.buttons, 0);
    }
}
