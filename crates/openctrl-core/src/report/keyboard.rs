//! Boot-protocol keyboard report (USB HID Usage Page 0x07).
//!
//! Layout (8 bytes):
//! ```text
//! Byte 0:   Modifier bitmask (see [`Modifiers`])
//! Byte 1:   Reserved, always 0x00
//! Byte 2-7: Up to six concurrently pressed key usage IDs (0x00 = empty slot)
//! ```
//!
//! # What is a usage ID? (for beginners)
//!
//! HID keyboards do not send characters.  They send the *position* of each
//! pressed key as a number from the Keyboard/Keypad usage page: `0x04` is the
//! key labelled "A" on a US layout, `0x28` is Enter, and so on.  The host maps
//! positions to characters according to its configured layout.

/// Report length in bytes.
pub const KEYBOARD_REPORT_LEN: usize = 8;

/// Number of simultaneous non-modifier keys one report can carry.
pub const KEY_SLOTS: usize = 6;

/// Keyboard modifier bitmask (byte 0 of the report).
///
/// Bit assignment follows the HID boot keyboard: usages 0xE0..=0xE7 map to
/// bits 0..=7.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const LEFT_CTRL: u8 = 1 << 0;
    pub const LEFT_SHIFT: u8 = 1 << 1;
    pub const LEFT_ALT: u8 = 1 << 2;
    pub const LEFT_GUI: u8 = 1 << 3;
    pub const RIGHT_CTRL: u8 = 1 << 4;
    pub const RIGHT_SHIFT: u8 = 1 << 5;
    pub const RIGHT_ALT: u8 = 1 << 6;
    pub const RIGHT_GUI: u8 = 1 << 7;
}

/// One keyboard input report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct KeyboardReport {
    pub modifiers: Modifiers,
    /// Pressed key usage IDs; `0` marks an empty slot.
    pub keys: [u8; KEY_SLOTS],
}

impl KeyboardReport {
    /// The all-keys-released report: no modifiers, every slot empty.
    pub const fn released() -> Self {
        Self {
            modifiers: Modifiers(0),
            keys: [0; KEY_SLOTS],
        }
    }

    /// Returns `true` if no modifier and no key is held.
    pub fn is_released(&self) -> bool {
        self.modifiers.0 == 0 && self.keys.iter().all(|&k| k == 0)
    }

    pub fn to_bytes(&self) -> [u8; KEYBOARD_REPORT_LEN] {
        let k = self.keys;
        [self.modifiers.0, 0x00, k[0], k[1], k[2], k[3], k[4], k[5]]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
