//! Relative mouse report.
//!
//! Layout (5 bytes):
//! ```text
//! Byte 0: Button bitmask (see [`MouseButtons`])
//! Byte 1: X displacement (signed)
//! Byte 2: Y displacement (signed)
//! Byte 3: Vertical wheel (signed)
//! Byte 4: Horizontal pan (signed)
//! ```

/// Report length in bytes.
pub const MOUSE_REPORT_LEN: usize = 5;

/// Bit assignments for the mouse button byte.
pub struct MouseButtons;

impl MouseButtons {
    pub const LEFT: u8 = 1 << 0;
    pub const RIGHT: u8 = 1 << 1;
    pub const MIDDLE: u8 = 1 << 2;
    pub const BACK: u8 = 1 << 3;
    pub const FORWARD: u8 = 1 << 4;
}

/// One relative mouse input report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MouseReport {
    pub buttons: u8,
    pub dx: i8,
    pub dy: i8,
    pub wheel: i8,
    pub pan: i8,
}

impl MouseReport {
    pub fn to_bytes(&self) -> [u8; MOUSE_REPORT_LEN] {
        [
            self.buttons,
            self.dx as u8,
            self.dy as u8,
            self.wheel as u8,
            self.pan as u8,
        ]
    }
}
