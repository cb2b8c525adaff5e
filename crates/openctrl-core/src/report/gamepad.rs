//! Gamepad report: six signed axes, a hat switch, and 32 buttons.
//!
//! Layout (11 bytes):
//! ```text
//! Byte 0:    Left stick X      (signed)
//! Byte 1:    Left stick Y      (signed)
//! Byte 2:    Right stick X     (signed)
//! Byte 3:    Right stick Y     (signed)
//! Byte 4:    Left trigger      (signed)
//! Byte 5:    Right trigger     (signed)
//! Byte 6:    Hat switch        (see [`hat`])
//! Byte 7-10: Button bitmask    (u32, little-endian; bit 0 = button 1)
//! ```

/// Report length in bytes.
pub const GAMEPAD_REPORT_LEN: usize = 11;

/// Hat switch positions.
///
/// `CENTERED` is the null state; directions run clockwise from `UP`.
pub mod hat {
    pub const CENTERED: u8 = 0;
    pub const UP: u8 = 1;
    pub const UP_RIGHT: u8 = 2;
    pub const RIGHT: u8 = 3;
    pub const DOWN_RIGHT: u8 = 4;
    pub const DOWN: u8 = 5;
    pub const DOWN_LEFT: u8 = 6;
    pub const LEFT: u8 = 7;
    pub const UP_LEFT: u8 = 8;
}

/// One absolute gamepad input report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GamepadReport {
    pub left_x: i8,
    pub left_y: i8,
    pub right_x: i8,
    pub right_y: i8,
    pub left_trigger: i8,
    pub right_trigger: i8,
    pub hat: u8,
    pub buttons: u32,
}

impl GamepadReport {
    pub fn to_bytes(&self) -> [u8; GAMEPAD_REPORT_LEN] {
        let [b0, b1, b2, b3] = self.buttons.to_le_bytes();
        [
            self.left_x as u8,
            self.left_y as u8,
            self.right_x as u8,
            self.right_y as u8,
            self.left_trigger as u8,
            self.right_trigger as u8,
            self.hat,
            b0,
            b1,
            b2,
            b3,
        ]
    }
}
