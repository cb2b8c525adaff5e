//! Digitizer reports (USB HID Usage Page 0x0D): pen and single-contact touch.
//!
//! Coordinates and pressure are 16-bit little-endian values so that they are
//! not limited to the 0..=255 range of a single byte.
//!
//! Pen layout (8 bytes):
//! ```text
//! Byte 0:   In-range flag (0/1)
//! Byte 1-2: X        (u16 LE)
//! Byte 3-4: Y        (u16 LE)
//! Byte 5-6: Pressure (u16 LE)
//! Byte 7:   Tip-contact flag (0/1)
//! ```
//!
//! Touch layout (8 bytes):
//! ```text
//! Byte 0:   Contact identifier
//! Byte 1-2: X        (u16 LE)
//! Byte 3-4: Y        (u16 LE)
//! Byte 5:   Contact count
//! Byte 6:   In-range flag (0/1)
//! Byte 7:   Tip-contact flag (0/1)
//! ```

pub const PEN_REPORT_LEN: usize = 8;
pub const TOUCH_REPORT_LEN: usize = 8;

/// One pen digitizer report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PenReport {
    pub in_range: bool,
    pub tip: bool,
    pub x: u16,
    pub y: u16,
    pub pressure: u16,
}

impl PenReport {
    pub fn to_bytes(&self) -> [u8; PEN_REPORT_LEN] {
        let [x0, x1] = self.x.to_le_bytes();
        let [y0, y1] = self.y.to_le_bytes();
        let [p0, p1] = self.pressure.to_le_bytes();
        [self.in_range as u8, x0, x1, y0, y1, p0, p1, self.tip as u8]
    }
}

/// One touch digitizer report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TouchReport {
    pub contact_id: u8,
    pub x: u16,
    pub y: u16,
    pub contact_count: u8,
    pub in_range: bool,
    pub tip: bool,
}

impl TouchReport {
    pub fn to_bytes(&self) -> [u8; TOUCH_REPORT_LEN] {
        let [x0, x1] = self.x.to_le_bytes();
        let [y0, y1] = self.y.to_le_bytes();
        [
            self.contact_id,
            x0,
            x1,
            y0,
            y1,
            self.contact_count,
            self.in_range as u8,
            self.tip as u8,
        ]
    }
}
