use std::time::Duration;

pub const CTRL_C: u8 = 3;
pub const CTRL_D: u8 = 4;
pub const TAB: u8 = b'\t';
pub const NEWLINE: u8 = b'\n';
pub const RETURN: u8 = b'\r';
pub const BACKSPACE: u8 = 127;
pub const CTRL_H: u8 = 8;

pub const ARROW_ANCHOR: u8 = 27;
pub const CSI: u8 = b'[';
pub const UP_ARROW: u8 = b'A';
pub const DOWN_ARROW: u8 = b'B';
pub const RIGHT_ARROW: u8 = b'C';
pub const LEFT_ARROW: u8 = b'D';

/// Marker drawn in front of the highlighted suggestion.
pub const ACTIVE_MARKER: &str = "> ";
pub const INACTIVE_MARKER: &str = "  ";
pub const HOME: u8 = b'H';
pub const END: u8 = b'F';
pub const TILDE: u8 = b'~';

pub const KEY_TIMEOUT_DURATION: Duration = Duration::from_millis(10);
