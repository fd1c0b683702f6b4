//! Display commands and their OpenLCD wire encoding.

use heapless::Vec;

/// Prefix byte for HD44780-style display commands.
pub const SPECIAL_COMMAND: u8 = 254;
/// Prefix byte for OpenLCD settings commands (`'|'`).
pub const SETTING_COMMAND: u8 = 0x7C;

/// Clear the display and return the cursor home.
pub const CLEAR_COMMAND: u8 = 0x01;
/// Return the cursor home without clearing.
pub const HOME_COMMAND: u8 = 0x02;
/// Settings sub-command for a full RGB backlight update (`'+'`).
pub const RGB_COMMAND: u8 = 0x2B;
/// Set-DDRAM-address bit for cursor positioning.
pub const SET_DDRAM_ADDR: u8 = 0x80;
/// Display control instruction.
pub const DISPLAY_CONTROL: u8 = 0x08;
/// Display control flag: display on.
pub const DISPLAY_ON: u8 = 0x04;

/// DDRAM offset of the first column of each row.
pub const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// Longest frame a single command can produce (`0x7C 0x2B r g b`).
pub const MAX_FRAME_LEN: usize = 5;

/// Bytes making up one transmission.
pub type Frame = Vec<u8, MAX_FRAME_LEN>;

/// One unit of display communication.
///
/// Commands are plain values: they are copied into the queue and
/// overwritten in place once consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Unoccupied slot. Never valid on the wire.
    #[default]
    Empty,
    /// Raw character for the current cursor position.
    Char(u8),
    /// Display command sent behind [`SPECIAL_COMMAND`].
    Special(u8),
    /// Settings command sent behind [`SETTING_COMMAND`].
    Setting(u8),
    /// Backlight colour, 0-255 per channel.
    Backlight { red: u8, green: u8, blue: u8 },
}

impl Command {
    /// Clear-display command.
    pub const fn clear() -> Self {
        Command::Special(CLEAR_COMMAND)
    }

    /// Cursor-home command.
    pub const fn home() -> Self {
        Command::Special(HOME_COMMAND)
    }

    /// Cursor positioning command. Rows beyond 3 are clamped to 3.
    pub const fn cursor(col: u8, row: u8) -> Self {
        let row = if row > 3 { 3 } else { row };
        Command::Special(SET_DDRAM_ADDR | col.wrapping_add(ROW_OFFSETS[row as usize]))
    }

    /// Display control command carrying the given on/cursor/blink flags.
    pub const fn display_control(flags: u8) -> Self {
        Command::Special(DISPLAY_CONTROL | (flags & 0x07))
    }

    /// Backlight colour command.
    pub const fn backlight(red: u8, green: u8, blue: u8) -> Self {
        Command::Backlight { red, green, blue }
    }

    /// Number of payload bytes carried by this command.
    pub const fn payload_len(&self) -> usize {
        match self {
            Command::Empty => 0,
            Command::Char(_) | Command::Special(_) | Command::Setting(_) => 1,
            Command::Backlight { .. } => 3,
        }
    }

    /// True for the clear-display command, which needs a longer settling time.
    pub const fn is_clear(&self) -> bool {
        matches!(self, Command::Special(CLEAR_COMMAND))
    }

    /// Encodes the command into the bytes written in one transmission.
    ///
    /// Characters that collide with a prefix byte are escaped by sending them
    /// twice. Returns `None` for [`Command::Empty`].
    pub fn encode(&self) -> Option<Frame> {
        let mut frame = Frame::new();
        // Capacity is MAX_FRAME_LEN and no arm pushes more than that.
        let mut push = |byte: u8| {
            let _ = frame.push(byte);
        };

        match *self {
            Command::Empty => return None,
            Command::Char(c) => {
                if c == SPECIAL_COMMAND || c == SETTING_COMMAND {
                    push(c);
                }
                push(c);
            }
            Command::Special(code) => {
                push(SPECIAL_COMMAND);
                push(code);
            }
            Command::Setting(code) => {
                push(SETTING_COMMAND);
                push(code);
            }
            Command::Backlight { red, green, blue } => {
                push(SETTING_COMMAND);
                push(RGB_COMMAND);
                push(red);
                push(green);
                push(blue);
            }
        }

        Some(frame)
    }
}
