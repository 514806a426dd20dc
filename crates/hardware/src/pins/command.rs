//! SDRAM command decoding.
//!
//! A command is the 4-bit pattern `{CS#, RAS#, CAS#, WE#}` sampled on a rising
//! edge, every line active-low. With CS# high the device is deselected and the
//! other three lines are ignored.

use std::fmt;

/// A decoded SDRAM bus command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SdramCommand {
    /// CS# high: the device ignores the bus.
    Deselect,
    /// `0111`: no operation.
    Nop,
    /// `0011`: open the row on A in bank BA.
    Activate,
    /// `0101`: read the column on A in bank BA.
    Read,
    /// `0100`: write DQ to the column on A in bank BA.
    Write,
    /// `0010`: close bank BA, or every bank when A10 is set.
    Precharge,
    /// `0001`: auto-refresh.
    AutoRefresh,
    /// `0000`: load the mode register from A.
    LoadMode,
    /// `0110`: burst terminate.
    BurstTerminate,
}

impl SdramCommand {
    /// Encodes the four control lines as `{CS#, RAS#, CAS#, WE#}` (CS# in bit 3).
    #[inline]
    pub const fn encode_lines(csn: bool, rasn: bool, casn: bool, wen: bool) -> u8 {
        ((csn as u8) << 3) | ((rasn as u8) << 2) | ((casn as u8) << 1) | (wen as u8)
    }

    /// Decodes a 4-bit `{CS#, RAS#, CAS#, WE#}` pattern; bits above 3 are ignored.
    pub const fn decode(bits: u8) -> Self {
        match bits & 0xF {
            0b0111 => Self::Nop,
            0b0011 => Self::Activate,
            0b0101 => Self::Read,
            0b0100 => Self::Write,
            0b0010 => Self::Precharge,
            0b0001 => Self::AutoRefresh,
            0b0000 => Self::LoadMode,
            0b0110 => Self::BurstTerminate,
            _ => Self::Deselect,
        }
    }

    /// Returns the `{CS#, RAS#, CAS#, WE#}` pattern that drives this command.
    pub const fn bits(self) -> u8 {
        match self {
            Self::Deselect => 0b1111,
            Self::Nop => 0b0111,
            Self::Activate => 0b0011,
            Self::Read => 0b0101,
            Self::Write => 0b0100,
            Self::Precharge => 0b0010,
            Self::AutoRefresh => 0b0001,
            Self::LoadMode => 0b0000,
            Self::BurstTerminate => 0b0110,
        }
    }
}

impl fmt::Display for SdramCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Deselect => "DESL",
            Self::Nop => "NOP",
            Self::Activate => "ACT",
            Self::Read => "READ",
            Self::Write => "WRITE",
            Self::Precharge => "PRE",
            Self::AutoRefresh => "REF",
            Self::LoadMode => "MRS",
            Self::BurstTerminate => "BST",
        };
        f.write_str(name)
    }
}
