//! Pin-level bus signals.
//!
//! Control lines are stored as electrical levels: `true` is high, which for
//! the active-low strobes means deasserted. The builders produce the level
//! patterns a controller would drive for each command.

use super::command::SdramCommand;

/// Lines driven into the device for one clock edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PinInputs {
    /// Chip select, active low.
    pub csn: bool,
    /// Row address strobe, active low.
    pub rasn: bool,
    /// Column address strobe, active low.
    pub casn: bool,
    /// Write enable, active low.
    pub wen: bool,
    /// Bank address.
    pub ba: u8,
    /// Multiplexed row/column address.
    pub a: u16,
    /// Write data driven by the controller.
    pub dq: u16,
    /// Byte mask; a set bit suppresses its byte on WRITE.
    pub dqm: u8,
}

impl Default for PinInputs {
    /// A NOP with every other line low.
    fn default() -> Self {
        Self::command(SdramCommand::Nop)
    }
}

impl PinInputs {
    /// Drives the control lines for `cmd` with bank, address, data and mask low.
    pub const fn command(cmd: SdramCommand) -> Self {
        let bits = cmd.bits();
        Self {
            csn: bits & 0b1000 != 0,
            rasn: bits & 0b0100 != 0,
            casn: bits & 0b0010 != 0,
            wen: bits & 0b0001 != 0,
            ba: 0,
            a: 0,
            dq: 0,
            dqm: 0,
        }
    }

    /// A NOP.
    pub const fn nop() -> Self {
        Self::command(SdramCommand::Nop)
    }

    /// ACTIVATE of `row` in `bank`.
    pub const fn activate(bank: u8, row: u16) -> Self {
        Self {
            ba: bank,
            a: row,
            ..Self::command(SdramCommand::Activate)
        }
    }

    /// READ of `column` in `bank`.
    pub const fn read(bank: u8, column: u16) -> Self {
        Self {
            ba: bank,
            a: column,
            ..Self::command(SdramCommand::Read)
        }
    }

    /// WRITE of `data` to `column` in `bank` under byte mask `dqm`.
    pub const fn write(bank: u8, column: u16, data: u16, dqm: u8) -> Self {
        Self {
            ba: bank,
            a: column,
            dq: data,
            dqm,
            ..Self::command(SdramCommand::Write)
        }
    }

    /// PRECHARGE of `bank`.
    pub const fn precharge(bank: u8) -> Self {
        Self {
            ba: bank,
            ..Self::command(SdramCommand::Precharge)
        }
    }

    /// PRECHARGE with A10 set, closing every bank.
    pub const fn precharge_all() -> Self {
        Self {
            a: 1 << 10,
            ..Self::command(SdramCommand::Precharge)
        }
    }

    /// Returns the four control lines as `{CS#, RAS#, CAS#, WE#}`.
    pub const fn command_bits(&self) -> u8 {
        SdramCommand::encode_lines(self.csn, self.rasn, self.casn, self.wen)
    }

    /// Decodes the command on the control lines.
    pub const fn decoded(&self) -> SdramCommand {
        SdramCommand::decode(self.command_bits())
    }
}

/// Lines driven by the device after an edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PinOutputs {
    /// Read data; 0 on edges where no read matured.
    pub dq: u16,
    /// A read matured this edge and `dq` carries its data.
    pub dq_valid: bool,
}
