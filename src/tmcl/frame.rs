//! TMCL request and reply frames.
//!
//! Both directions use 9 bytes: four header bytes, a big-endian 32-bit value
//! and a checksum that is the wrapping sum of the first eight bytes.

use core::fmt;

use crate::error::ConnectionError;

/// Length of every TMCL frame.
pub const FRAME_LEN: usize = 9;

/// Address the host uses for replies.
pub const HOST_ADDRESS: u8 = 2;

/// TMCL instruction numbers used by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Command {
    /// ROR: rotate right with the given velocity.
    RotateRight = 1,
    /// ROL: rotate left with the given velocity.
    RotateLeft = 2,
    /// MST: stop the motor.
    MotorStop = 3,
    /// MVP: move to an absolute or relative position.
    MoveToPosition = 4,
    /// SAP: set axis parameter.
    SetAxisParameter = 5,
    /// GAP: get axis parameter.
    GetAxisParameter = 6,
    /// Firmware version query.
    GetFirmwareVersion = 136,
    /// Write a motion controller register (eval boards).
    WriteMc = 146,
    /// Read a motion controller register (eval boards).
    ReadMc = 147,
}

impl Command {
    /// Instruction number on the wire.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Command {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ok(match code {
            1 => Command::RotateRight,
            2 => Command::RotateLeft,
            3 => Command::MotorStop,
            4 => Command::MoveToPosition,
            5 => Command::SetAxisParameter,
            6 => Command::GetAxisParameter,
            136 => Command::GetFirmwareVersion,
            146 => Command::WriteMc,
            147 => Command::ReadMc,
            other => return Err(other),
        })
    }
}

/// Reply status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Status {
    /// Wrong checksum
    WrongChecksum = 1,
    /// Invalid command
    InvalidCommand = 2,
    /// Wrong type
    WrongType = 3,
    /// Invalid value
    InvalidValue = 4,
    /// Configuration EEPROM locked
    EepromLocked = 5,
    /// Command not available
    CommandNotAvailable = 6,
    /// Successfully executed
    Success = 100,
    /// Command loaded into TMCL program EEPROM
    LoadedIntoEeprom = 101,
}

impl Status {
    /// Whether the board accepted the command.
    #[inline]
    pub fn is_ok(self) -> bool {
        matches!(self, Status::Success | Status::LoadedIntoEeprom)
    }
}

impl TryFrom<u8> for Status {
    type Error = ConnectionError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ok(match code {
            1 => Status::WrongChecksum,
            2 => Status::InvalidCommand,
            3 => Status::WrongType,
            4 => Status::InvalidValue,
            5 => Status::EepromLocked,
            6 => Status::CommandNotAvailable,
            100 => Status::Success,
            101 => Status::LoadedIntoEeprom,
            other => return Err(ConnectionError::UnknownStatus(other)),
        })
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Status::WrongChecksum => "wrong checksum",
            Status::InvalidCommand => "invalid command",
            Status::WrongType => "wrong type",
            Status::InvalidValue => "invalid value",
            Status::EepromLocked => "configuration EEPROM locked",
            Status::CommandNotAvailable => "command not available",
            Status::Success => "success",
            Status::LoadedIntoEeprom => "loaded into EEPROM",
        };
        write!(f, "{} ({})", text, *self as u8)
    }
}

/// Wrapping sum of the first eight bytes.
#[inline]
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().take(FRAME_LEN - 1).fold(0u8, |acc, b| acc.wrapping_add(*b))
}

fn verify(bytes: &[u8; FRAME_LEN]) -> Result<(), ConnectionError> {
    let expected = checksum(bytes);
    let actual = bytes[FRAME_LEN - 1];
    if expected != actual {
        return Err(ConnectionError::ChecksumMismatch { expected, actual });
    }
    Ok(())
}

/// Host-to-module frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Request {
    /// Target module address.
    pub module_address: u8,
    /// Instruction number.
    pub command: u8,
    /// Type byte (axis parameter number, register address, ...).
    pub type_number: u8,
    /// Motor or bank number.
    pub motor_bank: u8,
    /// Signed 32-bit value.
    pub value: i32,
}

impl Request {
    /// Build a request for a known command.
    pub fn new(module_address: u8, command: Command, type_number: u8, motor_bank: u8, value: i32) -> Self {
        Self {
            module_address,
            command: command.code(),
            type_number,
            motor_bank,
            value,
        }
    }

    /// Serialize with checksum.
    pub fn encode(&self) -> [u8; FRAME_LEN] {
        let v = self.value.to_be_bytes();
        let mut bytes = [
            self.module_address,
            self.command,
            self.type_number,
            self.motor_bank,
            v[0],
            v[1],
            v[2],
            v[3],
            0,
        ];
        bytes[FRAME_LEN - 1] = checksum(&bytes);
        bytes
    }

    /// Parse a request, verifying its checksum.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError::ChecksumMismatch` on a corrupted frame.
    pub fn decode(bytes: &[u8; FRAME_LEN]) -> Result<Self, ConnectionError> {
        verify(bytes)?;
        Ok(Self {
            module_address: bytes[0],
            command: bytes[1],
            type_number: bytes[2],
            motor_bank: bytes[3],
            value: i32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
        })
    }
}

/// Module-to-host frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reply {
    /// Host address the reply is sent to.
    pub reply_address: u8,
    /// Address of the answering module.
    pub module_address: u8,
    /// Execution status.
    pub status: Status,
    /// Instruction number being answered.
    pub command: u8,
    /// Signed 32-bit value.
    pub value: i32,
}

impl Reply {
    /// Serialize with checksum.
    pub fn encode(&self) -> [u8; FRAME_LEN] {
        let v = self.value.to_be_bytes();
        let mut bytes = [
            self.reply_address,
            self.module_address,
            self.status as u8,
            self.command,
            v[0],
            v[1],
            v[2],
            v[3],
            0,
        ];
        bytes[FRAME_LEN - 1] = checksum(&bytes);
        bytes
    }

    /// Parse a reply, verifying checksum and status code.
    ///
    /// # Errors
    ///
    /// Returns an error on checksum mismatch or unknown status byte.
    pub fn decode(bytes: &[u8; FRAME_LEN]) -> Result<Self, ConnectionError> {
        verify(bytes)?;
        Ok(Self {
            reply_address: bytes[0],
            module_address: bytes[1],
            status: Status::try_from(bytes[2])?,
            command: bytes[3],
            value: i32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
        })
    }
}
