//! Request/reply client over a byte transport.

use embedded_io::{Error as _, Read, ReadExactError, Write};

use crate::error::{ConnectionError, Result};

use super::frame::{Command, Reply, Request, FRAME_LEN};

/// Target of a move command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoveMode {
    /// Position is absolute.
    Absolute = 0,
    /// Position is relative to the current target.
    Relative = 1,
}

/// Firmware identification from the binary version query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FirmwareVersion {
    /// Module type number (e.g. 1637).
    pub module_type: u16,
    /// Major version.
    pub major: u8,
    /// Minor version.
    pub minor: u8,
}

impl FirmwareVersion {
    fn from_value(value: i32) -> Self {
        let b = value.to_be_bytes();
        Self {
            module_type: u16::from_be_bytes([b[0], b[1]]),
            major: b[2],
            minor: b[3],
        }
    }
}

/// TMCL client owning its transport.
///
/// Every call sends one request and blocks until the matching reply is read.
pub struct TmclClient<T> {
    transport: T,
    module_address: u8,
}

impl<T> TmclClient<T>
where
    T: Read + Write,
{
    /// Create a client for the module at `module_address`.
    pub fn new(transport: T, module_address: u8) -> Self {
        Self {
            transport,
            module_address,
        }
    }

    /// Module address requests are sent to.
    #[inline]
    pub fn module_address(&self) -> u8 {
        self.module_address
    }

    /// Give back the transport.
    pub fn release(self) -> T {
        self.transport
    }

    /// Send one command and return the board's reply.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, corrupted replies, replies from another
    /// module or to another command, and non-success status codes.
    pub fn request(&mut self, command: Command, type_number: u8, motor_bank: u8, value: i32) -> Result<Reply> {
        let request = Request::new(self.module_address, command, type_number, motor_bank, value);
        let frame = request.encode();
        log::trace!("tmcl tx {:02X?}", frame);

        self.transport.write_all(&frame).map_err(transport_error)?;
        self.transport.flush().map_err(transport_error)?;

        let mut buf = [0u8; FRAME_LEN];
        self.transport.read_exact(&mut buf).map_err(|e| match e {
            ReadExactError::UnexpectedEof => ConnectionError::UnexpectedEof,
            ReadExactError::Other(e) => ConnectionError::Transport(e.kind()),
        })?;
        log::trace!("tmcl rx {:02X?}", buf);

        let reply = Reply::decode(&buf)?;
        if reply.module_address != self.module_address {
            return Err(ConnectionError::WrongModule {
                expected: self.module_address,
                received: reply.module_address,
            }
            .into());
        }
        if reply.command != request.command {
            return Err(ConnectionError::UnexpectedReply {
                sent: request.command,
                received: reply.command,
            }
            .into());
        }
        if !reply.status.is_ok() {
            log::debug!("{:?} type {} rejected: {}", command, type_number, reply.status);
            return Err(ConnectionError::Rejected(reply.status).into());
        }

        Ok(reply)
    }

    /// ROR: rotate right at `velocity`.
    pub fn rotate_right(&mut self, motor: u8, velocity: i32) -> Result<()> {
        self.request(Command::RotateRight, 0, motor, velocity).map(drop)
    }

    /// ROL: rotate left at `velocity`.
    pub fn rotate_left(&mut self, motor: u8, velocity: i32) -> Result<()> {
        self.request(Command::RotateLeft, 0, motor, velocity).map(drop)
    }

    /// MST: stop the motor.
    pub fn motor_stop(&mut self, motor: u8) -> Result<()> {
        self.request(Command::MotorStop, 0, motor, 0).map(drop)
    }

    /// MVP: move to `position`.
    pub fn move_to_position(&mut self, motor: u8, mode: MoveMode, position: i32) -> Result<()> {
        self.request(Command::MoveToPosition, mode as u8, motor, position).map(drop)
    }

    /// SAP: write an axis parameter.
    pub fn set_axis_parameter(&mut self, motor: u8, parameter: u8, value: i32) -> Result<()> {
        log::debug!("SAP {} motor {} = {}", parameter, motor, value);
        self.request(Command::SetAxisParameter, parameter, motor, value).map(drop)
    }

    /// GAP: read an axis parameter.
    pub fn get_axis_parameter(&mut self, motor: u8, parameter: u8) -> Result<i32> {
        self.request(Command::GetAxisParameter, parameter, motor, 0).map(|r| r.value)
    }

    /// Write a motion controller register.
    pub fn write_mc(&mut self, address: u8, value: u32) -> Result<()> {
        log::debug!("WRITE_MC 0x{:02X} = 0x{:08X}", address, value);
        self.request(Command::WriteMc, address, 0, value as i32).map(drop)
    }

    /// Read a motion controller register.
    pub fn read_mc(&mut self, address: u8) -> Result<u32> {
        self.request(Command::ReadMc, address, 0, 0).map(|r| r.value as u32)
    }

    /// Query the firmware version in binary form.
    pub fn firmware_version(&mut self) -> Result<FirmwareVersion> {
        self.request(Command::GetFirmwareVersion, 1, 0, 0)
            .map(|r| FirmwareVersion::from_value(r.value))
    }
}

fn transport_error<E: embedded_io::Error>(e: E) -> ConnectionError {
    ConnectionError::Transport(e.kind())
}
