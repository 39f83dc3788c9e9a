//! Connection handle.
//!
//! A `Connection` exists only while the board is reachable: `open` talks to
//! the board once, `close` consumes the handle and returns the transport.
//! Motor and register views borrow the handle, so no command can be issued
//! before opening or after closing.

use embedded_io::{Read, Write};

use crate::error::{ConfigError, Error, Result};
use crate::tmcl::{FirmwareVersion, TmclClient};

use super::kind::BoardKind;
use super::motor::Motor;
use super::registers::Registers;

/// Open session to one board.
pub struct Connection<T> {
    client: TmclClient<T>,
    kind: BoardKind,
    firmware: FirmwareVersion,
}

impl<T> Connection<T>
where
    T: Read + Write,
{
    /// Open a session and identify the board.
    ///
    /// # Errors
    ///
    /// Fails if the board does not answer the firmware version query.
    pub fn open(transport: T, kind: BoardKind, module_address: u8) -> Result<Self> {
        let mut client = TmclClient::new(transport, module_address);
        let firmware = client.firmware_version()?;
        log::info!(
            "Connected to {} (module {}, firmware {} V{}.{:02})",
            kind,
            module_address,
            firmware.module_type,
            firmware.major,
            firmware.minor
        );

        Ok(Self {
            client,
            kind,
            firmware,
        })
    }

    /// Board type.
    #[inline]
    pub fn kind(&self) -> BoardKind {
        self.kind
    }

    /// Firmware reported when opening.
    #[inline]
    pub fn firmware(&self) -> FirmwareVersion {
        self.firmware
    }

    /// Motor axis `index`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidMotorIndex` if the board has no such axis.
    pub fn motor(&mut self, index: u8) -> Result<Motor<'_, T>> {
        let count = self.kind.motor_count();
        if index >= count {
            return Err(Error::Config(ConfigError::InvalidMotorIndex { index, count }));
        }
        Ok(Motor::new(&mut self.client, index))
    }

    /// Raw register access.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::RegisterAccessUnsupported` on module boards.
    pub fn registers(&mut self) -> Result<Registers<'_, T>> {
        if !self.kind.has_register_access() {
            return Err(Error::Config(ConfigError::RegisterAccessUnsupported(self.kind.name())));
        }
        Ok(Registers::new(&mut self.client))
    }

    /// Underlying TMCL client.
    pub fn client(&mut self) -> &mut TmclClient<T> {
        &mut self.client
    }

    /// Close the session and hand the transport back.
    pub fn close(self) -> T {
        log::info!("Closing connection to {}", self.kind);
        self.client.release()
    }
}
