//! Raw register access on eval boards.

use embedded_io::{Read, Write};

use crate::error::Result;
use crate::tmc5160::registers::{Field, Register};
use crate::tmcl::TmclClient;

/// Register view over an open eval board connection.
pub struct Registers<'a, T> {
    client: &'a mut TmclClient<T>,
}

impl<'a, T> Registers<'a, T>
where
    T: Read + Write,
{
    pub(crate) fn new(client: &'a mut TmclClient<T>) -> Self {
        Self { client }
    }

    /// Write a whole register.
    ///
    /// # Errors
    ///
    /// Fails if `value` exceeds the register width or the board rejects it.
    pub fn write(&mut self, register: Register, value: u32) -> Result<()> {
        let value = register.check(value as u64)?;
        self.client.write_mc(register.address, value)
    }

    /// Read a whole register.
    pub fn read(&mut self, register: Register) -> Result<u32> {
        self.client.read_mc(register.address)
    }

    /// Read-modify-write a single field.
    pub fn write_field(&mut self, field: Field, value: u32) -> Result<()> {
        let current = self.read(field.register)?;
        let updated = field.set(current, value)?;
        self.client.write_mc(field.register.address, updated)
    }

    /// Read a single field.
    pub fn read_field(&mut self, field: Field) -> Result<u32> {
        self.read(field.register).map(|v| field.get(v))
    }
}
