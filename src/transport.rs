//! Host serial transport.
//!
//! Wraps a `serialport` device in the `embedded_io` traits the TMCL client
//! is written against, and picks a port when the configuration leaves it
//! empty.

use std::io;
use std::time::Duration;

use serialport::{SerialPortInfo, SerialPortType};

use crate::config::BoardConfig;
use crate::error::{ConfigError, ConnectionError, Error, Result};

/// USB vendor ID used by Trinamic boards and the Landungsbrücke.
pub const TRINAMIC_USB_VID: u16 = 0x2A3C;

/// An open serial device.
pub struct SerialPort {
    port: Box<dyn serialport::SerialPort>,
    name: String,
}

impl SerialPort {
    /// Open `path` at `baud_rate`, failing reads after `timeout`.
    pub fn open(path: &str, baud_rate: u32, timeout: Duration) -> Result<Self> {
        let port = serialport::new(path, baud_rate)
            .timeout(timeout)
            .open()
            .map_err(|e| {
                log::error!("Cannot open {}: {}", path, e);
                Error::Config(ConfigError::IoError(crate::config::truncated(&e.to_string())))
            })?;
        log::info!("Opened {} at {} baud", path, baud_rate);

        Ok(Self {
            port,
            name: path.to_string(),
        })
    }

    /// Open the port named in `config`, or the first discovered one.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError::PortNotFound` when no port is configured
    /// and none is found.
    pub fn open_configured(config: &BoardConfig) -> Result<Self> {
        let timeout = Duration::from_millis(config.timeout_ms as u64);
        if !config.auto_port() {
            return Self::open(config.port.trim(), config.baud_rate, timeout);
        }

        let ports = discover_ports();
        let path = ports.first().ok_or(Error::Connection(ConnectionError::PortNotFound))?;
        log::info!("Using discovered port {}", path);
        Self::open(path, config.baud_rate, timeout)
    }

    /// Device path.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Candidate board ports, Trinamic USB devices first.
///
/// Only USB ports are listed; an enumeration failure yields no ports.
pub fn discover_ports() -> Vec<String> {
    let ports = match serialport::available_ports() {
        Ok(ports) => ports,
        Err(e) => {
            log::warn!("Port enumeration failed: {}", e);
            return Vec::new();
        }
    };

    let mut candidates: Vec<(bool, String)> = ports
        .into_iter()
        .filter_map(|info| classify(&info).map(|trinamic| (trinamic, info.port_name)))
        .collect();
    // Stable sort keeps enumeration order within each group
    candidates.sort_by_key(|(trinamic, _)| !trinamic);

    for (trinamic, name) in &candidates {
        log::debug!("Found port {}{}", name, if *trinamic { " (Trinamic)" } else { "" });
    }
    candidates.into_iter().map(|(_, name)| name).collect()
}

fn classify(info: &SerialPortInfo) -> Option<bool> {
    match &info.port_type {
        SerialPortType::UsbPort(usb) => Some(usb.vid == TRINAMIC_USB_VID),
        _ => None,
    }
}

impl embedded_io::ErrorType for SerialPort {
    type Error = io::Error;
}

impl embedded_io::Read for SerialPort {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        io::Read::read(&mut self.port, buf)
    }
}

impl embedded_io::Write for SerialPort {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::Write::write(&mut self.port, buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::Write::flush(&mut self.port)
    }
}
