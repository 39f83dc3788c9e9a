//! Rotate, stop and return to the origin.
//!
//! Writes a fixed ramp, lowers the motor current, spins the motor for a few
//! seconds, stops it and drives it back to position 0 while printing the
//! position.
//!
//! Usage: `rotate_basic [config.toml]`

use std::env;
use std::error::Error;

use trinamic_eval::{demo, logging, parse_config, transport::SerialPort, Connection, DemoConfig};

const DEFAULT_CONFIG: &str = r#"
[board]
kind = "tmc5160-eval"

[motor]
run_current = 2
hold_current = 2

[sequence]
rotate_velocity = 179200
rotate_ms = 5000
settle_ms = 1000
poll_interval_ms = 200
"#;

/// Blocking delay for the host.
struct StdDelay;

impl embedded_hal::delay::DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(ns as u64));
    }
}

fn config() -> trinamic_eval::Result<DemoConfig> {
    match env::args().nth(1) {
        Some(path) => trinamic_eval::load_config(path),
        None => parse_config(DEFAULT_CONFIG),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = config()?;
    logging::init(config.logging.level)?;
    logging::show_info();

    let port = SerialPort::open_configured(&config.board)?;
    let mut connection = Connection::open(port, config.board.kind, config.board.module_address)?;

    let position = demo::rotate_basic(&mut connection, &config, &mut StdDelay)?;
    log::debug!("Final position {}", position.value());

    connection.close();
    println!("\nReady.");
    Ok(())
}
