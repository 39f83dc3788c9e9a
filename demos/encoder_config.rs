//! Program the ABN encoder constant of a TMC5160.
//!
//! The constant is the number of microsteps per encoder tick:
//! `microsteps * fullsteps_per_turn / encoder_resolution`. In the default
//! binary mode it is written as a Q16.16 number, in decimal mode the
//! fraction is written in units of 1/10000.
//!
//! Usage: `encoder_config [config.toml]`

use std::env;
use std::error::Error;

use trinamic_eval::{demo, logging, parse_config, transport::SerialPort, Connection, DemoConfig};

const DEFAULT_CONFIG: &str = r#"
[board]
kind = "tmc5160-eval"

[motor]
steps_per_turn = 200

[encoder]
ticks_per_turn = 10000
mode = "binary"
"#;

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
    log::info!("Connected on {}", port.name());
    let mut connection = Connection::open(port, config.board.kind, config.board.module_address)?;

    let constant = demo::encoder_config(&mut connection, &config)?;
    println!("ENC_CONST = 0x{:08X}", constant.register_value());

    connection.close();
    Ok(())
}
