//! Configure the encoder and the ramp generator of a TMC5160 from physical
//! units.
//!
//! Usage: `configure_and_ramp [config.toml]`

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

[ramp]
vmax_rps = 1.0
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
    let mut connection = Connection::open(port, config.board.kind, config.board.module_address)?;

    let setup = demo::configure_and_ramp(&mut connection, &config)?;
    if let Some(encoder) = setup.encoder {
        log::info!("Encoder constant {}", encoder.value);
    }
    log::info!("VMAX = {}", setup.ramp.vmax.value);

    connection.close();
    Ok(())
}
