use clap::{ArgAction, Subcommand};
use faser_manager::{
    DeviceEndpoint, DeviceSession,
    constants::{BOARD_PRODUCT_IDS, SENSORS_COUNT},
    discovery::{list_ports, resolve_port},
    error::FaserResult,
};

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum SensorCommand {
    /// Print the sensitivity of every sensor
    #[command(name = "read", alias = "r")]
    Read,

    /// Set the sensitivity of one sensor
    #[command(name = "sensitivity", alias = "s")]
    Sensitivity {
        /// Sensor index
        #[clap(short, long)]
        index: u32,

        /// Pressure threshold
        #[clap(long, allow_negative_numbers = true)]
        value: i32,
    },

    /// Enable or disable input debouncing
    #[command(name = "debounce", alias = "d")]
    Debounce {
        /// true or false
        #[clap(long, action = ArgAction::Set, required = true)]
        enabled: bool,
    },

    /// Set every sensor's sensitivity, one value per sensor in index order
    #[command(name = "apply")]
    Apply {
        #[clap(num_args = SENSORS_COUNT, required = true, allow_negative_numbers = true)]
        values: Vec<i32>,
    },

    /// List serial ports, marking the ones that look like a pad
    #[command(name = "ports")]
    Ports,
}

pub(crate) fn handle_command(port: Option<String>, command: SensorCommand) -> FaserResult<()> {
    let session = || DeviceSession::from_endpoint(DeviceEndpoint::new(resolve_port(port.clone())));

    match command {
        SensorCommand::Read => print!("{}", session().read_sensitivities()?),
        SensorCommand::Sensitivity { index, value } => {
            print!("{}", session().update_sensitivity(index, value)?)
        }
        SensorCommand::Debounce { enabled } => print!("{}", session().update_debounce(enabled)?),
        SensorCommand::Apply { values } => {
            let session = session();
            for (index, value) in values.into_iter().enumerate() {
                print!("{}", session.update_sensitivity(index as u32, value)?);
            }
        }
        SensorCommand::Ports => print_ports()?,
    }

    Ok(())
}

fn print_ports() -> FaserResult<()> {
    for port in list_ports()? {
        let marker = if port.matches(&BOARD_PRODUCT_IDS) { "*" } else { " " };
        match (port.vid, port.pid) {
            (Some(vid), Some(pid)) => println!(
                "{} {} [{:04x}:{:04x}] {}",
                marker,
                port.name,
                vid,
                pid,
                port.product.unwrap_or_default()
            ),
            _ => println!("{} {}", marker, port.name),
        }
    }
    Ok(())
}
