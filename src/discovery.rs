use tracing::{info, warn};

use crate::{
    constants::{BOARD_PRODUCT_IDS, DEFAULT_PORT},
    error::{FaserError, FaserResult},
};

/// A serial port seen on this host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortInfo {
    pub name: String,
    pub vid: Option<u16>,
    pub pid: Option<u16>,
    pub product: Option<String>,
}

impl PortInfo {
    pub fn matches(&self, product_ids: &[u16]) -> bool {
        self.pid.is_some_and(|pid| product_ids.contains(&pid))
    }
}

pub fn list_ports() -> FaserResult<Vec<PortInfo>> {
    let ports = serialport::available_ports().map_err(|e| {
        FaserError::PortUnavailable(format!("Could not get available ports. Err {:?}", e))
    })?;

    Ok(ports
        .into_iter()
        .map(|port| match port.port_type {
            serialport::SerialPortType::UsbPort(usb) => PortInfo {
                name: port.port_name,
                vid: Some(usb.vid),
                pid: Some(usb.pid),
                product: usb.product,
            },
            _ => PortInfo {
                name: port.port_name,
                vid: None,
                pid: None,
                product: None,
            },
        })
        .collect())
}

pub fn find_board_port(product_ids: &[u16]) -> FaserResult<String> {
    list_ports()?
        .into_iter()
        .find(|port| port.matches(product_ids))
        .map(|port| port.name)
        .ok_or_else(|| {
            FaserError::PortUnavailable(format!(
                "Looked at all available serial ports; could not find one that matches one of \
                 product IDs {:04x?}. Try specifying a serial port?",
                product_ids
            ))
        })
}

/// An explicit port wins, then discovery, then the default device path
pub fn resolve_port(explicit: Option<String>) -> String {
    if let Some(port) = explicit {
        return port;
    }

    match find_board_port(&BOARD_PRODUCT_IDS) {
        Ok(port) => {
            info!("Found pad on {}", port);
            port
        }
        Err(e) => {
            warn!("{}; falling back to {}", e, DEFAULT_PORT);
            DEFAULT_PORT.to_string()
        }
    }
}
