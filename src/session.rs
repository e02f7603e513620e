use std::sync::{Mutex, PoisonError};

use tracing::{debug, info};

use crate::command::Command;
use crate::error::{FaserError, FaserResult};
use crate::interface::Connector;
use crate::interface::serialport::{DeviceEndpoint, SerialConnector};

/// Runs command/response transactions against the pad, one at a time.
///
/// The port is opened at the start of every transaction and closed before
/// it returns, whatever the outcome. Callers on other threads block until
/// the current transaction has closed the port.
pub struct DeviceSession<C = SerialConnector> {
    connector: Mutex<C>,
}

impl DeviceSession<SerialConnector> {
    pub fn from_endpoint(endpoint: DeviceEndpoint) -> Self {
        Self::new(SerialConnector::new(endpoint))
    }
}

impl<C: Connector> DeviceSession<C> {
    pub fn new(connector: C) -> Self {
        DeviceSession {
            connector: Mutex::new(connector),
        }
    }

    pub fn read_sensitivities(&self) -> FaserResult<String> {
        self.transact(&Command::ReadSensitivities)
    }

    /// Index and value are not range checked; the firmware clamps or
    /// ignores what it doesn't accept
    pub fn update_sensitivity(&self, index: u32, value: i32) -> FaserResult<String> {
        self.transact(&Command::UpdateSensitivity { index, value })
    }

    pub fn update_debounce(&self, enabled: bool) -> FaserResult<String> {
        self.transact(&Command::UpdateDebounce { enabled })
    }

    /// One open -> write -> read -> close cycle
    pub fn transact(&self, command: &Command) -> FaserResult<String> {
        // A panic mid-transaction already dropped the port during unwind
        let connector = self
            .connector
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        debug!("Sending command {:?}", command.to_string());
        let mut device = connector.open()?;

        let result = device
            .send(&command.encode())
            .and_then(|_| device.receive())
            .and_then(decode_response);

        drop(device);

        match &result {
            Ok(response) => info!("Command {} answered with {} bytes", command, response.len()),
            Err(e) => info!("Command {} failed: {}", command, e),
        }
        result
    }
}

fn decode_response(bytes: Vec<u8>) -> FaserResult<String> {
    if let Some(pos) = bytes.iter().position(|b| !b.is_ascii()) {
        return Err(FaserError::Decode(format!(
            "Non-ASCII byte {:#04x} at offset {}",
            bytes[pos], pos
        )));
    }

    String::from_utf8(bytes).map_err(|e| FaserError::Decode(format!("{}", e)))
}
