use tracing::{debug, trace};

use super::{Connector, DeviceInterface};
use crate::constants::{BAUD_RATE, DEFAULT_PORT, MAX_RESPONSE_SIZE, SERIAL_TIMEOUT_MS};

use crate::error::{FaserError, FaserResult};
use std::io::{Read, Write};
use std::time::{Duration, Instant};

pub type ComPort = String;
pub type BaudRate = u32;

/// Where and how to reach the pad. Built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceEndpoint {
    pub port: ComPort,
    pub baud: BaudRate,
    pub timeout: Duration,
    /// Assert DTR when the port is opened; the firmware needs the transition
    /// before it listens for commands
    pub dtr: bool,
}

impl DeviceEndpoint {
    pub fn new(port: impl Into<ComPort>) -> Self {
        DeviceEndpoint {
            port: port.into(),
            ..Default::default()
        }
    }
}

impl Default for DeviceEndpoint {
    fn default() -> Self {
        DeviceEndpoint {
            port: DEFAULT_PORT.to_string(),
            baud: BAUD_RATE,
            timeout: Duration::from_millis(SERIAL_TIMEOUT_MS),
            dtr: true,
        }
    }
}

/// Opens the real serial port described by a [`DeviceEndpoint`]
#[derive(Debug, Clone)]
pub struct SerialConnector {
    endpoint: DeviceEndpoint,
}

impl SerialConnector {
    pub fn new(endpoint: DeviceEndpoint) -> Self {
        SerialConnector { endpoint }
    }

    pub fn endpoint(&self) -> &DeviceEndpoint {
        &self.endpoint
    }
}

impl Connector for SerialConnector {
    fn open(&self) -> FaserResult<Box<dyn DeviceInterface>> {
        Ok(Box::new(SerialPortDevice::open(&self.endpoint)?))
    }
}

/// Serial port device_interface layer
pub(crate) struct SerialPortDevice {
    serial_port: Box<dyn serialport::SerialPort>,
    timeout: Duration,
}

impl SerialPortDevice {
    pub fn open(endpoint: &DeviceEndpoint) -> FaserResult<SerialPortDevice> {
        let serial_port = serialport::new(endpoint.port.as_str(), endpoint.baud)
            .timeout(endpoint.timeout)
            .dtr_on_open(endpoint.dtr)
            .open()
            .map_err(|e| FaserError::PortUnavailable(format!("{}: {}", endpoint.port, e)))?;

        debug!("Opened {} at {} baud", endpoint.port, endpoint.baud);
        Ok(SerialPortDevice {
            serial_port,
            timeout: endpoint.timeout,
        })
    }
}

impl DeviceInterface for SerialPortDevice {
    fn send(&mut self, command: &[u8]) -> FaserResult<()> {
        self.serial_port
            .write_all(command)
            .and_then(|_| self.serial_port.flush())
            .map_err(|e| FaserError::Io(format!("Write failed: {}", e)))?;
        trace!("Sent bytes {:?}", command);
        Ok(())
    }

    fn receive(&mut self) -> FaserResult<Vec<u8>> {
        let mut buffer = vec![0; MAX_RESPONSE_SIZE];
        let mut size = 0;
        let deadline = Instant::now() + self.timeout;

        // Keep reading until the buffer is full or the window closes
        while size < MAX_RESPONSE_SIZE {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            self.serial_port
                .set_timeout(remaining)
                .map_err(|e| FaserError::Io(format!("Failed to set read timeout: {}", e)))?;

            let bytes_read = self
                .serial_port
                .read(&mut buffer[size..])
                // Timeout error is fine, the device decides the reply length
                .or_else(|e| {
                    if e.kind() == std::io::ErrorKind::TimedOut {
                        Ok(0)
                    } else {
                        Err(e)
                    }
                })
                .map_err(|e| FaserError::Io(format!("Read failed: {}", e)))?;

            if bytes_read == 0 {
                break;
            }
            size += bytes_read;
        }

        buffer.truncate(size);
        trace!("Received bytes {:?}", buffer);
        Ok(buffer)
    }
}

impl Drop for SerialPortDevice {
    fn drop(&mut self) {
        trace!("Closing serial port");
    }
}
