pub mod serialport;

use crate::error::FaserResult;

/// An open link to the pad. Dropping it closes the link.
pub trait DeviceInterface {
    /// Write the whole command to the device
    fn send(&mut self, command: &[u8]) -> FaserResult<()>;

    /// Read the reply: up to the response limit, within the read window
    fn receive(&mut self) -> FaserResult<Vec<u8>>;
}

/// Opens a fresh [`DeviceInterface`] for each transaction
pub trait Connector {
    fn open(&self) -> FaserResult<Box<dyn DeviceInterface>>;
}
