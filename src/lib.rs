pub use command::Command;
pub use interface::serialport::{DeviceEndpoint, SerialConnector};
pub use session::DeviceSession;

pub mod api;
pub mod command;
pub mod constants;
pub mod discovery;
pub mod error;
pub mod interface;
pub mod session;
