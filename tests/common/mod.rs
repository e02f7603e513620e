#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use faser_manager::{
    error::{FaserError, FaserResult},
    interface::{Connector, DeviceInterface},
};

/// How the simulated pad answers
#[derive(Debug, Clone)]
pub enum Behaviour {
    /// Reply with the command text, without its newline
    Echo,
    /// Always reply with these bytes
    Reply(Vec<u8>),
    /// Never answer; the read window elapses empty
    Silent(Duration),
    /// Echo after a delay
    Slow(Duration),
    /// Opening the port fails
    Absent,
    /// Opening works but the write fails
    BrokenWrite,
    /// Write works but the read fails
    BrokenRead,
}

/// What the simulated pad observed
#[derive(Default)]
pub struct Wire {
    pub written: Mutex<Vec<Vec<u8>>>,
    pub open: AtomicUsize,
    pub max_open: AtomicUsize,
    pub opens: AtomicUsize,
    pub closes: AtomicUsize,
}

impl Wire {
    pub fn written(&self) -> Vec<Vec<u8>> {
        self.written.lock().unwrap().clone()
    }

    pub fn is_closed(&self) -> bool {
        self.open.load(Ordering::SeqCst) == 0
    }
}

pub struct SimulatedPad {
    pub wire: Arc<Wire>,
    behaviour: Behaviour,
}

impl SimulatedPad {
    pub fn new(behaviour: Behaviour) -> (Self, Arc<Wire>) {
        let wire = Arc::new(Wire::default());
        (
            SimulatedPad {
                wire: Arc::clone(&wire),
                behaviour,
            },
            wire,
        )
    }
}

impl Connector for SimulatedPad {
    fn open(&self) -> FaserResult<Box<dyn DeviceInterface>> {
        if let Behaviour::Absent = self.behaviour {
            return Err(FaserError::PortUnavailable("no such device".to_string()));
        }

        let open = self.wire.open.fetch_add(1, Ordering::SeqCst) + 1;
        self.wire.max_open.fetch_max(open, Ordering::SeqCst);
        self.wire.opens.fetch_add(1, Ordering::SeqCst);

        Ok(Box::new(SimulatedLink {
            wire: Arc::clone(&self.wire),
            behaviour: self.behaviour.clone(),
            last: Vec::new(),
        }))
    }
}

struct SimulatedLink {
    wire: Arc<Wire>,
    behaviour: Behaviour,
    last: Vec<u8>,
}

impl DeviceInterface for SimulatedLink {
    fn send(&mut self, command: &[u8]) -> FaserResult<()> {
        if let Behaviour::BrokenWrite = self.behaviour {
            return Err(FaserError::Io("cable pulled".to_string()));
        }
        self.wire.written.lock().unwrap().push(command.to_vec());
        self.last = command.to_vec();
        Ok(())
    }

    fn receive(&mut self) -> FaserResult<Vec<u8>> {
        let echo = || {
            self.last
                .strip_suffix(b"\n")
                .unwrap_or(&self.last)
                .to_vec()
        };

        match &self.behaviour {
            Behaviour::Echo => Ok(echo()),
            Behaviour::Reply(bytes) => Ok(bytes.clone()),
            Behaviour::Silent(window) => {
                thread::sleep(*window);
                Ok(Vec::new())
            }
            Behaviour::Slow(delay) => {
                thread::sleep(*delay);
                Ok(echo())
            }
            Behaviour::BrokenRead => Err(FaserError::Io("read failed".to_string())),
            Behaviour::Absent | Behaviour::BrokenWrite => unreachable!(),
        }
    }
}

impl Drop for SimulatedLink {
    fn drop(&mut self) {
        self.wire.open.fetch_sub(1, Ordering::SeqCst);
        self.wire.closes.fetch_add(1, Ordering::SeqCst);
    }
}
