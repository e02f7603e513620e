use std::fmt;

/// Commands understood by the pad firmware. Each one is a single line of
/// ASCII text, terminated by a newline on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `R`: report the sensitivity of every sensor
    ReadSensitivities,

    /// `<index><value>`: set the sensitivity of one sensor.
    ///
    /// The firmware parses positional digits, so the two numbers are
    /// concatenated without a separator. This is ambiguous once the index
    /// has more than one digit (`10` + `5` and `1` + `05` both encode as
    /// `105`); the encoding is kept as the firmware expects it.
    UpdateSensitivity { index: u32, value: i32 },

    /// `D<0|1>`: toggle input debouncing
    UpdateDebounce { enabled: bool },
}

impl Command {
    /// Wire representation: the command text followed by `\n`
    pub fn encode(&self) -> Vec<u8> {
        let mut line = self.to_string();
        line.push('\n');
        line.into_bytes()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::ReadSensitivities => write!(f, "R"),
            Command::UpdateSensitivity { index, value } => write!(f, "{}{}", index, value),
            Command::UpdateDebounce { enabled } => write!(f, "D{}", u8::from(*enabled)),
        }
    }
}
