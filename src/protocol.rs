//! Text encoding of the URCap socket protocol.
//!
//! Every exchange is a single line: `GET <REG>` answered by `<REG> <value>`, or
//! `SET <REG> <value>` answered by an acknowledgement (`ack`).

use std::fmt;

use crate::error::{Result, RobotiqError};

/// Lowest value accepted by the numeric registers.
pub const REGISTER_MIN: i32 = 0;
/// Highest value accepted by the numeric registers.
pub const REGISTER_MAX: i32 = 255;
/// Read-back values closer than this to the commanded value count as settled.
pub const CONVERGENCE_TOLERANCE: i32 = 5;

/// Remote registers exposed by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    /// `ACT`, activation request.
    Act,
    /// `GTO`, "go to" flag, enables motion towards the requested position.
    Gto,
    /// `ATR`, automatic release trigger.
    Atr,
    /// `ARD`, automatic release direction.
    Ard,
    /// `STA`, activation status.
    Sta,
    /// `PRE`, echo of the requested position.
    Pre,
    /// `POS`, sensed position on read, requested position on write.
    Pos,
    /// `SPE`, speed.
    Spe,
    /// `FOR`, force.
    For,
    /// `OBJ`, object detection status.
    Obj,
    /// `FLT`, fault status.
    Flt,
}

impl Register {
    pub fn name(&self) -> &'static str {
        match self {
            Register::Act => "ACT",
            Register::Gto => "GTO",
            Register::Atr => "ATR",
            Register::Ard => "ARD",
            Register::Sta => "STA",
            Register::Pre => "PRE",
            Register::Pos => "POS",
            Register::Spe => "SPE",
            Register::For => "FOR",
            Register::Obj => "OBJ",
            Register::Flt => "FLT",
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single request line, without its terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Get(Register),
    /// The value is saturated when the command is rendered.
    Set(Register, i32),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Get(reg) => write!(f, "GET {}", reg),
            Command::Set(reg, value) => write!(f, "SET {} {}", reg, saturate(*value)),
        }
    }
}

/// Clamp an outgoing value into the register range.
pub fn saturate(value: i32) -> u8 {
    // lossless, the clamp keeps the value inside 0..=255
    value.clamp(REGISTER_MIN, REGISTER_MAX) as u8
}

/// Whether a read-back value is close enough to the commanded one.
pub fn converged(target: i32, current: i32) -> bool {
    // read-back values come straight from the device and may be anywhere in i32
    target.abs_diff(current) < CONVERGENCE_TOLERANCE as u32
}

/// Parse the `<REG> <value>` answer to `GET <REG>`.
pub fn parse_value(register: Register, response: &str) -> Result<i32> {
    let mut tokens = response.split_whitespace();
    let parsed = match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(name), Some(value), None) if name == register.name() => value.parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| RobotiqError::protocol(&Command::Get(register).to_string(), response))
}
