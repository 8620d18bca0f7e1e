//! In-memory controller used by the unit tests.

use std::collections::{HashMap, VecDeque};
use std::io;
use std::sync::Mutex;

use crate::error::Result;
use crate::transport::Transport;

/// Simulated URCap endpoint.
///
/// Lagging registers (`STA`, `PRE`, `SPE`, `FOR`) move halfway towards their
/// target on every read, like an actuator settling. After `SET POS`, `GET OBJ`
/// answers `0` for `moving_polls` reads, then `obj_stopped`.
pub(crate) struct SimDevice {
    state: Mutex<SimState>,
}

pub(crate) struct SimState {
    pub sent: Vec<String>,
    pub attempts: usize,
    pub refuse: bool,
    pub values: HashMap<&'static str, i32>,
    pub targets: HashMap<&'static str, i32>,
    pub moving_polls: u32,
    pub obj_stopped: i32,
    pub faults: VecDeque<i32>,
    /// Canned answers to `GET <REG>`, bypassing the simulation.
    pub answers: HashMap<&'static str, String>,
}

fn lagging(reg: &str) -> Option<&'static str> {
    match reg {
        "STA" => Some("STA"),
        "PRE" => Some("PRE"),
        "SPE" => Some("SPE"),
        "FOR" => Some("FOR"),
        _ => None,
    }
}

impl SimDevice {
    pub fn new() -> Self {
        let values = HashMap::from([
            ("STA", 0),
            ("PRE", 0),
            ("POS", 3),
            ("SPE", 0),
            ("FOR", 0),
            ("FLT", 0),
        ]);
        Self {
            state: Mutex::new(SimState {
                sent: Vec::new(),
                attempts: 0,
                refuse: false,
                targets: values.clone(),
                values,
                moving_polls: 3,
                obj_stopped: 3,
                faults: VecDeque::new(),
                answers: HashMap::new(),
            }),
        }
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut SimState) -> R) -> R {
        let mut state = self.state.lock().unwrap();
        f(&mut state)
    }

    pub fn sent(&self) -> Vec<String> {
        self.with(|s| s.sent.clone())
    }

    /// Commands sent since construction, excluding the liveness `GET STA`.
    pub fn sent_after_connect(&self) -> Vec<String> {
        self.sent().into_iter().skip(1).collect()
    }

    pub fn attempts(&self) -> usize {
        self.with(|s| s.attempts)
    }
}

impl SimState {
    fn answer(&mut self, command: &str) -> String {
        let tokens: Vec<&str> = command.split_whitespace().collect();
        match tokens.as_slice() {
            ["GET", reg] if self.answers.contains_key(*reg) => self.answers[*reg].clone(),
            ["GET", "OBJ"] => {
                let code = if self.moving_polls > 0 {
                    self.moving_polls -= 1;
                    0
                } else {
                    self.obj_stopped
                };
                format!("OBJ {}", code)
            }
            ["GET", "FLT"] => {
                let code = self.faults.pop_front().unwrap_or(self.values["FLT"]);
                self.values.insert("FLT", code);
                format!("FLT {}", code)
            }
            ["GET", reg] => {
                let reg: &str = reg;
                if let Some(reg) = lagging(reg) {
                    let current = self.values[reg];
                    let target = self.targets[reg];
                    let next = if (target - current).abs() <= 1 {
                        target
                    } else {
                        current + (target - current) / 2
                    };
                    self.values.insert(reg, next);
                }
                match self.values.get(reg) {
                    Some(v) => format!("{} {}", reg, v),
                    None => "?".to_owned(),
                }
            }
            ["SET", reg, value] => {
                let value: i32 = value.parse().unwrap();
                match *reg {
                    "ACT" => {
                        self.targets.insert("STA", if value == 1 { 3 } else { 0 });
                    }
                    "POS" => {
                        self.targets.insert("PRE", value);
                        self.moving_polls = self.moving_polls.max(1);
                    }
                    "SPE" => {
                        self.targets.insert("SPE", value);
                    }
                    "FOR" => {
                        self.targets.insert("FOR", value);
                    }
                    _ => {}
                }
                "ack".to_owned()
            }
            _ => "?".to_owned(),
        }
    }
}

impl Transport for SimDevice {
    async fn communicate(&self, command: &str) -> Result<String> {
        let mut state = self.state.lock().unwrap();
        state.attempts += 1;
        if state.refuse {
            return Err(io::Error::new(io::ErrorKind::ConnectionRefused, "refused").into());
        }
        let command = command.trim().to_owned();
        let answer = state.answer(&command);
        state.sent.push(command);
        Ok(answer)
    }
}
