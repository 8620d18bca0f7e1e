use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::status::ObjCodeMapping;

/// Connection and polling parameters of a gripper client.
///
/// ## Warning
/// Without a `poll_deadline_ms`, every wait (activation, register convergence,
/// motion) blocks for as long as the device keeps answering with a value that
/// does not match. Without a `read_timeout_ms`, a device that accepts the
/// connection but never answers blocks the call forever.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GripperConfig {
    /// Address of the robot controller running the URCap.
    pub host: String,
    /// TCP port of the URCap socket API.
    pub port: u16,
    /// Maximum wait for the answer to a single command.
    pub read_timeout_ms: Option<u64>,
    /// Interval between reads while waiting on a register or on activation.
    pub poll_interval_ms: u64,
    /// Interval between `OBJ` reads while waiting for the fingers to stop.
    pub motion_poll_interval_ms: u64,
    /// Upper bound on any single wait. `None` waits forever.
    pub poll_deadline_ms: Option<u64>,
    /// Interpretation of the `OBJ` register.
    pub obj_mapping: ObjCodeMapping,
    /// Read `FLT` while waiting on activation and fail on any reported fault.
    pub fail_on_fault: bool,
}

impl Default for GripperConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: Self::DEFAULT_PORT,
            read_timeout_ms: None,
            poll_interval_ms: 10,
            motion_poll_interval_ms: 50,
            poll_deadline_ms: None,
            obj_mapping: ObjCodeMapping::default(),
            fail_on_fault: false,
        }
    }
}

impl GripperConfig {
    /// The URCap socket API listens on this port of the UR controller.
    pub const DEFAULT_PORT: u16 = 63352;

    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    /// Parse a configuration from JSON, missing fields take their default.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout_ms = timeout.map(millis_ceil);
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval_ms = millis_ceil(interval);
        self
    }

    pub fn motion_poll_interval(mut self, interval: Duration) -> Self {
        self.motion_poll_interval_ms = millis_ceil(interval);
        self
    }

    /// Bound every wait, exceeding it fails with [`RobotiqError::Timeout`](crate::RobotiqError::Timeout).
    pub fn poll_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.poll_deadline_ms = deadline.map(millis_ceil);
        self
    }

    pub fn obj_mapping(mut self, mapping: ObjCodeMapping) -> Self {
        self.obj_mapping = mapping;
        self
    }

    /// Check `FLT` on every activation poll that has not completed yet.
    ///
    /// Adds one `GET FLT` per poll. A fault other than `NoFault` ends the wait with
    /// [`RobotiqError::GripperFault`](crate::RobotiqError::GripperFault).
    pub fn fail_on_fault(mut self, enabled: bool) -> Self {
        self.fail_on_fault = enabled;
        self
    }

    pub(crate) fn read_timeout_duration(&self) -> Option<Duration> {
        self.read_timeout_ms.map(Duration::from_millis)
    }

    pub(crate) fn poll_interval_duration(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub(crate) fn motion_poll_interval_duration(&self) -> Duration {
        Duration::from_millis(self.motion_poll_interval_ms)
    }

    pub(crate) fn poll_deadline_duration(&self) -> Option<Duration> {
        self.poll_deadline_ms.map(Duration::from_millis)
    }
}

/// Whole milliseconds, rounded up so a non-zero duration never becomes `0`.
fn millis_ceil(duration: Duration) -> u64 {
    let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
    if duration.subsec_nanos() % 1_000_000 != 0 {
        millis.saturating_add(1)
    } else {
        millis
    }
}
