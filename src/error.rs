use std::time::Duration;

use thiserror::Error;

use crate::status::GripperFault;

#[derive(Debug, Error)]
pub enum RobotiqError {
    #[error("std io error, tcp comm error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("could not establish communication with device, `GET STA` answered `{0}`")]
    ConnectionError(String),
    #[error("unexpected response `{response}` to command `{command}`")]
    ProtocolError { command: String, response: String },
    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),
    #[error("gave up after {waited:?} waiting for {waiting_for}")]
    Timeout {
        waiting_for: &'static str,
        waited: Duration,
    },
    #[error("gripper fault: {0}")]
    GripperFault(#[from] GripperFault),
}

impl RobotiqError {
    pub(crate) fn protocol(command: &str, response: &str) -> Self {
        RobotiqError::ProtocolError {
            command: command.to_owned(),
            response: response.to_owned(),
        }
    }

    /// Transport level failure, or a device that never answered the liveness check.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            RobotiqError::IOError(_) | RobotiqError::ConnectionError(_)
        )
    }
}

pub type Result<T, E = RobotiqError> = std::result::Result<T, E>;
