//! # Robotiq-tcp
//!
//! `robotiq-tcp` is a library for interfacing with a robotiq gripper mounted on a
//! Universal Robots arm, through the TCP socket API of the Robotiq URCap
//! (port `63352` of the UR controller).
//!
//! ```text
//! gripper motor <- gripper registers <- modbus rs485 <- UR controller (URCap) <- TCP <- robotiq-tcp
//! ```
//!
//! Each register of the gripper is read with `GET <REG>` and written with
//! `SET <REG> <value>`, one command per connection. Writes are asynchronous on the
//! device side, so every setter polls the register back until it settles within
//! a tolerance of 5 units of the commanded value.
//!
//! ### Compatible product
//! - [x] Robotiq 2F-85
//! - [x] Robotiq 2F-140
//! - [x] HandE
//!
//! ## Example
//! ```no_run
//! use robotiq_tcp::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), RobotiqError> {
//!     let mut gripper = RobotiqGripper::connect("10.42.0.162", GripperConfig::DEFAULT_PORT).await?;
//!
//!     // activate the gripper, it will open and close to calibrate.
//!     gripper.activate().await?;
//!
//!     // slow down to observe better
//!     gripper.set_speed(10).await?;
//!     gripper.set_force(10).await?;
//!
//!     // only waits for the controller to accept the new target
//!     let target = gripper.set_target_position(130).await?;
//!     println!("target position : {}", target);
//!     println!("position : {}", gripper.position().await?);
//!
//!     // waits until the fingers stop
//!     let status = gripper.move_to_position(255, Some(255), Some(10)).await?;
//!     println!("Object Detect Status : {:?}", status);
//!
//!     gripper.open().await?;
//!     gripper.deactivate().await?;
//!     Ok(())
//! }
//! ```
//!
//! A blocking client with the same operations lives in [`blocking`].
//!
//! ## Waiting forever
//! By default nothing times out: a device that never settles keeps a setter,
//! [`RobotiqGripper::activate`] or [`RobotiqGripper::move_to_position`] waiting
//! indefinitely. Set [`GripperConfig::poll_deadline`] and
//! [`GripperConfig::read_timeout`] to bound them.

pub mod blocking;
mod config;
mod error;
mod gripper;
mod poll;
pub mod protocol;
mod status;
mod transport;

#[cfg(test)]
mod sim;

pub use config::GripperConfig;
pub use error::{Result, RobotiqError};
pub use gripper::{RobotiqGripper, POSITION_CLOSED, POSITION_OPEN};
pub use status::{ActivationStatus, GripperFault, ObjCodeMapping, ObjDetectStatus};
pub use transport::{TcpTransport, Transport};
