//! Blocking gripper client.
//!
//! Wraps the async [`RobotiqGripper`](crate::RobotiqGripper) and drives it on a
//! private current-thread tokio runtime, so every wait parks the calling thread.
//! The polling cadence, tolerance and deadline are the same as the async client's.
//!
//! ## Warning
//! Do not use it from inside an async runtime, `block_on` panics there. Async
//! code should use [`crate::RobotiqGripper`] directly.
//!
//! ```no_run
//! use robotiq_tcp::blocking::RobotiqGripper;
//!
//! fn main() -> Result<(), robotiq_tcp::RobotiqError> {
//!     let mut gripper = RobotiqGripper::connect("10.42.0.162", 63352)?;
//!     gripper.activate()?;
//!     let status = gripper.move_to_position(255, Some(255), Some(10))?;
//!     println!("stopped: {:?}", status);
//!     gripper.open()?;
//!     gripper.deactivate()?;
//!     Ok(())
//! }
//! ```

use tokio::runtime::Runtime;

use crate::config::GripperConfig;
use crate::error::Result;
use crate::gripper;
use crate::status::{ActivationStatus, GripperFault, ObjDetectStatus};
use crate::transport::{TcpTransport, Transport};

pub struct RobotiqGripper<T = TcpTransport> {
    inner: gripper::RobotiqGripper<T>,
    rt: Runtime,
}

impl RobotiqGripper<TcpTransport> {
    pub fn connect(host: impl Into<String>, port: u16) -> Result<Self> {
        Self::connect_with_config(GripperConfig::new(host).port(port))
    }

    pub fn connect_with_config(config: GripperConfig) -> Result<Self> {
        let transport = TcpTransport::from_config(&config);
        Self::with_transport(transport, config)
    }
}

impl<T: Transport> RobotiqGripper<T> {
    pub fn with_transport(transport: T, config: GripperConfig) -> Result<Self> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let inner = rt.block_on(gripper::RobotiqGripper::with_transport(transport, config))?;
        Ok(Self { inner, rt })
    }

    pub fn config(&self) -> &GripperConfig {
        self.inner.config()
    }

    pub fn transport(&self) -> &T {
        self.inner.transport()
    }

    /// See [`crate::RobotiqGripper::activate`].
    pub fn activate(&mut self) -> Result<&mut Self> {
        self.rt.block_on(self.inner.activate())?;
        Ok(self)
    }

    pub fn deactivate(&mut self) -> Result<&mut Self> {
        self.rt.block_on(self.inner.deactivate())?;
        Ok(self)
    }

    pub fn activation_status(&self) -> Result<ActivationStatus> {
        self.rt.block_on(self.inner.activation_status())
    }

    pub fn position(&self) -> Result<i32> {
        self.rt.block_on(self.inner.position())
    }

    pub fn set_position(&mut self, position: i32) -> Result<i32> {
        self.inner.set_position(position)
    }

    pub fn target_position(&self) -> Result<i32> {
        self.rt.block_on(self.inner.target_position())
    }

    pub fn set_target_position(&mut self, position: i32) -> Result<i32> {
        self.rt.block_on(self.inner.set_target_position(position))
    }

    pub fn speed(&self) -> Result<i32> {
        self.rt.block_on(self.inner.speed())
    }

    pub fn set_speed(&mut self, speed: i32) -> Result<i32> {
        self.rt.block_on(self.inner.set_speed(speed))
    }

    pub fn force(&self) -> Result<i32> {
        self.rt.block_on(self.inner.force())
    }

    pub fn set_force(&mut self, force: i32) -> Result<i32> {
        self.rt.block_on(self.inner.set_force(force))
    }

    pub fn motion_status(&self) -> Result<ObjDetectStatus> {
        self.rt.block_on(self.inner.motion_status())
    }

    pub fn is_moving(&self) -> Result<bool> {
        self.rt.block_on(self.inner.is_moving())
    }

    pub fn is_object_detected(&self) -> Result<bool> {
        self.rt.block_on(self.inner.is_object_detected())
    }

    pub fn fault(&self) -> Result<GripperFault> {
        self.rt.block_on(self.inner.fault())
    }

    /// See [`crate::RobotiqGripper::move_to_position`].
    pub fn move_to_position(
        &mut self,
        position: i32,
        speed: Option<i32>,
        force: Option<i32>,
    ) -> Result<ObjDetectStatus> {
        self.rt
            .block_on(self.inner.move_to_position(position, speed, force))
    }

    pub fn open(&mut self) -> Result<ObjDetectStatus> {
        self.rt.block_on(self.inner.open())
    }

    pub fn close(&mut self) -> Result<ObjDetectStatus> {
        self.rt.block_on(self.inner.close())
    }

    pub fn automatic_release(&mut self, open: bool) -> Result<&mut Self> {
        self.rt.block_on(self.inner.automatic_release(open))?;
        Ok(self)
    }

    pub fn await_automatic_release(&mut self) -> Result<&mut Self> {
        self.rt.block_on(self.inner.await_automatic_release())?;
        Ok(self)
    }
}
