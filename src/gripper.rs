use crate::config::GripperConfig;
use crate::error::{Result, RobotiqError};
use crate::poll::poll_until;
use crate::protocol::{converged, parse_value, saturate, Command, Register};
use crate::status::{ActivationStatus, GripperFault, ObjDetectStatus};
use crate::transport::{TcpTransport, Transport};

/// Fully opened mechanical stop.
pub const POSITION_OPEN: i32 = 0;
/// Fully closed mechanical stop.
pub const POSITION_CLOSED: i32 = 255;

/// Client for a Robotiq 2F gripper behind the URCap socket API.
///
/// Every call round-trips to the controller over a fresh connection, nothing is
/// cached. Setters block (asynchronously) until the register reads back within
/// tolerance of the commanded value, see [`GripperConfig`] for the polling
/// parameters and the optional deadline.
pub struct RobotiqGripper<T = TcpTransport> {
    transport: T,
    config: GripperConfig,
}

impl RobotiqGripper<TcpTransport> {
    /// Connect to the URCap at `host:port`, checking that the device answers.
    pub async fn connect(host: impl Into<String>, port: u16) -> Result<Self> {
        Self::connect_with_config(GripperConfig::new(host).port(port)).await
    }

    pub async fn connect_with_config(config: GripperConfig) -> Result<Self> {
        let transport = TcpTransport::from_config(&config);
        Self::with_transport(transport, config).await
    }
}

impl<T: Transport> RobotiqGripper<T> {
    /// Build a client over any transport. Fails unless `GET STA` is answered with `STA ...`.
    pub async fn with_transport(transport: T, config: GripperConfig) -> Result<Self> {
        let gripper = Self { transport, config };
        gripper.check_connection().await?;
        Ok(gripper)
    }

    pub fn config(&self) -> &GripperConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn check_connection(&self) -> Result<()> {
        let response = self.send(Command::Get(Register::Sta)).await?;
        if !response.starts_with(Register::Sta.name()) {
            log::warn!(
                "{}:{} answered `{}` to the liveness check",
                self.config.host,
                self.config.port,
                response
            );
            return Err(RobotiqError::ConnectionError(response));
        }
        Ok(())
    }

    async fn send(&self, command: Command) -> Result<String> {
        self.transport.communicate(&command.to_string()).await
    }

    async fn read_register(&self, register: Register) -> Result<i32> {
        let response = self.send(Command::Get(register)).await?;
        parse_value(register, &response)
    }

    async fn write_register(&mut self, register: Register, value: i32) -> Result<()> {
        self.send(Command::Set(register, value)).await?;
        Ok(())
    }

    /// Write `value` (saturated) to `write`, then wait until `read` settles within tolerance.
    async fn write_and_converge(
        &mut self,
        write: Register,
        read: Register,
        value: i32,
        waiting_for: &'static str,
    ) -> Result<i32> {
        let target = saturate(value) as i32;
        self.write_register(write, target).await?;
        let this = &*self;
        poll_until(
            move || this.read_register(read),
            |current| converged(target, *current),
            self.config.poll_interval_duration(),
            self.config.poll_deadline_duration(),
            waiting_for,
        )
        .await
    }

    async fn await_activation_status(
        &self,
        status: ActivationStatus,
        check_faults: bool,
        waiting_for: &'static str,
    ) -> Result<()> {
        poll_until(
            move || async move {
                let code = self.read_register(Register::Sta).await?;
                if check_faults && code != status as i32 {
                    let fault = self.fault().await?;
                    if fault != GripperFault::NoFault {
                        log::warn!("gripper reported {} while waiting for {}", fault, waiting_for);
                        return Err(fault.into());
                    }
                }
                Ok(code)
            },
            |code| *code == status as i32,
            self.config.poll_interval_duration(),
            self.config.poll_deadline_duration(),
            waiting_for,
        )
        .await?;
        Ok(())
    }

    /// Current activation status, `GET STA`.
    pub async fn activation_status(&self) -> Result<ActivationStatus> {
        let code = self.read_register(Register::Sta).await?;
        ActivationStatus::from_code(code)
            .ok_or_else(|| RobotiqError::protocol("GET STA", &format!("STA {}", code)))
    }

    /// Activate the gripper and bring it to a known baseline.
    ///
    /// Sets `ACT`, waits for the activation to complete, sets the "go" flag, then
    /// commands a fully open target position, maximum speed and minimum force.
    ///
    /// ## Warning
    /// The gripper opens and closes to calibrate during activation.
    ///
    /// The full sequence runs even if the gripper is already active.
    ///
    /// ## Caution
    /// By default the wait only reads `STA`, so a gripper stuck on an activation
    /// fault keeps it polling forever. Bound it with
    /// [`GripperConfig::poll_deadline`], or enable [`GripperConfig::fail_on_fault`]
    /// to stop on the first fault reported by `FLT`.
    pub async fn activate(&mut self) -> Result<&mut Self> {
        log::info!("activating gripper at {}:{}", self.config.host, self.config.port);
        self.write_register(Register::Act, 1).await?;
        self.await_activation_status(
            ActivationStatus::Completed,
            self.config.fail_on_fault,
            "activation",
        )
        .await?;

        self.write_register(Register::Gto, 1).await?;
        self.set_target_position(POSITION_OPEN).await?;
        self.set_speed(255).await?;
        self.set_force(0).await?;
        log::info!("gripper activated");
        Ok(self)
    }

    /// Clear `ACT` and wait until the gripper reports it is in reset.
    pub async fn deactivate(&mut self) -> Result<&mut Self> {
        log::info!("deactivating gripper at {}:{}", self.config.host, self.config.port);
        self.write_register(Register::Act, 0).await?;
        self.await_activation_status(ActivationStatus::InReset, false, "deactivation")
            .await?;
        Ok(self)
    }

    /// Sensed finger position, from the encoders.
    ///
    /// `3` is about fully open, `230` fully closed with straight fingers and `255`
    /// fully closed in encompassing mode. Between 3 and 230 the mapping to the
    /// opening is quasi linear, roughly 0.4 mm per unit on the 2F-85.
    pub async fn position(&self) -> Result<i32> {
        self.read_register(Register::Pos).await
    }

    /// The sensed position cannot be written, command [`set_target_position`](Self::set_target_position) instead.
    pub fn set_position(&mut self, _position: i32) -> Result<i32> {
        Err(RobotiqError::InvalidOperation(
            "cannot set position directly, use set_target_position",
        ))
    }

    /// Requested position, echoed by the controller. `0` is open, `255` closed.
    pub async fn target_position(&self) -> Result<i32> {
        self.read_register(Register::Pre).await
    }

    /// Request a new target position and wait until the controller echoes it.
    ///
    /// This does not wait for the fingers to get there, use
    /// [`move_to_position`](Self::move_to_position) for that.
    pub async fn set_target_position(&mut self, position: i32) -> Result<i32> {
        self.write_and_converge(Register::Pos, Register::Pre, position, "target position")
            .await
    }

    /// Opening/closing speed, `0` slow to `255` fast.
    pub async fn speed(&self) -> Result<i32> {
        self.read_register(Register::Spe).await
    }

    /// Setting a speed does not start a motion.
    pub async fn set_speed(&mut self, speed: i32) -> Result<i32> {
        self.write_and_converge(Register::Spe, Register::Spe, speed, "speed")
            .await
    }

    /// Maximum grasp force, `0` gentle to `255` firm.
    ///
    /// The fingers stop and report an object once this force is reached.
    pub async fn force(&self) -> Result<i32> {
        self.read_register(Register::For).await
    }

    pub async fn set_force(&mut self, force: i32) -> Result<i32> {
        self.write_and_converge(Register::For, Register::For, force, "force")
            .await
    }

    /// Object detection status, `GET OBJ`, decoded with the configured mapping.
    pub async fn motion_status(&self) -> Result<ObjDetectStatus> {
        let code = self.read_register(Register::Obj).await?;
        self.config
            .obj_mapping
            .decode(code)
            .ok_or_else(|| RobotiqError::protocol("GET OBJ", &format!("OBJ {}", code)))
    }

    pub async fn is_moving(&self) -> Result<bool> {
        Ok(self.motion_status().await?.is_moving())
    }

    pub async fn is_object_detected(&self) -> Result<bool> {
        Ok(self.motion_status().await?.detected_obj())
    }

    /// Fault status, `GET FLT`.
    pub async fn fault(&self) -> Result<GripperFault> {
        let code = self.read_register(Register::Flt).await?;
        GripperFault::from_code(code)
            .ok_or_else(|| RobotiqError::protocol("GET FLT", &format!("FLT {}", code)))
    }

    /// Wait for the fingers to stop, returning why they stopped.
    pub async fn await_motion(&self) -> Result<ObjDetectStatus> {
        poll_until(
            move || self.motion_status(),
            |status| !status.is_moving(),
            self.config.motion_poll_interval_duration(),
            self.config.poll_deadline_duration(),
            "fingers to stop",
        )
        .await
    }

    /// Move to `position` and return once the fingers have stopped.
    ///
    /// `speed` and `force` are written first when given, each waiting for its
    /// read-back. The target position is then written and confirmed through
    /// `PRE`, and `OBJ` is polled until the gripper reports it is no longer
    /// moving: either the position was reached or an object stopped the fingers.
    pub async fn move_to_position(
        &mut self,
        position: i32,
        speed: Option<i32>,
        force: Option<i32>,
    ) -> Result<ObjDetectStatus> {
        if let Some(speed) = speed {
            self.set_speed(speed).await?;
        }
        if let Some(force) = force {
            self.set_force(force).await?;
        }
        self.set_target_position(position).await?;
        let status = self.await_motion().await?;
        log::info!("motion to {} finished: {:?}", saturate(position), status);
        Ok(status)
    }

    /// Move to the fully open stop with the current speed and force.
    pub async fn open(&mut self) -> Result<ObjDetectStatus> {
        self.move_to_position(POSITION_OPEN, None, None).await
    }

    /// Move to the fully closed stop with the current speed and force.
    pub async fn close(&mut self) -> Result<ObjDetectStatus> {
        self.move_to_position(POSITION_CLOSED, None, None).await
    }

    /// Start the automatic release routine.
    ///
    /// The fingers slowly open (`open == true`) or close until they reach their
    /// mechanical limits. The routine overrides every other command except `ACT`,
    /// and the gripper must be deactivated and activated again afterwards.
    pub async fn automatic_release(&mut self, open: bool) -> Result<&mut Self> {
        self.write_register(Register::Ard, open as i32).await?;
        self.write_register(Register::Atr, 1).await?;
        Ok(self)
    }

    /// Wait for the automatic release routine to finish.
    ///
    /// Any fault other than "releasing" or "release completed" is returned as an error.
    pub async fn await_automatic_release(&mut self) -> Result<&mut Self> {
        let this = &*self;
        let fault = poll_until(
            move || this.fault(),
            |fault| !matches!(fault, GripperFault::NoFault | GripperFault::Releasing),
            self.config.poll_interval_duration(),
            self.config.poll_deadline_duration(),
            "automatic release",
        )
        .await?;
        match fault {
            GripperFault::AutomaticReleaseCompleted => Ok(self),
            fault => Err(fault.into()),
        }
    }
}
