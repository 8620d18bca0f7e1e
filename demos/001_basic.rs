use std::time::Duration;

use robotiq_tcp::*;

#[tokio::main]
async fn main() -> Result<(), RobotiqError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // The UR controller running the Robotiq URCap
    let host = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "10.42.0.162".to_owned());

    // checks that the gripper answers before returning
    let mut gripper = RobotiqGripper::connect(host, GripperConfig::DEFAULT_PORT).await?;

    // Activation
    //
    // the gripper will open and close to calibrate.
    gripper.activate().await?;
    println!("finished activation.");
    tokio::time::sleep(Duration::from_millis(1000)).await;

    // Slow down to observe better
    gripper.set_speed(10).await?;
    gripper.set_force(10).await?;

    // Target position
    //
    // returns once the controller echoes the new target, the fingers are still moving.
    let target = gripper.set_target_position(130).await?;
    println!("target pos = {}", target);
    loop {
        let pos = gripper.position().await?;
        println!("pos = {}", pos);
        if !gripper.is_moving().await? {
            break;
        }
        tokio::time::sleep(Duration::from_millis(200)).await;
    }
    tokio::time::sleep(Duration::from_millis(2000)).await;

    // Synchronous move
    //
    // fast, gentle, returns once the fingers stopped.
    let obj_detect_status = gripper.move_to_position(255, Some(255), Some(10)).await?;
    println!("Object Detect Status : {:?}", obj_detect_status);
    println!("moving : {}", gripper.is_moving().await?);

    gripper.open().await?;

    // Deactivation
    gripper.deactivate().await?;

    Ok(())
}
