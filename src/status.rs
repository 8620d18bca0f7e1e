//! Enumerated registers: `STA`, `OBJ` and `FLT`.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The gripper's activation status, as reported by `GET STA`.
#[repr(u8)]
#[derive(Debug, Clone, Copy, FromPrimitive, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationStatus {
    /// Gripper is in reset (or automatic release), unpowered from the client's point of view.
    InReset = 0,
    /// Activation in progress, the fingers open and close to calibrate.
    InProgress = 1,
    /// Not used
    NotUsed = 2,
    /// Activation is completed, motion commands are accepted.
    Completed = 3,
}

impl ActivationStatus {
    pub fn from_code(code: i32) -> Option<Self> {
        Self::from_i32(code)
    }
}

/// Object detection status, decoded from `GET OBJ`.
///
/// Only meaningful while the "go" flag (`GTO`) is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjDetectStatus {
    /// Fingers are in motion towards the requested position. No object detected.
    InMotion,
    /// Fingers stopped on a contact while opening, before the requested position.
    DetectedOpen,
    /// Fingers stopped on a contact while closing, before the requested position.
    DetectedClose,
    /// Fingers are at the requested position. No object detected, or the object was lost.
    AtRequestedPosition,
}

impl ObjDetectStatus {
    pub fn is_moving(&self) -> bool {
        *self == ObjDetectStatus::InMotion
    }

    pub fn detected_obj(&self) -> bool {
        matches!(
            self,
            ObjDetectStatus::DetectedClose | ObjDetectStatus::DetectedOpen
        )
    }
}

/// How the numeric `OBJ` code is interpreted.
///
/// Controller revisions disagree on the code semantics, so the interpretation is an
/// explicit configuration choice. Code `0` means "in motion" under both, so the
/// motion wait in `move_to_position` behaves identically; they differ in which
/// codes mean "object detected".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjCodeMapping {
    /// `0` in motion, `1` detected while opening, `2` detected while closing,
    /// `3` at requested position. Any other code is a protocol error.
    #[default]
    FourState,
    /// `0` in motion, `1` object detected, any other non-zero code means the
    /// fingers stopped without contact. The opening/closing direction is not
    /// reported, a detection is decoded as [`ObjDetectStatus::DetectedClose`].
    DetectionFlag,
}

impl ObjCodeMapping {
    pub fn decode(&self, code: i32) -> Option<ObjDetectStatus> {
        match (self, code) {
            (_, 0) => Some(ObjDetectStatus::InMotion),
            (ObjCodeMapping::FourState, 1) => Some(ObjDetectStatus::DetectedOpen),
            (ObjCodeMapping::FourState, 2) => Some(ObjDetectStatus::DetectedClose),
            (ObjCodeMapping::FourState, 3) => Some(ObjDetectStatus::AtRequestedPosition),
            (ObjCodeMapping::FourState, _) => None,
            (ObjCodeMapping::DetectionFlag, 1) => Some(ObjDetectStatus::DetectedClose),
            (ObjCodeMapping::DetectionFlag, _) => Some(ObjDetectStatus::AtRequestedPosition),
        }
    }
}

/// Fault status, read with `GET FLT`.
///
/// Mirrors the fault LED on the gripper chassis.
#[repr(u8)]
#[derive(Debug, Clone, Copy, FromPrimitive, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GripperFault {
    /// No fault (solid blue LED)
    NoFault = 0x00,

    /// Action delayed, the (re-)activation must complete before performing the action.
    ActionDelay = 0x05,
    /// The activation bit must be set prior to performing the action.
    NotActivated = 0x07,

    /// Maximum operating temperature exceeded, let it cool down.
    OverHeated = 0x08,
    /// No communication during at least 1 second.
    NoComm = 0x09,

    /// Under minimum operating voltage
    UnderVoltage = 0x0A,
    /// Automatic release in progress
    Releasing = 0x0B,
    /// Internal fault
    InternalFault = 0x0C,
    /// Activation fault, verify that no interference occurred.
    ActivationFault = 0x0D,
    /// Overcurrent triggered
    OverCurrent = 0x0E,
    /// Automatic release completed
    AutomaticReleaseCompleted = 0x0F,
}

impl GripperFault {
    pub fn from_code(code: i32) -> Option<Self> {
        Self::from_i32(code)
    }

    /// Major faults need a reset, i.e. a rising edge on `ACT`.
    pub fn reset_required(&self) -> bool {
        *self as u8 >= 0x0A
    }
}

impl std::fmt::Display for GripperFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_state_mapping() {
        let m = ObjCodeMapping::FourState;
        assert_eq!(m.decode(0), Some(ObjDetectStatus::InMotion));
        assert_eq!(m.decode(1), Some(ObjDetectStatus::DetectedOpen));
        assert_eq!(m.decode(2), Some(ObjDetectStatus::DetectedClose));
        assert_eq!(m.decode(3), Some(ObjDetectStatus::AtRequestedPosition));
        assert_eq!(m.decode(4), None);
        assert_eq!(m.decode(-1), None);
        assert!(m.decode(1).unwrap().detected_obj());
        assert!(!m.decode(3).unwrap().detected_obj());
    }

    #[test]
    fn detection_flag_mapping() {
        let m = ObjCodeMapping::DetectionFlag;
        assert_eq!(m.decode(0), Some(ObjDetectStatus::InMotion));
        assert!(m.decode(1).unwrap().detected_obj());
        assert_eq!(m.decode(2), Some(ObjDetectStatus::AtRequestedPosition));
        assert_eq!(m.decode(3), Some(ObjDetectStatus::AtRequestedPosition));
        assert!(!m.decode(2).unwrap().detected_obj());
        assert!(!m.decode(7).unwrap().is_moving());
    }

    #[test]
    fn moving_is_code_zero_under_both_mappings() {
        for m in [ObjCodeMapping::FourState, ObjCodeMapping::DetectionFlag] {
            assert!(m.decode(0).unwrap().is_moving());
            assert!(!m.decode(1).unwrap().is_moving());
        }
    }

    #[test]
    fn fault_codes() {
        assert_eq!(GripperFault::from_code(0), Some(GripperFault::NoFault));
        assert_eq!(
            GripperFault::from_code(0x0F),
            Some(GripperFault::AutomaticReleaseCompleted)
        );
        assert_eq!(GripperFault::from_code(0x01), None);
        assert!(GripperFault::OverCurrent.reset_required());
        assert!(!GripperFault::NoComm.reset_required());
    }

    #[test]
    fn activation_codes() {
        assert_eq!(ActivationStatus::from_code(0), Some(ActivationStatus::InReset));
        assert_eq!(ActivationStatus::from_code(3), Some(ActivationStatus::Completed));
        assert_eq!(ActivationStatus::from_code(9), None);
    }
}
