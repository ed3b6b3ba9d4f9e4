use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

// Flag byte fields, as documented by the DJI onboard SDK:
//
// Horizontal
//  0x00 command roll and pitch angle (0.611 rad max)
//  0x40 command horizontal velocities (30 m/s max)
//  0x80 command position offsets
// Vertical
//  0x00 command vertical speed (-5 to 5 m/s)
//  0x10 command altitude (0 to 120 m)
//  0x20 command thrust (unused here)
// Yaw
//  0x00 command yaw angle (-pi to pi)
//  0x08 command yaw rate (5/6 pi rad/s max)
// Coordinate
//  0x00 horizontal command is ground ENU frame
//  0x02 horizontal command is body FLU frame
// Active brake
//  0x01 actively brake to hold position after setpoints stop
pub const HORIZONTAL_ANGLE: u8 = 0x00;
pub const HORIZONTAL_VELOCITY: u8 = 0x40;
pub const HORIZONTAL_POSITION: u8 = 0x80;

pub const VERTICAL_VELOCITY: u8 = 0x00;
pub const VERTICAL_ALTITUDE: u8 = 0x10;
pub const VERTICAL_THRUST: u8 = 0x20;

pub const YAW_ANGLE: u8 = 0x00;
pub const YAW_RATE: u8 = 0x08;

pub const HORIZONTAL_GROUND: u8 = 0x00;
pub const HORIZONTAL_BODY: u8 = 0x02;

pub const STABLE_DISABLE: u8 = 0x00;
pub const STABLE_ENABLE: u8 = 0x01;

// Axis limits, engineering units.
pub const POS_LIM: f32 = 100.0;
pub const ALT_MAX: f32 = 20.0;
pub const ALT_VEL_LIM: f32 = 5.0; // m/s
pub const ROLL_PITCH_LIM: f32 = 0.611; // rad
pub const YAW_ANGLE_LIM: f32 = PI; // rad
pub const YAW_RATE_LIM: f32 = 5.0 / 6.0 * PI; // rad/s
pub const HOR_VEL_LIM: f32 = 30.0; // m/s

/// The four operator-selectable control conventions. Each one fixes the
/// physical meaning of axes 0..3, their bounds, and the wire flag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlMode {
    /// ENU position offsets + yaw angle.
    PositionYaw,
    /// ENU horizontal/vertical velocities + yaw rate.
    VelocityYawrate,
    /// Roll/pitch angles + commanded altitude + yaw rate.
    AttitudeAltitudeYawrate,
    /// Roll/pitch angles + vertical velocity + yaw rate.
    AttitudeVelocityYawrate,
}

impl ControlMode {
    pub const ALL: [ControlMode; 4] = [
        ControlMode::PositionYaw,
        ControlMode::VelocityYawrate,
        ControlMode::AttitudeAltitudeYawrate,
        ControlMode::AttitudeVelocityYawrate,
    ];

    /// Selector index 0..3, matching the console's mode buttons.
    pub fn index(self) -> usize {
        match self {
            ControlMode::PositionYaw => 0,
            ControlMode::VelocityYawrate => 1,
            ControlMode::AttitudeAltitudeYawrate => 2,
            ControlMode::AttitudeVelocityYawrate => 3,
        }
    }

    pub fn from_index(idx: usize) -> Option<ControlMode> {
        Self::ALL.get(idx).copied()
    }

    /// The command flag byte for this mode.
    pub fn flag(self) -> u8 {
        match self {
            ControlMode::PositionYaw => {
                HORIZONTAL_POSITION | VERTICAL_ALTITUDE | YAW_ANGLE | HORIZONTAL_GROUND | STABLE_ENABLE
            }
            ControlMode::VelocityYawrate => {
                HORIZONTAL_VELOCITY | VERTICAL_VELOCITY | YAW_RATE | HORIZONTAL_GROUND | STABLE_ENABLE
            }
            ControlMode::AttitudeAltitudeYawrate => {
                HORIZONTAL_ANGLE | VERTICAL_ALTITUDE | YAW_RATE | HORIZONTAL_BODY | STABLE_DISABLE
            }
            ControlMode::AttitudeVelocityYawrate => {
                HORIZONTAL_ANGLE | VERTICAL_VELOCITY | YAW_RATE | HORIZONTAL_BODY | STABLE_DISABLE
            }
        }
    }

    /// Valid range for one axis under this mode. Symmetric unless noted.
    pub fn bounds(self, axis: usize) -> (f32, f32) {
        match (self, axis) {
            (ControlMode::PositionYaw, 0 | 1) => (-POS_LIM, POS_LIM),
            (ControlMode::PositionYaw, 2) => (0.0, ALT_MAX),
            (ControlMode::PositionYaw, _) => (-YAW_ANGLE_LIM, YAW_ANGLE_LIM),

            (ControlMode::VelocityYawrate, 0 | 1) => (-HOR_VEL_LIM, HOR_VEL_LIM),
            (ControlMode::VelocityYawrate, 2) => (-ALT_VEL_LIM, ALT_VEL_LIM),
            (ControlMode::VelocityYawrate, _) => (-YAW_RATE_LIM, YAW_RATE_LIM),

            (ControlMode::AttitudeAltitudeYawrate, 0 | 1) => (-ROLL_PITCH_LIM, ROLL_PITCH_LIM),
            (ControlMode::AttitudeAltitudeYawrate, 2) => (0.0, ALT_MAX),
            (ControlMode::AttitudeAltitudeYawrate, _) => (-YAW_RATE_LIM, YAW_RATE_LIM),

            (ControlMode::AttitudeVelocityYawrate, 0 | 1) => (-ROLL_PITCH_LIM, ROLL_PITCH_LIM),
            (ControlMode::AttitudeVelocityYawrate, 2) => (-ALT_VEL_LIM, ALT_VEL_LIM),
            (ControlMode::AttitudeVelocityYawrate, _) => (-YAW_RATE_LIM, YAW_RATE_LIM),
        }
    }

    pub fn label(self, axis: usize) -> &'static str {
        const LABELS: [[&str; 4]; 4] = [
            ["pos_x", "pos_y", "alt", "yaw"],
            ["vel_x", "vel_y", "vel_h", "yawrate"],
            ["roll", "pitch", "alt", "yawrate"],
            ["roll", "pitch", "vel_h", "yawrate"],
        ];
        LABELS[self.index()][axis.min(3)]
    }

    pub fn describe(self) -> &'static str {
        match self {
            ControlMode::PositionYaw => "ENU position + yaw angle",
            ControlMode::VelocityYawrate => "ENU velocity + yawrate",
            ControlMode::AttitudeAltitudeYawrate => "roll/pitch + altitude + yawrate",
            ControlMode::AttitudeVelocityYawrate => "roll/pitch + vertical velocity + yawrate",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_bytes_match_sdk_table() {
        assert_eq!(ControlMode::PositionYaw.flag(), 0x91);
        assert_eq!(ControlMode::VelocityYawrate.flag(), 0x49);
        assert_eq!(ControlMode::AttitudeAltitudeYawrate.flag(), 0x1A);
        assert_eq!(ControlMode::AttitudeVelocityYawrate.flag(), 0x0A);
    }

    #[test]
    fn index_roundtrip() {
        for mode in ControlMode::ALL {
            assert_eq!(ControlMode::from_index(mode.index()), Some(mode));
        }
        assert_eq!(ControlMode::from_index(4), None);
    }

    #[test]
    fn altitude_axes_are_non_negative() {
        assert_eq!(ControlMode::PositionYaw.bounds(2), (0.0, ALT_MAX));
        assert_eq!(ControlMode::AttitudeAltitudeYawrate.bounds(2), (0.0, ALT_MAX));
    }

    #[test]
    fn bounds_are_ordered() {
        for mode in ControlMode::ALL {
            for axis in 0..4 {
                let (lo, hi) = mode.bounds(axis);
                assert!(lo < hi, "{:?} axis {}", mode, axis);
            }
        }
    }
}
