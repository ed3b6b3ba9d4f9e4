use crate::mode::ControlMode;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Immutable copy of the axis state, taken once per publish tick.
#[derive(Debug, Clone, Copy)]
pub struct AxisSnapshot {
    pub axes: [f32; 4],
    pub mode: ControlMode,
}

/// The four live setpoints plus the active control mode.
///
/// Shared between the operator console (writer) and the publisher task
/// (reader); wrap in [`SharedAxisState`] for that.
#[derive(Debug)]
pub struct AxisState {
    axes: [f32; 4],
    mode: ControlMode,
}

impl Default for AxisState {
    fn default() -> Self {
        // The console starts in attitude + vertical-velocity mode, all zeros.
        Self { axes: [0.0; 4], mode: ControlMode::AttitudeVelocityYawrate }
    }
}

pub type SharedAxisState = Arc<Mutex<AxisState>>;

impl AxisState {
    pub fn new(mode: ControlMode) -> Self {
        Self { axes: [0.0; 4], mode }
    }

    pub fn shared() -> SharedAxisState {
        Arc::new(Mutex::new(AxisState::default()))
    }

    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    /// Store one setpoint, clamped into the active mode's bounds.
    ///
    /// Returns false without mutating when the write comes from a control
    /// surface of a non-active mode (a stale tab must never touch the live
    /// command) or when the value is NaN.
    pub fn set_axis(&mut self, mode: ControlMode, index: usize, raw: f32) -> bool {
        if index >= 4 || mode != self.mode || raw.is_nan() {
            debug!("axis write ignored: mode={:?} index={} raw={}", mode, index, raw);
            return false;
        }
        let (lo, hi) = self.mode.bounds(index);
        self.axes[index] = raw.clamp(lo, hi);
        true
    }

    /// The per-slider "zero" action. Same gating as [`set_axis`].
    pub fn zero_axis(&mut self, mode: ControlMode, index: usize) -> bool {
        self.set_axis(mode, index, 0.0)
    }

    /// Swap the active mode. The flag the encoder derives changes with the
    /// mode in the same call, so no command can mix old values with a new
    /// flag mid-switch.
    ///
    /// Retained axis values are NOT re-clamped against the new mode's
    /// bounds; a value set under the old mode stays as written until its
    /// next edit. This mirrors the console's historical behavior.
    pub fn set_mode(&mut self, mode: ControlMode) {
        self.mode = mode;
    }

    pub fn snapshot(&self) -> AxisSnapshot {
        AxisSnapshot { axes: self.axes, mode: self.mode }
    }
}
