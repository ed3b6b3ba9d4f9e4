use crate::axis::AxisSnapshot;
use helm_proto::SetpointCommand;

/// Turn a snapshot into the wire command. Deterministic, no I/O: the flag
/// comes from the snapshot's mode, the payload is the four axes as written.
pub fn encode(snap: &AxisSnapshot) -> SetpointCommand {
    SetpointCommand { flag: snap.mode.flag(), axes: snap.axes }
}
