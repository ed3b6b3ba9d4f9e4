use serde::{Deserialize, Serialize};

/// One encoded control command: the flag byte plus the four axis setpoints.
/// Recomputed on every publish tick, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetpointCommand {
    pub flag: u8,
    pub axes: [f32; 4],
}

/// Wire form of a command as published on the setpoint channel.
/// Shape is a fixed external contract with the flight controller side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetpointMessage {
    pub ts_unix_ms: i64,
    pub flag: u8,
    pub axes: [f32; 4],
}

impl SetpointMessage {
    pub fn new(ts_unix_ms: i64, cmd: &SetpointCommand) -> Self {
        Self { ts_unix_ms, flag: cmd.flag, axes: cmd.axes }
    }
}

/// Control-authority handshake, sent framed over the authority service socket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorityRequest {
    pub grant: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorityReply {
    pub ok: bool,
}

/// Vehicle position as reported by the position service. Display only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionReply {
    pub lat: f64,
    pub lon: f64,
    pub alt_m: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setpoint_message_roundtrips_as_json() {
        let cmd = SetpointCommand { flag: 0x49, axes: [15.0, 0.0, -1.5, 0.25] };
        let msg = SetpointMessage::new(1_700_000_000_123, &cmd);
        let blob = serde_json::to_vec(&msg).unwrap();
        let back: SetpointMessage = serde_json::from_slice(&blob).unwrap();
        assert_eq!(back.flag, 0x49);
        assert_eq!(back.axes, [15.0, 0.0, -1.5, 0.25]);
        assert_eq!(back.ts_unix_ms, 1_700_000_000_123);
    }
}
