pub mod authority;
pub mod doctor;
pub mod position;
pub mod sink;
pub mod streamer;

mod frame;

use serde::Deserialize;

fn default_rate_hz() -> f32 {
    10.0
}

fn default_timeout_ms() -> u64 {
    2000
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinkConfig {
    /// Setpoint channel: UDP address commands are streamed to.
    pub setpoint_addr: String,

    /// Control-authority service (TCP request/response).
    pub authority_addr: String,

    /// Position service (TCP request/response), display only.
    pub position_addr: Option<String>,

    /// Publish cadence while streaming.
    #[serde(default = "default_rate_hz")]
    pub rate_hz: f32,

    /// Per-request cap for the authority and position services.
    #[serde(default = "default_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl LinkConfig {
    pub fn tick_period(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f32(1.0 / self.rate_hz)
    }

    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.request_timeout_ms)
    }
}
