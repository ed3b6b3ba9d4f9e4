pub mod setpoint;

pub use setpoint::{AuthorityReply, AuthorityRequest, PositionReply, SetpointCommand, SetpointMessage};
