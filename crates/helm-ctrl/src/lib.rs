pub mod authority;
pub mod axis;
pub mod encode;
pub mod mode;

pub use authority::{Authority, AuthorityError, AuthorityGate, AuthorityService};
pub use axis::{AxisSnapshot, AxisState, SharedAxisState};
pub use encode::encode;
pub use mode::ControlMode;
