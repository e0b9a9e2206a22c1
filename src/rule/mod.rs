pub mod model;
pub mod naming;

pub use model::{Action, Direction, FirewallRule, ProfileScope, ProtocolScope};
pub use naming::{DEFAULT_PREFIX, app_name, same_path};
