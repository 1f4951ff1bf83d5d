pub mod domain;
pub mod messages;
pub mod navigation;
pub mod ports;
pub mod render;
pub mod validation;
pub mod view;

pub use domain::{AuthSession, Credentials, NewPost, Post, SignUpOutcome, User};
pub use navigation::ScheduledRedirect;
pub use ports::{BackendService, PortError, PortResult};
pub use validation::ValidationError;
pub use view::{AuthMode, NavView};
