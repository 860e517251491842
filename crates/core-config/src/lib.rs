pub mod error;
pub mod remote;

pub use error::{ConfigError, ConfigResult};
pub use remote::RemoteConfig;
