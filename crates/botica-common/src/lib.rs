pub mod errors;
pub mod events;
pub mod notifications;
pub mod types;

pub use errors::{BoticaError, ConfigError, PlatformError};
pub use events::{Event, EventBus};
pub use notifications::{Notification, NotificationLevel};
pub use types::{Message, Role};

pub type Result<T> = std::result::Result<T, BoticaError>;
