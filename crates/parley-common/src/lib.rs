pub mod errors;
pub mod id;

pub use errors::{ConfigError, ParleyError};
pub use id::{new_id, SessionId};
