pub mod error;
pub mod history;
pub mod positioning;
pub mod project;
pub mod snapping;
pub mod store;
pub mod time;
pub mod types;

pub use error::{CoreError, Result};
pub use types::*;
