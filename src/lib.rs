pub mod logging;
pub mod model;
pub mod output;
pub mod paths;
pub mod session;
pub mod store;
pub mod tui;

pub use model::{Task, User};
pub use session::Session;
pub use store::{Store, StoreError};
