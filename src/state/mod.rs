pub mod app_state;
pub mod catalog;

pub use app_state::{AppState, Event, ReduceContext};
pub use catalog::Catalog;
