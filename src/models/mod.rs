pub mod requests;
pub mod response;
pub mod swosh;

pub use swosh::{NewSwosh, Swosh};
