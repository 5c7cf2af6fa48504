pub mod error;
pub mod platform;

mod check;
mod graph;

pub use platform::Platform;
