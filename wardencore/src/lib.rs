pub mod assignment;
pub mod error;
pub mod item;
pub mod params;
pub mod platform;
pub mod rule;
pub mod snapshot;
