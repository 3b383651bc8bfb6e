pub mod config;
pub mod error;
pub mod logging;
pub mod rig;
pub mod scene;
pub mod skeleton;
pub mod tracking;

pub use error::RigError;
