pub mod joint;
pub mod snapshot;

pub use joint::JointType;
pub use snapshot::JointSnapshot;
