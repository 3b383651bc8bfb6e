pub mod bounds;
pub mod player;
pub mod segment;
pub mod transform;

pub use bounds::{PlayerBounds, Rect};
pub use player::{Liveness, PlayerRig, DEFAULT_EXPIRY};
pub use segment::{Bone, PresentationContext, Segment, BONE_CONNECTIONS};
pub use transform::SegmentTransform;
