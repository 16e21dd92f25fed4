// camera/mod.rs

pub mod cascades;
pub mod editor;
pub mod input;

pub use cascades::{
    cascade_ranges, cascade_splits, CASCADE_SPLIT_DIVISORS, CASCADE_Z_MULTIPLIER,
    SHADOW_CASCADE_COUNT,
};
pub use editor::{EditorCamera, MIN_ORBIT_DISTANCE, PAN_SATURATION};
pub use input::CameraInput;
