extern crate euclid;
#[macro_use] extern crate log;

pub mod detector;
pub mod frame;
pub mod geom;
pub mod gestures;
pub mod recognizer;
pub mod snapshot;
pub mod twofinger;

#[cfg(test)]
mod test_util;

pub use detector::{Core, Detector};
pub use frame::{Contact, Frame};
pub use geom::{FixedGeometry, Geometry, Point, Px, Size};
pub use gestures::movement::{MoveDetector, MoveInfo, Movement};
pub use gestures::rotate::{Rotation, RotateDetector, RotateInfo};
pub use gestures::shove::{Shove, ShoveDetector, ShoveInfo};
pub use recognizer::{Handler, Listener};
pub use snapshot::{Action, Pointer, Snapshot};
pub use twofinger::{FingerPair, PairGesture, TwoFinger};
