use detector::Core;
use snapshot::Snapshot;
use std::fmt::Debug;

/// Receives the callbacks of one gesture detector.
///
/// `T` is the gesture-specific information handed to every callback. All the methods have
/// defaults, so an implementation only needs to provide the ones it cares about.
pub trait Listener<T> {
    /// A gesture is starting.
    ///
    /// Return `true` to claim the gesture; if this returns `false`, the detector stays idle and
    /// will ask again at the next opportunity.
    fn begin(&mut self, _info: &T) -> bool {
        true
    }

    /// The gesture made progress.
    ///
    /// Return `true` if the change was consumed. The next change is then measured from the
    /// current snapshot; otherwise, changes keep accumulating from the last consumed one.
    fn update(&mut self, _info: &T) -> bool {
        false
    }

    /// The gesture is over.
    fn end(&mut self, _info: &T) {}
}

/// A listener that accepts every gesture and ignores everything else.
impl<T> Listener<T> for () {}

impl<'a, T, L: Listener<T> + ?Sized> Listener<T> for &'a mut L {
    fn begin(&mut self, info: &T) -> bool {
        (**self).begin(info)
    }

    fn update(&mut self, info: &T) -> bool {
        (**self).update(info)
    }

    fn end(&mut self, info: &T) {
        (**self).end(info)
    }
}

/// The gesture-specific part of a detector.
///
/// A `Detector` owns a `Core`, which holds the state common to all gestures, and a `Handler`,
/// which decides what each snapshot means for its particular gesture. The detector calls
/// `handle_start` while no gesture is in progress and `handle_in_progress` while one is.
pub trait Handler: Debug {
    /// The information handed to this gesture's listener.
    type Info;

    /// Handles a snapshot that arrived while no gesture was in progress.
    fn handle_start<L: Listener<Self::Info>>(&mut self, core: &mut Core, listener: &mut L, snapshot: &Snapshot);

    /// Handles a snapshot that arrived while a gesture was in progress.
    fn handle_in_progress<L: Listener<Self::Info>>(&mut self, core: &mut Core, listener: &mut L, snapshot: &Snapshot);

    /// Returns the state that this handler should have once its gesture is over.
    fn reset(&self) -> Self where Self: Sized;

    /// Summarizes the current state for a listener.
    fn info(&self, core: &Core) -> Self::Info;
}

/// Drops all the state that belongs to a single gesture, in both `core` and `handler`.
pub fn reset<H: Handler>(core: &mut Core, handler: &mut H) {
    *core = Core::new();
    *handler = handler.reset();
}
