use euclid::vec2;
use detector::{Core, Detector};
use geom::Point;
use recognizer::{self, Handler, Listener};
use snapshot::{Action, Snapshot};

/// What a `MoveDetector` tells its listener.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveInfo {
    /// The sum of all the focus deltas seen by this detector, across all of its gestures.
    pub focus: Point,
    /// How far the mean finger position moved since the baseline.
    pub focus_delta: Point,
    /// How many fingers are down.
    pub pointer_count: usize,
    /// Milliseconds since the baseline.
    pub time_delta: i64,
    pub event_time: Option<u64>,
}

/// A `Handler` that follows the mean position of all fingers (the "focus").
///
/// The gesture starts with the first movement after the first finger went down and ends when
/// the last finger goes up. Fingers going down or up in between don't end it, but the
/// snapshot in which the number of fingers differs from the baseline reports no movement:
/// the mean position jumps whenever a finger is added or removed.
#[derive(Clone, Debug, PartialEq)]
pub struct Movement {
    focus: Point,
    focus_delta: Point,
}

pub type MoveDetector<L> = Detector<Movement, L>;

impl<L: Listener<MoveInfo>> Detector<Movement, L> {
    /// Creates a new detector for moving gestures.
    pub fn new(listener: L) -> MoveDetector<L> {
        Detector::with_handler(Movement::new(), listener)
    }
}

impl Movement {
    pub fn new() -> Movement {
        Movement {
            focus: vec2(0.0, 0.0),
            focus_delta: vec2(0.0, 0.0),
        }
    }

    pub fn focus(&self) -> Point {
        self.focus
    }

    pub fn focus_delta(&self) -> Point {
        self.focus_delta
    }

    fn measure(&mut self, core: &Core) {
        if let Some((prev, cur)) = core.snapshots() {
            self.focus_delta = if prev.pointer_count() != cur.pointer_count() {
                debug!("finger count went from {} to {}", prev.pointer_count(), cur.pointer_count());
                vec2(0.0, 0.0)
            } else {
                cur.mean_pos() - prev.mean_pos()
            };
            self.focus = self.focus + self.focus_delta;
        }
    }

    fn start(&mut self, core: &mut Core, snapshot: &Snapshot) {
        recognizer::reset(core, self);
        core.seed(snapshot);
        self.measure(core);
    }
}

impl Handler for Movement {
    type Info = MoveInfo;

    fn handle_start<L: Listener<Self::Info>>(&mut self, core: &mut Core, listener: &mut L, snapshot: &Snapshot) {
        match snapshot.action() {
            Action::PrimaryStart => self.start(core, snapshot),
            Action::PrimaryMove => {
                if core.previous().is_none() {
                    // We missed the first finger going down.
                    self.start(core, snapshot);
                    return;
                }

                let info = self.info(core);
                let claimed = listener.begin(&info);
                core.set_in_progress(claimed);
                if claimed {
                    debug!("move began at {}", snapshot.time());
                    self.handle_in_progress(core, listener, snapshot);
                }
            },
            // The contact never became a gesture (or the listener refused it).
            Action::PrimaryEnd | Action::PrimaryCancel => recognizer::reset(core, self),
            _ => {},
        }
    }

    fn handle_in_progress<L: Listener<Self::Info>>(&mut self, core: &mut Core, listener: &mut L, snapshot: &Snapshot) {
        match snapshot.action() {
            Action::PrimaryEnd | Action::PrimaryCancel => {
                let info = self.info(core);
                listener.end(&info);
                recognizer::reset(core, self);
                debug!("move ended at {}", snapshot.time());
            },
            Action::PrimaryMove => {
                if !core.update(snapshot) {
                    return;
                }
                self.measure(core);

                if core.pressure_passes() {
                    let info = self.info(core);
                    if listener.update(&info) {
                        core.accept();
                    }
                }
            },
            _ => {},
        }
    }

    fn reset(&self) -> Movement {
        Movement {
            focus: self.focus,
            focus_delta: vec2(0.0, 0.0),
        }
    }

    fn info(&self, core: &Core) -> MoveInfo {
        MoveInfo {
            focus: self.focus,
            focus_delta: self.focus_delta,
            pointer_count: core.current().map(|s| s.pointer_count()).unwrap_or(0),
            time_delta: core.time_delta(),
            event_time: core.event_time(),
        }
    }
}
