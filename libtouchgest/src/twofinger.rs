use euclid::vec2;
use detector::Core;
use geom::{Geometry, Point};
use recognizer::{self, Handler, Listener};
use snapshot::{Action, Snapshot};
use std::fmt::Debug;
use std::rc::Rc;

/// The vectors between the first two fingers of the baseline and of the current snapshot.
///
/// The fingers are paired by their position in the snapshots, not by their ids.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FingerPair {
    prev_diff: Point,
    cur_diff: Point,
    prev_span: f64,
    cur_span: f64,
}

fn span(v: Point) -> f64 {
    v.square_length().floor()
}

impl FingerPair {
    /// Creates a `FingerPair` in which both fingers are at the same place.
    pub fn new() -> FingerPair {
        FingerPair::from_diffs(vec2(0.0, 0.0), vec2(0.0, 0.0))
    }

    /// Creates a `FingerPair` from the finger-to-finger vectors.
    pub fn from_diffs(prev_diff: Point, cur_diff: Point) -> FingerPair {
        FingerPair {
            prev_diff: prev_diff,
            cur_diff: cur_diff,
            prev_span: span(prev_diff),
            cur_span: span(cur_diff),
        }
    }

    /// Measures the first two fingers of `prev` and `cur`.
    ///
    /// A snapshot with fewer than two fingers counts as having both fingers at the same place.
    pub fn between(prev: &Snapshot, cur: &Snapshot) -> FingerPair {
        let diff = |s: &Snapshot| s.finger_diff().unwrap_or_else(|| {
            debug!("snapshot at {} has {} fingers, expected two", s.time(), s.pointer_count());
            vec2(0.0, 0.0)
        });
        FingerPair::from_diffs(diff(prev), diff(cur))
    }

    /// The vector from the first to the second finger, in the baseline.
    pub fn previous_diff(&self) -> Point {
        self.prev_diff
    }

    /// The vector from the first to the second finger, now.
    pub fn current_diff(&self) -> Point {
        self.cur_diff
    }

    /// The squared distance between the fingers in the baseline, rounded down.
    pub fn previous_span(&self) -> f64 {
        self.prev_span
    }

    /// The squared distance between the fingers now, rounded down.
    ///
    /// ```
    /// use libtouchgest::geom::vec2;
    /// use libtouchgest::FingerPair;
    ///
    /// let pair = FingerPair::from_diffs(vec2(1.0, 1.0), vec2(3.0, 4.0));
    /// assert_eq!(pair.current_span(), 25.0);
    /// ```
    pub fn current_span(&self) -> f64 {
        self.cur_span
    }
}

/// Is either of the first two fingers in `snapshot` too close to an edge of the surface?
///
/// Contacts near the edges are often caused by the edge of the hand, and they report unreliable
/// positions. A snapshot without two fingers is always sloppy.
pub fn near_edge(geometry: &dyn Geometry, snapshot: &Snapshot) -> bool {
    let slop = geometry.edge_slop();
    let size = geometry.surface_size();
    let right = size.width - slop;
    let bottom = size.height - slop;

    let sloppy = |p: Option<Point>| match p {
        Some(p) => p.x < slop || p.y < slop || p.x > right || p.y > bottom,
        None => true,
    };
    sloppy(snapshot.raw_pos(0)) || sloppy(snapshot.raw_pos(1))
}

/// The part of a two-finger gesture that differs between gestures.
pub trait PairGesture: Debug {
    /// The information handed to this gesture's listener.
    type Info;

    /// Measures the gesture-specific change from `prev` to `cur`.
    fn update(&mut self, _prev: &Snapshot, _cur: &Snapshot) {}

    /// Should a gesture whose fingers are separated by `diff` be rejected, even though neither
    /// finger is near an edge?
    fn is_sloppy(&self, _diff: Point) -> bool {
        false
    }

    /// Is the current change big enough to report?
    fn should_update(&self, _pair: &FingerPair) -> bool {
        true
    }

    /// Returns the state that this gesture should have once it is over.
    fn reset(&self) -> Self where Self: Sized;

    fn info(&self, core: &Core, pair: &FingerPair) -> Self::Info;
}

/// A `Handler` for gestures made with two fingers.
///
/// The gesture starts when a second finger goes down, unless one of the two fingers is near an
/// edge of the surface (in which case it starts once both fingers have moved away from the
/// edges). It ends when a finger goes up or the touch is cancelled.
#[derive(Debug)]
pub struct TwoFinger<G> {
    geometry: Rc<dyn Geometry>,
    pair: FingerPair,
    sloppy: bool,
    gesture: G,
}

impl<G: PairGesture> TwoFinger<G> {
    pub fn new(geometry: Rc<dyn Geometry>, gesture: G) -> TwoFinger<G> {
        TwoFinger {
            geometry: geometry,
            pair: FingerPair::new(),
            sloppy: false,
            gesture: gesture,
        }
    }

    pub fn pair(&self) -> &FingerPair {
        &self.pair
    }

    pub fn gesture(&self) -> &G {
        &self.gesture
    }

    /// Did the current gesture candidate get rejected as sloppy?
    pub fn is_sloppy(&self) -> bool {
        self.sloppy
    }

    fn check_sloppy(&self, snapshot: &Snapshot) -> bool {
        if near_edge(&*self.geometry, snapshot) {
            debug!("finger near the edge at {}", snapshot.time());
            return true;
        }
        match snapshot.finger_diff() {
            Some(diff) => self.gesture.is_sloppy(diff),
            None => true,
        }
    }

    fn measure(&mut self, core: &Core) {
        if let Some((prev, cur)) = core.snapshots() {
            self.pair = FingerPair::between(prev, cur);
            self.gesture.update(prev, cur);
        }
    }

    fn update(&mut self, core: &mut Core, snapshot: &Snapshot) -> bool {
        if !core.update(snapshot) {
            return false;
        }
        self.measure(core);
        true
    }

    fn begin<L: Listener<G::Info>>(&mut self, core: &mut Core, listener: &mut L) {
        let info = self.info(core);
        let claimed = listener.begin(&info);
        debug!("two-finger gesture {}", if claimed { "began" } else { "was refused" });
        core.set_in_progress(claimed);
    }

    fn end<L: Listener<G::Info>>(&mut self, core: &mut Core, listener: &mut L) {
        if !self.sloppy {
            let info = self.info(core);
            listener.end(&info);
        }
        recognizer::reset(core, self);
    }
}

impl<G: PairGesture> Handler for TwoFinger<G> {
    type Info = G::Info;

    fn handle_start<L: Listener<Self::Info>>(&mut self, core: &mut Core, listener: &mut L, snapshot: &Snapshot) {
        match snapshot.action() {
            Action::SecondaryStart => {
                recognizer::reset(core, self);
                core.seed(snapshot);
                self.measure(core);

                self.sloppy = self.check_sloppy(snapshot);
                if !self.sloppy {
                    self.begin(core, listener);
                }
            },
            Action::PrimaryMove => {
                if !self.sloppy {
                    return;
                }
                // Judge the fingers where they are now, not where they came down.
                self.sloppy = self.check_sloppy(snapshot);
                if !self.sloppy {
                    self.begin(core, listener);
                }
            },
            // A finger went up before the gesture started: there's nothing to end, but the
            // baseline has to go.
            Action::SecondaryEnd | Action::PrimaryEnd | Action::PrimaryCancel => {
                recognizer::reset(core, self);
            },
            _ => {},
        }
    }

    fn handle_in_progress<L: Listener<Self::Info>>(&mut self, core: &mut Core, listener: &mut L, snapshot: &Snapshot) {
        match snapshot.action() {
            Action::SecondaryEnd => {
                self.update(core, snapshot);
                self.end(core, listener);
            },
            Action::PrimaryCancel => {
                self.end(core, listener);
            },
            Action::PrimaryMove => {
                if !self.update(core, snapshot) {
                    return;
                }
                if core.pressure_passes() && self.gesture.should_update(&self.pair) {
                    let info = self.info(core);
                    if listener.update(&info) {
                        core.accept();
                    }
                }
            },
            _ => {},
        }
    }

    fn reset(&self) -> TwoFinger<G> {
        TwoFinger {
            geometry: self.geometry.clone(),
            pair: FingerPair::new(),
            sloppy: false,
            gesture: self.gesture.reset(),
        }
    }

    fn info(&self, core: &Core) -> G::Info {
        self.gesture.info(core, &self.pair)
    }
}

#[cfg(test)]
mod tests {
    use euclid::vec2;
    use geom::FixedGeometry;
    use super::*;

    fn two(action: Action, p0: (f64, f64), p1: (f64, f64)) -> Snapshot {
        Snapshot::new(0, action)
            .pointer(0, p0.0, p0.1, 1.0)
            .pointer(1, p1.0, p1.1, 1.0)
            .action_index(1)
    }

    #[test]
    fn span_is_floored_square_distance() {
        let s = two(Action::SecondaryStart, (0.0, 0.0), (3.0, 4.0));
        let pair = FingerPair::between(&s, &s);
        assert_eq!(pair.current_span(), 25.0);
        assert_eq!(pair.previous_span(), 25.0);

        let pair = FingerPair::from_diffs(vec2(0.5, 0.5), vec2(1.5, 0.0));
        assert_eq!(pair.previous_span(), 0.0);
        assert_eq!(pair.current_span(), 2.0);
    }

    #[test]
    fn pairs_by_position() {
        let prev = two(Action::SecondaryStart, (0.0, 0.0), (10.0, 0.0));
        let cur = Snapshot::new(16, Action::PrimaryMove)
            .pointer(7, 0.0, 0.0, 1.0)
            .pointer(3, 0.0, 10.0, 1.0);
        let pair = FingerPair::between(&prev, &cur);
        assert_eq!(pair.previous_diff(), vec2(10.0, 0.0));
        assert_eq!(pair.current_diff(), vec2(0.0, 10.0));
    }

    #[test]
    fn missing_finger_counts_as_zero_diff() {
        let one = Snapshot::new(0, Action::PrimaryMove).pointer(0, 5.0, 5.0, 1.0);
        let pair = FingerPair::between(&one, &one);
        assert_eq!(pair.current_diff(), vec2(0.0, 0.0));
        assert_eq!(pair.current_span(), 0.0);
    }

    #[test]
    fn edges() {
        let g = FixedGeometry::new(100.0, 200.0, 10.0);
        let inside = two(Action::SecondaryStart, (50.0, 50.0), (60.0, 150.0));
        assert!(!near_edge(&g, &inside));

        for &p in &[(5.0, 50.0), (50.0, 5.0), (95.0, 50.0), (50.0, 195.0)] {
            assert!(near_edge(&g, &two(Action::SecondaryStart, p, (50.0, 50.0))));
            assert!(near_edge(&g, &two(Action::SecondaryStart, (50.0, 50.0), p)));
        }

        let one = Snapshot::new(0, Action::PrimaryMove).pointer(0, 50.0, 50.0, 1.0);
        assert!(near_edge(&g, &one));
    }

    #[test]
    fn edges_use_device_positions() {
        let g = FixedGeometry::new(100.0, 100.0, 10.0);
        let local = two(Action::SecondaryStart, (2.0, 50.0), (50.0, 50.0));
        assert!(near_edge(&g, &local));
        assert!(!near_edge(&g, &local.clone().raw_offset(20.0, 0.0)));
    }
}
