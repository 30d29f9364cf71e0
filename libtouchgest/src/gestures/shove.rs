use detector::{Core, Detector};
use geom::{self, Geometry, Point};
use recognizer::Listener;
use snapshot::Snapshot;
use std::rc::Rc;
use twofinger::{FingerPair, PairGesture, TwoFinger};

/// Changes in the mean y coordinate smaller than this (in pixels) are not reported.
pub const MIN_SHOVE_DELTA: f64 = 0.5;

// The fingers must be within about 20 degrees of vertical, one way or the other.
const UPRIGHT: f64 = 0.35;
const UPSIDE_DOWN: f64 = 2.79;

/// What a `ShoveDetector` tells its listener.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShoveInfo {
    /// How far the mean y coordinate of the two fingers moved since the baseline, in pixels.
    pub shove_delta: f64,
    pub current_span: f64,
    pub previous_span: f64,
    /// Milliseconds since the baseline.
    pub time_delta: i64,
    pub event_time: Option<u64>,
}

/// The vertical part of a two-finger gesture.
///
/// Only fingers lined up (roughly) vertically can shove; any other arrangement is treated as
/// sloppy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shove {
    prev_average_y: f64,
    cur_average_y: f64,
}

pub type ShoveDetector<L> = Detector<TwoFinger<Shove>, L>;

impl<L: Listener<ShoveInfo>> Detector<TwoFinger<Shove>, L> {
    /// Creates a new detector for shove gestures on a surface described by `geometry`.
    pub fn new(geometry: Rc<dyn Geometry>, listener: L) -> ShoveDetector<L> {
        Detector::with_handler(TwoFinger::new(geometry, Shove::new()), listener)
    }
}

impl Shove {
    pub fn new() -> Shove {
        Shove {
            prev_average_y: 0.0,
            cur_average_y: 0.0,
        }
    }

    /// The change in the mean y coordinate of the two fingers since the baseline.
    pub fn delta(&self) -> f64 {
        self.cur_average_y - self.prev_average_y
    }
}

impl PairGesture for Shove {
    type Info = ShoveInfo;

    fn update(&mut self, prev: &Snapshot, cur: &Snapshot) {
        self.prev_average_y = prev.pair_mean_y().unwrap_or(0.0);
        self.cur_average_y = cur.pair_mean_y().unwrap_or(0.0);
    }

    fn is_sloppy(&self, diff: Point) -> bool {
        let angle = geom::angle_from_vertical(diff);
        !(angle < UPRIGHT || angle > UPSIDE_DOWN)
    }

    fn should_update(&self, _pair: &FingerPair) -> bool {
        self.delta().abs() > MIN_SHOVE_DELTA
    }

    fn reset(&self) -> Shove {
        Shove::new()
    }

    fn info(&self, core: &Core, pair: &FingerPair) -> ShoveInfo {
        ShoveInfo {
            shove_delta: self.delta(),
            current_span: pair.current_span(),
            previous_span: pair.previous_span(),
            time_delta: core.time_delta(),
            event_time: core.event_time(),
        }
    }
}

#[cfg(test)]
mod tests {
    use euclid::vec2;
    use geom::FixedGeometry;
    use snapshot::Action;
    use super::*;
    use test_util::Recorder;

    fn two(time: u64, action: Action, p0: (f64, f64), p1: (f64, f64)) -> Snapshot {
        Snapshot::new(time, action)
            .pointer(0, p0.0, p0.1, 1.0)
            .pointer(1, p1.0, p1.1, 1.0)
            .action_index(if action == Action::PrimaryMove { 0 } else { 1 })
    }

    fn detector() -> ShoveDetector<Recorder<ShoveInfo>> {
        ShoveDetector::new(Rc::new(FixedGeometry::new(1000.0, 1000.0, 20.0)), Recorder::new())
    }

    #[test]
    fn angle_gate() {
        let s = Shove::new();
        assert!(s.is_sloppy(vec2(10.0, 0.0)));
        assert!(s.is_sloppy(vec2(-10.0, 0.0)));
        assert!(s.is_sloppy(vec2(10.0, 10.0)));
        assert!(!s.is_sloppy(vec2(0.0, 10.0)));
        assert!(!s.is_sloppy(vec2(0.0, -10.0)));
        assert!(!s.is_sloppy(vec2(2.0, 10.0)));
    }

    #[test]
    fn horizontal_fingers_never_shove() {
        let mut d = detector();
        d.process(&two(0, Action::SecondaryStart, (500.0, 500.0), (510.0, 500.0)));
        assert!(!d.is_in_progress());
        for i in 1..5 {
            let y = 500.0 + 40.0 * i as f64;
            d.process(&two(10 * i, Action::PrimaryMove, (500.0, y), (510.0, y)));
        }
        d.process(&two(60, Action::SecondaryEnd, (500.0, 660.0), (510.0, 660.0)));
        assert!(d.listener().calls.is_empty());
    }

    #[test]
    fn vertical_fingers_shove() {
        let mut d = detector();
        d.process(&two(0, Action::SecondaryStart, (500.0, 500.0), (500.0, 510.0)));
        assert!(d.is_in_progress());

        d.process(&two(10, Action::PrimaryMove, (500.0, 520.0), (500.0, 530.0)));
        {
            let updates = d.listener().updates();
            assert_eq!(updates.len(), 1);
            assert_eq!(updates[0].shove_delta, 20.0);
            assert_eq!(updates[0].current_span, 100.0);
        }

        d.process(&two(20, Action::SecondaryEnd, (500.0, 520.0), (500.0, 530.0)));
        assert_eq!(d.listener().count_begins(), 1);
        assert_eq!(d.listener().count_ends(), 1);
        assert!(!d.is_in_progress());
        assert_eq!(d.handler().gesture().delta(), 0.0);
    }

    #[test]
    fn tiny_shoves_are_not_reported() {
        let mut d = detector();
        d.process(&two(0, Action::SecondaryStart, (500.0, 500.0), (500.0, 510.0)));
        d.process(&two(10, Action::PrimaryMove, (500.0, 500.25), (500.0, 510.25)));
        assert!(d.listener().updates().is_empty());

        // Not consumed, so the next move is measured from the start.
        d.process(&two(20, Action::PrimaryMove, (500.0, 500.75), (500.0, 510.75)));
        assert_eq!(d.listener().updates()[0].shove_delta, 0.75);
    }

    #[test]
    fn low_pressure_is_not_reported() {
        let mut d = detector();
        d.process(&two(0, Action::SecondaryStart, (500.0, 500.0), (500.0, 510.0)));
        d.process(&Snapshot::new(10, Action::PrimaryMove)
            .pointer(0, 500.0, 520.0, 0.6)
            .pointer(1, 500.0, 530.0, 1.0));
        assert!(d.is_in_progress());
        assert!(d.listener().updates().is_empty());

        // The baseline stayed put, so the next firm move reports both steps.
        d.process(&two(20, Action::PrimaryMove, (500.0, 540.0), (500.0, 550.0)));
        let updates = d.listener().updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].shove_delta, 40.0);
        assert_eq!(updates[0].time_delta, 20);
    }

    #[test]
    fn turning_upright_starts_the_gesture() {
        let mut d = detector();
        d.process(&two(0, Action::SecondaryStart, (500.0, 500.0), (600.0, 520.0)));
        assert!(!d.is_in_progress());
        assert!(d.handler().is_sloppy());

        d.process(&two(10, Action::PrimaryMove, (500.0, 500.0), (510.0, 600.0)));
        assert!(d.is_in_progress());
        assert_eq!(d.listener().count_begins(), 1);
    }
}
