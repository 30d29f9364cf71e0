use detector::{Core, Detector};
use geom::{self, Geometry};
use recognizer::Listener;
use std::rc::Rc;
use twofinger::{FingerPair, PairGesture, TwoFinger};

/// What a `RotateDetector` tells its listener.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotateInfo {
    /// How far the fingers turned since the baseline, in degrees.
    ///
    /// Turning clockwise on screen (where the y axis points down) gives a negative delta.
    pub rotation_delta: f64,
    pub current_span: f64,
    pub previous_span: f64,
    /// Milliseconds since the baseline.
    pub time_delta: i64,
    pub event_time: Option<u64>,
}

/// Returns the angle (in degrees) from the current finger vector to the baseline one.
pub fn rotation_delta(pair: &FingerPair) -> f64 {
    let diff = geom::angle(pair.previous_diff()) - geom::angle(pair.current_diff());
    diff.to_degrees()
}

/// The rotation part of a two-finger gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rotation;

pub type RotateDetector<L> = Detector<TwoFinger<Rotation>, L>;

impl<L: Listener<RotateInfo>> Detector<TwoFinger<Rotation>, L> {
    /// Creates a new detector for rotation gestures on a surface described by `geometry`.
    pub fn new(geometry: Rc<dyn Geometry>, listener: L) -> RotateDetector<L> {
        Detector::with_handler(TwoFinger::new(geometry, Rotation), listener)
    }
}

impl PairGesture for Rotation {
    type Info = RotateInfo;

    fn reset(&self) -> Rotation {
        Rotation
    }

    fn info(&self, core: &Core, pair: &FingerPair) -> RotateInfo {
        RotateInfo {
            rotation_delta: rotation_delta(pair),
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
    use snapshot::{Action, Snapshot};
    use super::*;
    use test_util::{Call, Recorder};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn two(time: u64, action: Action, p0: (f64, f64), p1: (f64, f64)) -> Snapshot {
        Snapshot::new(time, action)
            .pointer(0, p0.0, p0.1, 1.0)
            .pointer(1, p1.0, p1.1, 1.0)
            .action_index(if action == Action::PrimaryMove { 0 } else { 1 })
    }

    fn detector() -> RotateDetector<Recorder<RotateInfo>> {
        RotateDetector::new(Rc::new(FixedGeometry::new(1000.0, 1000.0, 20.0)), Recorder::new())
    }

    #[test]
    fn quarter_turn_sign() {
        let pair = FingerPair::from_diffs(vec2(1.0, 0.0), vec2(0.0, 1.0));
        assert!(close(rotation_delta(&pair), -90.0));

        let pair = FingerPair::from_diffs(vec2(0.0, 1.0), vec2(1.0, 0.0));
        assert!(close(rotation_delta(&pair), 90.0));
    }

    #[test]
    fn rotate_and_lift() {
        let mut d = detector();
        d.process(&Snapshot::new(0, Action::PrimaryStart).pointer(0, 500.0, 500.0, 1.0));
        assert!(!d.is_in_progress());

        d.process(&two(10, Action::SecondaryStart, (500.0, 500.0), (600.0, 500.0)));
        assert!(d.is_in_progress());
        assert_eq!(d.listener().count_begins(), 1);

        d.process(&two(20, Action::PrimaryMove, (500.0, 500.0), (500.0, 600.0)));
        {
            let updates = d.listener().updates();
            assert_eq!(updates.len(), 1);
            assert!(close(updates[0].rotation_delta, -90.0));
            assert_eq!(updates[0].previous_span, 10000.0);
            assert_eq!(updates[0].current_span, 10000.0);
            assert_eq!(updates[0].time_delta, 10);
        }

        // The update was consumed, so this is measured from the last move.
        d.process(&two(30, Action::PrimaryMove, (500.0, 500.0), (400.0, 500.0)));
        assert!(close(d.listener().updates()[1].rotation_delta, -90.0));

        d.process(&two(40, Action::SecondaryEnd, (500.0, 500.0), (400.0, 500.0)));
        assert_eq!(d.listener().count_ends(), 1);
        assert!(!d.is_in_progress());
        assert_eq!(d.event_time(), None);

        // The remaining finger doesn't restart anything.
        d.process(&Snapshot::new(50, Action::PrimaryMove).pointer(0, 510.0, 500.0, 1.0));
        d.process(&Snapshot::new(60, Action::PrimaryEnd).pointer(0, 510.0, 500.0, 1.0));
        assert_eq!(d.listener().calls.len(), 4);
    }

    #[test]
    fn cancel_reports_the_last_measured_frame() {
        let mut d = detector();
        d.process(&two(0, Action::SecondaryStart, (500.0, 500.0), (600.0, 500.0)));
        d.process(&two(10, Action::PrimaryMove, (500.0, 500.0), (500.0, 600.0)));
        d.process(&two(20, Action::PrimaryCancel, (500.0, 500.0), (400.0, 500.0)));

        match d.listener().calls.last() {
            Some(&Call::End(ref info)) => {
                assert_eq!(info.event_time, Some(10));
                assert!(close(info.rotation_delta, -90.0));
            },
            other => panic!("expected an end, got {:?}", other),
        }
        assert!(!d.is_in_progress());
    }

    #[test]
    fn sloppy_start_waits_for_fingers_to_leave_the_edge() {
        let mut d = detector();
        d.process(&two(0, Action::SecondaryStart, (5.0, 500.0), (300.0, 500.0)));
        assert!(!d.is_in_progress());
        assert!(d.handler().is_sloppy());
        assert!(d.listener().calls.is_empty());

        d.process(&two(10, Action::PrimaryMove, (10.0, 500.0), (300.0, 500.0)));
        assert!(d.listener().calls.is_empty());

        d.process(&two(20, Action::PrimaryMove, (50.0, 500.0), (300.0, 500.0)));
        assert!(d.is_in_progress());
        assert_eq!(d.listener().count_begins(), 1);
        assert!(d.listener().updates().is_empty());

        d.process(&two(30, Action::PrimaryCancel, (50.0, 500.0), (300.0, 500.0)));
        assert_eq!(d.listener().count_ends(), 1);
        assert!(!d.is_in_progress());
    }

    #[test]
    fn sloppy_gesture_that_never_started_ends_quietly() {
        let mut d = detector();
        d.process(&two(0, Action::SecondaryStart, (500.0, 995.0), (500.0, 300.0)));
        d.process(&two(10, Action::SecondaryEnd, (500.0, 995.0), (500.0, 300.0)));
        assert!(d.listener().calls.is_empty());
        assert!(!d.is_in_progress());
        assert!(!d.handler().is_sloppy());
        assert_eq!(d.core().snapshots(), None);
    }

    #[test]
    fn low_pressure_is_not_reported() {
        let mut d = detector();
        d.process(&two(0, Action::SecondaryStart, (500.0, 500.0), (600.0, 500.0)));
        d.process(&Snapshot::new(10, Action::PrimaryMove)
            .pointer(0, 500.0, 500.0, 0.6)
            .pointer(1, 500.0, 600.0, 1.0));
        assert!(d.listener().updates().is_empty());
        assert!(d.is_in_progress());
    }

    #[test]
    fn refused_gesture_gets_nothing_else() {
        let mut d = detector();
        d.listener_mut().claim = false;
        d.process(&two(0, Action::SecondaryStart, (500.0, 500.0), (600.0, 500.0)));
        d.process(&two(10, Action::PrimaryMove, (500.0, 500.0), (500.0, 600.0)));
        d.process(&two(20, Action::SecondaryEnd, (500.0, 500.0), (500.0, 600.0)));
        assert_eq!(d.listener().calls.len(), 1);
        assert_eq!(d.listener().count_begins(), 1);
        assert_eq!(d.core().snapshots(), None);
    }
}
