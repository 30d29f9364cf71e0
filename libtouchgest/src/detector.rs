use recognizer::{self, Handler, Listener};
use snapshot::Snapshot;

/// The threshold ratio between the current and the previous pressure.
///
/// When pressure drops sharply between two snapshots, the positions in the newer one are
/// often imprecise, because the user is in the process of lifting a finger. Such snapshots
/// still advance the detector's bookkeeping, but they don't produce update callbacks.
pub const PRESSURE_THRESHOLD: f64 = 0.67;

/// The state shared by every kind of gesture detector.
///
/// It retains two snapshots: `previous`, the baseline that changes are measured from, and
/// `current`, the most recent snapshot that the gesture looked at.
#[derive(Clone, Debug, PartialEq)]
pub struct Core {
    in_progress: bool,
    previous: Option<Snapshot>,
    current: Option<Snapshot>,
    time_delta: i64,
    cur_pressure: f64,
    prev_pressure: f64,
}

impl Core {
    /// Creates a new, idle, `Core` that retains no snapshots.
    pub fn new() -> Core {
        Core {
            in_progress: false,
            previous: None,
            current: None,
            time_delta: 0,
            cur_pressure: 0.0,
            prev_pressure: 0.0,
        }
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    pub fn set_in_progress(&mut self, in_progress: bool) {
        self.in_progress = in_progress;
    }

    pub fn previous(&self) -> Option<&Snapshot> {
        self.previous.as_ref()
    }

    pub fn current(&self) -> Option<&Snapshot> {
        self.current.as_ref()
    }

    /// The time between the baseline and the current snapshot, in milliseconds.
    pub fn time_delta(&self) -> i64 {
        self.time_delta
    }

    /// The time of the current snapshot, or `None` if no gesture ever looked at one.
    pub fn event_time(&self) -> Option<u64> {
        self.current.as_ref().map(|s| s.time())
    }

    pub fn current_pressure(&self) -> f64 {
        self.cur_pressure
    }

    pub fn previous_pressure(&self) -> f64 {
        self.prev_pressure
    }

    /// Is the current snapshot's pressure reliable enough to report a change?
    pub fn pressure_passes(&self) -> bool {
        self.cur_pressure / self.prev_pressure > PRESSURE_THRESHOLD
    }

    /// Forgets everything and starts tracking from `snapshot`, which becomes both the baseline
    /// and the current snapshot.
    pub fn seed(&mut self, snapshot: &Snapshot) {
        *self = Core::new();
        self.previous = Some(snapshot.clone());
        self.update(snapshot);
    }

    /// Makes `snapshot` the current snapshot, and measures it against the baseline.
    ///
    /// Returns `false` (and changes nothing) if there is no baseline to measure against.
    pub fn update(&mut self, snapshot: &Snapshot) -> bool {
        let (time_delta, prev_pressure) = match self.previous {
            Some(ref prev) => (snapshot.time() as i64 - prev.time() as i64, prev.action_pressure()),
            None => {
                debug!("no baseline for snapshot at {}", snapshot.time());
                return false;
            },
        };

        self.current = Some(snapshot.clone());
        self.time_delta = time_delta;
        self.cur_pressure = snapshot.action_pressure();
        self.prev_pressure = prev_pressure;
        true
    }

    /// Makes the current snapshot the new baseline.
    pub fn accept(&mut self) {
        if let Some(ref cur) = self.current {
            self.previous = Some(cur.clone());
        }
    }

    /// Returns the baseline and the current snapshot, if both are there.
    pub fn snapshots(&self) -> Option<(&Snapshot, &Snapshot)> {
        match (self.previous.as_ref(), self.current.as_ref()) {
            (Some(prev), Some(cur)) => Some((prev, cur)),
            _ => None,
        }
    }
}

/// A gesture detector: feed it every snapshot, and it calls its listener when something happens.
///
/// A detector is meant to live as long as the surface it listens to. It isn't meant to be
/// shared: every gesture type gets its own detector, and callers that run several detectors on
/// the same snapshots need to decide for themselves which one wins.
#[derive(Debug)]
pub struct Detector<H, L> {
    core: Core,
    handler: H,
    listener: L,
}

impl<H: Handler, L: Listener<H::Info>> Detector<H, L> {
    /// Creates a new detector from the gesture-specific `handler`.
    pub fn with_handler(handler: H, listener: L) -> Detector<H, L> {
        Detector {
            core: Core::new(),
            handler: handler,
            listener: listener,
        }
    }

    /// Processes one snapshot.
    ///
    /// Usually the listener hears about it at most once. The exception is a move gesture, whose
    /// `begin` is followed by an `update` for the same snapshot.
    ///
    /// Every snapshot is accepted, so this always returns `true`.
    pub fn process(&mut self, snapshot: &Snapshot) -> bool {
        if self.core.is_in_progress() {
            self.handler.handle_in_progress(&mut self.core, &mut self.listener, snapshot);
        } else {
            self.handler.handle_start(&mut self.core, &mut self.listener, snapshot);
        }
        true
    }

    /// Abandons the current gesture, if any, without telling the listener.
    pub fn reset(&mut self) {
        recognizer::reset(&mut self.core, &mut self.handler);
    }

    pub fn is_in_progress(&self) -> bool {
        self.core.is_in_progress()
    }

    /// The time between the baseline and the current snapshot, in milliseconds.
    pub fn time_delta(&self) -> i64 {
        self.core.time_delta()
    }

    /// The time of the current snapshot.
    ///
    /// Returns `None` if no gesture has looked at a snapshot since the last reset.
    pub fn event_time(&self) -> Option<u64> {
        self.core.event_time()
    }

    /// The same information that the listener gets.
    pub fn info(&self) -> H::Info {
        self.handler.info(&self.core)
    }

    pub fn core(&self) -> &Core {
        &self.core
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn into_listener(self) -> L {
        self.listener
    }
}
