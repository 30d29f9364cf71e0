use euclid::vec2;
use geom::Point;

/// What happened to cause a `Snapshot`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Action {
    /// The first finger touched down.
    PrimaryStart,
    /// One or more fingers moved.
    PrimaryMove,
    /// The last finger went up.
    PrimaryEnd,
    /// The whole touch sequence was aborted by the platform.
    PrimaryCancel,
    /// Another finger touched down while at least one was already down.
    SecondaryStart,
    /// A finger went up while at least one other finger stays down.
    SecondaryEnd,
}

/// One finger that is touching the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
    /// An identifier that stays the same while the finger stays down.
    pub id: u32,
    /// The position of the finger, relative to the view that receives the events.
    pub pos: Point,
    /// The pressure of the finger, normally between `0.0` and `1.0`.
    pub pressure: f64,
}

/// A `Snapshot` stores the state of the fingers at the moment one action happened.
///
/// Fingers are ordered, and the detectors look at them by position in that order rather than
/// by id. In particular, the two-finger detectors always track the first two fingers. When a
/// finger goes up, the snapshot describing that action still contains the finger, and
/// `action_index` points at it.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    time: u64,
    action: Action,
    action_index: usize,
    pointers: Vec<Pointer>,
    raw_offset: Point,
}

impl Snapshot {
    /// Creates a new `Snapshot` with no fingers, taken at `time` milliseconds.
    pub fn new(time: u64, action: Action) -> Snapshot {
        Snapshot {
            time: time,
            action: action,
            action_index: 0,
            pointers: Vec::new(),
            raw_offset: vec2(0.0, 0.0),
        }
    }

    /// Appends a finger.
    pub fn pointer(mut self, id: u32, x: f64, y: f64, pressure: f64) -> Snapshot {
        self.pointers.push(Pointer {
            id: id,
            pos: vec2(x, y),
            pressure: pressure,
        });
        self
    }

    /// Sets the position (in the finger order) of the finger that caused the action.
    pub fn action_index(self, action_index: usize) -> Snapshot {
        Snapshot {
            action_index: action_index,
            ..self
        }
    }

    /// Sets the offset between view-local and device-absolute positions.
    ///
    /// A finger at view-local position `p` is at `p + offset` on the device.
    pub fn raw_offset(self, x: f64, y: f64) -> Snapshot {
        Snapshot {
            raw_offset: vec2(x, y),
            ..self
        }
    }

    pub fn time(&self) -> u64 {
        self.time
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn action_pointer(&self) -> usize {
        self.action_index
    }

    pub fn pointers(&self) -> &[Pointer] {
        &self.pointers
    }

    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// Returns the view-local position of the `i`th finger.
    pub fn pos(&self, i: usize) -> Option<Point> {
        self.pointers.get(i).map(|p| p.pos)
    }

    /// Returns the device-absolute position of the `i`th finger.
    pub fn raw_pos(&self, i: usize) -> Option<Point> {
        self.pos(i).map(|p| p + self.raw_offset)
    }

    /// Returns the pressure of the finger that caused the action.
    ///
    /// If `action_index` doesn't name a finger, returns zero.
    pub fn action_pressure(&self) -> f64 {
        self.pointers.get(self.action_index).map(|p| p.pressure).unwrap_or(0.0)
    }

    /// Returns the arithmetic mean of the positions of all the fingers.
    ///
    /// If there are no fingers, returns zero.
    pub fn mean_pos(&self) -> Point {
        let sum = self.pointers.iter()
            .map(|p| p.pos)
            .fold(vec2(0.0, 0.0), |a, b| a + b);
        if self.pointers.is_empty() {
            vec2(0.0, 0.0)
        } else {
            sum / (self.pointers.len() as f64)
        }
    }

    /// Returns the vector from the first finger to the second one.
    pub fn finger_diff(&self) -> Option<Point> {
        match (self.pos(0), self.pos(1)) {
            (Some(p0), Some(p1)) => Some(p1 - p0),
            _ => None,
        }
    }

    /// Returns the mean y coordinate of the first two fingers.
    pub fn pair_mean_y(&self) -> Option<f64> {
        match (self.pos(0), self.pos(1)) {
            (Some(p0), Some(p1)) => Some((p0.y + p1.y) / 2.0),
            _ => None,
        }
    }
}
