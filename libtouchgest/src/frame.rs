use euclid::vec2;
use geom::Point;
use snapshot::{Action, Snapshot};

/// A single change to one finger, as reported by a touch device.
///
/// Devices (libinput, for example) send these grouped together in "frames": a bunch of
/// `Down`, `Up` and `Motion` events followed by a `Frame` event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Contact {
    Down { slot: usize, pos: Point, pressure: f64 },
    Up { slot: usize },
    Motion { slot: usize, pos: Point, pressure: f64 },
    Cancel,
    Frame,
}

pub const MAX_SLOTS: usize = 10;

/// Turns a stream of `Contact`s into a stream of `Snapshot`s.
///
/// Fingers going down or up produce a snapshot straight away, so that every such snapshot
/// describes exactly one finger changing. Motion is accumulated until the next `Contact::Frame`,
/// which then produces a single `Action::PrimaryMove` snapshot.
///
/// The fingers in the produced snapshots are ordered by the time at which they went down.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Which slots are down, in the order in which they went down.
    order: Vec<usize>,
    /// What are the positions of the fingers that are down?
    pos: [Point; MAX_SLOTS],
    pressure: [f64; MAX_SLOTS],
    /// Did anything move since the last `Contact::Frame`?
    moved: bool,
    raw_offset: Point,
}

impl Frame {
    /// Creates a new `Frame` with no fingers down.
    pub fn new() -> Frame {
        Frame {
            order: Vec::with_capacity(MAX_SLOTS),
            pos: [vec2(0.0, 0.0); MAX_SLOTS],
            pressure: [0.0; MAX_SLOTS],
            moved: false,
            raw_offset: vec2(0.0, 0.0),
        }
    }

    /// Sets the offset between positions reported by the device and device-absolute
    /// positions; it is copied into every produced snapshot.
    pub fn with_raw_offset(self, offset: Point) -> Frame {
        Frame {
            raw_offset: offset,
            ..self
        }
    }

    /// How many fingers are down?
    pub fn num_down(&self) -> usize {
        self.order.len()
    }

    fn is_down(&self, slot: usize) -> bool {
        self.order.contains(&slot)
    }

    fn snapshot(&self, time: u64, action: Action, action_index: usize) -> Snapshot {
        self.order.iter()
            .fold(Snapshot::new(time, action), |s, &slot| {
                let p = self.pos[slot];
                s.pointer(slot as u32, p.x, p.y, self.pressure[slot])
            })
            .action_index(action_index)
            .raw_offset(self.raw_offset.x, self.raw_offset.y)
    }

    /// Updates the `Frame` to account for a new `Contact` that happened at `time`.
    ///
    /// Returns the snapshot that the detectors should see, if any.
    pub fn update(&mut self, time: u64, ev: &Contact) -> Option<Snapshot> {
        match *ev {
            Contact::Down { slot, pos, pressure } => {
                if slot >= MAX_SLOTS {
                    warn!("not enough slots for {:?}", ev);
                    return None;
                }
                if self.is_down(slot) {
                    warn!("down event, but finger {} was already down", slot);
                    return None;
                }

                self.pos[slot] = pos;
                self.pressure[slot] = pressure;
                self.order.push(slot);
                let action = if self.order.len() == 1 {
                    Action::PrimaryStart
                } else {
                    Action::SecondaryStart
                };
                Some(self.snapshot(time, action, self.order.len() - 1))
            },
            Contact::Up { slot } => {
                let index = match self.order.iter().position(|&s| s == slot) {
                    Some(i) => i,
                    None => {
                        warn!("up event, but finger {} was already up", slot);
                        return None;
                    },
                };

                let action = if self.order.len() == 1 {
                    Action::PrimaryEnd
                } else {
                    Action::SecondaryEnd
                };
                let ret = self.snapshot(time, action, index);
                self.order.remove(index);
                Some(ret)
            },
            Contact::Motion { slot, pos, pressure } => {
                if !self.is_down(slot) {
                    warn!("motion event, but finger {} is not down", slot);
                    return None;
                }
                self.pos[slot] = pos;
                self.pressure[slot] = pressure;
                self.moved = true;
                None
            },
            Contact::Cancel => {
                self.moved = false;
                if self.order.is_empty() {
                    return None;
                }
                let ret = self.snapshot(time, Action::PrimaryCancel, 0);
                self.order.clear();
                Some(ret)
            },
            Contact::Frame => {
                if self.moved && !self.order.is_empty() {
                    self.moved = false;
                    Some(self.snapshot(time, Action::PrimaryMove, 0))
                } else {
                    self.moved = false;
                    None
                }
            },
        }
    }
}
