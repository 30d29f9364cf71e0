use libtouchgest::{Contact, Frame, MoveDetector, RotateDetector, ShoveDetector};
use libtouchgest::geom::{Geometry, Point};
use std::fmt;
use std::rc::Rc;

use config::{Config, Kind};
use listeners::{MoveLogger, RotateLogger, ShoveLogger};

/// Feeds a stream of `Contact`s to every configured detector.
#[derive(Debug)]
pub struct Session {
    frame: Frame,
    order: Vec<Kind>,
    moves: MoveDetector<MoveLogger>,
    rotates: RotateDetector<RotateLogger>,
    shoves: ShoveDetector<ShoveLogger>,
    snapshots: usize,
}

/// What a `Session` saw.
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub snapshots: usize,
    pub moves: usize,
    pub focus: Point,
    pub rotations: usize,
    pub degrees: f64,
    pub shoves: usize,
    pub pixels: f64,
}

impl Session {
    pub fn new(config: &Config) -> Session {
        let geometry: Rc<dyn Geometry> = Rc::new(config.geometry);
        Session {
            frame: Frame::new(),
            order: config.detectors.clone(),
            moves: MoveDetector::new(MoveLogger::default()),
            rotates: RotateDetector::new(geometry.clone(), RotateLogger::default()),
            shoves: ShoveDetector::new(geometry, ShoveLogger::default()),
            snapshots: 0,
        }
    }

    /// Handles a `Contact` that happened at `time`.
    pub fn update(&mut self, time: u64, contact: &Contact) {
        let snapshot = match self.frame.update(time, contact) {
            Some(s) => s,
            None => return,
        };
        self.snapshots += 1;
        trace!("{:?}", snapshot);

        for kind in &self.order {
            match *kind {
                Kind::Move => self.moves.process(&snapshot),
                Kind::Rotate => self.rotates.process(&snapshot),
                Kind::Shove => self.shoves.process(&snapshot),
            };
        }
    }

    pub fn summary(&self) -> Summary {
        let moves = self.moves.listener();
        let rotates = self.rotates.listener();
        let shoves = self.shoves.listener();
        Summary {
            snapshots: self.snapshots,
            moves: moves.gestures,
            focus: self.moves.handler().focus(),
            rotations: rotates.gestures,
            degrees: rotates.degrees,
            shoves: shoves.gestures,
            pixels: shoves.pixels,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{} snapshots", self.snapshots)?;
        writeln!(f, "{} moves, focus at ({:.1}, {:.1})", self.moves, self.focus.x, self.focus.y)?;
        writeln!(f, "{} rotations, {:.1} degrees in total", self.rotations, self.degrees)?;
        write!(f, "{} shoves, {:.1} pixels in total", self.shoves, self.pixels)
    }
}
