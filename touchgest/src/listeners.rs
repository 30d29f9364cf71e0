use libtouchgest::{Listener, MoveInfo, RotateInfo, ShoveInfo};

/// Logs every move gesture and counts what it saw.
#[derive(Clone, Debug, Default)]
pub struct MoveLogger {
    pub gestures: usize,
    pub updates: usize,
}

impl Listener<MoveInfo> for MoveLogger {
    fn begin(&mut self, info: &MoveInfo) -> bool {
        self.gestures += 1;
        info!("move began with {} fingers", info.pointer_count);
        true
    }

    fn update(&mut self, info: &MoveInfo) -> bool {
        self.updates += 1;
        debug!("move by ({:.1}, {:.1}) over {}ms", info.focus_delta.x, info.focus_delta.y, info.time_delta);
        true
    }

    fn end(&mut self, info: &MoveInfo) {
        info!("move ended, focus at ({:.1}, {:.1})", info.focus.x, info.focus.y);
    }
}

/// Logs every rotation and adds up the angles.
#[derive(Clone, Debug, Default)]
pub struct RotateLogger {
    pub gestures: usize,
    pub degrees: f64,
}

impl Listener<RotateInfo> for RotateLogger {
    fn begin(&mut self, _: &RotateInfo) -> bool {
        self.gestures += 1;
        info!("rotate began");
        true
    }

    fn update(&mut self, info: &RotateInfo) -> bool {
        self.degrees += info.rotation_delta;
        debug!("rotate by {:.2} degrees", info.rotation_delta);
        true
    }

    fn end(&mut self, _: &RotateInfo) {
        info!("rotate ended, {:.1} degrees so far", self.degrees);
    }
}

/// Logs every shove and adds up the distances.
#[derive(Clone, Debug, Default)]
pub struct ShoveLogger {
    pub gestures: usize,
    pub pixels: f64,
}

impl Listener<ShoveInfo> for ShoveLogger {
    fn begin(&mut self, _: &ShoveInfo) -> bool {
        self.gestures += 1;
        info!("shove began");
        true
    }

    fn update(&mut self, info: &ShoveInfo) -> bool {
        self.pixels += info.shove_delta;
        debug!("shove by {:.1} pixels", info.shove_delta);
        true
    }

    fn end(&mut self, _: &ShoveInfo) {
        info!("shove ended, {:.1} pixels so far", self.pixels);
    }
}
