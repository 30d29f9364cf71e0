use app_dirs::{get_app_root, AppDataType};
use libtouchgest::FixedGeometry;
use libtouchgest::geom::DEFAULT_EDGE_SLOP;
use std::fs;
use std::path::Path;
use toml;

use APP_INFO;
use error::{Error, Result};

/// The gestures that we know how to detect.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Kind {
    Move,
    Rotate,
    Shove,
}

fn parse_kind(s: &str) -> Option<Kind> {
    match s.trim() {
        "move" => Some(Kind::Move),
        "rotate" => Some(Kind::Rotate),
        "shove" => Some(Kind::Shove),
        _ => None,
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
struct ConfigParsed {
    display: Option<DisplayParsed>,
    detectors: Option<Vec<String>>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
struct DisplayParsed {
    width: f64,
    height: f64,
    edge_slop: Option<f64>,
}

impl DisplayParsed {
    fn to_geometry(self) -> Result<FixedGeometry> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(Error::Config(format!("bad display size {}x{}", self.width, self.height)));
        }
        let edge_slop = self.edge_slop.unwrap_or(DEFAULT_EDGE_SLOP);
        if !(edge_slop >= 0.0) {
            return Err(Error::Config(format!("bad edge slop {}", edge_slop)));
        }
        Ok(FixedGeometry::new(self.width, self.height, edge_slop))
    }
}

impl ConfigParsed {
    fn to_config(self) -> Result<Config> {
        let mut ret = Config::default();

        if let Some(display) = self.display {
            ret.geometry = display.to_geometry()?;
        }

        if let Some(names) = self.detectors {
            ret.detectors.clear();
            for name in names {
                let kind = parse_kind(&name)
                    .ok_or_else(|| Error::Config(format!("unknown detector {:?}", name)))?;
                if ret.detectors.contains(&kind) {
                    return Err(Error::Config(format!("duplicate detector {:?}", name)));
                }
                ret.detectors.push(kind);
            }
        }

        Ok(ret)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub geometry: FixedGeometry,
    /// Which detectors to run, in the order in which they see each snapshot.
    pub detectors: Vec<Kind>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            geometry: FixedGeometry::new(1080.0, 1920.0, DEFAULT_EDGE_SLOP),
            detectors: vec![Kind::Move, Kind::Rotate, Kind::Shove],
        }
    }
}

pub fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let c: ConfigParsed = toml::from_str(contents).map_err(|e| Error::Parse {
        path: path.to_owned(),
        source: e,
    })?;
    c.to_config()
}

/// Reads the config file at `path`, which must exist.
pub fn read_config(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path).map_err(|e| Error::Read {
        path: path.to_owned(),
        source: e,
    })?;
    let config = parse_config(&contents, path)?;
    debug!("loaded config {:?}", config);
    Ok(config)
}

/// Reads `touchgest.toml` from the user's config directory.
///
/// If there is no such file, returns the default config.
pub fn open_config() -> Result<Config> {
    let mut file_name = get_app_root(AppDataType::UserConfig, &APP_INFO)
        .map_err(|e| Error::ConfigDir(format!("{:?}", e)))?;
    file_name.push("touchgest.toml");

    if !file_name.exists() {
        info!("no config file at {}, using defaults", file_name.display());
        return Ok(Config::default());
    }
    read_config(&file_name)
}
