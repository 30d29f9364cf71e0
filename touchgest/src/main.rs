extern crate app_dirs;
#[cfg(feature = "libinput")] #[macro_use] extern crate chan;
#[cfg(feature = "libinput")] extern crate chan_signal;
extern crate clap;
extern crate env_logger;
#[cfg(feature = "libinput")] extern crate input;
#[cfg(feature = "libinput")] extern crate libc;
extern crate libtouchgest;
#[cfg(feature = "libinput")] extern crate libudev_sys;
#[macro_use] extern crate log;
extern crate serde;
#[macro_use] extern crate serde_derive;
extern crate thiserror;
extern crate toml;

use app_dirs::AppInfo;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process;

mod config;
mod error;
#[cfg(feature = "libinput")]
mod libinput;
mod listeners;
mod session;
mod trace;

use config::Config;
use error::Result;
#[cfg(not(feature = "libinput"))]
use error::Error;
use session::Session;

pub const APP_INFO: AppInfo = AppInfo {
    name: "touchgest",
    author: "touchgest",
};

/// Runs a recorded trace through the detectors and prints what they saw.
fn replay(config: &Config, path: &Path) -> Result<()> {
    let contacts = trace::read_trace(path)?;
    info!("replaying {} contacts from {}", contacts.len(), path.display());

    let mut session = Session::new(config);
    for &(time, ref contact) in &contacts {
        session.update(time, contact);
    }
    println!("{}", session.summary());
    Ok(())
}

#[cfg(feature = "libinput")]
fn live(config: &Config) -> Result<()> {
    libinput::run(config)
}

#[cfg(not(feature = "libinput"))]
fn live(_: &Config) -> Result<()> {
    Err(Error::Unsupported("touchgest was built without the libinput feature"))
}

/// Runs multi-touch gesture detectors on recorded traces or on a touchscreen.
#[derive(Debug, Parser)]
#[command(name = "touchgest", version, author)]
struct Cli {
    /// Config file to use instead of touchgest.toml in the user config directory
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, PartialEq, Subcommand)]
enum Commands {
    /// Replay a recorded trace through the detectors
    Replay {
        /// A TOML file of [[contact]] entries
        trace: PathBuf,
    },

    /// Listen to the touchscreen until interrupted
    Live,
}

fn run(cli: Cli) -> Result<()> {
    let config = match cli.config {
        Some(ref path) => config::read_config(path)?,
        None => config::open_config()?,
    };

    match cli.command {
        Commands::Replay { ref trace } => replay(&config, trace),
        Commands::Live => live(&config),
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()) {
        error!("{}", e);
        process::exit(1);
    }
}
