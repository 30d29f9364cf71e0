use chan;
use chan_signal::{self, Signal};
use input;
use input::Libinput;
use input::event::Event;
use input::event::touch::{TouchEvent, TouchEventPosition, TouchEventSlot};
use libc::{self, c_char, c_int, c_void};
use libtouchgest::{Contact, Geometry};
use libtouchgest::geom::vec2;
use libudev_sys;
use std::thread;
use std::time::Instant;

use config::Config;
use error::{Error, Result};
use session::Session;

const SEAT: &'static str = "seat0";

unsafe extern "C"
fn open_restricted(path: *const c_char, flags: c_int, _: *mut c_void) -> c_int {
    libc::open(path, flags)
}

unsafe extern "C"
fn close_restricted(fd: c_int, _: *mut c_void) {
    libc::close(fd);
}

static INTERFACE: input::LibinputInterface = input::LibinputInterface {
    open_restricted: Some(open_restricted),
    close_restricted: Some(close_restricted),
};

/// The touch devices on one seat, with positions scaled to the configured display.
struct Touchscreen {
    libinput: Libinput,
    width: u32,
    height: u32,
    start: Instant,
}

impl Touchscreen {
    fn open(config: &Config) -> Result<Touchscreen> {
        let libinput = unsafe {
            let udev = libudev_sys::udev_new();
            if udev.is_null() {
                return Err(Error::Device);
            }
            // libinput crashes on exit without some userdata.
            let mut li = Libinput::new_from_udev::<()>(INTERFACE, Some(()), udev as *mut c_void);
            let assigned = li.udev_assign_seat(SEAT);
            libudev_sys::udev_unref(udev);
            assigned.map_err(|_| Error::Device)?;
            li
        };
        info!("listening on {}", SEAT);

        let size = config.geometry.surface_size();
        Ok(Touchscreen {
            libinput: libinput,
            width: size.width as u32,
            height: size.height as u32,
            start: Instant::now(),
        })
    }

    /// Fires whenever libinput has something for us. The watching thread lives as long as the
    /// process.
    fn readiness(&self) -> chan::Receiver<()> {
        let mut pollfd = libc::pollfd {
            fd: unsafe { self.libinput.fd() },
            events: libc::POLLIN,
            revents: 0,
        };
        let (send, recv) = chan::sync(0);
        thread::spawn(move || {
            while unsafe { libc::poll(&mut pollfd, 1, -1) } >= 0 {
                send.send(());
            }
        });
        recv
    }

    /// Milliseconds since the touchscreen was opened.
    fn now(&self) -> u64 {
        let elapsed = self.start.elapsed();
        elapsed.as_secs() * 1000 + u64::from(elapsed.subsec_millis())
    }

    /// Reads everything that is pending, keeping only the touch events.
    fn contacts(&mut self) -> Result<Vec<(u64, Contact)>> {
        self.libinput.dispatch().map_err(Error::Dispatch)?;
        let mut ret = vec![];
        while let Some(event) = self.libinput.next() {
            match event {
                Event::Touch(ev) => {
                    let time = self.now();
                    ret.push((time, self.contact(&ev)));
                },
                other => trace!("ignoring {:?}", other),
            }
        }
        Ok(ret)
    }

    fn contact(&self, ev: &TouchEvent) -> Contact {
        let slot = |s: Option<u32>| s.unwrap_or(0) as usize;
        match *ev {
            TouchEvent::Down(ref ev) => Contact::Down {
                slot: slot(ev.slot()),
                pos: vec2(ev.x_transformed(self.width), ev.y_transformed(self.height)),
                pressure: 1.0,
            },
            TouchEvent::Up(ref ev) => Contact::Up { slot: slot(ev.slot()) },
            TouchEvent::Motion(ref ev) => Contact::Motion {
                slot: slot(ev.slot()),
                pos: vec2(ev.x_transformed(self.width), ev.y_transformed(self.height)),
                pressure: 1.0,
            },
            TouchEvent::Cancel(_) => Contact::Cancel,
            TouchEvent::Frame(_) => Contact::Frame,
        }
    }
}

/// Runs the configured detectors on the touchscreen until interrupted.
pub fn run(config: &Config) -> Result<()> {
    let signal = chan_signal::notify(&[Signal::INT, Signal::TERM]);
    let mut screen = Touchscreen::open(config)?;
    let mut session = Session::new(config);

    // Anything already queued is from before we started listening.
    let stale = screen.contacts()?;
    debug!("dropped {} stale contacts", stale.len());

    let ready = screen.readiness();
    loop {
        chan_select! {
            ready.recv() => {
                for (time, c) in screen.contacts()? {
                    session.update(time, &c);
                }
            },
            signal.recv() -> _ => {
                break;
            },
        }
    }

    println!("{}", session.summary());
    Ok(())
}
