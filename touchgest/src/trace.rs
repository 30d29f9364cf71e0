use libtouchgest::Contact;
use libtouchgest::geom::vec2;
use std::fs;
use std::path::Path;
use toml;

use error::{Error, Result};

/// A recorded touch session: a list of `Contact`s, each with the time (in milliseconds) at
/// which it happened.
///
/// ```toml
/// [[contact]]
/// time = 0
/// kind = "down"
/// slot = 0
/// x = 100.0
/// y = 200.0
///
/// [[contact]]
/// time = 0
/// kind = "frame"
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq)]
struct TraceParsed {
    #[serde(default)]
    contact: Vec<ContactParsed>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
struct ContactParsed {
    time: u64,
    kind: String,
    slot: Option<usize>,
    x: Option<f64>,
    y: Option<f64>,
    pressure: Option<f64>,
}

impl ContactParsed {
    fn to_contact(self, index: usize) -> Result<(u64, Contact)> {
        let err = |message: &str| Error::Trace { index: index, message: message.to_owned() };
        let slot = || self.slot.ok_or_else(|| err("missing slot"));
        let pos = || match (self.x, self.y) {
            (Some(x), Some(y)) => Ok(vec2(x, y)),
            _ => Err(err("missing position")),
        };
        let pressure = self.pressure.unwrap_or(1.0);

        let contact = match self.kind.as_str() {
            "down" => Contact::Down { slot: slot()?, pos: pos()?, pressure: pressure },
            "up" => Contact::Up { slot: slot()? },
            "motion" => Contact::Motion { slot: slot()?, pos: pos()?, pressure: pressure },
            "cancel" => Contact::Cancel,
            "frame" => Contact::Frame,
            other => return Err(err(&format!("unknown kind {:?}", other))),
        };
        Ok((self.time, contact))
    }
}

pub fn parse_trace(contents: &str, path: &Path) -> Result<Vec<(u64, Contact)>> {
    let t: TraceParsed = toml::from_str(contents).map_err(|e| Error::Parse {
        path: path.to_owned(),
        source: e,
    })?;

    let mut ret = Vec::with_capacity(t.contact.len());
    let mut last_time = 0;
    for (i, c) in t.contact.into_iter().enumerate() {
        let (time, contact) = c.to_contact(i)?;
        if time < last_time {
            return Err(Error::Trace {
                index: i,
                message: format!("time went backwards from {} to {}", last_time, time),
            });
        }
        last_time = time;
        ret.push((time, contact));
    }
    Ok(ret)
}

pub fn read_trace(path: &Path) -> Result<Vec<(u64, Contact)>> {
    let contents = fs::read_to_string(path).map_err(|e| Error::Read {
        path: path.to_owned(),
        source: e,
    })?;
    parse_trace(&contents, path)
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use super::*;

    fn parse(s: &str) -> Result<Vec<(u64, Contact)>> {
        parse_trace(s, Path::new("trace.toml"))
    }

    #[test]
    fn all_kinds() {
        let t = parse(r#"
            [[contact]]
            time = 0
            kind = "down"
            slot = 1
            x = 1.0
            y = 2.0
            pressure = 0.5

            [[contact]]
            time = 5
            kind = "motion"
            slot = 1
            x = 3.0
            y = 4.0

            [[contact]]
            time = 5
            kind = "frame"

            [[contact]]
            time = 9
            kind = "up"
            slot = 1

            [[contact]]
            time = 9
            kind = "cancel"
        "#).unwrap();

        assert_eq!(t, vec![
            (0, Contact::Down { slot: 1, pos: vec2(1.0, 2.0), pressure: 0.5 }),
            (5, Contact::Motion { slot: 1, pos: vec2(3.0, 4.0), pressure: 1.0 }),
            (5, Contact::Frame),
            (9, Contact::Up { slot: 1 }),
            (9, Contact::Cancel),
        ]);
    }

    #[test]
    fn empty_trace() {
        assert!(parse("").unwrap().is_empty());
    }

    fn trace_error(s: &str) -> usize {
        match parse(s) {
            Err(Error::Trace { index, .. }) => index,
            other => panic!("expected a trace error, got {:?}", other),
        }
    }

    #[test]
    fn bad_entries() {
        let frame = "[[contact]]\ntime = 0\nkind = \"frame\"\n";
        assert_eq!(trace_error("[[contact]]\ntime = 0\nkind = \"up\"\n"), 0);
        assert_eq!(trace_error(&format!("{}[[contact]]\ntime = 1\nkind = \"down\"\nslot = 0\n", frame)), 1);
        assert_eq!(trace_error("[[contact]]\ntime = 0\nkind = \"wiggle\"\n"), 0);
        assert_eq!(trace_error(&format!("[[contact]]\ntime = 7\nkind = \"frame\"\n{}", frame)), 1);
    }
}
