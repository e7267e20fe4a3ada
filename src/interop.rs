//! Interop checks against the shared `primitives` fixture.
//!
//! Each check loads what it needs from a `FixtureDir` and either passes, fails
//! an assertion, or errors out on I/O or decoding.

use std::fmt;

use tracing::info;

use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::DecodeError;
use crate::fixtures::{FixtureDir, FixtureError};
use crate::value::Value;


pub const PRIMITIVES: &str = "primitives";
pub const PRIMITIVES_TEXT: &str = "true, false, 42, 42, -42, 12345, -12345, 12345, -12345, 0.125, 0.125";


#[derive(thiserror::Error, Debug)]
pub enum CheckError {
    #[error("{0}")]
    Fail(String),

    #[error(transparent)]
    Fixture(#[from] FixtureError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl CheckError {
    pub fn is_failure(&self) -> bool {
        matches!(self, CheckError::Fail(_))
    }
}

macro_rules! fail {
    ($($arg:tt)*) => {
        return Err(CheckError::Fail(format!("{}:{}: {}", file!(), line!(), format!($($arg)*))))
    };
}

macro_rules! check {
    ($test:expr) => {
        if !($test) { fail!("assert failed: {}", stringify!($test)); }
    };
}

macro_rules! check_eq {
    ($want:expr, $got:expr) => {{
        let (want, got) = (&$want, &$got);
        if !(*want == *got) {
            fail!("{} != {}: {:?} != {:?}", stringify!($want), stringify!($got), want, got);
        }
    }};
}

macro_rules! check_err {
    ($attempt:expr, $what:literal) => {
        if $attempt.is_ok() { fail!($what); }
    };
}


pub type Check = fn(&FixtureDir) -> Result<(), CheckError>;

pub const CHECKS: &[(&str, Check)] = &[
    ("stream_display",          stream_display as Check),
    ("decode_primitives_exact", decode_primitives_exact as Check),
    ("encode_primitives",       encode_primitives as Check),
    ("value_conversions",       value_conversions as Check),
];


pub fn primitives_encoder() -> Encoder {
    let mut e = Encoder::new();
    e.insert(true).insert(false);
    e.insert(42u8);
    e.insert(42u16).insert(-42i16);
    e.insert(12345u32).insert(-12345i32);
    e.insert(12345u64).insert(-12345i64);
    e.insert(0.125f32).insert(0.125f64);
    e
}

pub fn stream_display(dir: &FixtureDir) -> Result<(), CheckError> {
    let d = Decoder::new(dir.read(PRIMITIVES)?);
    check_eq!(PRIMITIVES_TEXT, d.to_string());
    Ok(())
}

pub fn decode_primitives_exact(dir: &FixtureDir) -> Result<(), CheckError> {
    let mut d = Decoder::new(dir.read(PRIMITIVES)?);
    check!(d.more());
    check_err!(d.extract::<i8>(), "got bool as byte");
    check_eq!(true, d.extract::<bool>()?);
    check_eq!(false, d.extract::<bool>()?);
    check_err!(d.extract::<i8>(), "got ubyte as byte");
    check_eq!(42, d.extract::<u8>()?);
    check_err!(d.extract::<i32>(), "got ushort as int");
    check_eq!(42, d.extract::<u16>()?);
    check_err!(d.extract::<u16>(), "got short as ushort");
    check_eq!(-42, d.extract::<i16>()?);
    check_eq!(12345, d.extract::<u32>()?);
    check_eq!(-12345, d.extract::<i32>()?);
    check_eq!(12345, d.extract::<u64>()?);
    check_eq!(-12345, d.extract::<i64>()?);
    check_err!(d.extract::<f64>(), "got float as double");
    check_eq!(0.125, d.extract::<f32>()?);
    check_err!(d.extract::<f32>(), "got double as float");
    check_eq!(0.125, d.extract::<f64>()?);
    check!(!d.more());
    Ok(())
}

pub fn encode_primitives(dir: &FixtureDir) -> Result<(), CheckError> {
    let e = primitives_encoder();
    check_eq!(PRIMITIVES_TEXT, e.to_string());
    let data = e.encode();
    check_eq!(dir.read(PRIMITIVES)?, data);
    Ok(())
}

pub fn value_conversions(_dir: &FixtureDir) -> Result<(), CheckError> {
    let mut v = Value::default();
    check_eq!(true, v.set(true).get::<bool>()?);
    check_eq!(2, v.set(2i8).get::<i32>()?);
    check_eq!(3, v.set(3i8).get::<i64>()?);
    check_eq!(1.0, v.set(1.0f32).get::<f64>()?);
    check_eq!(1.0, v.set(1.0f64).get::<f32>()?);
    check_err!(v.set(1i8).get::<bool>(), "got byte as bool");
    check_err!(v.set(true).get::<f32>(), "got bool as float");
    Ok(())
}



pub struct Outcome {
    pub name:   &'static str,
    pub result: Result<(), CheckError>,
}

impl Outcome {
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.result {
            Ok(())                     => write!(f, "PASS {}", self.name),
            Err(e) if e.is_failure()   => write!(f, "FAIL {}\n{}", self.name, e),
            Err(e)                     => write!(f, "ERROR {}\n{}", self.name, e),
        }
    }
}

/// Runs every check, or just the one called `only`.
pub fn run(dir: &FixtureDir, only: Option<&str>) -> Vec<Outcome> {
    CHECKS.iter()
        .filter(|(name, _)| only.map_or(true, |only| only == *name))
        .map(|&(name, check)| {
            let result = check(dir);
            info!(check = name, passed = result.is_ok(), "interop check");
            Outcome { name, result }
        })
        .collect()
}

pub fn failures(outcomes: &[Outcome]) -> usize {
    outcomes.iter().filter(|outcome| !outcome.passed()).count()
}
