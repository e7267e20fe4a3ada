use std::fmt;

use byteorder::{BigEndian, ByteOrder};

use crate::error::{DecodeError, Result};
use crate::wire_type::{Primitive, WireType, CODE_TRUE};


/// A single scalar tagged with its wire type.
///
/// `Empty` is what a default-constructed value holds; it has no wire form and
/// every conversion out of it fails.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Value {
    #[default]
    Empty,
    Bool   (bool),
    UByte  (u8),
    Byte   (i8),
    UShort (u16),
    Short  (i16),
    UInt   (u32),
    Int    (i32),
    ULong  (u64),
    Long   (i64),
    Float  (f32),
    Double (f64),
}

impl Value {
    pub fn wire_type(&self) -> Option<WireType> {
        Some(match self {
            Value::Empty      => return None,
            Value::Bool   (_) => WireType::Bool,
            Value::UByte  (_) => WireType::UByte,
            Value::Byte   (_) => WireType::Byte,
            Value::UShort (_) => WireType::UShort,
            Value::Short  (_) => WireType::Short,
            Value::UInt   (_) => WireType::UInt,
            Value::Int    (_) => WireType::Int,
            Value::ULong  (_) => WireType::ULong,
            Value::Long   (_) => WireType::Long,
            Value::Float  (_) => WireType::Float,
            Value::Double (_) => WireType::Double,
        })
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    pub fn type_name(&self) -> &'static str {
        self.wire_type().map(WireType::name).unwrap_or("empty")
    }

    /// Replaces both tag and payload.
    pub fn set<T: Into<Value>>(&mut self, value: T) -> &mut Value {
        *self = value.into();
        self
    }

    pub fn get<T: FromValue>(&self) -> Result<T> {
        T::from_value(self).ok_or(DecodeError::Conversion {
            from: self.type_name(),
            to:   T::NAME,
        })
    }

    /// Like `get`, but only for the value's own wire type.
    pub fn get_exact<T: Primitive>(&self) -> Result<T> {
        match self.wire_type() {
            Some(found) if found != T::WIRE_TYPE => {
                Err(DecodeError::TypeMismatch { expected: T::WIRE_TYPE, found })
            },
            _ => {
                T::from_exact(self).ok_or(DecodeError::Conversion {
                    from: self.type_name(),
                    to:   T::WIRE_TYPE.name(),
                })
            },
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty      => f.write_str("<empty>"),
            Value::Bool   (v) => write!(f, "{}", v),
            Value::UByte  (v) => write!(f, "{}", v),
            Value::Byte   (v) => write!(f, "{}", v),
            Value::UShort (v) => write!(f, "{}", v),
            Value::Short  (v) => write!(f, "{}", v),
            Value::UInt   (v) => write!(f, "{}", v),
            Value::Int    (v) => write!(f, "{}", v),
            Value::ULong  (v) => write!(f, "{}", v),
            Value::Long   (v) => write!(f, "{}", v),
            Value::Float  (v) => write_float(f, *v, v.abs() as f64),
            Value::Double (v) => write_float(f, *v, v.abs()),
        }
    }
}

// shortest round-trip digits, switching to exponent form outside
// [1e-5, 1e16) so huge and tiny magnitudes stay short.
fn write_float<T: fmt::Display + fmt::LowerExp>(f: &mut fmt::Formatter<'_>, v: T, abs: f64) -> fmt::Result {
    if abs != 0.0 && abs.is_finite() && !(1e-5..1e16).contains(&abs) {
        write!(f, "{:e}", v)
    }
    else {
        write!(f, "{}", v)
    }
}



macro_rules! primitive {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for Value {
            fn from(value: $ty) -> Value {
                Value::$variant(value)
            }
        }
    };

    ($ty:ty, $variant:ident, $read:ident, $write:ident) => {
        primitive!($ty, $variant);

        impl Primitive for $ty {
            const WIRE_TYPE: WireType = WireType::$variant;

            fn write_payload(self, dest: &mut Vec<u8>) {
                let mut buf = [0u8; std::mem::size_of::<$ty>()];
                BigEndian::$write(&mut buf, self);
                dest.extend_from_slice(&buf);
            }

            fn read_payload(_code: u8, payload: &[u8]) -> $ty {
                BigEndian::$read(payload)
            }

            fn from_exact(value: &Value) -> Option<$ty> {
                match value {
                    Value::$variant(v) => Some(*v),
                    _ => None,
                }
            }
        }
    };
}

primitive!(bool, Bool);
primitive!(u8,   UByte);
primitive!(i8,   Byte);
primitive!(u16,  UShort, read_u16, write_u16);
primitive!(i16,  Short,  read_i16, write_i16);
primitive!(u32,  UInt,   read_u32, write_u32);
primitive!(i32,  Int,    read_i32, write_i32);
primitive!(u64,  ULong,  read_u64, write_u64);
primitive!(i64,  Long,   read_i64, write_i64);
primitive!(f32,  Float,  read_f32, write_f32);
primitive!(f64,  Double, read_f64, write_f64);

// the value lives in the code.
impl Primitive for bool {
    const WIRE_TYPE: WireType = WireType::Bool;

    fn type_code(self) -> u8 {
        WireType::Bool.code(self)
    }

    fn write_payload(self, _dest: &mut Vec<u8>) {}

    fn read_payload(code: u8, _payload: &[u8]) -> bool {
        code == CODE_TRUE
    }

    fn from_exact(value: &Value) -> Option<bool> {
        match *value {
            Value::Bool(v) => Some(v),
            _ => None,
        }
    }
}

impl Primitive for u8 {
    const WIRE_TYPE: WireType = WireType::UByte;

    fn write_payload(self, dest: &mut Vec<u8>) {
        dest.push(self);
    }

    fn read_payload(_code: u8, payload: &[u8]) -> u8 {
        payload[0]
    }

    fn from_exact(value: &Value) -> Option<u8> {
        match *value {
            Value::UByte(v) => Some(v),
            _ => None,
        }
    }
}

impl Primitive for i8 {
    const WIRE_TYPE: WireType = WireType::Byte;

    fn write_payload(self, dest: &mut Vec<u8>) {
        dest.extend_from_slice(&self.to_be_bytes());
    }

    fn read_payload(_code: u8, payload: &[u8]) -> i8 {
        i8::from_be_bytes([payload[0]])
    }

    fn from_exact(value: &Value) -> Option<i8> {
        match *value {
            Value::Byte(v) => Some(v),
            _ => None,
        }
    }
}



/// Target of a `Value` conversion.
///
/// Integers only widen where no source value can be lost (the pairs std
/// implements `From` for). Float and double convert both ways.
pub trait FromValue: Sized {
    const NAME: &'static str;

    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! from_value {
    ($ty:ty, $name:literal, [$($variant:ident),*]) => {
        impl FromValue for $ty {
            const NAME: &'static str = $name;

            fn from_value(value: &Value) -> Option<$ty> {
                match *value {
                    $( Value::$variant(v) => Some(<$ty>::from(v)), )*
                    _ => None,
                }
            }
        }

        impl TryFrom<&Value> for $ty {
            type Error = DecodeError;

            fn try_from(value: &Value) -> Result<$ty> {
                value.get()
            }
        }

        impl TryFrom<Value> for $ty {
            type Error = DecodeError;

            fn try_from(value: Value) -> Result<$ty> {
                value.get()
            }
        }
    };
}

from_value!(bool, "boolean", [Bool]);
from_value!(u8,   "ubyte",   [UByte]);
from_value!(u16,  "ushort",  [UByte, UShort]);
from_value!(u32,  "uint",    [UByte, UShort, UInt]);
from_value!(u64,  "ulong",   [UByte, UShort, UInt, ULong]);
from_value!(i8,   "byte",    [Byte]);
from_value!(i16,  "short",   [UByte, Byte, Short]);
from_value!(i32,  "int",     [UByte, UShort, Byte, Short, Int]);
from_value!(i64,  "long",    [UByte, UShort, UInt, Byte, Short, Int, Long]);
from_value!(f64,  "double",  [Float, Double]);

impl FromValue for f32 {
    const NAME: &'static str = "float";

    fn from_value(value: &Value) -> Option<f32> {
        match *value {
            Value::Float  (v) => Some(v),
            Value::Double (v) => Some(v as f32),
            _ => None,
        }
    }
}

impl TryFrom<&Value> for f32 {
    type Error = DecodeError;

    fn try_from(value: &Value) -> Result<f32> {
        value.get()
    }
}

impl TryFrom<Value> for f32 {
    type Error = DecodeError;

    fn try_from(value: Value) -> Result<f32> {
        value.get()
    }
}



#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions() {
        let mut v = Value::default();
        assert_eq!(v.set(true).get::<bool>(), Ok(true));
        assert_eq!(v.set(2i8).get::<i32>(), Ok(2));
        assert_eq!(v.set(3i8).get::<i64>(), Ok(3));
        assert_eq!(v.set(1.0f32).get::<f64>(), Ok(1.0));
        assert_eq!(v.set(1.0f64).get::<f32>(), Ok(1.0));

        assert!(v.set(1i8).get::<bool>().is_err());
        assert!(v.set(true).get::<f32>().is_err());
    }

    #[test]
    fn conversion_error_names_both_sides() {
        let v = Value::Byte(1);
        assert_eq!(v.get::<bool>(), Err(DecodeError::Conversion { from: "byte", to: "boolean" }));
    }

    #[test]
    fn empty_never_converts() {
        let v = Value::default();
        assert!(v.is_empty());
        assert_eq!(v.wire_type(), None);
        assert!(v.get::<bool>().is_err());
        assert!(v.get::<i64>().is_err());
        assert!(v.get::<f64>().is_err());
        assert!(v.get_exact::<u8>().is_err());
    }

    #[test]
    fn integers_widen_without_loss() {
        assert_eq!(Value::UByte(200).get::<u16>(), Ok(200));
        assert_eq!(Value::UByte(200).get::<i16>(), Ok(200));
        assert_eq!(Value::UShort(42).get::<u64>(), Ok(42));
        assert_eq!(Value::UInt(12345).get::<i64>(), Ok(12345));
        assert_eq!(Value::Short(-42).get::<i32>(), Ok(-42));
        assert_eq!(Value::Int(-12345).get::<i64>(), Ok(-12345));
    }

    #[test]
    fn integers_do_not_narrow_or_lose_sign() {
        assert!(Value::UShort(42).get::<u8>().is_err());
        assert!(Value::Long(1).get::<i32>().is_err());
        assert!(Value::Byte(-1).get::<u16>().is_err());
        assert!(Value::UShort(42).get::<i16>().is_err());
        assert!(Value::ULong(1).get::<i64>().is_err());
        assert!(Value::Int(1).get::<bool>().is_err());
        assert!(Value::Int(1).get::<f64>().is_err());
        assert!(Value::Double(1.0).get::<i64>().is_err());
    }

    #[test]
    fn get_does_not_change_tag() {
        let v = Value::Byte(7);
        let _ = v.get::<i64>();
        let _ = v.get::<bool>();
        assert_eq!(v, Value::Byte(7));
    }

    #[test]
    fn get_exact() {
        assert_eq!(Value::UByte(42).get_exact::<u8>(), Ok(42));
        assert_eq!(
            Value::UByte(42).get_exact::<u16>(),
            Err(DecodeError::TypeMismatch { expected: WireType::UShort, found: WireType::UByte }),
        );
    }

    #[test]
    fn try_from() {
        let v = Value::from(-42i16);
        assert_eq!(i64::try_from(&v), Ok(-42));
        assert!(u8::try_from(v).is_err());
        assert_eq!(f32::try_from(Value::Double(0.125)), Ok(0.125));
    }

    #[test]
    fn display() {
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::Short(-42).to_string(), "-42");
        assert_eq!(Value::ULong(12345).to_string(), "12345");
        assert_eq!(Value::Float(0.125).to_string(), "0.125");
        assert_eq!(Value::Double(1.0).to_string(), "1");
        assert_eq!(Value::Empty.to_string(), "<empty>");
    }

    #[test]
    fn display_extreme_magnitudes() {
        assert_eq!(Value::Double(1e300).to_string(), "1e300");
        assert_eq!(Value::Float(1e-10).to_string(), "1e-10");
        assert_eq!(Value::Double(-2.5e-7).to_string(), "-2.5e-7");
        assert_eq!(Value::Float(f32::MAX).to_string(), "3.4028235e38");
        assert_eq!(Value::Double(1e15).to_string(), "1000000000000000");
        assert_eq!(Value::Double(0.0).to_string(), "0");
        assert_eq!(Value::Double(f64::INFINITY).to_string(), "inf");
    }

    #[test]
    fn payload_widths_match_wire_types() {
        fn check<T: Primitive>(v: T) {
            let mut buf = vec![];
            v.write_payload(&mut buf);
            assert_eq!(buf.len(), T::WIRE_TYPE.width(), "{}", T::WIRE_TYPE);
            assert_eq!(WireType::from_code(v.type_code()), Some(T::WIRE_TYPE));
            assert_eq!(T::read_payload(v.type_code(), &buf).into_value(), v.into_value());
        }
        check(true);
        check(false);
        check(200u8);
        check(-2i8);
        check(0xbeefu16);
        check(-42i16);
        check(0xdead_beefu32);
        check(-12345i32);
        check(u64::MAX);
        check(i64::MIN);
        check(0.125f32);
        check(-1e300f64);
    }

    #[test]
    fn payloads_are_big_endian() {
        let mut buf = vec![];
        0x0102u16.write_payload(&mut buf);
        (-2i32).write_payload(&mut buf);
        assert_eq!(buf, [0x01, 0x02, 0xff, 0xff, 0xff, 0xfe]);
        assert_eq!(true.type_code(), CODE_TRUE);
        assert!(!bool::read_payload(crate::wire_type::CODE_FALSE, &[]));
    }
}
