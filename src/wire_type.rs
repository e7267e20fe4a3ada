use std::fmt;

use crate::value::Value;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireType {
    Bool,
    UByte,
    Byte,
    UShort,
    Short,
    UInt,
    Int,
    ULong,
    Long,
    Float,
    Double,
}

pub const CODE_TRUE:   u8 = 0x41;
pub const CODE_FALSE:  u8 = 0x42;
pub const CODE_UBYTE:  u8 = 0x50;
pub const CODE_BYTE:   u8 = 0x51;
pub const CODE_USHORT: u8 = 0x60;
pub const CODE_SHORT:  u8 = 0x61;
pub const CODE_UINT:   u8 = 0x70;
pub const CODE_INT:    u8 = 0x71;
pub const CODE_FLOAT:  u8 = 0x72;
pub const CODE_ULONG:  u8 = 0x80;
pub const CODE_LONG:   u8 = 0x81;
pub const CODE_DOUBLE: u8 = 0x82;

pub const ALL_WIRE_TYPES: [WireType; 11] = [
    WireType::Bool,
    WireType::UByte,  WireType::Byte,
    WireType::UShort, WireType::Short,
    WireType::UInt,   WireType::Int,
    WireType::ULong,  WireType::Long,
    WireType::Float,  WireType::Double,
];


impl WireType {
    pub fn from_code(code: u8) -> Option<WireType> {
        use WireType::*;
        Some(match code {
            CODE_TRUE | CODE_FALSE => Bool,
            CODE_UBYTE  => UByte,
            CODE_BYTE   => Byte,
            CODE_USHORT => UShort,
            CODE_SHORT  => Short,
            CODE_UINT   => UInt,
            CODE_INT    => Int,
            CODE_FLOAT  => Float,
            CODE_ULONG  => ULong,
            CODE_LONG   => Long,
            CODE_DOUBLE => Double,
            _ => return None,
        })
    }

    /// Every code that resolves to this type. Only `Bool` has two, one per
    /// value, since booleans carry no payload.
    pub fn codes(self) -> &'static [u8] {
        use WireType::*;
        match self {
            Bool   => &[CODE_TRUE, CODE_FALSE],
            UByte  => &[CODE_UBYTE],
            Byte   => &[CODE_BYTE],
            UShort => &[CODE_USHORT],
            Short  => &[CODE_SHORT],
            UInt   => &[CODE_UINT],
            Int    => &[CODE_INT],
            Float  => &[CODE_FLOAT],
            ULong  => &[CODE_ULONG],
            Long   => &[CODE_LONG],
            Double => &[CODE_DOUBLE],
        }
    }

    /// The code written for this type. `flag` picks between the two boolean
    /// codes and is ignored for everything else.
    pub fn code(self, flag: bool) -> u8 {
        match self {
            WireType::Bool if !flag => CODE_FALSE,
            ty => ty.codes()[0],
        }
    }

    /// Payload bytes following the type code.
    pub fn width(self) -> usize {
        use WireType::*;
        match self {
            Bool                  => 0,
            UByte  | Byte         => 1,
            UShort | Short        => 2,
            UInt   | Int  | Float => 4,
            ULong  | Long | Double => 8,
        }
    }

    pub fn name(self) -> &'static str {
        use WireType::*;
        match self {
            Bool   => "boolean",
            UByte  => "ubyte",
            Byte   => "byte",
            UShort => "ushort",
            Short  => "short",
            UInt   => "uint",
            Int    => "int",
            ULong  => "ulong",
            Long   => "long",
            Float  => "float",
            Double => "double",
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}



/// A Rust scalar with a wire type of its own.
///
/// Encoder and decoder both go through `write_payload`/`read_payload`, so the
/// byte layout of each type is defined once. `from_exact` only accepts a
/// `Value` whose tag is `WIRE_TYPE`; widening lives in `FromValue`.
pub trait Primitive: Copy + Into<Value> {
    const WIRE_TYPE: WireType;

    fn type_code(self) -> u8 {
        Self::WIRE_TYPE.code(false)
    }

    /// Appends exactly `WIRE_TYPE.width()` bytes.
    fn write_payload(self, dest: &mut Vec<u8>);

    /// `payload` is exactly `WIRE_TYPE.width()` bytes.
    fn read_payload(code: u8, payload: &[u8]) -> Self;

    fn from_exact(value: &Value) -> Option<Self>;

    fn into_value(self) -> Value {
        self.into()
    }
}



#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_a_bijection() {
        let mut seen = std::collections::HashSet::new();
        for ty in ALL_WIRE_TYPES {
            for &code in ty.codes() {
                assert!(seen.insert(code), "duplicate code 0x{code:02x}");
                assert_eq!(WireType::from_code(code), Some(ty));
            }
        }
        assert_eq!(seen.len(), 12);
    }

    #[test]
    fn unknown_codes() {
        // null, smalluint, uint0 and friends are not part of the scalar set.
        for code in [0x00, 0x40, 0x43, 0x52, 0x53, 0x54, 0x55, 0x56, 0xa1, 0xff] {
            assert_eq!(WireType::from_code(code), None);
        }
    }

    #[test]
    fn code_picks_boolean_by_flag() {
        assert_eq!(WireType::Bool.code(true), CODE_TRUE);
        assert_eq!(WireType::Bool.code(false), CODE_FALSE);
        for ty in ALL_WIRE_TYPES {
            assert_eq!(WireType::from_code(ty.code(true)), Some(ty));
            assert_eq!(WireType::from_code(ty.code(false)), Some(ty));
        }
        assert_eq!(WireType::Long.code(true), CODE_LONG);
    }

    #[test]
    fn widths() {
        assert_eq!(WireType::Bool.width(), 0);
        assert_eq!(WireType::Byte.width(), 1);
        assert_eq!(WireType::UShort.width(), 2);
        assert_eq!(WireType::Float.width(), 4);
        assert_eq!(WireType::Int.width(), 4);
        assert_eq!(WireType::Double.width(), 8);
        assert_eq!(WireType::ULong.width(), 8);
    }
}
