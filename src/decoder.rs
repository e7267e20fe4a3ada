use std::fmt;

use tracing::{debug, trace};

use crate::error::{DecodeError, Result};
use crate::reader::Reader;
use crate::value::{FromValue, Value};
use crate::wire_type::*;


/// Decodes the record at `position`.
///
/// Returns the value and the offset just past it. Never panics on malformed
/// input; the caller decides whether to move to the returned offset.
pub fn decode_at(buffer: &[u8], position: usize) -> Result<(Value, usize)> {
    let mut reader = Reader::at(buffer, position);
    let code = *reader.next().ok_or(DecodeError::EndOfStream { position })?;
    let wire_type = WireType::from_code(code).ok_or(DecodeError::UnknownTypeCode(code))?;

    let value = match decode_payload(code, wire_type, &mut reader) {
        Some(value) => value,
        None => {
            return Err(DecodeError::Truncated {
                wire_type,
                need: wire_type.width(),
                have: reader.remaining(),
            });
        },
    };

    Ok((value, reader.cursor))
}

fn decode_payload(code: u8, ty: WireType, reader: &mut Reader<u8>) -> Option<Value> {
    use WireType::*;
    match ty {
        Bool   => read_record::<bool>(code, reader),
        UByte  => read_record::<u8>(code, reader),
        Byte   => read_record::<i8>(code, reader),
        UShort => read_record::<u16>(code, reader),
        Short  => read_record::<i16>(code, reader),
        UInt   => read_record::<u32>(code, reader),
        Int    => read_record::<i32>(code, reader),
        ULong  => read_record::<u64>(code, reader),
        Long   => read_record::<i64>(code, reader),
        Float  => read_record::<f32>(code, reader),
        Double => read_record::<f64>(code, reader),
    }
}

fn read_record<T: Primitive>(code: u8, reader: &mut Reader<u8>) -> Option<Value> {
    let payload = reader.next_n(T::WIRE_TYPE.width())?;
    Some(T::read_payload(code, payload).into_value())
}



/// A read cursor over an encoded value stream.
///
/// Every extraction either succeeds and moves past exactly one record, or
/// fails and leaves the cursor where it was.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoder {
    buffer: Vec<u8>,
    cursor: usize,
}

impl Decoder {
    pub fn new(buffer: impl Into<Vec<u8>>) -> Decoder {
        Decoder { buffer: buffer.into(), cursor: 0 }
    }

    pub fn more(&self) -> bool {
        self.cursor < self.buffer.len()
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.cursor
    }

    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }

    pub fn peek_type(&self) -> Result<WireType> {
        let code = *self.buffer.get(self.cursor)
            .ok_or(DecodeError::EndOfStream { position: self.cursor })?;
        WireType::from_code(code).ok_or(DecodeError::UnknownTypeCode(code))
    }

    pub fn peek_value(&self) -> Result<Value> {
        decode_at(&self.buffer, self.cursor).map(|(value, _)| value)
    }

    /// Extracts the next record only if its wire type is exactly `T`'s.
    pub fn extract<T: Primitive>(&mut self) -> Result<T> {
        let expected = T::WIRE_TYPE;
        let found = self.peek_type()?;
        if found != expected {
            debug!(position = self.cursor, %expected, %found, "wire type mismatch");
            return Err(DecodeError::TypeMismatch { expected, found });
        }
        self.advance_with(Value::get_exact::<T>)
    }

    /// Extracts the next record, converting it per the `Value` rules.
    pub fn extract_as<T: FromValue>(&mut self) -> Result<T> {
        self.advance_with(Value::get::<T>)
    }

    pub fn extract_value(&mut self) -> Result<Value> {
        self.advance_with(|value| Ok(*value))
    }

    fn advance_with<T, F>(&mut self, f: F) -> Result<T>
        where F: FnOnce(&Value) -> Result<T>
    {
        let result = decode_at(&self.buffer, self.cursor)
            .and_then(|(value, next)| Ok((f(&value)?, value, next)));

        match result {
            Ok((result, value, next)) => {
                trace!(position = self.cursor, %value, "extracted");
                self.cursor = next;
                Ok(result)
            },
            Err(e) => {
                debug!(position = self.cursor, error = %e, "extract failed");
                Err(e)
            },
        }
    }

    /// Iterates over the records from the cursor on, without moving it.
    pub fn values(&self) -> Values<'_> {
        Values { buffer: &self.buffer, position: self.cursor, done: false }
    }
}

impl From<Vec<u8>> for Decoder {
    fn from(buffer: Vec<u8>) -> Decoder {
        Decoder::new(buffer)
    }
}

impl fmt::Display for Decoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.values().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match value {
                Ok (value) => write!(f, "{}", value)?,
                Err(e)     => write!(f, "<error: {}>", e)?,
            }
        }
        Ok(())
    }
}



pub struct Values<'buf> {
    buffer:   &'buf [u8],
    position: usize,
    done:     bool,
}

impl<'buf> Iterator for Values<'buf> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.position >= self.buffer.len() {
            return None;
        }
        match decode_at(self.buffer, self.position) {
            Ok((value, next)) => {
                self.position = next;
                Some(Ok(value))
            },
            Err(e) => {
                self.done = true;
                Some(Err(e))
            },
        }
    }
}
