use std::fmt;

use tracing::trace;

use crate::value::Value;
use crate::wire_type::Primitive;


/// Append-only sequence of values, encoded on demand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Encoder {
    values: Vec<Value>,
}

impl Encoder {
    pub fn new() -> Encoder {
        Encoder::default()
    }

    pub fn insert<T: Into<Value>>(&mut self, value: T) -> &mut Encoder {
        self.insert_value(value.into());
        self
    }

    pub fn insert_value(&mut self, value: Value) {
        // no wire form
        if value.is_empty() {
            return;
        }
        self.values.push(value);
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn encoded_len(&self) -> usize {
        self.values.iter()
            .filter_map(Value::wire_type)
            .map(|ty| 1 + ty.width())
            .sum()
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(self.encoded_len());
        self.encode_append(&mut result);
        result
    }

    pub fn encode_append(&self, dest: &mut Vec<u8>) {
        dest.reserve(self.encoded_len());
        for value in &self.values {
            encode_value(value, dest);
        }
        trace!(records = self.values.len(), bytes = dest.len(), "encoded");
    }
}

/// Writes one `[code][payload]` record. `Value::Empty` writes nothing.
pub fn encode_value(value: &Value, dest: &mut Vec<u8>) {
    match *value {
        Value::Empty      => {},
        Value::Bool   (v) => write_record(v, dest),
        Value::UByte  (v) => write_record(v, dest),
        Value::Byte   (v) => write_record(v, dest),
        Value::UShort (v) => write_record(v, dest),
        Value::Short  (v) => write_record(v, dest),
        Value::UInt   (v) => write_record(v, dest),
        Value::Int    (v) => write_record(v, dest),
        Value::ULong  (v) => write_record(v, dest),
        Value::Long   (v) => write_record(v, dest),
        Value::Float  (v) => write_record(v, dest),
        Value::Double (v) => write_record(v, dest),
    }
}

fn write_record<T: Primitive>(value: T, dest: &mut Vec<u8>) {
    dest.push(value.type_code());
    value.write_payload(dest);
}

impl Extend<Value> for Encoder {
    fn extend<I: IntoIterator<Item = Value>>(&mut self, iter: I) {
        for value in iter {
            self.insert_value(value);
        }
    }
}

impl FromIterator<Value> for Encoder {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Encoder {
        let mut encoder = Encoder::new();
        encoder.extend(iter);
        encoder
    }
}

impl fmt::Display for Encoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}
