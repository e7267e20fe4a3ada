use serde_json::Number;

use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::DecodeError;
use crate::value::Value;


#[derive(thiserror::Error, Debug)]
pub enum JsonError {
    #[error("json {0} has no scalar wire form")]
    Unsupported(&'static str),

    #[error("non-finite float {0} has no json form")]
    NonFinite(f64),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}


pub fn value_to_json(value: &Value) -> Result<serde_json::Value, JsonError> {
    use serde_json::Value as Json;
    Ok(match *value {
        Value::Empty      => return Err(JsonError::Unsupported("empty")),
        Value::Bool   (v) => Json::Bool(v),
        Value::UByte  (v) => Json::from(v),
        Value::Byte   (v) => Json::from(v),
        Value::UShort (v) => Json::from(v),
        Value::Short  (v) => Json::from(v),
        Value::UInt   (v) => Json::from(v),
        Value::Int    (v) => Json::from(v),
        Value::ULong  (v) => Json::from(v),
        Value::Long   (v) => Json::from(v),
        Value::Float  (v) => float_to_json(v as f64)?,
        Value::Double (v) => float_to_json(v)?,
    })
}

fn float_to_json(value: f64) -> Result<serde_json::Value, JsonError> {
    Number::from_f64(value)
        .map(serde_json::Value::Number)
        .ok_or(JsonError::NonFinite(value))
}

pub fn json_to_value(json: &serde_json::Value) -> Result<Value, JsonError> {
    use serde_json::Value as Json;
    match json {
        Json::Bool   (v) => Ok(Value::Bool(*v)),
        Json::Number (v) => Ok(number_to_value(v)),
        Json::Null       => Err(JsonError::Unsupported("null")),
        Json::String (_) => Err(JsonError::Unsupported("string")),
        Json::Array  (_) => Err(JsonError::Unsupported("array")),
        Json::Object (_) => Err(JsonError::Unsupported("object")),
    }
}

fn number_to_value(number: &Number) -> Value {
    if let Some(v) = number.as_i64() {
        Value::Long(v)
    }
    else if let Some(v) = number.as_u64() {
        Value::ULong(v)
    }
    else {
        // as_f64 is always Some without arbitrary_precision.
        Value::Double(number.as_f64().unwrap_or(f64::NAN))
    }
}


/// Encodes a json scalar, or an array of scalars as a sequence.
pub fn encode_json(json: &serde_json::Value) -> Result<Vec<u8>, JsonError> {
    let mut encoder = Encoder::new();
    match json {
        serde_json::Value::Array(values) => {
            for value in values {
                encoder.insert_value(json_to_value(value)?);
            }
        },
        value => {
            encoder.insert_value(json_to_value(value)?);
        },
    }
    Ok(encoder.encode())
}

/// Decodes a whole stream into a json array.
pub fn decode_json(buffer: &[u8]) -> Result<serde_json::Value, JsonError> {
    let decoder = Decoder::new(buffer);
    let mut values = vec![];
    for value in decoder.values() {
        values.push(value_to_json(&value?)?);
    }
    Ok(serde_json::Value::Array(values))
}
