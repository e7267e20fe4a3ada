//! Typed AMQP 1.0 primitive codec.
//!
//! Values go into an [`Encoder`] in order and come out of a [`Decoder`] in the
//! same order. Extraction is exact by wire type and never consumes a record
//! it rejects; widening goes through [`Value`] conversions.

pub mod wire_type;
pub mod reader;
pub mod error;
pub mod value;
pub mod encoder;
pub mod decoder;
pub mod json;
pub mod fixtures;
pub mod interop;


pub use wire_type::{WireType, Primitive};
pub use error::{DecodeError, Result};
pub use value::{Value, FromValue};
pub use encoder::Encoder;
pub use decoder::Decoder;
