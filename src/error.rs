use crate::wire_type::WireType;


/// Errors raised while extracting or converting values.
///
/// A failed extraction never moves the decoder's cursor, so every variant
/// leaves the stream usable. Only `TypeMismatch` and `Conversion` are worth
/// retrying at the same position with a different target type.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: WireType, found: WireType },

    #[error("cannot convert {from} to {to}")]
    Conversion { from: &'static str, to: &'static str },

    #[error("unknown type code 0x{0:02x}")]
    UnknownTypeCode(u8),

    #[error("truncated {wire_type} payload: need {need} bytes, have {have}")]
    Truncated { wire_type: WireType, need: usize, have: usize },

    #[error("end of stream at offset {position}")]
    EndOfStream { position: usize },
}

impl DecodeError {
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, DecodeError::EndOfStream { .. })
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, DecodeError::TypeMismatch { .. } | DecodeError::Conversion { .. })
    }
}

pub type Result<T, E = DecodeError> = std::result::Result<T, E>;



#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_kinds() {
        let mismatch = DecodeError::TypeMismatch { expected: WireType::Byte, found: WireType::Bool };
        assert!(mismatch.is_retryable());
        assert!(!mismatch.is_end_of_stream());

        let eos = DecodeError::EndOfStream { position: 3 };
        assert!(eos.is_end_of_stream());
        assert!(!eos.is_retryable());

        assert!(!DecodeError::UnknownTypeCode(0x00).is_retryable());
    }

    #[test]
    fn messages() {
        let err = DecodeError::TypeMismatch { expected: WireType::Byte, found: WireType::Bool };
        assert_eq!(err.to_string(), "type mismatch: expected byte, found boolean");
        assert_eq!(DecodeError::UnknownTypeCode(0xa1).to_string(), "unknown type code 0xa1");
    }
}
