#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use amqp_codec::{Decoder, Encoder, Value};

    fn any_integer() -> impl Strategy<Value = Value> {
        prop_oneof![
            any::<u8>().prop_map(Value::UByte),
            any::<i8>().prop_map(Value::Byte),
            any::<u16>().prop_map(Value::UShort),
            any::<i16>().prop_map(Value::Short),
            any::<u32>().prop_map(Value::UInt),
            any::<i32>().prop_map(Value::Int),
            any::<u64>().prop_map(Value::ULong),
            any::<i64>().prop_map(Value::Long),
        ]
    }

    fn any_value() -> impl Strategy<Value = Value> {
        prop_oneof![
            any::<bool>().prop_map(Value::Bool),
            any_integer(),
            // NaN != NaN would spoil the equality checks.
            (-1.0e30f32..1.0e30f32).prop_map(Value::Float),
            (-1.0e300f64..1.0e300f64).prop_map(Value::Double),
        ]
    }

    proptest! {
        #[test]
        fn prop_round_trip(values in prop::collection::vec(any_value(), 0..64)) {
            let encoder: Encoder = values.iter().copied().collect();
            let bytes = encoder.encode();
            prop_assert_eq!(bytes.len(), encoder.encoded_len());

            let mut decoder = Decoder::new(bytes);
            for value in &values {
                let decoded = decoder.extract_value().unwrap();
                prop_assert_eq!(decoded, *value);
                prop_assert_eq!(decoded.wire_type(), value.wire_type());
            }
            prop_assert!(!decoder.more());
            prop_assert!(decoder.extract_value().unwrap_err().is_end_of_stream());
        }

        #[test]
        fn prop_mismatch_is_non_destructive(value in any_value()) {
            let mut encoder = Encoder::new();
            encoder.insert(value);
            let mut decoder = Decoder::new(encoder.encode());

            // exactly one of these matches; the rest must leave the cursor alone.
            let attempts = [
                decoder.extract::<bool>().is_ok(),
                decoder.extract::<u8>().is_ok(),
                decoder.extract::<i8>().is_ok(),
                decoder.extract::<u16>().is_ok(),
                decoder.extract::<i16>().is_ok(),
                decoder.extract::<u32>().is_ok(),
                decoder.extract::<i32>().is_ok(),
                decoder.extract::<u64>().is_ok(),
                decoder.extract::<i64>().is_ok(),
                decoder.extract::<f32>().is_ok(),
                decoder.extract::<f64>().is_ok(),
            ];
            prop_assert_eq!(attempts.iter().filter(|ok| **ok).count(), 1);
            prop_assert!(!decoder.more());
        }

        #[test]
        fn prop_display_matches(values in prop::collection::vec(any_value(), 0..16)) {
            let encoder: Encoder = values.into_iter().collect();
            let decoder = Decoder::new(encoder.encode());
            prop_assert_eq!(decoder.to_string(), encoder.to_string());
        }

        #[test]
        fn prop_garbage_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
            let mut decoder = Decoder::new(bytes);
            let _ = decoder.to_string();
            while decoder.more() {
                let before = decoder.position();
                if decoder.extract_value().is_err() {
                    prop_assert_eq!(decoder.position(), before);
                    break;
                }
                prop_assert!(decoder.position() > before);
            }
        }
    }
}
