//! thriftwire_ascii provides a human-readable ASCII format for Thrift binary
//! protocol data.
//!
//! This crate is primarily used as a binary (`thrift2ascii`) for pretty-printing
//! a serialized struct without its schema.

mod format;

pub use crate::format::to_ascii;

/// Parses a struct in the Thrift binary protocol and formats it as ASCII.
pub fn binary2ascii(data: &[u8]) -> Result<String, thriftwire::DecodeError> {
    use thriftwire::{BinaryProtocol, Protocol, TType};

    let bytes = bytes::Bytes::copy_from_slice(data);
    let value = BinaryProtocol::new().deserialize_value(TType::Struct, bytes)?;
    Ok(to_ascii(&value))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use thriftwire::{
        BinaryProtocol, DecodeErrorKind, DecodeResult, Protocol, StructBuilder, TType, Value, Wire,
        WireStruct,
    };

    use crate::binary2ascii;

    #[derive(Debug)]
    struct Person {
        name: String,
        age: i32,
        nickname: Option<String>,
        scores: HashMap<String, i16>,
    }

    impl Wire for Person {
        const TTYPE: TType = TType::Struct;

        fn to_wire(&self) -> Value {
            StructBuilder::new()
                .field(1, &self.name)
                .field(2, &self.age)
                .field(3, &self.nickname)
                .field(4, &self.scores)
                .build()
                .into()
        }

        fn from_wire(value: &Value) -> DecodeResult<Self> {
            let s = thriftwire::StructValue::from_value(value)?;
            Ok(Person {
                name: s.read_field(1)?,
                age: s.read_field(2)?,
                nickname: s.read_field(3)?,
                scores: s.read_field(4)?,
            })
        }
    }

    impl WireStruct for Person {}

    #[test]
    fn test_struct() {
        let person = Person {
            name: "Alice".to_string(),
            age: 30,
            nickname: None,
            scores: HashMap::from([("go".to_string(), 7)]),
        };
        let serialized = BinaryProtocol::new().dumps(&person).unwrap();
        let ascii = binary2ascii(&serialized).unwrap();
        assert_eq!(
            ascii,
            "struct {\n  1: \"Alice\",\n  2: 30i32,\n  4: map<binary, i16> {\n    \"go\": 7i16,\n  },\n}"
        );
    }

    #[test]
    fn test_raw_bytes() {
        let data = [0x02, 0x00, 0x01, 0x01, 0x03, 0x00, 0x02, 0x2A, 0x00];
        assert_eq!(
            binary2ascii(&data).unwrap(),
            "struct {\n  1: true,\n  2: 42i8,\n}"
        );
    }

    #[test]
    fn test_nested_list() {
        // struct { 1: list<list<i32>> [[5]] }
        let data = [
            0x0F, 0x00, 0x01, 0x0F, 0x00, 0x00, 0x00, 0x01, 0x08, 0x00, 0x00, 0x00, 0x01, 0x00,
            0x00, 0x00, 0x05, 0x00,
        ];
        assert_eq!(
            binary2ascii(&data).unwrap(),
            "struct {\n  1: list<list> {\n    list<i32> {\n      5i32,\n    },\n  },\n}"
        );
    }

    #[test]
    fn test_invalid_type_id() {
        let err = binary2ascii(&[0x80, 0x00, 0x01]).unwrap_err();
        assert_eq!(err.kind(), &DecodeErrorKind::InvalidTypeId(0x80));
    }

    #[test]
    fn test_insufficient_data() {
        let err = binary2ascii(&[0x08, 0x00, 0x01, 0x2A]).unwrap_err();
        assert!(matches!(
            err.kind(),
            DecodeErrorKind::InsufficientData { .. }
        ));
    }
}
