//! The schemaless wire value model.
//!
//! A [`Value`] is what the binary protocol produces and consumes. It carries
//! just enough type information (the [`TType`] of every struct field and
//! container element) to be encoded without a schema.

use bytes::Bytes;

use crate::TType;

/// A decoded value of any wire type.
///
/// Two values are equal when they are the same variant with equal contents.
/// Doubles compare by bit pattern, so a NaN equals itself and `0.0` differs
/// from `-0.0`.
#[derive(Debug, Clone)]
pub enum Value {
    Bool(bool),
    Byte(i8),
    Double(f64),
    I16(i16),
    I32(i32),
    I64(i64),
    /// Raw bytes; also used for strings.
    Binary(Bytes),
    Struct(StructValue),
    Map(MapValue),
    Set(SetValue),
    List(ListValue),
}

impl Value {
    /// Returns the type code of this value's variant.
    pub fn ttype(&self) -> TType {
        match self {
            Value::Bool(_) => TType::Bool,
            Value::Byte(_) => TType::Byte,
            Value::Double(_) => TType::Double,
            Value::I16(_) => TType::I16,
            Value::I32(_) => TType::I32,
            Value::I64(_) => TType::I64,
            Value::Binary(_) => TType::Binary,
            Value::Struct(_) => TType::Struct,
            Value::Map(_) => TType::Map,
            Value::Set(_) => TType::Set,
            Value::List(_) => TType::List,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a.to_bits() == b.to_bits(),
            (Value::I16(a), Value::I16(b)) => a == b,
            (Value::I32(a), Value::I32(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::Binary(a), Value::Binary(b)) => a == b,
            (Value::Struct(a), Value::Struct(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl From<StructValue> for Value {
    fn from(value: StructValue) -> Self {
        Value::Struct(value)
    }
}

impl From<MapValue> for Value {
    fn from(value: MapValue) -> Self {
        Value::Map(value)
    }
}

impl From<SetValue> for Value {
    fn from(value: SetValue) -> Self {
        Value::Set(value)
    }
}

impl From<ListValue> for Value {
    fn from(value: ListValue) -> Self {
        Value::List(value)
    }
}

/// A single field of a struct: its id, declared type code and value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue {
    pub id: i16,
    pub ttype: TType,
    pub value: Value,
}

impl FieldValue {
    pub fn new(id: i16, ttype: TType, value: Value) -> Self {
        debug_assert_eq!(ttype, value.ttype(), "field {id} declared as {ttype}");
        FieldValue { id, ttype, value }
    }
}

/// A struct, union or exception as an ordered list of fields.
///
/// Field order is insertion (or wire) order. Ids need not be sorted or
/// unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructValue {
    fields: Vec<FieldValue>,
}

impl StructValue {
    pub fn new(fields: Vec<FieldValue>) -> Self {
        StructValue { fields }
    }

    pub fn fields(&self) -> &[FieldValue] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<FieldValue> {
        self.fields
    }

    /// Returns the first field with the given id and type code.
    ///
    /// A field whose id matches but whose type code differs is skipped.
    pub fn get(&self, id: i16, ttype: TType) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|field| field.id == id && field.ttype == ttype)
    }
}

/// One key/value pair of a map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapItem {
    pub key: Value,
    pub value: Value,
}

impl MapItem {
    pub fn new(key: Value, value: Value) -> Self {
        MapItem { key, value }
    }
}

/// A map with declared key and value type codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapValue {
    key_ttype: TType,
    value_ttype: TType,
    items: Vec<MapItem>,
}

impl MapValue {
    pub fn new(key_ttype: TType, value_ttype: TType, items: Vec<MapItem>) -> Self {
        debug_assert!(
            items
                .iter()
                .all(|item| item.key.ttype() == key_ttype && item.value.ttype() == value_ttype),
            "map items must match map<{key_ttype}, {value_ttype}>"
        );
        MapValue {
            key_ttype,
            value_ttype,
            items,
        }
    }

    pub fn key_ttype(&self) -> TType {
        self.key_ttype
    }

    pub fn value_ttype(&self) -> TType {
        self.value_ttype
    }

    pub fn items(&self) -> &[MapItem] {
        &self.items
    }
}

macro_rules! sequence_value {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            value_ttype: TType,
            values: Vec<Value>,
        }

        impl $name {
            pub fn new(value_ttype: TType, values: Vec<Value>) -> Self {
                debug_assert!(
                    values.iter().all(|value| value.ttype() == value_ttype),
                    concat!($kind, " elements must match the declared type {}"),
                    value_ttype
                );
                $name {
                    value_ttype,
                    values,
                }
            }

            pub fn value_ttype(&self) -> TType {
                self.value_ttype
            }

            pub fn values(&self) -> &[Value] {
                &self.values
            }
        }
    };
}

sequence_value!(
    /// A set of values sharing one type code.
    ///
    /// Uniqueness is not enforced and equality is order-sensitive; the wire
    /// format makes no promise about either.
    SetValue,
    "set"
);

sequence_value!(
    /// A list of values sharing one type code.
    ListValue,
    "list"
);

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::{FieldValue, ListValue, MapItem, MapValue, SetValue, StructValue, Value};
    use crate::TType;

    fn sample_struct() -> StructValue {
        StructValue::new(vec![
            FieldValue::new(1, TType::Bool, Value::Bool(true)),
            FieldValue::new(2, TType::Byte, Value::Byte(42)),
            FieldValue::new(
                3,
                TType::List,
                ListValue::new(
                    TType::Binary,
                    vec![
                        Value::Binary(Bytes::from_static(b"Hello")),
                        Value::Binary(Bytes::from_static(b"World")),
                    ],
                )
                .into(),
            ),
        ])
    }

    #[test]
    fn test_struct_get() {
        let s = sample_struct();

        assert_eq!(s.get(1, TType::Bool).unwrap().value, Value::Bool(true));
        assert_eq!(s.get(2, TType::Byte).unwrap().value, Value::Byte(42));
        assert_eq!(
            s.get(3, TType::List).unwrap().value,
            Value::List(ListValue::new(
                TType::Binary,
                vec![
                    Value::Binary(Bytes::from_static(b"Hello")),
                    Value::Binary(Bytes::from_static(b"World")),
                ],
            ))
        );
    }

    #[test]
    fn test_struct_get_type_mismatch_is_absent() {
        let s = sample_struct();
        assert_eq!(s.get(1, TType::Binary), None);
        assert_eq!(s.get(4, TType::Bool), None);
    }

    #[test]
    fn test_struct_get_returns_first_duplicate() {
        let s = StructValue::new(vec![
            FieldValue::new(1, TType::I32, Value::I32(1)),
            FieldValue::new(1, TType::I64, Value::I64(2)),
            FieldValue::new(1, TType::I32, Value::I32(3)),
        ]);
        assert_eq!(s.get(1, TType::I32).unwrap().value, Value::I32(1));
        assert_eq!(s.get(1, TType::I64).unwrap().value, Value::I64(2));

        let ids: Vec<i16> = s.into_fields().into_iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![1, 1, 1]);
    }

    #[test]
    fn test_double_equality_is_bitwise() {
        assert_eq!(Value::Double(f64::NAN), Value::Double(f64::NAN));
        assert_ne!(Value::Double(0.0), Value::Double(-0.0));
        assert_eq!(Value::Double(1.5), Value::Double(1.5));
    }

    #[test]
    fn test_variants_are_distinct() {
        assert_ne!(Value::I32(1), Value::I64(1));
        assert_ne!(
            Value::Set(SetValue::new(TType::I32, vec![Value::I32(1)])),
            Value::List(ListValue::new(TType::I32, vec![Value::I32(1)]))
        );
    }

    #[test]
    fn test_set_equality_is_order_sensitive() {
        let a = SetValue::new(TType::I32, vec![Value::I32(1), Value::I32(2)]);
        let b = SetValue::new(TType::I32, vec![Value::I32(2), Value::I32(1)]);
        assert_ne!(a, b);

        // Duplicates are kept as given.
        let dup = SetValue::new(TType::I32, vec![Value::I32(1), Value::I32(1)]);
        assert_eq!(dup.values().len(), 2);
    }

    #[test]
    fn test_map_accessors() {
        let map = MapValue::new(
            TType::Binary,
            TType::I16,
            vec![MapItem::new(
                Value::Binary(Bytes::from_static(b"a")),
                Value::I16(1),
            )],
        );
        assert_eq!(map.key_ttype(), TType::Binary);
        assert_eq!(map.value_ttype(), TType::I16);
        assert_eq!(map.items()[0].value, Value::I16(1));
        assert_eq!(Value::from(map).ttype(), TType::Map);
    }
}
