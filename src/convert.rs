use std::collections::{HashMap, HashSet};
use std::hash::{BuildHasher, Hash};

use bytes::Bytes;

use crate::{
    DecodeError, DecodeErrorKind, DecodeResult, FieldValue, ListValue, MapItem, MapValue,
    SetValue, StructValue, TType, Value,
};

/// Conversion between a host type and its [`Value`] representation.
///
/// Struct, union and exception types implement this (usually through
/// generated code) to be usable with [`Protocol::dumps`](crate::Protocol::dumps)
/// and [`Protocol::loads`](crate::Protocol::loads).
pub trait Wire: Sized {
    /// The type code values of this type are written with.
    const TTYPE: TType;

    fn to_wire(&self) -> Value;

    fn from_wire(value: &Value) -> DecodeResult<Self>;
}

/// Marker for struct-like types: their `to_wire` always returns
/// [`Value::Struct`].
pub trait WireStruct: Wire {}

/// A struct member that is either required (`T`) or optional (`Option<T>`).
pub trait WireField: Sized {
    type T: Wire;

    fn as_wire(&self) -> Option<&Self::T>;
    /// Converts the decoded contents of field `id`, if it was present.
    fn from_option(v: Option<Self::T>, id: i16) -> DecodeResult<Self>;
}

impl<T: Wire> WireField for T {
    type T = T;

    fn as_wire(&self) -> Option<&Self::T> {
        Some(self)
    }

    fn from_option(v: Option<Self::T>, id: i16) -> DecodeResult<Self> {
        v.ok_or_else(|| DecodeError::new(DecodeErrorKind::MissingRequiredField(id)))
    }
}

impl<T: Wire> WireField for Option<T> {
    type T = T;

    fn as_wire(&self) -> Option<&Self::T> {
        self.as_ref()
    }

    fn from_option(v: Option<Self::T>, _id: i16) -> DecodeResult<Self> {
        Ok(v)
    }
}

fn type_mismatch(expected: TType, actual: &Value) -> DecodeError {
    DecodeError::new(DecodeErrorKind::TypeMismatch {
        expected,
        actual: actual.ttype(),
    })
}

impl StructValue {
    /// Reads field `id` as `F`.
    ///
    /// A field with the right id but a different type code counts as absent,
    /// which is an error only when `F` is required.
    pub fn read_field<F: WireField>(&self, id: i16) -> DecodeResult<F> {
        let value = self
            .get(id, <F::T as Wire>::TTYPE)
            .map(|field| <F::T as Wire>::from_wire(&field.value))
            .transpose()?;
        F::from_option(value, id)
    }

    /// Returns the struct inside `value`, or a type mismatch error.
    pub fn from_value(value: &Value) -> DecodeResult<&StructValue> {
        match value {
            Value::Struct(s) => Ok(s),
            other => Err(type_mismatch(TType::Struct, other)),
        }
    }
}

/// Builds a [`StructValue`] from host values, skipping absent optionals.
#[derive(Debug, Default)]
pub struct StructBuilder {
    fields: Vec<FieldValue>,
}

impl StructBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field<F: WireField>(mut self, id: i16, value: &F) -> Self {
        if let Some(value) = value.as_wire() {
            self.fields.push(FieldValue::new(
                id,
                <F::T as Wire>::TTYPE,
                value.to_wire(),
            ));
        }
        self
    }

    pub fn build(self) -> StructValue {
        StructValue::new(self.fields)
    }
}

macro_rules! impl_wire_primitive {
    ($ty:ty, $variant:ident, $ttype:expr) => {
        impl Wire for $ty {
            const TTYPE: TType = $ttype;

            fn to_wire(&self) -> Value {
                Value::$variant(*self)
            }

            fn from_wire(value: &Value) -> DecodeResult<Self> {
                match value {
                    Value::$variant(v) => Ok(*v),
                    other => Err(type_mismatch(Self::TTYPE, other)),
                }
            }
        }
    };
}

impl_wire_primitive!(bool, Bool, TType::Bool);
impl_wire_primitive!(i8, Byte, TType::Byte);
impl_wire_primitive!(f64, Double, TType::Double);
impl_wire_primitive!(i16, I16, TType::I16);
impl_wire_primitive!(i32, I32, TType::I32);
impl_wire_primitive!(i64, I64, TType::I64);

impl Wire for Bytes {
    const TTYPE: TType = TType::Binary;

    fn to_wire(&self) -> Value {
        Value::Binary(self.clone())
    }

    fn from_wire(value: &Value) -> DecodeResult<Self> {
        match value {
            Value::Binary(b) => Ok(b.clone()),
            other => Err(type_mismatch(Self::TTYPE, other)),
        }
    }
}

impl Wire for String {
    const TTYPE: TType = TType::Binary;

    fn to_wire(&self) -> Value {
        Value::Binary(Bytes::copy_from_slice(self.as_bytes()))
    }

    fn from_wire(value: &Value) -> DecodeResult<Self> {
        match value {
            Value::Binary(b) => String::from_utf8(b.to_vec())
                .map_err(|_| DecodeError::new(DecodeErrorKind::InvalidUtf8)),
            other => Err(type_mismatch(Self::TTYPE, other)),
        }
    }
}

/// Seconds since the Unix epoch, as an `i64`.
#[cfg(feature = "chrono")]
impl Wire for chrono::DateTime<chrono::Utc> {
    const TTYPE: TType = TType::I64;

    fn to_wire(&self) -> Value {
        Value::I64(self.timestamp())
    }

    fn from_wire(value: &Value) -> DecodeResult<Self> {
        match value {
            Value::I64(secs) => chrono::DateTime::from_timestamp(*secs, 0)
                .ok_or_else(|| DecodeError::new(DecodeErrorKind::InvalidTimestamp(*secs))),
            other => Err(type_mismatch(Self::TTYPE, other)),
        }
    }
}

/// Empty containers may carry any element type; other writers do not always
/// fill it in.
fn check_element_ttype(expected: TType, actual: TType, is_empty: bool) -> DecodeResult<()> {
    if !is_empty && expected != actual {
        return Err(DecodeError::new(DecodeErrorKind::TypeMismatch {
            expected,
            actual,
        }));
    }
    Ok(())
}

impl<T: Wire> Wire for Vec<T> {
    const TTYPE: TType = TType::List;

    fn to_wire(&self) -> Value {
        Value::List(ListValue::new(
            T::TTYPE,
            self.iter().map(Wire::to_wire).collect(),
        ))
    }

    fn from_wire(value: &Value) -> DecodeResult<Self> {
        match value {
            Value::List(list) => {
                check_element_ttype(T::TTYPE, list.value_ttype(), list.values().is_empty())?;
                list.values().iter().map(T::from_wire).collect()
            }
            other => Err(type_mismatch(Self::TTYPE, other)),
        }
    }
}

impl<T: Wire + Eq + Hash, S: BuildHasher + Default> Wire for HashSet<T, S> {
    const TTYPE: TType = TType::Set;

    fn to_wire(&self) -> Value {
        Value::Set(SetValue::new(
            T::TTYPE,
            self.iter().map(Wire::to_wire).collect(),
        ))
    }

    fn from_wire(value: &Value) -> DecodeResult<Self> {
        match value {
            Value::Set(set) => {
                check_element_ttype(T::TTYPE, set.value_ttype(), set.values().is_empty())?;
                set.values().iter().map(T::from_wire).collect()
            }
            other => Err(type_mismatch(Self::TTYPE, other)),
        }
    }
}

impl<K, V, S> Wire for HashMap<K, V, S>
where
    K: Wire + Eq + Hash,
    V: Wire,
    S: BuildHasher + Default,
{
    const TTYPE: TType = TType::Map;

    fn to_wire(&self) -> Value {
        Value::Map(MapValue::new(
            K::TTYPE,
            V::TTYPE,
            self.iter()
                .map(|(k, v)| MapItem::new(k.to_wire(), v.to_wire()))
                .collect(),
        ))
    }

    fn from_wire(value: &Value) -> DecodeResult<Self> {
        match value {
            Value::Map(map) => {
                let is_empty = map.items().is_empty();
                check_element_ttype(K::TTYPE, map.key_ttype(), is_empty)?;
                check_element_ttype(V::TTYPE, map.value_ttype(), is_empty)?;
                map.items()
                    .iter()
                    .map(|item| -> DecodeResult<(K, V)> {
                        Ok((K::from_wire(&item.key)?, V::from_wire(&item.value)?))
                    })
                    .collect()
            }
            other => Err(type_mismatch(Self::TTYPE, other)),
        }
    }
}
