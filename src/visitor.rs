use bytes::Bytes;

use crate::{FieldValue, MapItem, TType, Value};

/// Double-dispatch over the variants of [`Value`].
///
/// [`Value::apply`] calls exactly one of these methods, the one matching the
/// value's variant, passing the value's own contents.
pub trait ValueVisitor {
    type Output;

    fn visit_bool(&mut self, value: bool) -> Self::Output;
    fn visit_byte(&mut self, value: i8) -> Self::Output;
    fn visit_double(&mut self, value: f64) -> Self::Output;
    fn visit_i16(&mut self, value: i16) -> Self::Output;
    fn visit_i32(&mut self, value: i32) -> Self::Output;
    fn visit_i64(&mut self, value: i64) -> Self::Output;
    fn visit_binary(&mut self, value: &Bytes) -> Self::Output;
    fn visit_struct(&mut self, fields: &[FieldValue]) -> Self::Output;
    fn visit_map(&mut self, key_ttype: TType, value_ttype: TType, items: &[MapItem])
    -> Self::Output;
    fn visit_set(&mut self, value_ttype: TType, values: &[Value]) -> Self::Output;
    fn visit_list(&mut self, value_ttype: TType, values: &[Value]) -> Self::Output;
}

impl Value {
    /// Calls the visitor method matching this value's variant.
    pub fn apply<V: ValueVisitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            Value::Bool(v) => visitor.visit_bool(*v),
            Value::Byte(v) => visitor.visit_byte(*v),
            Value::Double(v) => visitor.visit_double(*v),
            Value::I16(v) => visitor.visit_i16(*v),
            Value::I32(v) => visitor.visit_i32(*v),
            Value::I64(v) => visitor.visit_i64(*v),
            Value::Binary(v) => visitor.visit_binary(v),
            Value::Struct(s) => visitor.visit_struct(s.fields()),
            Value::Map(m) => visitor.visit_map(m.key_ttype(), m.value_ttype(), m.items()),
            Value::Set(s) => visitor.visit_set(s.value_ttype(), s.values()),
            Value::List(l) => visitor.visit_list(l.value_ttype(), l.values()),
        }
    }
}
