use bytes::Bytes;

use crate::buf::BytesRef;
use crate::ttype::STOP;
use crate::{
    DecodeError, DecodeErrorKind, DecodeResult, EncodeError, EncodeErrorKind, EncodeResult,
    FieldValue, ListValue, MapItem, MapValue, SetValue, StructValue, TType, Value, ValueVisitor,
    WireStruct,
};

/// Nesting depth accepted by [`BinaryProtocol::new`].
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// A wire protocol: turns [`Value`]s into bytes and back.
pub trait Protocol {
    /// Serialize a value. The result carries no framing of its own.
    fn serialize_value(&self, value: &Value) -> EncodeResult<Vec<u8>>;

    /// Parse one value of type `ttype` from the start of `data`.
    ///
    /// Bytes following the value are ignored.
    fn deserialize_value(&self, ttype: TType, data: Bytes) -> DecodeResult<Value>;

    /// Serialize a struct, union or exception.
    fn dumps<T: WireStruct>(&self, obj: &T) -> EncodeResult<Vec<u8>> {
        self.serialize_value(&obj.to_wire())
    }

    /// Deserialize a struct, union or exception.
    fn loads<T: WireStruct>(&self, data: Bytes) -> DecodeResult<T> {
        let value = self.deserialize_value(TType::Struct, data)?;
        T::from_wire(&value)
    }
}

/// The fixed-width Thrift binary protocol.
///
/// All integers are big-endian. Strings and binaries carry an `i32` length
/// prefix, containers carry their element type codes and an `i32` count, and
/// structs are a sequence of `(type, id, value)` fields closed by [`STOP`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryProtocol {
    max_depth: usize,
}

impl Default for BinaryProtocol {
    fn default() -> Self {
        Self::new()
    }
}

impl BinaryProtocol {
    pub const fn new() -> Self {
        BinaryProtocol {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Returns a protocol that rejects input nested deeper than `max_depth`
    /// structs and containers.
    pub const fn with_max_depth(max_depth: usize) -> Self {
        BinaryProtocol { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Protocol for BinaryProtocol {
    fn serialize_value(&self, value: &Value) -> EncodeResult<Vec<u8>> {
        let mut buffer = Vec::new();
        value.apply(&mut BinaryWriter {
            buffer: &mut buffer,
        })?;
        Ok(buffer)
    }

    fn deserialize_value(&self, ttype: TType, data: Bytes) -> DecodeResult<Value> {
        let mut reader = BinaryReader {
            data: BytesRef::new(&data),
            max_depth: self.max_depth,
            remaining_depth: self.max_depth,
        };
        reader.read_value(ttype).inspect_err(|e| {
            tracing::trace!(error = %e, %ttype, len = data.len(), "failed to decode value");
        })
    }
}

fn write_len(buffer: &mut Vec<u8>, len: usize) -> EncodeResult<()> {
    let len = i32::try_from(len)
        .map_err(|_| EncodeError::new(EncodeErrorKind::LengthOverflow(len)))?;
    buffer.extend_from_slice(&len.to_be_bytes());
    Ok(())
}

/// Encodes values by visiting them.
struct BinaryWriter<'a> {
    buffer: &'a mut Vec<u8>,
}

impl BinaryWriter<'_> {
    fn write_values(&mut self, values: &[Value]) -> EncodeResult<()> {
        for value in values {
            value.apply(self)?;
        }
        Ok(())
    }
}

impl ValueVisitor for BinaryWriter<'_> {
    type Output = EncodeResult<()>;

    fn visit_bool(&mut self, value: bool) -> Self::Output {
        self.buffer.push(u8::from(value));
        Ok(())
    }

    fn visit_byte(&mut self, value: i8) -> Self::Output {
        self.buffer.extend_from_slice(&value.to_be_bytes());
        Ok(())
    }

    fn visit_double(&mut self, value: f64) -> Self::Output {
        self.buffer.extend_from_slice(&value.to_bits().to_be_bytes());
        Ok(())
    }

    fn visit_i16(&mut self, value: i16) -> Self::Output {
        self.buffer.extend_from_slice(&value.to_be_bytes());
        Ok(())
    }

    fn visit_i32(&mut self, value: i32) -> Self::Output {
        self.buffer.extend_from_slice(&value.to_be_bytes());
        Ok(())
    }

    fn visit_i64(&mut self, value: i64) -> Self::Output {
        self.buffer.extend_from_slice(&value.to_be_bytes());
        Ok(())
    }

    fn visit_binary(&mut self, value: &Bytes) -> Self::Output {
        self.buffer.reserve(4 + value.len());
        write_len(self.buffer, value.len())?;
        self.buffer.extend_from_slice(value);
        Ok(())
    }

    fn visit_struct(&mut self, fields: &[FieldValue]) -> Self::Output {
        for field in fields {
            self.buffer.push(field.ttype.into());
            self.buffer.extend_from_slice(&field.id.to_be_bytes());
            field.value.apply(self)?;
        }
        self.buffer.push(STOP);
        Ok(())
    }

    fn visit_map(
        &mut self,
        key_ttype: TType,
        value_ttype: TType,
        items: &[MapItem],
    ) -> Self::Output {
        self.buffer.push(key_ttype.into());
        self.buffer.push(value_ttype.into());
        write_len(self.buffer, items.len())?;
        for item in items {
            item.key.apply(self)?;
            item.value.apply(self)?;
        }
        Ok(())
    }

    fn visit_set(&mut self, value_ttype: TType, values: &[Value]) -> Self::Output {
        self.buffer.push(value_ttype.into());
        write_len(self.buffer, values.len())?;
        self.write_values(values)
    }

    fn visit_list(&mut self, value_ttype: TType, values: &[Value]) -> Self::Output {
        self.buffer.push(value_ttype.into());
        write_len(self.buffer, values.len())?;
        self.write_values(values)
    }
}

struct BinaryReader<'a> {
    data: BytesRef<'a>,
    max_depth: usize,
    remaining_depth: usize,
}

impl BinaryReader<'_> {
    fn read_ttype(&mut self) -> DecodeResult<TType> {
        let byte = self.data.read_u8()?;
        TType::from_byte(byte)
            .ok_or_else(|| DecodeError::new(DecodeErrorKind::InvalidTypeId(byte)))
    }

    /// Reads an `i32` length and checks that `len` items of at least
    /// `min_item_len` bytes each could fit in what is left of the buffer.
    fn read_len(&mut self, min_item_len: usize) -> DecodeResult<usize> {
        let raw = self.data.read_i32()?;
        let len = usize::try_from(raw)
            .map_err(|_| DecodeError::new(DecodeErrorKind::NegativeLength(raw)))?;
        let needed = len.saturating_mul(min_item_len);
        if needed > self.data.len() {
            return Err(DecodeError::new(DecodeErrorKind::InsufficientData {
                needed,
                available: self.data.len(),
            }));
        }
        Ok(len)
    }

    fn read_value(&mut self, ttype: TType) -> DecodeResult<Value> {
        match ttype {
            TType::Bool => Ok(Value::Bool(self.data.read_u8()? != 0)),
            TType::Byte => Ok(Value::Byte(self.data.read_i8()?)),
            TType::Double => Ok(Value::Double(self.data.read_f64()?)),
            TType::I16 => Ok(Value::I16(self.data.read_i16()?)),
            TType::I32 => Ok(Value::I32(self.data.read_i32()?)),
            TType::I64 => Ok(Value::I64(self.data.read_i64()?)),
            TType::Binary => {
                let len = self.read_len(1)?;
                Ok(Value::Binary(self.data.read_bytes(len)?))
            }
            TType::Struct => self.nested(|r| r.read_struct().map(Value::Struct)),
            TType::Map => self.nested(|r| r.read_map().map(Value::Map)),
            TType::Set => self.nested(|r| {
                let (value_ttype, values) = r.read_sequence()?;
                Ok(Value::Set(SetValue::new(value_ttype, values)))
            }),
            TType::List => self.nested(|r| {
                let (value_ttype, values) = r.read_sequence()?;
                Ok(Value::List(ListValue::new(value_ttype, values)))
            }),
        }
    }

    /// Runs `read` one nesting level deeper, failing once the limit is hit.
    fn nested<T>(&mut self, read: impl FnOnce(&mut Self) -> DecodeResult<T>) -> DecodeResult<T> {
        if self.remaining_depth == 0 {
            return Err(DecodeError::new(DecodeErrorKind::DepthLimitExceeded(
                self.max_depth,
            )));
        }
        self.remaining_depth -= 1;
        let result = read(self);
        self.remaining_depth += 1;
        result
    }

    fn read_map(&mut self) -> DecodeResult<MapValue> {
        let key_ttype = self.read_ttype()?;
        let value_ttype = self.read_ttype()?;
        let len = self.read_len(key_ttype.min_encoded_len() + value_ttype.min_encoded_len())?;
        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            let key = self.read_value(key_ttype)?;
            let value = self.read_value(value_ttype)?;
            items.push(MapItem::new(key, value));
        }
        Ok(MapValue::new(key_ttype, value_ttype, items))
    }

    fn read_struct(&mut self) -> DecodeResult<StructValue> {
        let mut fields = Vec::new();
        loop {
            let byte = self.data.read_u8()?;
            if byte == STOP {
                return Ok(StructValue::new(fields));
            }
            let ttype = TType::from_byte(byte)
                .ok_or_else(|| DecodeError::new(DecodeErrorKind::InvalidTypeId(byte)))?;
            let id = self.data.read_i16()?;
            let value = self.read_value(ttype)?;
            fields.push(FieldValue::new(id, ttype, value));
        }
    }

    fn read_sequence(&mut self) -> DecodeResult<(TType, Vec<Value>)> {
        let value_ttype = self.read_ttype()?;
        let len = self.read_len(value_ttype.min_encoded_len())?;
        let mut values = Vec::with_capacity(len);
        for _ in 0..len {
            values.push(self.read_value(value_ttype)?);
        }
        Ok((value_ttype, values))
    }
}
