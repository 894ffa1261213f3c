//! Thriftwire links Thrift IDL type descriptors and moves schemaless values
//! over the Thrift binary protocol.
//!
//! A [`Scope`] collects the type descriptors of one schema, possibly with
//! forward references between them; [`Linker::link`] resolves those into a
//! [`LinkedScope`]. Independently of any schema, a [`Value`] tree can be
//! written and read with [`BinaryProtocol`], and host types implementing
//! [`WireStruct`] can be moved through the same protocol.
//!
//! # Examples
//!
//! ```
//! use bytes::Bytes;
//! use thriftwire::{BinaryProtocol, FieldValue, Protocol, StructValue, TType, Value};
//!
//! let value = Value::Struct(StructValue::new(vec![
//!     FieldValue::new(1, TType::Bool, Value::Bool(true)),
//!     FieldValue::new(2, TType::Byte, Value::Byte(42)),
//! ]));
//!
//! let protocol = BinaryProtocol::new();
//! let bytes = protocol.serialize_value(&value).unwrap();
//! assert_eq!(bytes, [0x02, 0x00, 0x01, 0x01, 0x03, 0x00, 0x02, 0x2A, 0x00]);
//!
//! let parsed = protocol
//!     .deserialize_value(TType::Struct, Bytes::from(bytes))
//!     .unwrap();
//! assert_eq!(parsed, value);
//! ```

mod buf;
mod convert;
mod error;
mod link;
mod protocol;
mod scope;
mod spec;
mod ttype;
mod validate;
mod value;
mod visitor;

pub use crate::convert::{StructBuilder, Wire, WireField, WireStruct};
pub use crate::error::{
    DecodeError, DecodeErrorKind, DecodeResult, EncodeError, EncodeErrorKind, EncodeResult,
    LinkError, LinkErrorKind, LinkResult, ValidationError, ValidationErrorKind, ValidationResult,
};
pub use crate::link::Linker;
pub use crate::protocol::{BinaryProtocol, DEFAULT_MAX_DEPTH, Protocol};
pub use crate::scope::{LinkedScope, Scope};
pub use crate::spec::{
    EnumSpec, FieldSpec, PrimitiveType, Requiredness, SpecId, StructKind, StructSpec,
    TypeReference, TypeSpec, TypedefSpec,
};
pub use crate::ttype::{STOP, TType};
pub use crate::value::{FieldValue, ListValue, MapItem, MapValue, SetValue, StructValue, Value};
pub use crate::visitor::ValueVisitor;
