use thiserror::Error;

use crate::TType;

/// Specific kinds of errors that can occur when decoding binary protocol data
/// or converting a decoded value into a host type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeErrorKind {
    #[error("invalid type ID: {0:#04x}")]
    InvalidTypeId(u8),

    #[error("not enough data: need {needed} bytes, have {available}")]
    InsufficientData { needed: usize, available: usize },

    #[error("negative length: {0}")]
    NegativeLength(i32),

    #[error("nesting exceeds the limit of {0} levels")]
    DepthLimitExceeded(usize),

    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: TType, actual: TType },

    #[error("missing required field {0}")]
    MissingRequiredField(i16),

    #[error("invalid UTF-8 in string")]
    InvalidUtf8,

    #[error("timestamp out of range: {0}")]
    InvalidTimestamp(i64),
}

/// Error type returned when decoding fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("decode error: {kind}")]
pub struct DecodeError {
    /// The specific kind of decode error that occurred.
    kind: DecodeErrorKind,
}

impl DecodeError {
    /// Creates a new DecodeError with the given kind.
    pub const fn new(kind: DecodeErrorKind) -> Self {
        Self { kind }
    }

    /// Returns the specific kind of decode error that occurred.
    pub fn kind(&self) -> &DecodeErrorKind {
        &self.kind
    }
}

/// Result type for decoding operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Specific kinds of errors that can occur when encoding a value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeErrorKind {
    #[error("length {0} exceeds the maximum of i32::MAX")]
    LengthOverflow(usize),
}

/// Error type returned when encoding fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("encode error: {kind}")]
pub struct EncodeError {
    kind: EncodeErrorKind,
}

impl EncodeError {
    /// Creates a new EncodeError with the given kind.
    pub fn new(kind: EncodeErrorKind) -> Self {
        Self { kind }
    }

    /// Returns the specific kind of encode error that occurred.
    pub fn kind(&self) -> &EncodeErrorKind {
        &self.kind
    }
}

/// Result type for encoding operations.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Specific kinds of errors raised while linking a scope.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkErrorKind {
    #[error("type \"{name}\" at line {lineno} is a reference to itself")]
    SelfReference { name: String, lineno: u32 },

    #[error("unknown type \"{name}\" referenced at line {lineno}")]
    UnknownType { name: String, lineno: u32 },

    #[error("type \"{name}\" is already defined")]
    DuplicateType { name: String },
}

/// Error type returned when a scope cannot be linked.
///
/// A scope that failed to link is unusable; the linker consumes it either way.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("link error: {kind}")]
pub struct LinkError {
    kind: LinkErrorKind,
}

impl LinkError {
    /// Creates a new LinkError with the given kind.
    pub fn new(kind: LinkErrorKind) -> Self {
        Self { kind }
    }

    /// Returns the specific kind of link error that occurred.
    pub fn kind(&self) -> &LinkErrorKind {
        &self.kind
    }
}

/// Result type for linking operations.
pub type LinkResult<T> = Result<T, LinkError>;

/// Specific kinds of errors raised when a value does not conform to a type
/// descriptor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: TType, actual: TType },

    #[error("\"{name}\" is missing required field {id}")]
    MissingRequiredField { name: String, id: i16 },

    #[error("union \"{name}\" must have exactly one field set, found {count}")]
    UnionFieldCount { name: String, count: usize },

    #[error("{value} is not a valid value of enum \"{name}\"")]
    UnknownEnumValue { name: String, value: i32 },
}

/// Error type returned by [`LinkedScope::validate`](crate::LinkedScope::validate).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("validation error: {kind}")]
pub struct ValidationError {
    kind: ValidationErrorKind,
}

impl ValidationError {
    /// Creates a new ValidationError with the given kind.
    pub fn new(kind: ValidationErrorKind) -> Self {
        Self { kind }
    }

    /// Returns the specific kind of validation error that occurred.
    pub fn kind(&self) -> &ValidationErrorKind {
        &self.kind
    }
}

/// Result type for validation.
pub type ValidationResult<T> = Result<T, ValidationError>;
