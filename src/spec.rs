//! Type descriptors.
//!
//! Descriptors live in the arena of a [`Scope`](crate::Scope) and point at
//! each other through [`SpecId`] handles, so a graph may share nodes and may
//! be cyclic (a struct holding a list of itself).

use std::fmt;

use crate::TType;

/// Handle of a descriptor inside a scope's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpecId(usize);

impl SpecId {
    pub(crate) fn new(index: usize) -> Self {
        SpecId(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SpecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Built-in scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Bool,
    Byte,
    Double,
    I16,
    I32,
    I64,
    Binary,
    /// UTF-8 text; on the wire identical to `Binary`.
    String,
}

impl PrimitiveType {
    pub fn ttype(self) -> TType {
        match self {
            PrimitiveType::Bool => TType::Bool,
            PrimitiveType::Byte => TType::Byte,
            PrimitiveType::Double => TType::Double,
            PrimitiveType::I16 => TType::I16,
            PrimitiveType::I32 => TType::I32,
            PrimitiveType::I64 => TType::I64,
            PrimitiveType::Binary | PrimitiveType::String => TType::Binary,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PrimitiveType::Bool => "bool",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Double => "double",
            PrimitiveType::I16 => "i16",
            PrimitiveType::I32 => "i32",
            PrimitiveType::I64 => "i64",
            PrimitiveType::Binary => "binary",
            PrimitiveType::String => "string",
        }
    }
}

/// A by-name mention of a type that has not been resolved yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeReference {
    pub name: String,
    /// Line of the mention in the IDL source.
    pub lineno: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedefSpec {
    pub name: String,
    pub target: SpecId,
    pub lineno: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Requiredness {
    Required,
    Optional,
    /// Neither keyword given.
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub id: i16,
    pub name: String,
    pub requiredness: Requiredness,
    pub spec: SpecId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructKind {
    Struct,
    Union,
    Exception,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructSpec {
    pub name: String,
    pub kind: StructKind,
    pub fields: Vec<FieldSpec>,
}

impl StructSpec {
    pub fn field(&self, id: i16) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumSpec {
    pub name: String,
    pub items: Vec<(String, i32)>,
}

impl EnumSpec {
    pub fn contains(&self, value: i32) -> bool {
        self.items.iter().any(|(_, v)| *v == value)
    }
}

/// A type descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSpec {
    Primitive(PrimitiveType),
    List { value: SpecId },
    Set { value: SpecId },
    Map { key: SpecId, value: SpecId },
    /// Structs, unions and exceptions.
    Struct(StructSpec),
    Enum(EnumSpec),
    Typedef(TypedefSpec),
    Reference(TypeReference),
}

impl TypeSpec {
    pub fn is_reference(&self) -> bool {
        matches!(self, TypeSpec::Reference(_))
    }

    /// The declared name of named types.
    pub fn name(&self) -> Option<&str> {
        match self {
            TypeSpec::Primitive(p) => Some(p.name()),
            TypeSpec::Struct(s) => Some(&s.name),
            TypeSpec::Enum(e) => Some(&e.name),
            TypeSpec::Typedef(t) => Some(&t.name),
            TypeSpec::Reference(r) => Some(&r.name),
            TypeSpec::List { .. } | TypeSpec::Set { .. } | TypeSpec::Map { .. } => None,
        }
    }

    /// The wire type code of this descriptor.
    ///
    /// `None` for typedefs and references, whose type code is that of their
    /// target; see [`LinkedScope::ttype`](crate::LinkedScope::ttype).
    pub fn ttype(&self) -> Option<TType> {
        match self {
            TypeSpec::Primitive(p) => Some(p.ttype()),
            TypeSpec::List { .. } => Some(TType::List),
            TypeSpec::Set { .. } => Some(TType::Set),
            TypeSpec::Map { .. } => Some(TType::Map),
            TypeSpec::Struct(_) => Some(TType::Struct),
            TypeSpec::Enum(_) => Some(TType::I32),
            TypeSpec::Typedef(_) | TypeSpec::Reference(_) => None,
        }
    }

    /// Passes every immediate child handle through `f` and stores what it
    /// returns in place of the child.
    pub fn transform_dependencies<E>(
        &mut self,
        mut f: impl FnMut(SpecId) -> Result<SpecId, E>,
    ) -> Result<(), E> {
        match self {
            TypeSpec::List { value } | TypeSpec::Set { value } => {
                *value = f(*value)?;
            }
            TypeSpec::Map { key, value } => {
                *key = f(*key)?;
                *value = f(*value)?;
            }
            TypeSpec::Struct(s) => {
                for field in &mut s.fields {
                    field.spec = f(field.spec)?;
                }
            }
            TypeSpec::Typedef(t) => {
                t.target = f(t.target)?;
            }
            TypeSpec::Primitive(_) | TypeSpec::Enum(_) | TypeSpec::Reference(_) => {}
        }
        Ok(())
    }

    /// Immediate child handles, in the order `transform_dependencies` visits
    /// them.
    pub fn dependencies(&self) -> Vec<SpecId> {
        match self {
            TypeSpec::List { value } | TypeSpec::Set { value } => vec![*value],
            TypeSpec::Map { key, value } => vec![*key, *value],
            TypeSpec::Struct(s) => s.fields.iter().map(|field| field.spec).collect(),
            TypeSpec::Typedef(t) => vec![t.target],
            TypeSpec::Primitive(_) | TypeSpec::Enum(_) | TypeSpec::Reference(_) => Vec::new(),
        }
    }
}
