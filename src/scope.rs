use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::{
    LinkError, LinkErrorKind, LinkResult, PrimitiveType, SpecId, TType, TypeReference, TypeSpec,
};

/// Type descriptors of one schema, before linking.
///
/// Holds an arena of descriptors and the table of named types. Named entries
/// and descriptor children may be [`TypeSpec::Reference`]s to names declared
/// later or not at all; [`Linker`](crate::Linker) resolves them.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    specs: Vec<TypeSpec>,
    names: IndexMap<String, SpecId>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an anonymous descriptor, such as a container instance or a
    /// reference, and returns its handle.
    pub fn alloc(&mut self, spec: TypeSpec) -> SpecId {
        let id = SpecId::new(self.specs.len());
        self.specs.push(spec);
        id
    }

    /// Adds a descriptor under `name`.
    pub fn add_type(&mut self, name: impl Into<String>, spec: TypeSpec) -> LinkResult<SpecId> {
        let id = SpecId::new(self.specs.len());
        match self.names.entry(name.into()) {
            Entry::Occupied(entry) => Err(LinkError::new(LinkErrorKind::DuplicateType {
                name: entry.key().clone(),
            })),
            Entry::Vacant(entry) => {
                entry.insert(id);
                self.specs.push(spec);
                Ok(id)
            }
        }
    }

    /// Shorthand for allocating a reference to `name` seen on line `lineno`.
    pub fn reference(&mut self, name: impl Into<String>, lineno: u32) -> SpecId {
        self.alloc(TypeSpec::Reference(TypeReference {
            name: name.into(),
            lineno,
        }))
    }

    pub fn primitive(&mut self, primitive: PrimitiveType) -> SpecId {
        self.alloc(TypeSpec::Primitive(primitive))
    }

    pub fn get(&self, name: &str) -> Option<SpecId> {
        self.names.get(name).copied()
    }

    /// Returns the descriptor behind `id`.
    ///
    /// # Panics
    ///
    /// If `id` was not allocated by this scope.
    pub fn spec(&self, id: SpecId) -> &TypeSpec {
        &self.specs[id.index()]
    }

    pub(crate) fn spec_mut(&mut self, id: SpecId) -> &mut TypeSpec {
        &mut self.specs[id.index()]
    }

    /// Named types in declaration order.
    pub fn names(&self) -> impl Iterator<Item = (&str, SpecId)> {
        self.names.iter().map(|(name, id)| (name.as_str(), *id))
    }

    pub(crate) fn names_mut(&mut self) -> impl Iterator<Item = &mut SpecId> {
        self.names.values_mut()
    }

    /// Number of named types.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub(crate) fn into_linked(self) -> LinkedScope {
        LinkedScope {
            specs: self.specs,
            names: self.names,
        }
    }
}

/// Type descriptors of one schema, after linking.
///
/// No [`TypeSpec::Reference`] is reachable from a named type. A linked scope
/// cannot be modified and may be shared freely between threads.
#[derive(Debug, Clone)]
pub struct LinkedScope {
    specs: Vec<TypeSpec>,
    names: IndexMap<String, SpecId>,
}

impl LinkedScope {
    pub fn get(&self, name: &str) -> Option<SpecId> {
        self.names.get(name).copied()
    }

    /// Returns the descriptor behind `id`.
    ///
    /// # Panics
    ///
    /// If `id` was not allocated by the scope this was linked from.
    pub fn spec(&self, id: SpecId) -> &TypeSpec {
        &self.specs[id.index()]
    }

    /// Returns the descriptor named `name`.
    pub fn lookup(&self, name: &str) -> Option<&TypeSpec> {
        self.get(name).map(|id| self.spec(id))
    }

    /// Named types in declaration order.
    pub fn names(&self) -> impl Iterator<Item = (&str, SpecId)> {
        self.names.iter().map(|(name, id)| (name.as_str(), *id))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Follows typedefs from `id` to the first descriptor that is not one.
    pub fn resolve_typedefs(&self, mut id: SpecId) -> SpecId {
        while let TypeSpec::Typedef(t) = self.spec(id) {
            id = t.target;
        }
        id
    }

    /// The wire type code values of descriptor `id` are written with.
    ///
    /// `None` only for handles to unreachable reference slots.
    pub fn ttype(&self, id: SpecId) -> Option<TType> {
        self.spec(self.resolve_typedefs(id)).ttype()
    }
}

#[cfg(test)]
mod tests {
    use super::{LinkedScope, Scope};
    use crate::{LinkError, LinkErrorKind, Linker, PrimitiveType, TType, TypeSpec};

    #[test]
    fn test_add_type_rejects_duplicates() {
        let mut scope = Scope::new();
        let first = scope
            .add_type("Id", TypeSpec::Primitive(PrimitiveType::I64))
            .unwrap();
        assert_eq!(scope.get("Id"), Some(first));

        assert_eq!(
            scope.add_type("Id", TypeSpec::Primitive(PrimitiveType::I32)),
            Err(LinkError::new(LinkErrorKind::DuplicateType {
                name: "Id".to_string()
            }))
        );
        // The original entry is untouched.
        assert_eq!(
            scope.spec(first),
            &TypeSpec::Primitive(PrimitiveType::I64)
        );
        assert_eq!(scope.len(), 1);
    }

    #[test]
    fn test_alloc_is_anonymous() {
        let mut scope = Scope::new();
        let r = scope.reference("Later", 3);
        assert!(scope.spec(r).is_reference());
        assert!(scope.is_empty());
        assert_eq!(scope.get("Later"), None);
    }

    #[test]
    fn test_names_in_declaration_order() {
        let mut scope = Scope::new();
        let b = scope
            .add_type("B", TypeSpec::Primitive(PrimitiveType::Bool))
            .unwrap();
        let a = scope
            .add_type("A", TypeSpec::Primitive(PrimitiveType::I16))
            .unwrap();
        assert_eq!(scope.names().collect::<Vec<_>>(), vec![("B", b), ("A", a)]);

        let linked = Linker::new(scope).link().unwrap();
        assert_eq!(linked.names().collect::<Vec<_>>(), vec![("B", b), ("A", a)]);
        assert_eq!(
            linked.lookup("A"),
            Some(&TypeSpec::Primitive(PrimitiveType::I16))
        );
        assert_eq!(linked.lookup("C"), None);
        assert_eq!(linked.ttype(b), Some(TType::Bool));
    }

    #[test]
    fn test_linked_scope_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LinkedScope>();
    }
}
