use std::collections::{HashSet, VecDeque};

use crate::{LinkError, LinkErrorKind, LinkResult, LinkedScope, Scope, SpecId, TypeSpec};

/// Resolves the type references of a [`Scope`].
///
/// Linking consumes the scope and hands back a [`LinkedScope`], so an
/// unlinked scope can never be used where a linked one is expected and a
/// scope cannot be linked twice.
pub struct Linker {
    scope: Scope,
}

impl Linker {
    pub fn new(scope: Scope) -> Self {
        Linker { scope }
    }

    /// Follows a chain of references starting at `id` and returns the first
    /// descriptor that is not a reference.
    ///
    /// The children of the returned descriptor are left alone.
    pub fn resolve(&self, mut id: SpecId) -> LinkResult<SpecId> {
        let mut visited = HashSet::new();
        while let TypeSpec::Reference(reference) = self.scope.spec(id) {
            if !visited.insert(reference.name.as_str()) {
                return Err(LinkError::new(LinkErrorKind::SelfReference {
                    name: reference.name.clone(),
                    lineno: reference.lineno,
                }));
            }
            id = self.scope.get(&reference.name).ok_or_else(|| {
                LinkError::new(LinkErrorKind::UnknownType {
                    name: reference.name.clone(),
                    lineno: reference.lineno,
                })
            })?;
            tracing::trace!(name = %reference.name, target = %id, "resolved type reference");
        }
        Ok(id)
    }

    /// Rejects typedefs that lead back to themselves through other typedefs
    /// and references.
    fn check_typedef_chain(&self, mut id: SpecId) -> LinkResult<()> {
        let mut visited = HashSet::new();
        while let TypeSpec::Typedef(typedef) = self.scope.spec(id) {
            if !visited.insert(id) {
                return Err(LinkError::new(LinkErrorKind::SelfReference {
                    name: typedef.name.clone(),
                    lineno: typedef.lineno,
                }));
            }
            id = self.resolve(typedef.target)?;
        }
        Ok(())
    }

    /// Resolves every reference reachable from a named type.
    ///
    /// Each distinct descriptor has its children resolved once, however many
    /// descriptors point at it, so recursive types (a struct holding a list of
    /// itself) terminate and come out as cycles in the descriptor graph.
    pub fn link(mut self) -> LinkResult<LinkedScope> {
        tracing::debug!(types = self.scope.len(), "linking scope");

        let mut to_link = VecDeque::new();

        let named: Vec<SpecId> = self.scope.names().map(|(_, id)| id).collect();
        let mut resolved_names = Vec::with_capacity(named.len());
        for id in named {
            let resolved = self.resolve(id)?;
            resolved_names.push(resolved);
            to_link.push_back(resolved);
        }
        for (slot, resolved) in self.scope.names_mut().zip(resolved_names) {
            *slot = resolved;
        }

        let mut visited = HashSet::new();
        while let Some(id) = to_link.pop_front() {
            if !visited.insert(id) {
                continue;
            }
            self.check_typedef_chain(id)?;

            let mut spec = self.scope.spec(id).clone();
            spec.transform_dependencies(|child| {
                let child = self.resolve(child)?;
                if !visited.contains(&child) {
                    to_link.push_back(child);
                }
                Ok::<_, LinkError>(child)
            })?;
            *self.scope.spec_mut(id) = spec;
        }

        tracing::debug!(linked = visited.len(), "linked scope");
        Ok(self.scope.into_linked())
    }
}
