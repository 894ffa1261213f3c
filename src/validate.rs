use crate::{
    LinkedScope, Requiredness, SpecId, StructKind, StructSpec, StructValue, TType, TypeSpec,
    ValidationError, ValidationErrorKind, ValidationResult, Value,
};

fn mismatch(expected: TType, actual: TType) -> ValidationError {
    ValidationError::new(ValidationErrorKind::TypeMismatch { expected, actual })
}

impl LinkedScope {
    /// Checks that `value` has the shape the descriptor `id` describes.
    ///
    /// Fields the descriptor does not declare are ignored, as is a field
    /// whose type code differs from the declared one (it counts as absent).
    /// Element types of empty containers are not checked.
    pub fn validate(&self, id: SpecId, value: &Value) -> ValidationResult<()> {
        match (self.spec(id), value) {
            (TypeSpec::Typedef(t), _) => self.validate(t.target, value),
            (TypeSpec::Primitive(p), _) => {
                if p.ttype() == value.ttype() {
                    Ok(())
                } else {
                    Err(mismatch(p.ttype(), value.ttype()))
                }
            }
            (TypeSpec::Enum(e), Value::I32(v)) => {
                if e.contains(*v) {
                    Ok(())
                } else {
                    Err(ValidationError::new(ValidationErrorKind::UnknownEnumValue {
                        name: e.name.clone(),
                        value: *v,
                    }))
                }
            }
            (TypeSpec::List { value: elem }, Value::List(list)) => list
                .values()
                .iter()
                .try_for_each(|v| self.validate(*elem, v)),
            (TypeSpec::Set { value: elem }, Value::Set(set)) => set
                .values()
                .iter()
                .try_for_each(|v| self.validate(*elem, v)),
            (TypeSpec::Map { key, value: val }, Value::Map(map)) => {
                map.items().iter().try_for_each(|item| {
                    self.validate(*key, &item.key)?;
                    self.validate(*val, &item.value)
                })
            }
            (TypeSpec::Struct(spec), Value::Struct(s)) => self.validate_struct(spec, s),
            // Only unreachable slots still hold references after linking.
            (TypeSpec::Reference(_), _) => Ok(()),
            (spec, _) => match spec.ttype() {
                Some(expected) => Err(mismatch(expected, value.ttype())),
                None => Ok(()),
            },
        }
    }

    fn validate_struct(&self, spec: &StructSpec, value: &StructValue) -> ValidationResult<()> {
        let mut present = 0;
        for field in &spec.fields {
            let Some(ttype) = self.ttype(field.spec) else {
                continue;
            };
            match value.get(field.id, ttype) {
                Some(f) => {
                    present += 1;
                    self.validate(field.spec, &f.value)?;
                }
                None if field.requiredness == Requiredness::Required => {
                    return Err(ValidationError::new(
                        ValidationErrorKind::MissingRequiredField {
                            name: spec.name.clone(),
                            id: field.id,
                        },
                    ));
                }
                None => {}
            }
        }

        if spec.kind == StructKind::Union && present != 1 {
            return Err(ValidationError::new(ValidationErrorKind::UnionFieldCount {
                name: spec.name.clone(),
                count: present,
            }));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use crate::{
        EnumSpec, FieldSpec, FieldValue, LinkedScope, Linker, ListValue, MapItem, MapValue,
        PrimitiveType, Requiredness, Scope, SpecId, StructKind, StructSpec, StructValue, TType,
        TypeSpec, TypedefSpec, ValidationErrorKind, Value,
    };

    struct Schema {
        scope: LinkedScope,
        user: SpecId,
        shape: SpecId,
        tags: SpecId,
    }

    // enum Role { ADMIN = 1, GUEST = 2 }
    // typedef i64 UserId
    // struct User { 1: required UserId id, 2: optional string name, 3: Role role }
    // union Shape { 1: double radius, 2: double side }
    // Tags: map<string, list<i16>>
    fn schema() -> Schema {
        let mut scope = Scope::new();
        scope
            .add_type(
                "Role",
                TypeSpec::Enum(EnumSpec {
                    name: "Role".to_string(),
                    items: vec![("ADMIN".to_string(), 1), ("GUEST".to_string(), 2)],
                }),
            )
            .unwrap();
        let i64_id = scope.primitive(PrimitiveType::I64);
        scope
            .add_type(
                "UserId",
                TypeSpec::Typedef(TypedefSpec {
                    name: "UserId".to_string(),
                    target: i64_id,
                    lineno: 2,
                }),
            )
            .unwrap();

        let id_ref = scope.reference("UserId", 3);
        let string = scope.primitive(PrimitiveType::String);
        let role_ref = scope.reference("Role", 3);
        let user = scope
            .add_type(
                "User",
                TypeSpec::Struct(StructSpec {
                    name: "User".to_string(),
                    kind: StructKind::Struct,
                    fields: vec![
                        FieldSpec {
                            id: 1,
                            name: "id".to_string(),
                            requiredness: Requiredness::Required,
                            spec: id_ref,
                        },
                        FieldSpec {
                            id: 2,
                            name: "name".to_string(),
                            requiredness: Requiredness::Optional,
                            spec: string,
                        },
                        FieldSpec {
                            id: 3,
                            name: "role".to_string(),
                            requiredness: Requiredness::Default,
                            spec: role_ref,
                        },
                    ],
                }),
            )
            .unwrap();

        let double = scope.primitive(PrimitiveType::Double);
        let shape = scope
            .add_type(
                "Shape",
                TypeSpec::Struct(StructSpec {
                    name: "Shape".to_string(),
                    kind: StructKind::Union,
                    fields: vec![
                        FieldSpec {
                            id: 1,
                            name: "radius".to_string(),
                            requiredness: Requiredness::Default,
                            spec: double,
                        },
                        FieldSpec {
                            id: 2,
                            name: "side".to_string(),
                            requiredness: Requiredness::Default,
                            spec: double,
                        },
                    ],
                }),
            )
            .unwrap();

        let i16_id = scope.primitive(PrimitiveType::I16);
        let list = scope.alloc(TypeSpec::List { value: i16_id });
        let tags = scope
            .add_type(
                "Tags",
                TypeSpec::Map {
                    key: string,
                    value: list,
                },
            )
            .unwrap();

        Schema {
            scope: Linker::new(scope).link().unwrap(),
            user,
            shape,
            tags,
        }
    }

    fn user(fields: Vec<FieldValue>) -> Value {
        Value::Struct(StructValue::new(fields))
    }

    #[test]
    fn test_valid_struct() {
        let schema = schema();
        let value = user(vec![
            FieldValue::new(1, TType::I64, Value::I64(42)),
            FieldValue::new(2, TType::Binary, Value::Binary(Bytes::from_static(b"alice"))),
            FieldValue::new(3, TType::I32, Value::I32(2)),
            // Undeclared fields are ignored.
            FieldValue::new(99, TType::Bool, Value::Bool(true)),
        ]);
        assert_eq!(schema.scope.validate(schema.user, &value), Ok(()));
    }

    #[test]
    fn test_missing_required_field() {
        let schema = schema();
        let err = schema
            .scope
            .validate(schema.user, &user(vec![FieldValue::new(3, TType::I32, Value::I32(1))]))
            .unwrap_err();
        assert_eq!(
            err.kind(),
            &ValidationErrorKind::MissingRequiredField {
                name: "User".to_string(),
                id: 1
            }
        );
    }

    #[test]
    fn test_required_field_with_wrong_type_is_missing() {
        let schema = schema();
        let value = user(vec![FieldValue::new(1, TType::I32, Value::I32(42))]);
        assert!(matches!(
            schema.scope.validate(schema.user, &value).unwrap_err().kind(),
            ValidationErrorKind::MissingRequiredField { id: 1, .. }
        ));
    }

    #[test]
    fn test_unknown_enum_value() {
        let schema = schema();
        let value = user(vec![
            FieldValue::new(1, TType::I64, Value::I64(1)),
            FieldValue::new(3, TType::I32, Value::I32(7)),
        ]);
        assert_eq!(
            schema.scope.validate(schema.user, &value).unwrap_err().kind(),
            &ValidationErrorKind::UnknownEnumValue {
                name: "Role".to_string(),
                value: 7
            }
        );
    }

    #[test]
    fn test_union_field_count() {
        let schema = schema();
        let one = user(vec![FieldValue::new(2, TType::Double, Value::Double(1.5))]);
        assert_eq!(schema.scope.validate(schema.shape, &one), Ok(()));

        let none = user(vec![]);
        assert_eq!(
            schema.scope.validate(schema.shape, &none).unwrap_err().kind(),
            &ValidationErrorKind::UnionFieldCount {
                name: "Shape".to_string(),
                count: 0
            }
        );

        let both = user(vec![
            FieldValue::new(1, TType::Double, Value::Double(1.0)),
            FieldValue::new(2, TType::Double, Value::Double(2.0)),
        ]);
        assert!(matches!(
            schema.scope.validate(schema.shape, &both).unwrap_err().kind(),
            ValidationErrorKind::UnionFieldCount { count: 2, .. }
        ));
    }

    #[test]
    fn test_containers() {
        let schema = schema();
        let good = Value::Map(MapValue::new(
            TType::Binary,
            TType::List,
            vec![MapItem::new(
                Value::Binary(Bytes::from_static(b"a")),
                Value::List(ListValue::new(TType::I16, vec![Value::I16(1), Value::I16(2)])),
            )],
        ));
        assert_eq!(schema.scope.validate(schema.tags, &good), Ok(()));

        let bad = Value::Map(MapValue::new(
            TType::Binary,
            TType::List,
            vec![MapItem::new(
                Value::Binary(Bytes::from_static(b"a")),
                Value::List(ListValue::new(TType::I32, vec![Value::I32(1)])),
            )],
        ));
        assert_eq!(
            schema.scope.validate(schema.tags, &bad).unwrap_err().kind(),
            &ValidationErrorKind::TypeMismatch {
                expected: TType::I16,
                actual: TType::I32
            }
        );
    }

    #[test]
    fn test_top_level_mismatch() {
        let schema = schema();
        assert_eq!(
            schema
                .scope
                .validate(schema.user, &Value::I32(1))
                .unwrap_err()
                .kind(),
            &ValidationErrorKind::TypeMismatch {
                expected: TType::Struct,
                actual: TType::I32
            }
        );
    }
}
