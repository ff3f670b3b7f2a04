// Type assignment and structural checking

use crate::error::{NodePath, Violation, ViolationKind};
use crate::options::CheckOptions;
use crate::types::{ArrayItemType, ArrayType, DocumentType, MapItemType, MapType, Type};
use std::collections::BTreeMap;
use ytt_yamlmeta::{Array, Key, Map, Node, NodeRef, Position, Value};

/// The declared slot a value was found in.
///
/// Every value lives in a document, a map item or an array item; the slot
/// type is what an evaluator needs to know about it (declared type,
/// nullability, default).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AssignedType<'s> {
    Document(&'s DocumentType),
    MapItem(&'s MapItemType),
    ArrayItem(&'s ArrayItemType),
}

impl<'s> AssignedType<'s> {
    /// Declared type of the value in this slot, if the schema types it
    pub fn value_type(&self) -> Option<&'s Type> {
        match *self {
            AssignedType::Document(doc) => doc.value_type.as_ref(),
            AssignedType::MapItem(item) => Some(&item.value_type),
            AssignedType::ArrayItem(item) => Some(&item.value_type),
        }
    }

    pub fn is_nullable(&self) -> bool {
        match *self {
            AssignedType::MapItem(item) => item.is_nullable(),
            _ => self.value_type().is_some_and(Type::is_nullable),
        }
    }

    /// Default for the value in this slot; only map items declare one
    pub fn default_value(&self) -> Option<&'s Value> {
        match *self {
            AssignedType::MapItem(item) => Some(&item.default_value),
            _ => None,
        }
    }
}

/// Side table from node path to the slot type assigned during a check.
///
/// Data trees are never annotated in place; consumers look types up here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeAssignments<'s> {
    entries: BTreeMap<NodePath, AssignedType<'s>>,
}

impl<'s> TypeAssignments<'s> {
    pub fn get(&self, path: &NodePath) -> Option<AssignedType<'s>> {
        self.entries.get(path).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodePath, AssignedType<'s>)> {
        self.entries.iter().map(|(path, assigned)| (path, *assigned))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Outcome of checking a data node against a schema
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeCheck<'s> {
    violations: Vec<Violation>,
    assignments: TypeAssignments<'s>,
}

impl<'s> TypeCheck<'s> {
    /// A check that found nothing and assigned nothing
    pub fn accepted() -> Self {
        Self::default()
    }

    /// Whether the node conforms
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Violations in traversal order
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn assignments(&self) -> &TypeAssignments<'s> {
        &self.assignments
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

/// Check state threaded through the traversal
struct CheckContext<'s, 'o> {
    options: &'o CheckOptions,
    path: NodePath,
    violations: Vec<Violation>,
    assignments: TypeAssignments<'s>,
}

impl<'s, 'o> CheckContext<'s, 'o> {
    fn new(options: &'o CheckOptions) -> Self {
        Self {
            options,
            path: NodePath::root(),
            violations: Vec::new(),
            assignments: TypeAssignments::default(),
        }
    }

    fn add_violation(&mut self, kind: ViolationKind, position: &Position) {
        tracing::trace!(path = %self.path, position = %position, "{}", kind.message());
        self.violations
            .push(Violation::new(kind, self.path.clone(), position.clone()));
    }

    fn assign(&mut self, assigned: AssignedType<'s>) {
        self.assignments.entries.insert(self.path.clone(), assigned);
    }

    fn with_key<F, R>(&mut self, key: &Key, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        self.path.push_key(key);
        let result = f(self);
        self.path.pop();
        result
    }

    fn with_index<F, R>(&mut self, index: usize, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        self.path.push_index(index);
        let result = f(self);
        self.path.pop();
        result
    }

    fn finish(self) -> TypeCheck<'s> {
        TypeCheck {
            violations: self.violations,
            assignments: self.assignments,
        }
    }
}

/// Check a node against a document type.
///
/// Only documents conform; any other node yields a single mismatch. Checking
/// continues past mismatches so that one pass reports every problem.
pub fn check_document<'s>(
    doc_type: &'s DocumentType,
    node: NodeRef<'_>,
    options: &CheckOptions,
) -> TypeCheck<'s> {
    let mut context = CheckContext::new(options);

    match node {
        NodeRef::Document(doc) => {
            context.assign(AssignedType::Document(doc_type));
            if let Some(value_type) = &doc_type.value_type {
                check_value(&doc.value, value_type, false, &doc.position, &mut context);
            }
        }
        other => context.add_violation(
            ViolationKind::MismatchedType {
                expected: "document".to_string(),
                found: other.kind().name().to_string(),
            },
            other.position(),
        ),
    }

    let check = context.finish();
    tracing::debug!(
        violations = check.violations.len(),
        assigned = check.assignments.len(),
        "Checked document against schema"
    );
    check
}

/// Check a value against its declared type.
///
/// `holder` is the position of the item or document holding the value.
/// `nullable` is the nullability declared by that holder.
fn check_value<'s>(
    value: &Value,
    declared: &'s Type,
    nullable: bool,
    holder: &Position,
    context: &mut CheckContext<'s, '_>,
) {
    match (declared, value) {
        (_, Value::Null) => {
            if !nullable && !declared.is_nullable() {
                context.add_violation(
                    ViolationKind::NullValue {
                        expected: declared.name().to_string(),
                    },
                    holder,
                );
            }
        }
        (Type::Map(map_type), Value::Map(map)) => check_map(map, map_type, context),
        (Type::Array(array_type), Value::Array(array)) => check_array(array, array_type, context),
        (Type::Scalar(scalar), other) if scalar.kind.accepts(other.kind()) => {}
        (_, other) => {
            let position = match other {
                Value::Map(map) => &map.position,
                Value::Array(array) => &array.position,
                _ => holder,
            };
            context.add_violation(
                ViolationKind::MismatchedType {
                    expected: declared.name().to_string(),
                    found: other.kind().name().to_string(),
                },
                position,
            );
        }
    }
}

fn check_map<'s>(map: &Map, map_type: &'s MapType, context: &mut CheckContext<'s, '_>) {
    for item in &map.items {
        context.with_key(&item.key, |ctx| match map_type.item(&item.key) {
            Some(item_type) => {
                ctx.assign(AssignedType::MapItem(item_type));
                check_value(
                    &item.value,
                    &item_type.value_type,
                    item_type.is_nullable(),
                    &item.position,
                    ctx,
                );
            }
            None => ctx.add_violation(
                ViolationKind::UnknownKey {
                    key: item.key.to_string(),
                },
                &item.position,
            ),
        });
    }

    for item_type in &map_type.items {
        if map.contains_key(&item_type.key) {
            continue;
        }
        let satisfied = item_type.is_nullable()
            || (context.options.defaults_satisfy_missing_keys && item_type.has_default());
        if !satisfied {
            context.add_violation(
                ViolationKind::MissingKey {
                    key: item_type.key.to_string(),
                },
                &map.position,
            );
        }
    }
}

fn check_array<'s>(array: &Array, array_type: &'s ArrayType, context: &mut CheckContext<'s, '_>) {
    for (index, item) in array.items.iter().enumerate() {
        context.with_index(index, |ctx| {
            ctx.assign(AssignedType::ArrayItem(&array_type.items_type));
            check_value(
                &item.value,
                array_type.element_type(),
                false,
                &item.position,
                ctx,
            );
        });
    }
}
