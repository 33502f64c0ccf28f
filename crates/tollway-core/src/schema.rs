//! Schema definitions.
//!
//! Schemas are plain data built at startup and interpreted by the validator.
//! A [`Schema`] is a named, ordered set of [`Field`]s; each field has a
//! [`FieldType`] and an optional default.

use std::fmt;
use std::sync::Arc;

use crate::value::Value;

/// The declared type of a field or parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// A string; only string input is accepted.
    String,
    /// A 64-bit signed integer.
    Integer,
    /// A floating point number.
    Number,
    /// A boolean.
    Boolean,
    /// Any value, accepted unchanged.
    Any,
    /// An ordered sequence of the inner type.
    List(Box<FieldType>),
    /// A nested schema.
    Object(Arc<Schema>),
    /// The inner type, or `null`.
    Optional(Box<FieldType>),
}

impl FieldType {
    /// A list of `item`.
    #[must_use]
    pub fn list(item: FieldType) -> Self {
        Self::List(Box::new(item))
    }

    /// `inner` or `null`.
    #[must_use]
    pub fn optional(inner: FieldType) -> Self {
        match inner {
            Self::Optional(_) => inner,
            other => Self::Optional(Box::new(other)),
        }
    }

    /// A nested schema.
    #[must_use]
    pub fn object(schema: impl Into<Arc<Schema>>) -> Self {
        Self::Object(schema.into())
    }

    /// Returns true if `null` is an acceptable value.
    #[must_use]
    pub fn accepts_null(&self) -> bool {
        matches!(self, Self::Optional(_) | Self::Any)
    }

    /// Returns true if this type is a list, looking through `Optional`.
    #[must_use]
    pub fn is_list(&self) -> bool {
        match self {
            Self::List(_) => true,
            Self::Optional(inner) => inner.is_list(),
            _ => false,
        }
    }

    /// Returns the schema, if this is an object type.
    #[must_use]
    pub fn schema(&self) -> Option<&Arc<Schema>> {
        match self {
            Self::Object(schema) => Some(schema),
            Self::Optional(inner) => inner.schema(),
            _ => None,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Integer => f.write_str("integer"),
            Self::Number => f.write_str("number"),
            Self::Boolean => f.write_str("boolean"),
            Self::Any => f.write_str("any"),
            Self::List(item) => write!(f, "list[{item}]"),
            Self::Object(schema) => f.write_str(schema.name()),
            Self::Optional(inner) => write!(f, "optional[{inner}]"),
        }
    }
}

/// A declared field of a [`Schema`].
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    ty: FieldType,
    default: Option<Value>,
}

impl Field {
    /// A required field.
    pub fn required(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
        }
    }

    /// A field that falls back to `default` when absent.
    pub fn with_default(name: impl Into<String>, ty: FieldType, default: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            ty,
            default: Some(default.into()),
        }
    }

    /// A nullable field that defaults to `null`.
    pub fn optional(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty: FieldType::optional(ty),
            default: Some(Value::Null),
        }
    }

    /// The field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type.
    #[must_use]
    pub fn ty(&self) -> &FieldType {
        &self.ty
    }

    /// The default value, if any.
    #[must_use]
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Returns true if the field must be present.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// A named, ordered set of fields.
///
/// # Example
///
/// ```rust
/// use tollway_core::{FieldType, Schema};
///
/// let owner = Schema::builder("Owner").field("name", FieldType::String).build();
/// let item = Schema::builder("Item")
///     .field("name", FieldType::String)
///     .optional("description", FieldType::String)
///     .field("owner", FieldType::object(owner))
///     .build();
///
/// assert_eq!(item.name(), "Item");
/// let names: Vec<_> = item.fields().iter().map(|f| f.name()).collect();
/// assert_eq!(names, vec!["name", "description", "owner"]);
/// assert!(item.field("description").is_some_and(|f| !f.is_required()));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    name: String,
    fields: Vec<Field>,
}

impl Schema {
    /// Starts building a schema.
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// The schema name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Builder for [`Schema`].
///
/// Declaring a field name twice replaces the earlier declaration in place.
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    name: String,
    fields: Vec<Field>,
}

impl SchemaBuilder {
    /// Adds a field.
    #[must_use]
    pub fn push(mut self, field: Field) -> Self {
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
        self
    }

    /// Adds a required field.
    #[must_use]
    pub fn field(self, name: impl Into<String>, ty: FieldType) -> Self {
        self.push(Field::required(name, ty))
    }

    /// Adds a field with a default.
    #[must_use]
    pub fn field_with_default(
        self,
        name: impl Into<String>,
        ty: FieldType,
        default: impl Into<Value>,
    ) -> Self {
        self.push(Field::with_default(name, ty, default))
    }

    /// Adds a nullable field defaulting to `null`.
    #[must_use]
    pub fn optional(self, name: impl Into<String>, ty: FieldType) -> Self {
        self.push(Field::optional(name, ty))
    }

    /// Finishes the schema.
    #[must_use]
    pub fn build(self) -> Schema {
        Schema {
            name: self.name,
            fields: self.fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_display() {
        assert_eq!(FieldType::Integer.to_string(), "integer");
        assert_eq!(FieldType::list(FieldType::String).to_string(), "list[string]");
        assert_eq!(
            FieldType::optional(FieldType::list(FieldType::Boolean)).to_string(),
            "optional[list[boolean]]"
        );
        let item = Schema::builder("Item").build();
        assert_eq!(FieldType::object(item).to_string(), "Item");
    }

    #[test]
    fn test_optional_does_not_nest() {
        let ty = FieldType::optional(FieldType::optional(FieldType::String));
        assert_eq!(ty, FieldType::Optional(Box::new(FieldType::String)));
        assert!(ty.accepts_null());
        assert!(!FieldType::String.accepts_null());
    }

    #[test]
    fn test_is_list_and_schema() {
        assert!(FieldType::optional(FieldType::list(FieldType::Integer)).is_list());
        assert!(!FieldType::Integer.is_list());

        let owner = Arc::new(Schema::builder("Owner").build());
        let ty = FieldType::optional(FieldType::Object(owner.clone()));
        assert_eq!(ty.schema(), Some(&owner));
    }

    #[test]
    fn test_redeclared_field_replaces_in_place() {
        let schema = Schema::builder("Query")
            .field("q", FieldType::String)
            .field("limit", FieldType::Integer)
            .field_with_default("q", FieldType::String, "all")
            .build();

        assert_eq!(schema.fields().len(), 2);
        assert_eq!(schema.fields()[0].name(), "q");
        assert_eq!(schema.fields()[0].default(), Some(&Value::from("all")));
    }

    #[test]
    fn test_optional_field_defaults_to_null() {
        let field = Field::optional("cursor", FieldType::String);
        assert_eq!(field.default(), Some(&Value::Null));
        assert!(!field.is_required());
        assert!(field.ty().accepts_null());
    }
}
