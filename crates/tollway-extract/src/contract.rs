//! Route parameter contracts.
//!
//! A [`Contract`] lists the parameters a route binds, in the order the handler
//! sees them, plus the optional type of its response body.

use std::collections::HashSet;
use std::sync::Arc;

use tollway_core::{FieldType, Schema, Value};
use tollway_router::PathPattern;

use crate::error::{ContractError, ParamSource};

/// How a parameter is bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// A single path variable
    Path,
    /// A single query parameter
    Query,
    /// Every query parameter, validated together as one schema
    QueryObject,
    /// The whole request body
    Body,
}

impl ParamKind {
    /// Returns the request part the parameter is read from.
    #[must_use]
    pub fn source(self) -> ParamSource {
        match self {
            Self::Path => ParamSource::Path,
            Self::Query | Self::QueryObject => ParamSource::Query,
            Self::Body => ParamSource::Body,
        }
    }
}

/// A declared route parameter.
///
/// Path parameters are always required and never have a default; there is
/// no constructor that would allow otherwise.
///
/// # Example
///
/// ```rust
/// use tollway_core::{FieldType, Value};
/// use tollway_extract::{ParamSource, ParamSpec};
///
/// let limit = ParamSpec::query_with_default("limit", FieldType::Integer, 10i64);
/// assert_eq!(limit.source(), ParamSource::Query);
/// assert_eq!(limit.default(), Some(&Value::Int(10)));
///
/// let name = ParamSpec::path("name", FieldType::String);
/// assert!(name.is_required());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    name: String,
    kind: ParamKind,
    ty: FieldType,
    default: Option<Value>,
}

impl ParamSpec {
    fn new(name: impl Into<String>, kind: ParamKind, ty: FieldType, default: Option<Value>) -> Self {
        Self {
            name: name.into(),
            kind,
            ty,
            default,
        }
    }

    /// A path variable.
    pub fn path(name: impl Into<String>, ty: FieldType) -> Self {
        Self::new(name, ParamKind::Path, ty, None)
    }

    /// A required query parameter.
    pub fn query(name: impl Into<String>, ty: FieldType) -> Self {
        Self::new(name, ParamKind::Query, ty, None)
    }

    /// A query parameter that falls back to `default` when absent.
    pub fn query_with_default(
        name: impl Into<String>,
        ty: FieldType,
        default: impl Into<Value>,
    ) -> Self {
        Self::new(name, ParamKind::Query, ty, Some(default.into()))
    }

    /// A nullable query parameter that defaults to `null`.
    pub fn query_optional(name: impl Into<String>, ty: FieldType) -> Self {
        Self::new(
            name,
            ParamKind::Query,
            FieldType::optional(ty),
            Some(Value::Null),
        )
    }

    /// All query parameters, bundled into one schema.
    pub fn query_object(name: impl Into<String>, schema: impl Into<Arc<Schema>>) -> Self {
        Self::new(name, ParamKind::QueryObject, FieldType::Object(schema.into()), None)
    }

    /// A required JSON body.
    pub fn body(name: impl Into<String>, schema: impl Into<Arc<Schema>>) -> Self {
        Self::new(name, ParamKind::Body, FieldType::Object(schema.into()), None)
    }

    /// A JSON body of any declared type, optionally defaulted when empty.
    pub fn body_of(name: impl Into<String>, ty: FieldType, default: Option<Value>) -> Self {
        Self::new(name, ParamKind::Body, ty, default)
    }

    /// The parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// How the parameter is bound.
    #[must_use]
    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    /// The request part the parameter is read from.
    #[must_use]
    pub fn source(&self) -> ParamSource {
        self.kind.source()
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

    /// Returns true if absence is an error.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// The declared parameters and response type of a route.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contract {
    params: Vec<ParamSpec>,
    response: Option<FieldType>,
}

impl Contract {
    /// Creates an empty contract.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter.
    #[must_use]
    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    /// Sets the response type.
    #[must_use]
    pub fn response(mut self, ty: FieldType) -> Self {
        self.response = Some(ty);
        self
    }

    /// The parameters in declaration order.
    #[must_use]
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// The declared response type.
    #[must_use]
    pub fn response_type(&self) -> Option<&FieldType> {
        self.response.as_ref()
    }

    /// The body parameter, if any.
    #[must_use]
    pub fn body_param(&self) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.kind == ParamKind::Body)
    }

    /// Checks the contract against the route pattern.
    pub fn check(&self, pattern: &PathPattern) -> Result<(), ContractError> {
        let mut seen = HashSet::new();
        let mut body: Option<&str> = None;
        let mut query_object: Option<&str> = None;
        let mut first_query: Option<&str> = None;

        for spec in &self.params {
            if !seen.insert(spec.name.as_str()) {
                return Err(ContractError::DuplicateParameter(spec.name.clone()));
            }

            match spec.kind {
                ParamKind::Path => {
                    if !pattern.variables().any(|v| v == spec.name) {
                        return Err(ContractError::UnknownPathParameter {
                            name: spec.name.clone(),
                            pattern: pattern.to_string(),
                        });
                    }
                    if matches!(
                        spec.ty,
                        FieldType::List(_) | FieldType::Object(_) | FieldType::Optional(_)
                    ) {
                        return Err(ContractError::NonScalarPathParameter {
                            name: spec.name.clone(),
                            ty: spec.ty.to_string(),
                        });
                    }
                }
                ParamKind::Query => {
                    if let Some(object) = query_object {
                        return Err(mixed(object, &spec.name));
                    }
                    if !is_query_compatible(&spec.ty) {
                        return Err(ContractError::UnsupportedQueryType {
                            name: spec.name.clone(),
                            ty: spec.ty.to_string(),
                        });
                    }
                    first_query.get_or_insert(spec.name.as_str());
                }
                ParamKind::QueryObject => {
                    if let Some(first) = query_object {
                        return Err(ContractError::MultipleQueryObjects {
                            first: first.to_string(),
                            second: spec.name.clone(),
                        });
                    }
                    if let Some(param) = first_query {
                        return Err(mixed(&spec.name, param));
                    }
                    let fields = spec.ty.schema().map(|s| s.fields()).unwrap_or_default();
                    if let Some(field) = fields.iter().find(|f| !is_query_compatible(f.ty())) {
                        return Err(ContractError::UnsupportedQueryType {
                            name: field.name().to_string(),
                            ty: field.ty().to_string(),
                        });
                    }
                    query_object = Some(spec.name.as_str());
                }
                ParamKind::Body => {
                    if let Some(first) = body {
                        return Err(ContractError::MultipleBodies {
                            first: first.to_string(),
                            second: spec.name.clone(),
                        });
                    }
                    body = Some(spec.name.as_str());
                }
            }
        }

        for variable in pattern.variables() {
            let declared = self
                .params
                .iter()
                .any(|p| p.kind == ParamKind::Path && p.name == variable);
            if !declared {
                return Err(ContractError::UndeclaredPathVariable {
                    name: variable.to_string(),
                    pattern: pattern.to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Nested objects cannot be expressed in a flat query string.
fn is_query_compatible(ty: &FieldType) -> bool {
    match ty {
        FieldType::Object(_) => false,
        FieldType::List(item) | FieldType::Optional(item) => is_query_compatible(item),
        _ => true,
    }
}

fn mixed(object: &str, param: &str) -> ContractError {
    ContractError::MixedQueryStyles {
        object: object.to_string(),
        param: param.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(s: &str) -> PathPattern {
        PathPattern::parse(s).unwrap()
    }

    fn item() -> Schema {
        Schema::builder("Item").field("name", FieldType::String).build()
    }

    #[test]
    fn test_valid_contract() {
        let contract = Contract::new()
            .param(ParamSpec::path("item_id", FieldType::Integer))
            .param(ParamSpec::query_optional("q", FieldType::String))
            .param(ParamSpec::body("item", item()));

        assert!(contract.check(&pattern("/items/{item_id}")).is_ok());
        assert_eq!(contract.body_param().map(ParamSpec::name), Some("item"));
    }

    #[test]
    fn test_path_params_must_match_pattern() {
        let contract = Contract::new().param(ParamSpec::path("id", FieldType::Integer));
        assert!(matches!(
            contract.check(&pattern("/items/{item_id}")),
            Err(ContractError::UnknownPathParameter { .. })
        ));

        assert!(matches!(
            Contract::new().check(&pattern("/items/{item_id}")),
            Err(ContractError::UndeclaredPathVariable { .. })
        ));
    }

    #[test]
    fn test_path_params_must_be_scalar() {
        let contract = Contract::new().param(ParamSpec::path(
            "ids",
            FieldType::list(FieldType::Integer),
        ));
        assert!(matches!(
            contract.check(&pattern("/items/{ids}")),
            Err(ContractError::NonScalarPathParameter { .. })
        ));
    }

    #[test]
    fn test_duplicate_names() {
        let contract = Contract::new()
            .param(ParamSpec::query("q", FieldType::String))
            .param(ParamSpec::query("q", FieldType::Integer));
        assert_eq!(
            contract.check(&PathPattern::root()),
            Err(ContractError::DuplicateParameter("q".to_string()))
        );
    }

    #[test]
    fn test_single_body() {
        let contract = Contract::new()
            .param(ParamSpec::body("a", item()))
            .param(ParamSpec::body("b", item()));
        assert!(matches!(
            contract.check(&PathPattern::root()),
            Err(ContractError::MultipleBodies { .. })
        ));
    }

    #[test]
    fn test_query_params_must_be_flat() {
        let contract = Contract::new().param(ParamSpec::query(
            "owner",
            FieldType::object(item()),
        ));
        assert!(matches!(
            contract.check(&PathPattern::root()),
            Err(ContractError::UnsupportedQueryType { .. })
        ));

        let nested = Schema::builder("Filter")
            .field("owner", FieldType::object(item()))
            .build();
        let contract = Contract::new().param(ParamSpec::query_object("filter", nested));
        assert!(matches!(
            contract.check(&PathPattern::root()),
            Err(ContractError::UnsupportedQueryType { .. })
        ));

        let contract = Contract::new().param(ParamSpec::query_optional(
            "ids",
            FieldType::list(FieldType::Integer),
        ));
        assert!(contract.check(&PathPattern::root()).is_ok());
    }

    #[test]
    fn test_query_styles_do_not_mix() {
        let schema = Schema::builder("Search").field("q", FieldType::String).build();

        let contract = Contract::new()
            .param(ParamSpec::query_object("search", schema.clone()))
            .param(ParamSpec::query("limit", FieldType::Integer));
        assert!(matches!(
            contract.check(&PathPattern::root()),
            Err(ContractError::MixedQueryStyles { .. })
        ));

        let contract = Contract::new()
            .param(ParamSpec::query_object("a", schema.clone()))
            .param(ParamSpec::query_object("b", schema));
        assert!(matches!(
            contract.check(&PathPattern::root()),
            Err(ContractError::MultipleQueryObjects { .. })
        ));
    }
}
