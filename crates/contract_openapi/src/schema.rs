//! crates/contract_openapi/src/schema.rs
//!
//! The schema capability the generator relies on. Route definitions hold
//! schemas as opaque `ContractSchema` values; the generator only ever asks
//! them for a description, their named fields, and their OpenAPI form.

use std::fmt;
use std::sync::Arc;
use utoipa::openapi::{RefOr, Schema};
use utoipa::ToSchema;

/// A shared handle to a schema, so one schema (e.g. `Problem`) can back
/// several routes and status codes.
pub type SchemaRef = Arc<dyn ContractSchema>;

/// One named field of an object-shaped schema.
#[derive(Debug, Clone)]
pub struct SchemaField {
    pub name: String,
    pub schema: RefOr<Schema>,
    pub required: bool,
    pub description: Option<String>,
}

/// What the generator needs to know about a payload schema.
pub trait ContractSchema: fmt::Debug + Send + Sync {
    /// The human description attached to the schema, if any.
    fn description(&self) -> Option<&str>;

    /// The named fields of the schema. Non-object schemas have none.
    fn shape(&self) -> Vec<SchemaField>;

    /// `true` when the schema declares no fields at all.
    fn is_empty(&self) -> bool {
        self.shape().is_empty()
    }

    /// Name under which the schema is published in `components.schemas`.
    /// Unnamed schemas are rendered inline.
    fn component_name(&self) -> Option<&str> {
        None
    }

    /// Named schemas this schema refers to through `$ref`.
    fn components(&self) -> Vec<(String, RefOr<Schema>)> {
        Vec::new()
    }

    /// The inline OpenAPI form of the schema.
    fn to_openapi(&self) -> RefOr<Schema>;
}

//=========================================================================================
// utoipa-backed implementation
//=========================================================================================

/// A `ContractSchema` backed by a utoipa schema value.
#[derive(Debug, Clone)]
pub struct OpenApiSchema {
    schema: RefOr<Schema>,
    name: Option<String>,
    dependencies: Vec<(String, RefOr<Schema>)>,
}

impl OpenApiSchema {
    /// Wraps a hand-built schema.
    pub fn new(schema: RefOr<Schema>) -> Self {
        Self {
            schema,
            name: None,
            dependencies: Vec::new(),
        }
    }

    /// Builds the schema of `T` and renders it inline wherever it is used.
    pub fn inline<T: ToSchema>() -> Self {
        let mut dependencies = Vec::new();
        T::schemas(&mut dependencies);
        Self {
            schema: T::schema(),
            name: None,
            dependencies,
        }
    }

    /// Builds the schema of `T` and publishes it as a component under `T::name()`.
    pub fn component<T: ToSchema>() -> Self {
        let name = T::name().into_owned();
        Self::inline::<T>().named(name)
    }

    /// Publishes the schema as a component under `name`.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Overrides the human description of the schema.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = Some(description.into());
        match &mut self.schema {
            RefOr::T(Schema::Object(object)) => object.description = description,
            RefOr::T(Schema::Array(array)) => array.description = description,
            RefOr::T(Schema::AllOf(all_of)) => all_of.description = description,
            RefOr::T(Schema::OneOf(one_of)) => one_of.description = description,
            _ => {}
        }
        self
    }

    /// Converts the schema into a shareable handle.
    pub fn into_ref(self) -> SchemaRef {
        Arc::new(self)
    }
}

impl From<OpenApiSchema> for SchemaRef {
    fn from(schema: OpenApiSchema) -> Self {
        schema.into_ref()
    }
}

impl ContractSchema for OpenApiSchema {
    fn description(&self) -> Option<&str> {
        match &self.schema {
            RefOr::Ref(reference) => self
                .resolve(&reference.ref_location)
                .and_then(schema_description),
            schema => schema_description(schema),
        }
    }

    fn shape(&self) -> Vec<SchemaField> {
        self.introspect().fields
    }

    fn is_empty(&self) -> bool {
        let shape = self.introspect();
        shape.fields.is_empty() && shape.complete
    }

    fn component_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn components(&self) -> Vec<(String, RefOr<Schema>)> {
        self.dependencies.clone()
    }

    fn to_openapi(&self) -> RefOr<Schema> {
        self.schema.clone()
    }
}

/// Fields gathered from a possibly composed schema.
struct Shape {
    fields: Vec<SchemaField>,
    /// `false` once a member could not be looked into (`oneOf`, unknown `$ref`, ...).
    complete: bool,
}

impl OpenApiSchema {
    fn resolve(&self, location: &str) -> Option<&RefOr<Schema>> {
        let name = location.rsplit('/').next()?;
        self.dependencies
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, schema)| schema)
    }

    // Object properties, merged across `allOf` members and resolved `$ref`s.
    fn introspect(&self) -> Shape {
        let mut shape = Shape {
            fields: Vec::new(),
            complete: true,
        };
        let mut visited = Vec::new();
        self.collect_fields(&self.schema, &mut visited, &mut shape);
        shape
    }

    fn collect_fields<'a>(
        &'a self,
        schema: &'a RefOr<Schema>,
        visited: &mut Vec<&'a str>,
        shape: &mut Shape,
    ) {
        match schema {
            RefOr::T(Schema::Object(object)) => {
                for (name, property) in &object.properties {
                    if shape.fields.iter().any(|f| f.name == *name) {
                        continue;
                    }
                    shape.fields.push(SchemaField {
                        name: name.clone(),
                        schema: property.clone(),
                        required: object.required.iter().any(|r| r == name),
                        description: schema_description(property).map(str::to_string),
                    });
                }
            }
            RefOr::T(Schema::AllOf(all_of)) => {
                for member in &all_of.items {
                    self.collect_fields(member, visited, shape);
                }
            }
            RefOr::Ref(reference) => {
                let location = reference.ref_location.as_str();
                if visited.contains(&location) {
                    return;
                }
                visited.push(location);
                match self.resolve(location) {
                    Some(target) => self.collect_fields(target, visited, shape),
                    None => shape.complete = false,
                }
            }
            _ => shape.complete = false,
        }
    }
}

fn schema_description(schema: &RefOr<Schema>) -> Option<&str> {
    match schema {
        RefOr::T(Schema::Object(object)) => object.description.as_deref(),
        RefOr::T(Schema::Array(array)) => array.description.as_deref(),
        RefOr::T(Schema::AllOf(all_of)) => all_of.description.as_deref(),
        RefOr::T(Schema::OneOf(one_of)) => one_of.description.as_deref(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::openapi::schema::{AllOfBuilder, ObjectBuilder, OneOfBuilder, Ref, Type};

    /// A ping sent between services.
    #[derive(ToSchema)]
    #[allow(dead_code)]
    struct Ping {
        message: String,
        count: Option<u32>,
    }

    fn header_schema() -> OpenApiSchema {
        OpenApiSchema::new(RefOr::T(Schema::Object(
            ObjectBuilder::new()
                .property("authorization", ObjectBuilder::new().schema_type(Type::String))
                .required("authorization")
                .property("x-trace", ObjectBuilder::new().schema_type(Type::String))
                .build(),
        )))
    }

    #[test]
    fn test_shape_lists_fields_with_required_flags() {
        let shape = header_schema().shape();
        assert_eq!(shape.len(), 2);
        let auth = shape.iter().find(|f| f.name == "authorization").unwrap();
        assert!(auth.required);
        let trace = shape.iter().find(|f| f.name == "x-trace").unwrap();
        assert!(!trace.required);
    }

    #[test]
    fn test_empty_object_is_empty() {
        let empty = OpenApiSchema::new(RefOr::T(Schema::Object(ObjectBuilder::new().build())));
        assert!(empty.is_empty());
        assert!(!header_schema().is_empty());
    }

    #[test]
    fn test_description_override() {
        assert_eq!(header_schema().description(), None);
        let described = header_schema().with_description("Auth headers");
        assert_eq!(described.description(), Some("Auth headers"));
    }

    #[test]
    fn test_derived_schema_carries_doc_comment_and_name() {
        let inline = OpenApiSchema::inline::<Ping>();
        assert_eq!(inline.component_name(), None);
        assert_eq!(inline.description(), Some("A ping sent between services."));

        let component = OpenApiSchema::component::<Ping>();
        assert_eq!(component.component_name(), Some("Ping"));
        let message = component
            .shape()
            .into_iter()
            .find(|f| f.name == "message")
            .unwrap();
        assert!(message.required);
    }

    fn paging() -> RefOr<Schema> {
        RefOr::T(Schema::Object(
            ObjectBuilder::new()
                .property("size", ObjectBuilder::new().schema_type(Type::Integer))
                .required("size")
                .property("cursor", ObjectBuilder::new().schema_type(Type::String))
                .build(),
        ))
    }

    fn composed(reference: &str) -> OpenApiSchema {
        let all_of = AllOfBuilder::new()
            .item(Ref::from_schema_name(reference))
            .item(
                ObjectBuilder::new()
                    .property("q", ObjectBuilder::new().schema_type(Type::String))
                    .required("q"),
            )
            .build();
        OpenApiSchema {
            schema: RefOr::T(Schema::AllOf(all_of)),
            name: None,
            dependencies: vec![("Paging".to_string(), paging())],
        }
    }

    #[test]
    fn test_all_of_members_are_merged_through_refs() {
        let schema = composed("Paging");
        let mut names: Vec<(String, bool)> = schema
            .shape()
            .into_iter()
            .map(|f| (f.name, f.required))
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                ("cursor".to_string(), false),
                ("q".to_string(), true),
                ("size".to_string(), true),
            ]
        );
        assert!(!schema.is_empty());
    }

    #[test]
    fn test_opaque_schemas_are_never_empty() {
        let unresolved = composed("Missing");
        assert_eq!(unresolved.shape().len(), 1);
        assert!(!unresolved.is_empty());

        let one_of = OpenApiSchema::new(RefOr::T(Schema::OneOf(
            OneOfBuilder::new()
                .item(ObjectBuilder::new().schema_type(Type::String))
                .build(),
        )));
        assert!(one_of.shape().is_empty());
        assert!(!one_of.is_empty());
    }

    #[test]
    fn test_top_level_ref_resolves_fields_and_description() {
        let schema = OpenApiSchema {
            schema: RefOr::Ref(Ref::from_schema_name("Paging")),
            name: None,
            dependencies: vec![(
                "Paging".to_string(),
                OpenApiSchema::new(paging()).with_description("A page").to_openapi(),
            )],
        };
        assert_eq!(schema.shape().len(), 2);
        assert_eq!(schema.description(), Some("A page"));
    }
}
