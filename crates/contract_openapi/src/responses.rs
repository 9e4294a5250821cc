//! crates/contract_openapi/src/responses.rs
//!
//! Turns a route's status-code → schema mapping into documented responses.

use crate::schema::SchemaRef;
use std::collections::BTreeMap;

/// One documented response of an operation.
#[derive(Debug, Clone)]
pub struct ResponseEntry {
    /// Never empty: falls back to the status code itself.
    pub description: String,
    /// `None` for responses without a body.
    pub content: Option<SchemaRef>,
}

/// Builds the response table, keeping the ascending status-code order.
pub fn build_responses(
    responses: &BTreeMap<u16, Option<SchemaRef>>,
) -> BTreeMap<u16, ResponseEntry> {
    responses
        .iter()
        .map(|(status, schema)| {
            let description = schema
                .as_ref()
                .and_then(|s| s.description())
                .filter(|d| !d.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| status.to_string());
            let entry = ResponseEntry {
                description,
                content: schema.clone(),
            };
            (*status, entry)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::OpenApiSchema;
    use utoipa::openapi::schema::{ObjectBuilder, Type};
    use utoipa::openapi::{RefOr, Schema};

    fn string_schema() -> OpenApiSchema {
        OpenApiSchema::new(RefOr::T(Schema::Object(
            ObjectBuilder::new().schema_type(Type::String).build(),
        )))
    }

    #[test]
    fn test_description_comes_from_schema_or_status_code() {
        let responses = BTreeMap::from([
            (200, Some(string_schema().with_description("The signal").into_ref())),
            (206, Some(string_schema().into_ref())),
            (204, None),
        ]);

        let table = build_responses(&responses);
        assert_eq!(table[&200].description, "The signal");
        assert_eq!(table[&206].description, "206");
        assert_eq!(table[&204].description, "204");
    }

    #[test]
    fn test_content_is_omitted_for_bodyless_responses() {
        let responses = BTreeMap::from([(204, None), (200, Some(string_schema().into_ref()))]);
        let table = build_responses(&responses);
        assert!(table[&204].content.is_none());
        assert!(table[&200].content.is_some());

        let order: Vec<u16> = table.keys().copied().collect();
        assert_eq!(order, vec![200, 204]);
    }
}
