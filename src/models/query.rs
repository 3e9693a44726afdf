// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore `runQuery` request body.
//!
//! Only the subset needed to select one user's documents from a single
//! collection is modelled. Responses are passed through as raw JSON.

use serde::Serialize;

/// Pseudo-field addressing the document's full resource name.
pub const DOCUMENT_NAME_FIELD: &str = "__name__";

/// Body of `POST .../documents:runQuery`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunQueryRequest {
    pub structured_query: StructuredQuery,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredQuery {
    pub from: Vec<CollectionSelector>,
    #[serde(rename = "where")]
    pub filter: Filter,
    pub order_by: Vec<Order>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSelector {
    pub collection_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub composite_filter: CompositeFilter,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompositeFilter {
    pub op: &'static str,
    pub filters: Vec<FieldFilterWrapper>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldFilterWrapper {
    pub field_filter: FieldFilter,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldFilter {
    pub field: FieldReference,
    pub op: &'static str,
    pub value: StringValue,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldReference {
    pub field_path: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StringValue {
    pub string_value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub field: FieldReference,
    pub direction: &'static str,
}

impl StructuredQuery {
    /// Documents of `collection_id` whose `field` equals `value`, ordered
    /// ascending by document name.
    pub fn owned_by(collection_id: &str, field: &str, value: &str) -> Self {
        Self {
            from: vec![CollectionSelector {
                collection_id: collection_id.to_string(),
            }],
            filter: Filter {
                composite_filter: CompositeFilter {
                    op: "AND",
                    filters: vec![FieldFilterWrapper {
                        field_filter: FieldFilter {
                            field: FieldReference {
                                field_path: field.to_string(),
                            },
                            op: "EQUAL",
                            value: StringValue {
                                string_value: value.to_string(),
                            },
                        },
                    }],
                },
            },
            order_by: vec![Order {
                field: FieldReference {
                    field_path: DOCUMENT_NAME_FIELD.to_string(),
                },
                direction: "ASCENDING",
            }],
        }
    }
}
