//! Metadata filter expressions.
//!
//! Queries, deletions, and stats requests can be restricted to vectors whose
//! metadata matches a predicate. A [`Filter`] is an immutable tree of such
//! predicates built from the constructors on this type:
//!
//! ```
//! use pinecone_client::filter::Filter;
//!
//! let filter = Filter::and(vec![
//!     Filter::eq("genre", "drama"),
//!     Filter::gte("year", 2000),
//! ]);
//! ```
//!
//! On the wire a filter becomes the service's `$op` mapping, e.g.
//! `{"$and":[{"genre":{"$eq":"drama"}},{"year":{"$gte":2000}}]}`.
//! [`Filter::None`] serializes to an absent field, so "no filtering" is
//! indistinguishable from a request that never mentioned a filter.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{json, Value};

/// A primitive metadata value attached to a vector.
///
/// The service only accepts booleans, numbers, and strings as metadata
/// values; richer shapes are rejected at the type level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        MetadataValue::Bool(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        MetadataValue::Int(value)
    }
}

impl From<i32> for MetadataValue {
    fn from(value: i32) -> Self {
        MetadataValue::Int(value.into())
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        MetadataValue::Float(value)
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::String(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        MetadataValue::String(value)
    }
}

/// The metadata map attached to a vector.
pub type Metadata = BTreeMap<String, MetadataValue>;

/// Binary comparison operators over a single metadata key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl BinaryOperator {
    fn as_str(self) -> &'static str {
        match self {
            BinaryOperator::Eq => "$eq",
            BinaryOperator::Ne => "$ne",
            BinaryOperator::Gt => "$gt",
            BinaryOperator::Gte => "$gte",
            BinaryOperator::Lt => "$lt",
            BinaryOperator::Lte => "$lte",
        }
    }
}

/// Set-membership operators over a single metadata key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayOperator {
    In,
    Nin,
}

impl ArrayOperator {
    fn as_str(self) -> &'static str {
        match self {
            ArrayOperator::In => "$in",
            ArrayOperator::Nin => "$nin",
        }
    }
}

/// Logical combination operators over child filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombinationOperator {
    And,
    Or,
}

impl CombinationOperator {
    fn as_str(self) -> &'static str {
        match self {
            CombinationOperator::And => "$and",
            CombinationOperator::Or => "$or",
        }
    }
}

/// A metadata predicate tree.
///
/// Immutable once built; serialization is a pure function of the tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Filter {
    /// The absence of a filter. Skipped entirely on the wire.
    #[default]
    None,
    /// A comparison between one metadata key and one primitive value.
    Binary { key: String, op: BinaryOperator, value: MetadataValue },
    /// A membership test of one metadata key against a value set.
    Array { key: String, op: ArrayOperator, values: Vec<MetadataValue> },
    /// A logical combination of child filters. Never empty: constructors
    /// collapse an empty combination back to [`Filter::None`].
    Combination { op: CombinationOperator, filters: Vec<Filter> },
}

impl Filter {
    /// `key == value`
    pub fn eq(key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        Self::binary(key, BinaryOperator::Eq, value)
    }

    /// `key != value`
    pub fn ne(key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        Self::binary(key, BinaryOperator::Ne, value)
    }

    /// `key > value`
    pub fn gt(key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        Self::binary(key, BinaryOperator::Gt, value)
    }

    /// `key >= value`
    pub fn gte(key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        Self::binary(key, BinaryOperator::Gte, value)
    }

    /// `key < value`
    pub fn lt(key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        Self::binary(key, BinaryOperator::Lt, value)
    }

    /// `key <= value`
    pub fn lte(key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        Self::binary(key, BinaryOperator::Lte, value)
    }

    /// `key` is one of `values`.
    pub fn is_in<I, V>(key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<MetadataValue>,
    {
        Filter::Array {
            key: key.into(),
            op: ArrayOperator::In,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// `key` is none of `values`.
    pub fn not_in<I, V>(key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<MetadataValue>,
    {
        Filter::Array {
            key: key.into(),
            op: ArrayOperator::Nin,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// All of `filters` must match.
    pub fn and(filters: Vec<Filter>) -> Self {
        Self::combination(CombinationOperator::And, filters)
    }

    /// At least one of `filters` must match.
    pub fn or(filters: Vec<Filter>) -> Self {
        Self::combination(CombinationOperator::Or, filters)
    }

    /// Whether this is the empty filter.
    pub fn is_none(&self) -> bool {
        matches!(self, Filter::None)
    }

    fn binary(
        key: impl Into<String>,
        op: BinaryOperator,
        value: impl Into<MetadataValue>,
    ) -> Self {
        Filter::Binary { key: key.into(), op, value: value.into() }
    }

    fn combination(op: CombinationOperator, filters: Vec<Filter>) -> Self {
        // Empty combinations are not a valid wire shape; dropping them here
        // keeps the invariant that every composite node has children.
        let filters: Vec<Filter> = filters.into_iter().filter(|f| !f.is_none()).collect();
        if filters.is_empty() {
            Filter::None
        } else {
            Filter::Combination { op, filters }
        }
    }

    /// The wire representation, or `None` for the empty filter.
    pub fn to_wire(&self) -> Option<Value> {
        match self {
            Filter::None => None,
            Filter::Binary { key, op, value } => {
                Some(json!({ key: { op.as_str(): value } }))
            }
            Filter::Array { key, op, values } => {
                Some(json!({ key: { op.as_str(): values } }))
            }
            Filter::Combination { op, filters } => {
                let children: Vec<Value> =
                    filters.iter().filter_map(Filter::to_wire).collect();
                Some(json!({ op.as_str(): children }))
            }
        }
    }
}

impl Serialize for Filter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.to_wire() {
            Some(value) => value.serialize(serializer),
            // Reachable only when a `Filter::None` is serialized directly
            // rather than skipped at the field level.
            None => serializer.serialize_map(Some(0))?.end(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_filter_nests_operator_under_key() {
        let filter = Filter::eq("genre", "drama");
        assert_eq!(filter.to_wire().unwrap(), json!({"genre": {"$eq": "drama"}}));

        let filter = Filter::gte("year", 2019);
        assert_eq!(filter.to_wire().unwrap(), json!({"year": {"$gte": 2019}}));
    }

    #[test]
    fn array_filter_holds_value_list() {
        let filter = Filter::is_in("title", ["Nutrition", "Health"]);
        assert_eq!(
            filter.to_wire().unwrap(),
            json!({"title": {"$in": ["Nutrition", "Health"]}})
        );

        let filter = Filter::not_in("rating", [1, 2]);
        assert_eq!(filter.to_wire().unwrap(), json!({"rating": {"$nin": [1, 2]}}));
    }

    #[test]
    fn combination_filter_holds_ordered_children() {
        let filter = Filter::and(vec![
            Filter::eq("title", "Physics"),
            Filter::eq("author", "Bob"),
        ]);
        assert_eq!(
            filter.to_wire().unwrap(),
            json!({"$and": [
                {"title": {"$eq": "Physics"}},
                {"author": {"$eq": "Bob"}}
            ]})
        );
    }

    #[test]
    fn combinations_nest() {
        let filter = Filter::or(vec![
            Filter::and(vec![Filter::eq("a", 1), Filter::ne("b", true)]),
            Filter::lt("c", 0.5),
        ]);
        assert_eq!(
            filter.to_wire().unwrap(),
            json!({"$or": [
                {"$and": [{"a": {"$eq": 1}}, {"b": {"$ne": true}}]},
                {"c": {"$lt": 0.5}}
            ]})
        );
    }

    #[test]
    fn empty_combination_collapses_to_none() {
        assert!(Filter::and(vec![]).is_none());
        assert!(Filter::or(vec![Filter::None, Filter::None]).is_none());
    }

    #[test]
    fn none_children_are_dropped() {
        let filter = Filter::and(vec![Filter::None, Filter::eq("k", "v")]);
        assert_eq!(filter.to_wire().unwrap(), json!({"$and": [{"k": {"$eq": "v"}}]}));
    }

    #[test]
    fn no_filter_has_no_wire_form() {
        assert_eq!(Filter::None.to_wire(), None);
    }

    #[test]
    fn serialization_is_pure() {
        let filter = Filter::and(vec![
            Filter::is_in("genre", ["drama", "comedy"]),
            Filter::gt("year", 1990),
        ]);
        assert_eq!(filter.to_wire(), filter.to_wire());
    }

    #[test]
    fn metadata_values_serialize_as_primitives() {
        assert_eq!(serde_json::to_value(MetadataValue::from(true)).unwrap(), json!(true));
        assert_eq!(serde_json::to_value(MetadataValue::from(42)).unwrap(), json!(42));
        assert_eq!(serde_json::to_value(MetadataValue::from(0.5)).unwrap(), json!(0.5));
        assert_eq!(serde_json::to_value(MetadataValue::from("x")).unwrap(), json!("x"));
    }
}
