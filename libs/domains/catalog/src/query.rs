//! Query translation for the list endpoint.
//!
//! Converts a flat, string-valued query-parameter mapping (as it arrives
//! from the HTTP layer) into a structured MongoDB query: a filter document,
//! a multi-key sort, a field projection, and a skip/limit pagination window.
//!
//! Filterable fields form an explicit allow-list with typed comparison
//! operators; unknown keys, unknown operators, and values that do not parse
//! are rejected instead of being forwarded to the store.

use std::collections::{BTreeMap, HashMap};

use mongodb::bson::{Bson, Document, doc};

use crate::error::{CatalogError, CatalogResult};

/// Parameter names consumed by sort/projection/pagination rather than
/// interpreted as filters.
pub const RESERVED_PARAMS: [&str; 4] = ["page", "sort", "limit", "fields"];

/// Comparison operators accepted in `field[op]=value` filter keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Comparison {
    fn parse(op: &str) -> Option<Self> {
        match op {
            "gt" => Some(Comparison::Gt),
            "gte" => Some(Comparison::Gte),
            "lt" => Some(Comparison::Lt),
            "lte" => Some(Comparison::Lte),
            _ => None,
        }
    }

    fn mongo_operator(self) -> &'static str {
        match self {
            Comparison::Eq => "$eq",
            Comparison::Gt => "$gt",
            Comparison::Gte => "$gte",
            Comparison::Lt => "$lt",
            Comparison::Lte => "$lte",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Text,
    Numeric,
}

/// Allow-list of fields a caller may filter on.
const FILTERABLE_FIELDS: &[(&str, FieldKind)] = &[
    ("title", FieldKind::Text),
    ("slug", FieldKind::Text),
    ("description", FieldKind::Text),
    ("category", FieldKind::Text),
    ("brand", FieldKind::Text),
    ("color", FieldKind::Text),
    ("price", FieldKind::Numeric),
    ("quantity", FieldKind::Numeric),
    ("sold", FieldKind::Numeric),
];

/// Timestamp fields maintained by the repository; sortable and projectable
/// but not filterable.
const TIMESTAMP_FIELDS: &[&str] = &["created_at", "updated_at"];

/// Document fields a caller may project with `fields=`.
const PROJECTABLE_FIELDS: &[&str] = &[
    "title",
    "slug",
    "description",
    "category",
    "brand",
    "color",
    "price",
    "quantity",
    "images",
    "ratings",
    "sold",
    "created_at",
    "updated_at",
];

/// A fully translated storage query.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuery {
    /// Filter predicate built from the non-reserved parameters
    pub filter: Document,
    /// Multi-key sort order; defaults to newest first
    pub sort: Document,
    /// Inclusion projection, or the default exclusion of internal fields
    pub projection: Document,
    /// Offset of the pagination window, when one was requested
    pub skip: Option<u64>,
    /// Size of the pagination window, when one was requested
    pub limit: Option<i64>,
    /// The page the caller explicitly asked for; drives the page-exists check
    pub page: Option<u64>,
}

/// Translate a flat query-parameter mapping into a [`ProductQuery`].
///
/// Reserved keys (`page`, `sort`, `limit`, `fields`) control pagination,
/// ordering, and projection; every other key must name an allow-listed
/// field, optionally suffixed with a comparison operator in brackets:
///
/// ```text
/// ?category=electronics&price[gte]=100&price[lte]=500&sort=price,-title
/// ```
pub fn translate(params: &HashMap<String, String>) -> CatalogResult<ProductQuery> {
    // Deterministic iteration keeps the built documents stable across runs.
    let ordered: BTreeMap<&str, &str> = params
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();

    let mut filter = Document::new();
    let mut ranges: BTreeMap<&str, Document> = BTreeMap::new();

    for (&key, &value) in &ordered {
        if RESERVED_PARAMS.contains(&key) {
            continue;
        }

        let (field, comparison) = parse_filter_key(key)?;
        let kind = filterable_kind(field)?;

        match comparison {
            Comparison::Eq => {
                if ranges.contains_key(field) || filter.contains_key(field) {
                    return Err(CatalogError::InvalidQuery(format!(
                        "Conflicting filters on field '{}'",
                        field
                    )));
                }
                filter.insert(field, equality_value(field, kind, value)?);
            }
            cmp => {
                if kind != FieldKind::Numeric {
                    return Err(CatalogError::InvalidQuery(format!(
                        "Comparison operators only apply to numeric fields, '{}' is text",
                        field
                    )));
                }
                if filter.contains_key(field) {
                    return Err(CatalogError::InvalidQuery(format!(
                        "Conflicting filters on field '{}'",
                        field
                    )));
                }
                let number = parse_number(field, value)?;
                ranges
                    .entry(field)
                    .or_default()
                    .insert(cmp.mongo_operator(), number);
            }
        }
    }

    for (field, range) in ranges {
        filter.insert(field, range);
    }

    let sort = match ordered.get("sort") {
        Some(spec) => parse_sort(spec)?,
        None => doc! { "created_at": -1 },
    };

    let projection = match ordered.get("fields") {
        Some(spec) => parse_fields(spec)?,
        // Everything except the internal version counter
        None => doc! { "revision": 0 },
    };

    let page = parse_integer_param::<u64>(ordered.get("page").copied(), "page")?;
    if page == Some(0) {
        return Err(CatalogError::InvalidQuery(
            "'page' must be 1 or greater".to_string(),
        ));
    }
    let limit = parse_integer_param::<i64>(ordered.get("limit").copied(), "limit")?;
    if matches!(limit, Some(l) if l < 1) {
        return Err(CatalogError::InvalidQuery(
            "'limit' must be 1 or greater".to_string(),
        ));
    }

    let skip = match (page, limit) {
        (Some(page), Some(limit)) => Some(
            (page - 1)
                .checked_mul(limit as u64)
                .ok_or_else(|| CatalogError::InvalidQuery("Pagination window overflows".to_string()))?,
        ),
        (Some(_), None) => {
            return Err(CatalogError::InvalidQuery(
                "'page' requires 'limit' to be set".to_string(),
            ));
        }
        _ => None,
    };

    Ok(ProductQuery {
        filter,
        sort,
        projection,
        skip,
        limit,
        page,
    })
}

/// Split a filter key into its field name and comparison operator.
///
/// `price` → (`price`, Eq); `price[gte]` → (`price`, Gte).
fn parse_filter_key(key: &str) -> CatalogResult<(&str, Comparison)> {
    match key.find('[') {
        None => Ok((key, Comparison::Eq)),
        Some(open) => {
            let field = &key[..open];
            let rest = &key[open + 1..];
            let op = rest.strip_suffix(']').ok_or_else(|| {
                CatalogError::InvalidQuery(format!("Malformed filter key '{}'", key))
            })?;
            if field.is_empty() || op.contains('[') || op.contains(']') {
                return Err(CatalogError::InvalidQuery(format!(
                    "Malformed filter key '{}'",
                    key
                )));
            }
            let comparison = Comparison::parse(op).ok_or_else(|| {
                CatalogError::InvalidQuery(format!("Unknown comparison operator '{}'", op))
            })?;
            Ok((field, comparison))
        }
    }
}

fn filterable_kind(field: &str) -> CatalogResult<FieldKind> {
    FILTERABLE_FIELDS
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, kind)| *kind)
        .ok_or_else(|| CatalogError::InvalidQuery(format!("Unknown filter field '{}'", field)))
}

fn equality_value(field: &str, kind: FieldKind, value: &str) -> CatalogResult<Bson> {
    match kind {
        FieldKind::Text => Ok(Bson::String(value.to_string())),
        FieldKind::Numeric => parse_number(field, value),
    }
}

fn parse_number(field: &str, value: &str) -> CatalogResult<Bson> {
    let number: f64 = value.parse().map_err(|_| {
        CatalogError::InvalidQuery(format!(
            "Value '{}' for numeric field '{}' is not a number",
            value, field
        ))
    })?;
    if !number.is_finite() {
        return Err(CatalogError::InvalidQuery(format!(
            "Value '{}' for numeric field '{}' is not a number",
            value, field
        )));
    }
    Ok(Bson::Double(number))
}

fn sortable(field: &str) -> bool {
    TIMESTAMP_FIELDS.contains(&field)
        || FILTERABLE_FIELDS.iter().any(|(name, _)| *name == field)
}

/// Parse `sort=price,-title` into an ordered sort document.
fn parse_sort(spec: &str) -> CatalogResult<Document> {
    let mut sort = Document::new();
    for token in spec.split(',') {
        let token = token.trim();
        if token.is_empty() {
            return Err(CatalogError::InvalidQuery(
                "Empty field name in 'sort'".to_string(),
            ));
        }
        let (field, direction) = match token.strip_prefix('-') {
            Some(field) => (field, -1),
            None => (token, 1),
        };
        if !sortable(field) {
            return Err(CatalogError::InvalidQuery(format!(
                "Unknown sort field '{}'",
                field
            )));
        }
        sort.insert(field, direction);
    }
    Ok(sort)
}

/// Parse `fields=title,price` into an inclusion projection.
fn parse_fields(spec: &str) -> CatalogResult<Document> {
    let mut projection = Document::new();
    for token in spec.split(',') {
        let token = token.trim();
        if token.is_empty() {
            return Err(CatalogError::InvalidQuery(
                "Empty field name in 'fields'".to_string(),
            ));
        }
        if !PROJECTABLE_FIELDS.contains(&token) {
            return Err(CatalogError::InvalidQuery(format!(
                "Unknown projection field '{}'",
                token
            )));
        }
        projection.insert(token, 1);
    }
    Ok(projection)
}

fn parse_integer_param<T: std::str::FromStr>(
    value: Option<&str>,
    name: &str,
) -> CatalogResult<Option<T>> {
    match value {
        None => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(|_| {
            CatalogError::InvalidQuery(format!("'{}' must be an integer, got '{}'", name, raw))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_params_use_defaults() {
        let query = translate(&params(&[])).unwrap();
        assert!(query.filter.is_empty());
        assert_eq!(query.sort, doc! { "created_at": -1 });
        assert_eq!(query.projection, doc! { "revision": 0 });
        assert_eq!(query.skip, None);
        assert_eq!(query.limit, None);
        assert_eq!(query.page, None);
    }

    #[test]
    fn test_equality_filter_on_text_field() {
        let query = translate(&params(&[("category", "electronics")])).unwrap();
        assert_eq!(query.filter, doc! { "category": "electronics" });
    }

    #[test]
    fn test_equality_filter_on_numeric_field_parses_number() {
        let query = translate(&params(&[("quantity", "5")])).unwrap();
        assert_eq!(query.filter, doc! { "quantity": 5.0 });
    }

    #[test]
    fn test_gte_operator_becomes_mongo_comparison() {
        let query = translate(&params(&[("price[gte]", "100")])).unwrap();
        assert_eq!(query.filter, doc! { "price": { "$gte": 100.0 } });
    }

    #[test]
    fn test_operators_on_same_field_merge() {
        let query = translate(&params(&[("price[gte]", "100"), ("price[lte]", "500")])).unwrap();
        assert_eq!(
            query.filter,
            doc! { "price": { "$gte": 100.0, "$lte": 500.0 } }
        );
    }

    #[test]
    fn test_all_four_operators() {
        for (op, mongo_op) in [("gt", "$gt"), ("gte", "$gte"), ("lt", "$lt"), ("lte", "$lte")] {
            let key = format!("sold[{}]", op);
            let query = translate(&params(&[(key.as_str(), "3")])).unwrap();
            let range = query.filter.get_document("sold").unwrap();
            assert_eq!(range.get_f64(mongo_op).unwrap(), 3.0);
            assert_eq!(range.len(), 1);
        }
    }

    #[test]
    fn test_reserved_keys_are_not_filters() {
        let query = translate(&params(&[
            ("brand", "apple"),
            ("sort", "price"),
            ("limit", "10"),
            ("fields", "title"),
        ]))
        .unwrap();
        assert_eq!(query.filter, doc! { "brand": "apple" });
    }

    #[test]
    fn test_unknown_filter_field_is_rejected() {
        let err = translate(&params(&[("warehouse", "7")])).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidQuery(_)));
        assert!(err.to_string().contains("warehouse"));
    }

    #[test]
    fn test_unknown_operator_is_rejected() {
        let err = translate(&params(&[("price[within]", "9")])).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidQuery(_)));
        assert!(err.to_string().contains("within"));
    }

    #[test]
    fn test_malformed_filter_key_is_rejected() {
        assert!(translate(&params(&[("price[gte", "9")])).is_err());
        assert!(translate(&params(&[("[gte]", "9")])).is_err());
    }

    #[test]
    fn test_operator_on_text_field_is_rejected() {
        let err = translate(&params(&[("brand[gte]", "apple")])).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidQuery(_)));
    }

    #[test]
    fn test_non_numeric_comparison_value_is_rejected() {
        assert!(translate(&params(&[("price[gte]", "cheap")])).is_err());
        assert!(translate(&params(&[("price[gte]", "NaN")])).is_err());
    }

    #[test]
    fn test_sort_multi_key_with_direction() {
        let query = translate(&params(&[("sort", "price,-title")])).unwrap();
        let keys: Vec<_> = query.sort.keys().collect();
        assert_eq!(keys, vec!["price", "title"]);
        assert_eq!(query.sort.get_i32("price").unwrap(), 1);
        assert_eq!(query.sort.get_i32("title").unwrap(), -1);
    }

    #[test]
    fn test_sort_default_is_newest_first() {
        let query = translate(&params(&[("brand", "apple")])).unwrap();
        assert_eq!(query.sort, doc! { "created_at": -1 });
    }

    #[test]
    fn test_sort_unknown_field_is_rejected() {
        assert!(translate(&params(&[("sort", "popularity")])).is_err());
    }

    #[test]
    fn test_fields_projection() {
        let query = translate(&params(&[("fields", "title,price")])).unwrap();
        assert_eq!(query.projection, doc! { "title": 1, "price": 1 });
    }

    #[test]
    fn test_fields_unknown_field_is_rejected() {
        assert!(translate(&params(&[("fields", "title,revision")])).is_err());
    }

    #[test]
    fn test_default_projection_excludes_revision() {
        let query = translate(&params(&[])).unwrap();
        assert_eq!(query.projection, doc! { "revision": 0 });
    }

    #[test]
    fn test_pagination_window() {
        let query = translate(&params(&[("page", "3"), ("limit", "10")])).unwrap();
        assert_eq!(query.skip, Some(20));
        assert_eq!(query.limit, Some(10));
        assert_eq!(query.page, Some(3));
    }

    #[test]
    fn test_limit_without_page_has_no_skip() {
        let query = translate(&params(&[("limit", "10")])).unwrap();
        assert_eq!(query.skip, None);
        assert_eq!(query.limit, Some(10));
        assert_eq!(query.page, None);
    }

    #[test]
    fn test_page_without_limit_is_rejected() {
        let err = translate(&params(&[("page", "2")])).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidQuery(_)));
    }

    #[test]
    fn test_page_zero_is_rejected() {
        assert!(translate(&params(&[("page", "0"), ("limit", "10")])).is_err());
    }

    #[test]
    fn test_non_integer_pagination_is_rejected() {
        assert!(translate(&params(&[("page", "two"), ("limit", "10")])).is_err());
        assert!(translate(&params(&[("limit", "ten")])).is_err());
    }

    #[test]
    fn test_conflicting_equality_and_range_rejected() {
        let result = translate(&params(&[("price", "100"), ("price[gte]", "50")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_filter_combines_with_sort_fields_and_pagination() {
        let query = translate(&params(&[
            ("category", "electronics"),
            ("price[gte]", "100"),
            ("sort", "-price"),
            ("fields", "title,price,category"),
            ("page", "2"),
            ("limit", "5"),
        ]))
        .unwrap();
        assert_eq!(
            query.filter,
            doc! { "category": "electronics", "price": { "$gte": 100.0 } }
        );
        assert_eq!(query.sort, doc! { "price": -1 });
        assert_eq!(
            query.projection,
            doc! { "title": 1, "price": 1, "category": 1 }
        );
        assert_eq!(query.skip, Some(5));
        assert_eq!(query.limit, Some(5));
    }
}
