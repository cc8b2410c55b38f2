//! Typed view of the semantic query keys: `filter`, `sort`, `slice` and `range`.

use crate::query::{QueryError, QueryParams, QueryValue};
use crate::types::record::Record;
use serde_json::Value;

/// Sort direction for [`Sort`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Sort order on a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

/// Zero-based pagination window with an inclusive end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: i64,
    pub end: i64,
}

impl Window {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Clip the window to `len` items, returning the index range to keep.
    ///
    /// `start` is clipped to `0` and `end` to `len - 1`; an inverted or
    /// out-of-bounds window selects nothing.
    pub fn clip(&self, len: usize) -> Option<std::ops::RangeInclusive<usize>> {
        if len == 0 {
            return None;
        }
        let start = self.start.max(0);
        let end = self.end.min(len as i64 - 1);
        if start > end {
            return None;
        }
        Some(start as usize..=end as usize)
    }
}

/// Collection query: filter, then sort, then slice, then range.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query {
    /// Exact-match constraints, all of which must hold
    pub filter: Option<Record>,
    pub sort: Option<Sort>,
    pub slice: Option<Window>,
    /// Window requested by the client, also reported in `Content-Range`
    pub range: Option<Window>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interpret decoded query parameters. Keys other than `filter`, `sort`,
    /// `slice` and `range` are ignored.
    pub fn from_params(params: &QueryParams) -> Result<Self, QueryError> {
        Ok(Self {
            filter: params.get("filter").map(parse_filter).transpose()?,
            sort: params.get("sort").map(parse_sort).transpose()?,
            slice: params
                .get("slice")
                .map(|v| parse_window("slice", v))
                .transpose()?,
            range: params
                .get("range")
                .map(|v| parse_window("range", v))
                .transpose()?,
        })
    }

    /// Add an exact-match constraint on `field`.
    pub fn filter_by(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter
            .get_or_insert_with(Record::new)
            .insert(field.into(), value.into());
        self
    }

    pub fn sort_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(Sort {
            field: field.into(),
            direction,
        });
        self
    }

    pub fn slice(mut self, start: i64, end: i64) -> Self {
        self.slice = Some(Window::new(start, end));
        self
    }

    pub fn range(mut self, start: i64, end: i64) -> Self {
        self.range = Some(Window::new(start, end));
        self
    }
}

fn parse_filter(value: &QueryValue) -> Result<Record, QueryError> {
    match value {
        QueryValue::Json(Value::Object(map)) => Ok(map.clone()),
        _ => Err(QueryError::invalid("filter", "expected a JSON object")),
    }
}

fn parse_sort(value: &QueryValue) -> Result<Sort, QueryError> {
    match value {
        QueryValue::Text(field) if !field.is_empty() => Ok(Sort {
            field: field.clone(),
            direction: SortDirection::Asc,
        }),
        QueryValue::Json(Value::Array(items)) => {
            let field = items
                .first()
                .and_then(Value::as_str)
                .ok_or_else(|| QueryError::invalid("sort", "expected [field, direction]"))?;
            let direction = match items.get(1) {
                None => SortDirection::Asc,
                Some(Value::String(d)) if d.eq_ignore_ascii_case("ASC") => SortDirection::Asc,
                Some(Value::String(d)) if d.eq_ignore_ascii_case("DESC") => SortDirection::Desc,
                Some(other) => {
                    return Err(QueryError::invalid(
                        "sort",
                        format!("unknown direction {other}"),
                    ))
                }
            };
            if items.len() > 2 {
                return Err(QueryError::invalid("sort", "expected [field, direction]"));
            }
            Ok(Sort {
                field: field.to_string(),
                direction,
            })
        }
        _ => Err(QueryError::invalid(
            "sort",
            "expected a field name or [field, direction]",
        )),
    }
}

fn parse_window(key: &str, value: &QueryValue) -> Result<Window, QueryError> {
    let bounds = value
        .as_json()
        .and_then(Value::as_array)
        .filter(|items| items.len() == 2)
        .ok_or_else(|| QueryError::invalid(key, "expected [start, end]"))?;
    match (bounds[0].as_i64(), bounds[1].as_i64()) {
        (Some(start), Some(end)) => Ok(Window::new(start, end)),
        _ => Err(QueryError::invalid(key, "bounds must be integers")),
    }
}
