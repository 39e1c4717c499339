//! Table names and the read-query builder.
//!
//! A [`Query`] carries the handful of modifiers the site needs: column
//! equality filters, a single-column ordering and a row limit. Adapters
//! translate it to their own dialect.

use std::cmp::Ordering;
use std::fmt;

use serde_json::Value;

/// Remote tables the site reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Ads,
    WebResults,
}

impl Table {
    /// Table name on the remote store.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ads => "ads",
            Self::WebResults => "web_results",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column equality filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: Value,
}

impl Filter {
    /// Whether `row` satisfies this filter.
    ///
    /// A missing column compares equal to `null`.
    #[must_use]
    pub fn matches(&self, row: &Value) -> bool {
        row.get(&self.column).unwrap_or(&Value::Null) == &self.value
    }
}

/// Single-column ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

impl Order {
    /// Compare two rows on the ordered column.
    ///
    /// Numbers compare numerically, strings lexically, booleans with `false`
    /// first. `null` sorts after everything when ascending and before
    /// everything when descending. Mismatched types compare equal.
    #[must_use]
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        let left = a.get(&self.column).unwrap_or(&Value::Null);
        let right = b.get(&self.column).unwrap_or(&Value::Null);

        let ordering = match (left, right) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Null, _) => Ordering::Greater,
            (_, Value::Null) => Ordering::Less,
            (Value::Number(x), Value::Number(y)) => x
                .as_f64()
                .partial_cmp(&y.as_f64())
                .unwrap_or(Ordering::Equal),
            (Value::String(x), Value::String(y)) => x.cmp(y),
            (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
            _ => Ordering::Equal,
        };

        if self.ascending {
            ordering
        } else {
            ordering.reverse()
        }
    }
}

/// Read query over all columns of a table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    filters: Vec<Filter>,
    order: Option<Order>,
    limit: Option<usize>,
}

impl Query {
    /// Select every row and column.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only rows where `column` equals `value`.
    #[must_use]
    pub fn eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            column: column.into(),
            value: value.into(),
        });
        self
    }

    /// Order by one column. A later call replaces an earlier one.
    #[must_use]
    pub fn order(mut self, column: impl Into<String>, ascending: bool) -> Self {
        self.order = Some(Order {
            column: column.into(),
            ascending,
        });
        self
    }

    /// Return at most `n` rows.
    #[must_use]
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Like [`Query::limit`], leaving the query unlimited for `None`.
    #[must_use]
    pub fn limit_opt(self, n: Option<usize>) -> Self {
        match n {
            Some(n) => self.limit(n),
            None => self,
        }
    }

    #[must_use]
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    #[must_use]
    pub const fn ordering(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    #[must_use]
    pub const fn row_limit(&self) -> Option<usize> {
        self.limit
    }

    /// Whether `row` passes every filter.
    #[must_use]
    pub fn matches(&self, row: &Value) -> bool {
        self.filters.iter().all(|f| f.matches(row))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_builder_collects_modifiers() {
        let query = Query::new()
            .eq("is_featured", false)
            .order("display_order", true)
            .limit(4);

        assert_eq!(query.filters().len(), 1);
        assert_eq!(query.filters()[0].value, Value::Bool(false));
        assert_eq!(
            query.ordering(),
            Some(&Order {
                column: "display_order".to_string(),
                ascending: true
            })
        );
        assert_eq!(query.row_limit(), Some(4));
    }

    #[test]
    fn test_matches_all_filters() {
        let row = json!({"is_featured": true, "title": "A"});
        assert!(Query::new().eq("is_featured", true).matches(&row));
        assert!(!Query::new().eq("is_featured", true).eq("title", "B").matches(&row));
        assert!(Query::new().eq("image_url", Value::Null).matches(&row));
    }

    #[test]
    fn test_order_numbers_and_nulls() {
        let asc = Order {
            column: "display_order".to_string(),
            ascending: true,
        };
        let one = json!({"display_order": 1});
        let ten = json!({"display_order": 10});
        let none = json!({});

        assert_eq!(asc.compare(&one, &ten), Ordering::Less);
        assert_eq!(asc.compare(&none, &one), Ordering::Greater);

        let desc = Order {
            ascending: false,
            ..asc
        };
        assert_eq!(desc.compare(&one, &ten), Ordering::Greater);
        assert_eq!(desc.compare(&none, &one), Ordering::Less);
    }

    #[test]
    fn test_table_names() {
        assert_eq!(Table::Ads.as_str(), "ads");
        assert_eq!(Table::WebResults.to_string(), "web_results");
    }
}
