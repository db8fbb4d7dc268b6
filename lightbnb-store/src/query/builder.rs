//! Parameter-safe statement builder
//!
//! SQL is assembled from `&'static str` fragments; caller values only ever
//! reach the parameter list. Placeholders are numbered automatically
//! (`$1`, `$2`, ...) in the order values are bound, and the fragments are
//! joined once in [`QueryBuilder::build`].

use serde::Serialize;

/// A value bound to a positional placeholder
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlValue {
    Text(String),
    Int(i64),
    Float(f64),
    Null,
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_owned())
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Int(i64::from(v))
    }
}

impl From<u32> for SqlValue {
    fn from(v: u32) -> Self {
        SqlValue::Int(i64::from(v))
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(SqlValue::Null, Into::into)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Float(v)
    }
}

/// Finished statement text plus its ordered bind values
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    text: String,
    params: Vec<SqlValue>,
}

impl BuiltQuery {
    /// Wrap a fixed statement and its values.
    pub fn new(text: impl Into<String>, params: Vec<SqlValue>) -> Self {
        Self {
            text: text.into(),
            params,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }

    /// Placeholder indices in the order they appear in the text.
    ///
    /// # Example
    /// ```
    /// use lightbnb_store::{BuiltQuery, SqlValue};
    ///
    /// let q = BuiltQuery::new("SELECT * FROM users WHERE id = $1 LIMIT $2",
    ///     vec![SqlValue::Int(1), SqlValue::Int(10)]);
    /// assert_eq!(q.placeholder_indices(), vec![1, 2]);
    /// ```
    pub fn placeholder_indices(&self) -> Vec<usize> {
        let bytes = self.text.as_bytes();
        let mut indices = Vec::new();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'$' {
                let start = i + 1;
                let mut end = start;
                while end < bytes.len() && bytes[end].is_ascii_digit() {
                    end += 1;
                }
                if end > start {
                    if let Ok(n) = self.text[start..end].parse() {
                        indices.push(n);
                    }
                }
                i = end.max(start);
            } else {
                i += 1;
            }
        }
        indices
    }
}

/// Builds a statement from ordered clause fragments
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    fragments: Vec<String>,
    params: Vec<SqlValue>,
    predicates: usize,
}

impl QueryBuilder {
    pub fn new(base: &'static str) -> Self {
        Self {
            fragments: vec![base.to_owned()],
            params: Vec::new(),
            predicates: 0,
        }
    }

    /// Append a literal fragment (keywords, column names).
    pub fn push(&mut self, fragment: &'static str) -> &mut Self {
        self.fragments.push(fragment.to_owned());
        self
    }

    /// Append a pre-aggregation predicate `expr op $n`.
    ///
    /// The first predicate is introduced with `WHERE`, every later one
    /// with `AND`.
    pub fn and_where(
        &mut self,
        expr: &'static str,
        op: &'static str,
        value: impl Into<SqlValue>,
    ) -> &mut Self {
        let keyword = if self.predicates == 0 { "WHERE" } else { "AND" };
        self.predicates += 1;
        let placeholder = self.bind(value);
        self.fragments
            .push(format!("{} {} {} {}", keyword, expr, op, placeholder));
        self
    }

    /// Append an aggregate predicate `HAVING expr op $n`.
    ///
    /// Independent of the WHERE chain; call it after `GROUP BY`.
    pub fn having(
        &mut self,
        expr: &'static str,
        op: &'static str,
        value: impl Into<SqlValue>,
    ) -> &mut Self {
        let placeholder = self.bind(value);
        self.fragments
            .push(format!("HAVING {} {} {}", expr, op, placeholder));
        self
    }

    /// Append `LIMIT $n`.
    pub fn limit(&mut self, value: impl Into<SqlValue>) -> &mut Self {
        let placeholder = self.bind(value);
        self.fragments.push(format!("LIMIT {}", placeholder));
        self
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    pub fn build(self) -> BuiltQuery {
        let query = BuiltQuery {
            text: self.fragments.join("\n"),
            params: self.params,
        };
        debug_assert_eq!(query.placeholder_indices().len(), query.params.len());
        query
    }

    fn bind(&mut self, value: impl Into<SqlValue>) -> String {
        self.params.push(value.into());
        format!("${}", self.params.len())
    }
}
