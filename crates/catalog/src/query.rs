use anyhow::{Context, Result};
use rusqlite::types::{Type, Value};
use rusqlite::{params_from_iter, Connection, Row};

use denuo_core::{Language, Stored};

/// `LIKE` pattern matching `needle` anywhere, with the wildcards in the
/// needle itself escaped.
pub(crate) fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.trim().chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// A `SELECT *` over one table with optional filters, bound by position.
pub(crate) struct Select {
    table: &'static str,
    conditions: Vec<String>,
    params: Vec<Value>,
    order_by: Option<&'static str>,
    limit: Option<u32>,
}

impl Select {
    pub fn from(table: &'static str) -> Self {
        Self {
            table,
            conditions: Vec::new(),
            params: Vec::new(),
            order_by: None,
            limit: None,
        }
    }

    fn bind(&mut self, value: Value) -> String {
        self.params.push(value);
        format!("?{}", self.params.len())
    }

    /// Case-insensitive substring match of `query` in any of `columns`.
    pub fn matching(mut self, columns: &[&str], query: &str) -> Self {
        let placeholder = self.bind(Value::Text(like_pattern(query)));
        let any = columns
            .iter()
            .map(|column| format!("{column} LIKE {placeholder} ESCAPE '\\'"))
            .collect::<Vec<_>>()
            .join(" OR ");
        self.conditions.push(format!("({any})"));
        self
    }

    pub fn equals(mut self, column: &str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            let placeholder = self.bind(Value::Text(value.to_string()));
            self.conditions.push(format!("{column} = {placeholder}"));
        }
        self
    }

    pub fn equals_ignore_case(mut self, column: &str, value: Option<&str>) -> Self {
        if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
            let placeholder = self.bind(Value::Text(value.to_string()));
            self.conditions
                .push(format!("{column} = {placeholder} COLLATE NOCASE"));
        }
        self
    }

    /// Equality against any of `values`, ignoring case.
    pub fn one_of_ignore_case(mut self, column: &str, values: &[&str]) -> Self {
        if values.is_empty() {
            return self;
        }
        let placeholders = values
            .iter()
            .map(|value| self.bind(Value::Text(value.to_string())))
            .collect::<Vec<_>>()
            .join(", ");
        self.conditions
            .push(format!("{column} COLLATE NOCASE IN ({placeholders})"));
        self
    }

    pub fn contains(mut self, column: &str, value: Option<&str>) -> Self {
        if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
            let placeholder = self.bind(Value::Text(like_pattern(value)));
            self.conditions
                .push(format!("{column} LIKE {placeholder} ESCAPE '\\'"));
        }
        self
    }

    pub fn id(mut self, id: i64) -> Self {
        let placeholder = self.bind(Value::Integer(id));
        self.conditions.push(format!("id = {placeholder}"));
        self
    }

    pub fn order_by(mut self, clause: &'static str) -> Self {
        self.order_by = Some(clause);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn sql(&self) -> String {
        let mut sql = format!("SELECT * FROM {}", self.table);
        if !self.conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.conditions.join(" AND "));
        }
        if let Some(order_by) = self.order_by {
            sql.push_str(" ORDER BY ");
            sql.push_str(order_by);
        }
        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        sql
    }

    pub fn fetch<T, F>(self, conn: &Connection, decode: F) -> Result<Vec<T>>
    where
        F: Fn(&Row<'_>) -> rusqlite::Result<T>,
    {
        let sql = self.sql();
        tracing::debug!(sql = %sql, params = self.params.len(), "catalog query");
        let mut stmt = conn
            .prepare(&sql)
            .with_context(|| format!("failed to prepare query on {}", self.table))?;
        let rows = stmt
            .query_map(params_from_iter(self.params.iter()), |row| decode(row))
            .with_context(|| format!("failed to query {}", self.table))?;
        let records = rows
            .collect::<rusqlite::Result<Vec<T>>>()
            .with_context(|| format!("failed to decode {} rows", self.table))?;
        Ok(records)
    }
}

pub(crate) fn conversion_failure(row: &Row<'_>, column: &str, message: String) -> rusqlite::Error {
    match row.as_ref().column_index(column) {
        Ok(index) => rusqlite::Error::FromSqlConversionFailure(index, Type::Text, message.into()),
        Err(e) => e,
    }
}

/// Wraps a decoded record with the row's id and timestamps.
pub(crate) fn stored<T>(row: &Row<'_>, record: T) -> rusqlite::Result<Stored<T>> {
    Ok(Stored {
        id: row.get("id")?,
        record,
        scraped_at: row.get("scraped_at")?,
        updated_at: row.get("updated_at")?,
    })
}

pub(crate) fn language(row: &Row<'_>, column: &str) -> rusqlite::Result<Language> {
    let code: String = row.get(column)?;
    Language::from_code(&code)
        .ok_or_else(|| conversion_failure(row, column, format!("unknown language {code:?}")))
}

pub(crate) fn string_list(row: &Row<'_>, column: &str) -> rusqlite::Result<Vec<String>> {
    Ok(opt_string_list(row, column)?.unwrap_or_default())
}

pub(crate) fn opt_string_list(row: &Row<'_>, column: &str) -> rusqlite::Result<Option<Vec<String>>> {
    let Some(raw) = row.get::<_, Option<String>>(column)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| conversion_failure(row, column, format!("invalid JSON list: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("loon"), "%loon%");
        assert_eq!(like_pattern("100%_zeker\\"), "%100\\%\\_zeker\\\\%");
    }

    #[test]
    fn builds_filtered_sql() {
        let select = Select::from("news")
            .matching(&["title", "summary"], "akkoord")
            .equals("language", Some("nl"))
            .equals("category", None)
            .order_by("id DESC")
            .limit(5);
        assert_eq!(
            select.sql(),
            "SELECT * FROM news WHERE (title LIKE ?1 ESCAPE '\\' OR summary LIKE ?1 ESCAPE '\\') \
             AND language = ?2 ORDER BY id DESC LIMIT 5"
        );
        assert_eq!(select.params.len(), 2);
    }

    #[test]
    fn blank_optional_filters_are_ignored() {
        let select = Select::from("committees").equals_ignore_case("sector", Some("  "));
        assert_eq!(select.sql(), "SELECT * FROM committees");
    }
}
