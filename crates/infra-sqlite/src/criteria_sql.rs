// Criteria -> SQL translation
//
// Every predicate becomes one bound condition appended with AND. Values are
// always bound, never interpolated; only column names from fixed tables are
// pushed as text.
//
// Substring matches run against `*_folded` columns holding `fold_case` of the
// stored text. SQLite's LOWER() and LIKE only fold ASCII, so both sides are
// folded here in Rust instead.

use alunometa_core::domain::Area;
use alunometa_core::error::{AppError, Result};
use alunometa_core::query::{Direction, PageRequest, Predicate};
use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite};

/// A bindable predicate operand
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SqlValue {
    Int(i64),
    Text(String),
    Date(NaiveDate),
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

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(v: NaiveDate) -> Self {
        SqlValue::Date(v)
    }
}

impl From<Area> for SqlValue {
    fn from(v: Area) -> Self {
        SqlValue::Text(v.as_str().to_string())
    }
}

fn push_value(qb: &mut QueryBuilder<'_, Sqlite>, value: SqlValue) {
    match value {
        SqlValue::Int(v) => qb.push_bind(v),
        SqlValue::Text(v) => qb.push_bind(v),
        SqlValue::Date(v) => qb.push_bind(v),
    };
}

fn push_list(qb: &mut QueryBuilder<'_, Sqlite>, values: Vec<SqlValue>) {
    qb.push("(");
    for (i, value) in values.into_iter().enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        push_value(qb, value);
    }
    qb.push(")");
}

/// Case folding shared by stored `*_folded` columns and search patterns
pub(crate) fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// Escape LIKE wildcards so user text matches literally
pub(crate) fn like_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('%');
    for c in fold_case(text).chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// `folded_column` is only read by the substring predicates
fn push_predicate<T: Into<SqlValue>>(
    qb: &mut QueryBuilder<'_, Sqlite>,
    column: &str,
    folded_column: &str,
    predicate: Predicate<T>,
) {
    let binary = |qb: &mut QueryBuilder<'_, Sqlite>, op: &str, v: T| {
        qb.push(column).push(op);
        push_value(qb, v.into());
    };

    match predicate {
        Predicate::Eq(v) => binary(qb, " = ", v),
        Predicate::NotEq(v) => binary(qb, " <> ", v),
        Predicate::Gt(v) => binary(qb, " > ", v),
        Predicate::Lt(v) => binary(qb, " < ", v),
        Predicate::Ge(v) => binary(qb, " >= ", v),
        Predicate::Le(v) => binary(qb, " <= ", v),
        Predicate::IsNull => {
            qb.push(column).push(" IS NULL");
        }
        Predicate::IsNotNull => {
            qb.push(column).push(" IS NOT NULL");
        }
        Predicate::In(values) if values.is_empty() => {
            qb.push("1 = 0");
        }
        Predicate::In(values) => {
            qb.push(column).push(" IN ");
            push_list(qb, values.into_iter().map(Into::into).collect());
        }
        Predicate::NotIn(values) if values.is_empty() => {
            qb.push(column).push(" IS NOT NULL");
        }
        Predicate::NotIn(values) => {
            qb.push(column).push(" NOT IN ");
            push_list(qb, values.into_iter().map(Into::into).collect());
        }
        Predicate::Contains(text) => {
            qb.push(folded_column).push(" LIKE ");
            qb.push_bind(like_pattern(&text)).push(" ESCAPE '\\'");
        }
        Predicate::NotContains(text) => {
            qb.push(folded_column).push(" NOT LIKE ");
            qb.push_bind(like_pattern(&text)).push(" ESCAPE '\\'");
        }
    }
}

/// Appends `WHERE`/`AND` conditions to a query under construction
pub(crate) struct Conditions<'b, 'args> {
    qb: &'b mut QueryBuilder<'args, Sqlite>,
    empty: bool,
}

impl<'b, 'args> Conditions<'b, 'args> {
    pub fn new(qb: &'b mut QueryBuilder<'args, Sqlite>) -> Self {
        Self { qb, empty: true }
    }

    fn next(&mut self) -> &mut QueryBuilder<'args, Sqlite> {
        self.qb.push(if self.empty { " WHERE " } else { " AND " });
        self.empty = false;
        self.qb
    }

    /// Conditions on a column of the queried table
    pub fn column<T: Into<SqlValue>>(&mut self, column: &str, predicates: Vec<Predicate<T>>) {
        self.text(column, column, predicates);
    }

    /// Conditions on a text column with a case-folded copy for `contains`
    pub fn text<T: Into<SqlValue>>(&mut self, column: &str, folded_column: &str, predicates: Vec<Predicate<T>>) {
        for predicate in predicates {
            let qb = self.next();
            push_predicate(qb, column, folded_column, predicate);
        }
    }

    /// Conditions on a to-many relation, expressed as `EXISTS` over the child
    /// table. `specified=false` matches parents without children; the other
    /// predicates must all hold for the same child row.
    pub fn related<T: Into<SqlValue>>(
        &mut self,
        child_table: &str,
        join_condition: &str,
        child_column: &str,
        predicates: Vec<Predicate<T>>,
    ) {
        let mut value_predicates = Vec::new();
        for predicate in predicates {
            match predicate {
                Predicate::IsNull => {
                    self.next()
                        .push("NOT EXISTS (SELECT 1 FROM ")
                        .push(child_table)
                        .push(" WHERE ")
                        .push(join_condition)
                        .push(")");
                }
                Predicate::IsNotNull => {
                    self.next()
                        .push("EXISTS (SELECT 1 FROM ")
                        .push(child_table)
                        .push(" WHERE ")
                        .push(join_condition)
                        .push(")");
                }
                other => value_predicates.push(other),
            }
        }

        if value_predicates.is_empty() {
            return;
        }
        let qb = self.next();
        qb.push("EXISTS (SELECT 1 FROM ")
            .push(child_table)
            .push(" WHERE ")
            .push(join_condition);
        for predicate in value_predicates {
            qb.push(" AND ");
            push_predicate(qb, child_column, child_column, predicate);
        }
        qb.push(")");
    }
}

/// Append `ORDER BY` and `LIMIT/OFFSET` for a page request.
///
/// `columns` maps the JSON property names clients sort by to SQL columns; an
/// unknown property is rejected. The id column always closes the ordering so
/// pages are stable.
pub(crate) fn push_page(
    qb: &mut QueryBuilder<'_, Sqlite>,
    page: &PageRequest,
    columns: &[(&str, &'static str)],
    id_column: &'static str,
) -> Result<()> {
    let mut order = Vec::with_capacity(page.sort.len() + 1);
    for sort in &page.sort {
        let column = columns
            .iter()
            .find(|(property, _)| *property == sort.property)
            .map(|(_, column)| *column)
            .ok_or_else(|| AppError::Validation(format!("Unknown sort property: {}", sort.property)))?;
        order.push((column, sort.direction));
    }
    if !order.iter().any(|(column, _)| *column == id_column) {
        order.push((id_column, Direction::Asc));
    }

    qb.push(" ORDER BY ");
    for (i, (column, direction)) in order.into_iter().enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        qb.push(column).push(" ").push(direction.as_sql());
    }

    qb.push(" LIMIT ").push_bind(i64::from(page.size));
    qb.push(" OFFSET ").push_bind(page.offset() as i64);
    Ok(())
}
