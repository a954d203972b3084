//! Typed field filters.
//!
//! A filter is parsed from `field.operator=value` query parameters and lowered
//! to a list of [`Predicate`]s that storage adapters translate into their own
//! query language. All predicates of a filter apply conjunctively.

use crate::domain::error::{DomainError, Result};
use crate::domain::Area;
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

/// Single condition on one field
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate<T> {
    Eq(T),
    NotEq(T),
    IsNull,
    IsNotNull,
    In(Vec<T>),
    NotIn(Vec<T>),
    Gt(T),
    Lt(T),
    Ge(T),
    Le(T),
    /// Case-insensitive substring match
    Contains(String),
    NotContains(String),
}

/// Equality, presence and membership operators
#[derive(Debug, Clone, PartialEq)]
pub struct Filter<T> {
    pub equals: Option<T>,
    pub not_equals: Option<T>,
    pub specified: Option<bool>,
    pub in_list: Option<Vec<T>>,
    pub not_in: Option<Vec<T>>,
}

/// [`Filter`] plus ordering operators
#[derive(Debug, Clone, PartialEq)]
pub struct RangeFilter<T> {
    pub filter: Filter<T>,
    pub greater_than: Option<T>,
    pub less_than: Option<T>,
    pub greater_than_or_equal: Option<T>,
    pub less_than_or_equal: Option<T>,
}

/// [`Filter`] plus substring operators
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringFilter {
    pub filter: Filter<String>,
    pub contains: Option<String>,
    pub does_not_contain: Option<String>,
}

pub type LongFilter = RangeFilter<i64>;
pub type IntegerFilter = RangeFilter<i32>;
pub type LocalDateFilter = RangeFilter<NaiveDate>;
pub type AreaFilter = Filter<Area>;

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Self {
            equals: None,
            not_equals: None,
            specified: None,
            in_list: None,
            not_in: None,
        }
    }
}

impl<T> Default for RangeFilter<T> {
    fn default() -> Self {
        Self {
            filter: Filter::default(),
            greater_than: None,
            less_than: None,
            greater_than_or_equal: None,
            less_than_or_equal: None,
        }
    }
}

/// Text parses as sent; padding is only stripped when the exact value fails
fn parse_value<T: FromStr>(field: &str, raw: &str) -> Result<T> {
    raw.parse().or_else(|_| raw.trim().parse()).map_err(|_| DomainError::InvalidValue {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

fn parse_list<T: FromStr>(field: &str, raw: &str) -> Result<Vec<T>> {
    raw.split(',').map(|item| parse_value(field, item)).collect()
}

pub(crate) fn parse_bool(field: &str, raw: &str) -> Result<bool> {
    match raw.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(DomainError::InvalidValue {
            field: field.to_string(),
            value: raw.to_string(),
        }),
    }
}

fn unsupported(field: &str, op: &str) -> DomainError {
    DomainError::UnsupportedOperator(format!("{}.{}", field, op))
}

impl<T: FromStr + Clone> Filter<T> {
    /// Returns `Ok(false)` when `op` is not a base operator
    fn try_set(&mut self, field: &str, op: &str, raw: &str) -> Result<bool> {
        match op {
            "equals" => self.equals = Some(parse_value(field, raw)?),
            "notEquals" => self.not_equals = Some(parse_value(field, raw)?),
            "specified" => self.specified = Some(parse_bool(field, raw)?),
            "in" => self.in_list = Some(parse_list(field, raw)?),
            "notIn" => self.not_in = Some(parse_list(field, raw)?),
            _ => return Ok(false),
        }
        Ok(true)
    }

    pub fn set(&mut self, field: &str, op: &str, raw: &str) -> Result<()> {
        if self.try_set(field, op, raw)? {
            Ok(())
        } else {
            Err(unsupported(field, op))
        }
    }

    pub fn predicates(&self) -> Vec<Predicate<T>> {
        let mut out = Vec::new();
        if let Some(v) = &self.equals {
            out.push(Predicate::Eq(v.clone()));
        }
        if let Some(v) = &self.not_equals {
            out.push(Predicate::NotEq(v.clone()));
        }
        match self.specified {
            Some(true) => out.push(Predicate::IsNotNull),
            Some(false) => out.push(Predicate::IsNull),
            None => {}
        }
        if let Some(v) = &self.in_list {
            out.push(Predicate::In(v.clone()));
        }
        if let Some(v) = &self.not_in {
            out.push(Predicate::NotIn(v.clone()));
        }
        out
    }
}

impl<T: FromStr + Clone> RangeFilter<T> {
    pub fn set(&mut self, field: &str, op: &str, raw: &str) -> Result<()> {
        if self.filter.try_set(field, op, raw)? {
            return Ok(());
        }
        match op {
            "greaterThan" => self.greater_than = Some(parse_value(field, raw)?),
            "lessThan" => self.less_than = Some(parse_value(field, raw)?),
            "greaterThanOrEqual" => self.greater_than_or_equal = Some(parse_value(field, raw)?),
            "lessThanOrEqual" => self.less_than_or_equal = Some(parse_value(field, raw)?),
            _ => return Err(unsupported(field, op)),
        }
        Ok(())
    }

    pub fn predicates(&self) -> Vec<Predicate<T>> {
        let mut out = self.filter.predicates();
        if let Some(v) = &self.greater_than {
            out.push(Predicate::Gt(v.clone()));
        }
        if let Some(v) = &self.less_than {
            out.push(Predicate::Lt(v.clone()));
        }
        if let Some(v) = &self.greater_than_or_equal {
            out.push(Predicate::Ge(v.clone()));
        }
        if let Some(v) = &self.less_than_or_equal {
            out.push(Predicate::Le(v.clone()));
        }
        out
    }
}

impl StringFilter {
    pub fn set(&mut self, field: &str, op: &str, raw: &str) -> Result<()> {
        if self.filter.try_set(field, op, raw)? {
            return Ok(());
        }
        match op {
            "contains" => self.contains = Some(raw.to_string()),
            "doesNotContain" => self.does_not_contain = Some(raw.to_string()),
            _ => return Err(unsupported(field, op)),
        }
        Ok(())
    }

    pub fn predicates(&self) -> Vec<Predicate<String>> {
        let mut out = self.filter.predicates();
        if let Some(v) = &self.contains {
            out.push(Predicate::Contains(v.clone()));
        }
        if let Some(v) = &self.does_not_contain {
            out.push(Predicate::NotContains(v.clone()));
        }
        out
    }
}

// Display renders only the operators that are set, e.g. `[equals=1, in=[1, 2]]`

struct Parts<'a, 'b> {
    f: &'a mut fmt::Formatter<'b>,
    first: bool,
}

impl<'a, 'b> Parts<'a, 'b> {
    fn new(f: &'a mut fmt::Formatter<'b>) -> Self {
        Self { f, first: true }
    }

    fn sep(&mut self) -> fmt::Result {
        if self.first {
            self.first = false;
            Ok(())
        } else {
            self.f.write_str(", ")
        }
    }

    fn value<V: fmt::Display>(&mut self, name: &str, value: &Option<V>) -> fmt::Result {
        if let Some(v) = value {
            self.sep()?;
            write!(self.f, "{}={}", name, v)?;
        }
        Ok(())
    }

    fn list<V: fmt::Display>(&mut self, name: &str, values: &Option<Vec<V>>) -> fmt::Result {
        if let Some(values) = values {
            self.sep()?;
            write!(self.f, "{}=[", name)?;
            for (i, v) in values.iter().enumerate() {
                if i > 0 {
                    self.f.write_str(", ")?;
                }
                write!(self.f, "{}", v)?;
            }
            self.f.write_str("]")?;
        }
        Ok(())
    }
}

impl<T: fmt::Display> Filter<T> {
    fn write_parts(&self, parts: &mut Parts<'_, '_>) -> fmt::Result {
        parts.value("equals", &self.equals)?;
        parts.value("notEquals", &self.not_equals)?;
        parts.value("specified", &self.specified)?;
        parts.list("in", &self.in_list)?;
        parts.list("notIn", &self.not_in)
    }
}

impl<T: fmt::Display> fmt::Display for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        self.write_parts(&mut Parts::new(f))?;
        f.write_str("]")
    }
}

impl<T: fmt::Display> fmt::Display for RangeFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        let mut parts = Parts::new(f);
        self.filter.write_parts(&mut parts)?;
        parts.value("greaterThan", &self.greater_than)?;
        parts.value("lessThan", &self.less_than)?;
        parts.value("greaterThanOrEqual", &self.greater_than_or_equal)?;
        parts.value("lessThanOrEqual", &self.less_than_or_equal)?;
        f.write_str("]")
    }
}

impl fmt::Display for StringFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        let mut parts = Parts::new(f);
        self.filter.write_parts(&mut parts)?;
        parts.value("contains", &self.contains)?;
        parts.value("doesNotContain", &self.does_not_contain)?;
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_filter_parses_all_operators() {
        let mut filter = LongFilter::default();
        filter.set("id", "equals", "5").unwrap();
        filter.set("id", "greaterThanOrEqual", "1").unwrap();
        filter.set("id", "lessThan", "10").unwrap();
        filter.set("id", "in", "5,6,7").unwrap();

        assert_eq!(
            filter.predicates(),
            vec![
                Predicate::Eq(5),
                Predicate::In(vec![5, 6, 7]),
                Predicate::Lt(10),
                Predicate::Ge(1),
            ]
        );
    }

    #[test]
    fn test_specified_maps_to_null_checks() {
        let mut filter = StringFilter::default();
        filter.set("nome", "specified", "false").unwrap();
        assert_eq!(filter.predicates(), vec![Predicate::IsNull]);

        filter.set("nome", "specified", "true").unwrap();
        assert_eq!(filter.predicates(), vec![Predicate::IsNotNull]);

        assert!(filter.set("nome", "specified", "yes").is_err());
    }

    #[test]
    fn test_string_filter_keeps_raw_text() {
        let mut filter = StringFilter::default();
        filter.set("nome", "contains", "AAA").unwrap();
        filter.set("nome", "doesNotContain", "B,B").unwrap();

        assert_eq!(
            filter.predicates(),
            vec![
                Predicate::Contains("AAA".into()),
                Predicate::NotContains("B,B".into())
            ]
        );
    }

    #[test]
    fn test_string_equality_keeps_padding() {
        let mut filter = StringFilter::default();
        filter.set("nome", "equals", " Ana ").unwrap();
        filter.set("nome", "notEquals", "Bia ").unwrap();
        filter.set("nome", "in", " a, b").unwrap();
        filter.set("nome", "notIn", "c ").unwrap();

        assert_eq!(
            filter.predicates(),
            vec![
                Predicate::Eq(" Ana ".to_string()),
                Predicate::NotEq("Bia ".to_string()),
                Predicate::In(vec![" a".to_string(), " b".to_string()]),
                Predicate::NotIn(vec!["c ".to_string()]),
            ]
        );
    }

    #[test]
    fn test_numeric_values_tolerate_padding() {
        let mut filter = LongFilter::default();
        filter.set("id", "in", "1, 2").unwrap();
        filter.set("id", "greaterThan", " 0 ").unwrap();
        assert_eq!(filter.predicates(), vec![Predicate::In(vec![1, 2]), Predicate::Gt(0)]);
    }

    #[test]
    fn test_string_filter_rejects_range_operator() {
        let mut filter = StringFilter::default();
        let err = filter.set("nome", "greaterThan", "A").unwrap_err();
        assert_eq!(err, DomainError::UnsupportedOperator("nome.greaterThan".into()));
    }

    #[test]
    fn test_area_filter_rejects_unknown_area() {
        let mut filter = AreaFilter::default();
        filter.set("area", "in", "HUMANAS,NATUREZA").unwrap();
        assert_eq!(
            filter.in_list,
            Some(vec![Area::Humanas, Area::Natureza])
        );

        assert!(filter.set("area", "equals", "FISICA").is_err());
        assert!(filter.set("area", "contains", "HUM").is_err());
    }

    #[test]
    fn test_invalid_number_is_reported_with_field() {
        let mut filter = IntegerFilter::default();
        let err = filter.set("valor", "equals", "abc").unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidValue {
                field: "valor".into(),
                value: "abc".into()
            }
        );
    }

    #[test]
    fn test_date_filter_parses_iso_dates() {
        let mut filter = LocalDateFilter::default();
        filter.set("dataNascimento", "lessThanOrEqual", "1970-01-01").unwrap();
        assert_eq!(
            filter.predicates(),
            vec![Predicate::Le(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap())]
        );
    }

    #[test]
    fn test_display_lists_only_set_operators() {
        let mut filter = LongFilter::default();
        assert_eq!(filter.to_string(), "[]");

        filter.set("id", "in", "1,2").unwrap();
        filter.set("id", "greaterThan", "0").unwrap();
        assert_eq!(filter.to_string(), "[in=[1, 2], greaterThan=0]");
    }
}
