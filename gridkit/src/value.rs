//! Cell values produced by column accessors.

use std::cmp::Ordering;
use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Display format used when a date-time cell is stringified.
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A dynamic value read out of a row by a column accessor.
///
/// The engine never looks at rows directly. Sorting, filtering and the
/// default cell rendering all go through this type, which is why it carries
/// a small, closed set of variants with well defined ordering and
/// stringification.
///
/// | Row data            | Variant    |
/// |---------------------|------------|
/// | missing / null      | `Null`     |
/// | flags               | `Bool`     |
/// | integers            | `Int`      |
/// | floating point      | `Float`    |
/// | prices, quantities  | `Decimal`  |
/// | strings             | `Text`     |
/// | timestamps          | `DateTime` |
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Null/empty value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Arbitrary precision decimal.
    Decimal(Decimal),
    /// String value.
    Text(String),
    /// Date and time in UTC.
    DateTime(DateTime<Utc>),
}

impl CellValue {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Returns `true` for `Int`, `Float` and `Decimal`.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            CellValue::Int(_) | CellValue::Float(_) | CellValue::Decimal(_)
        )
    }

    /// Returns the numeric value as `f64`, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(v) => Some(*v as f64),
            CellValue::Float(v) => Some(*v),
            CellValue::Decimal(v) => v.to_f64(),
            _ => None,
        }
    }

    /// Returns the string content if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Null => "null",
            CellValue::Bool(_) => "bool",
            CellValue::Int(_) => "int",
            CellValue::Float(_) => "float",
            CellValue::Decimal(_) => "decimal",
            CellValue::Text(_) => "text",
            CellValue::DateTime(_) => "datetime",
        }
    }

    /// Compare two values for sorting.
    ///
    /// Numbers compare numerically when both sides are numeric. Everything
    /// else compares by its display string, case-insensitively first and
    /// then exactly. Nulls sort before numbers, numbers before other values,
    /// which keeps the ordering total for mixed-type columns.
    pub fn compare(&self, other: &CellValue) -> Ordering {
        let rank = self.rank().cmp(&other.rank());
        if rank != Ordering::Equal {
            return rank;
        }

        match (self, other) {
            (CellValue::Null, CellValue::Null) => Ordering::Equal,
            (CellValue::Int(a), CellValue::Int(b)) => a.cmp(b),
            (CellValue::Decimal(a), CellValue::Decimal(b)) => a.cmp(b),
            (a, b) if a.is_numeric() => {
                let a = a.as_f64().unwrap_or(f64::NAN);
                let b = b.as_f64().unwrap_or(f64::NAN);
                a.total_cmp(&b)
            }
            (a, b) => compare_text(&a.to_string(), &b.to_string()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            CellValue::Null => 0,
            CellValue::Int(_) | CellValue::Float(_) | CellValue::Decimal(_) => 1,
            _ => 2,
        }
    }
}

/// Case-insensitive comparison with an exact tie-break.
pub(crate) fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(v) => write!(f, "{}", v),
            CellValue::Int(v) => write!(f, "{}", v),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Decimal(v) => write!(f, "{}", v),
            CellValue::Text(v) => f.write_str(v),
            CellValue::DateTime(v) => write!(f, "{}", v.format(DATETIME_FORMAT)),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Bool(v)
    }
}

impl From<i32> for CellValue {
    fn from(v: i32) -> Self {
        CellValue::Int(v as i64)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Int(v)
    }
}

impl From<u32> for CellValue {
    fn from(v: u32) -> Self {
        CellValue::Int(v as i64)
    }
}

impl From<usize> for CellValue {
    fn from(v: usize) -> Self {
        match i64::try_from(v) {
            Ok(v) => CellValue::Int(v),
            Err(_) => CellValue::Float(v as f64),
        }
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<Decimal> for CellValue {
    fn from(v: Decimal) -> Self {
        CellValue::Decimal(v)
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::Text(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Text(v.to_string())
    }
}

impl From<&String> for CellValue {
    fn from(v: &String) -> Self {
        CellValue::Text(v.clone())
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(v: DateTime<Utc>) -> Self {
        CellValue::DateTime(v)
    }
}

impl From<&serde_json::Value> for CellValue {
    fn from(v: &serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => CellValue::Null,
            serde_json::Value::Bool(b) => CellValue::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => CellValue::Int(i),
                None => n.as_f64().map(CellValue::Float).unwrap_or_default(),
            },
            serde_json::Value::String(s) => CellValue::Text(s.clone()),
            other => CellValue::Text(other.to_string()),
        }
    }
}

impl From<serde_json::Value> for CellValue {
    fn from(v: serde_json::Value) -> Self {
        CellValue::from(&v)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => CellValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_compare_numerically() {
        let a = CellValue::Int(9);
        let b = CellValue::Int(10);
        assert_eq!(a.compare(&b), Ordering::Less);

        let c = CellValue::Float(9.5);
        assert_eq!(c.compare(&b), Ordering::Less);
        assert_eq!(b.compare(&c), Ordering::Greater);
    }

    #[test]
    fn test_text_compares_case_insensitively_first() {
        let a = CellValue::from("apple");
        let b = CellValue::from("Banana");
        assert_eq!(a.compare(&b), Ordering::Less);
        // Same letters: exact comparison breaks the tie deterministically.
        let upper = CellValue::from("Apple");
        assert_ne!(upper.compare(&a), Ordering::Equal);
    }

    #[test]
    fn test_nulls_sort_first() {
        assert_eq!(CellValue::Null.compare(&CellValue::Int(-5)), Ordering::Less);
        assert_eq!(CellValue::Null.compare(&CellValue::from("")), Ordering::Less);
    }

    #[test]
    fn test_mixed_column_is_total() {
        // Would form a cycle if numbers and text were compared as strings.
        let values = [
            CellValue::from("1a"),
            CellValue::Int(2),
            CellValue::Int(10),
        ];
        assert_eq!(values[1].compare(&values[2]), Ordering::Less);
        assert_eq!(values[2].compare(&values[0]), Ordering::Less);
        assert_eq!(values[1].compare(&values[0]), Ordering::Less);
    }

    #[test]
    fn test_display() {
        assert_eq!(CellValue::Null.to_string(), "");
        assert_eq!(CellValue::from(42).to_string(), "42");
        assert_eq!(CellValue::from("x").to_string(), "x");
        assert_eq!(CellValue::Decimal(Decimal::new(1999, 2)).to_string(), "19.99");
    }

    #[test]
    fn test_from_json() {
        assert_eq!(CellValue::from(serde_json::json!(3)), CellValue::Int(3));
        assert_eq!(CellValue::from(serde_json::json!(1.5)), CellValue::Float(1.5));
        assert_eq!(CellValue::from(serde_json::json!("a")), CellValue::from("a"));
        assert_eq!(CellValue::from(serde_json::json!(null)), CellValue::Null);
    }
}
