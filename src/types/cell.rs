use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A single cell value as held in a row record.
///
/// Serialized untagged so that row data coming from JavaScript keeps its
/// natural shape: `null` is [`CellValue::Empty`], numbers are
/// [`CellValue::Number`] and strings are [`CellValue::Text`].
///
/// Whole numbers serialize as integers (`2000`, not `2000.0`) so row data keeps
/// the shape it arrived in.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

/// Shared empty value, returned for fields a row does not carry.
pub(crate) static EMPTY: CellValue = CellValue::Empty;

impl CellValue {
    /// `true` for [`CellValue::Empty`] and for the empty string.
    ///
    /// Zero is a value, not an absence.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Number(_) => false,
            CellValue::Text(s) => s.is_empty(),
        }
    }

    /// Numeric view of the value, following JavaScript `Number(x)` on trimmed
    /// text except that blank text and non-finite results are not numbers.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Empty => None,
            CellValue::Number(n) => n.is_finite().then_some(*n),
            CellValue::Text(s) => parse_number(s),
        }
    }

    /// Text shown in an editor seeded from this value. `None` for empty.
    #[must_use]
    pub fn to_draft(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            other => Some(other.to_string()),
        }
    }
}

/// Largest magnitude below which every whole `f64` is an exact integer.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Empty => serializer.serialize_unit(),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER => {
                #[allow(clippy::cast_possible_truncation)]
                let whole = *n as i64;
                serializer.serialize_i64(whole)
            }
            CellValue::Number(n) => serializer.serialize_f64(*n),
            CellValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<Option<i64>> for CellValue {
    fn from(n: Option<i64>) -> Self {
        n.map_or(CellValue::Empty, CellValue::from)
    }
}

/// Parse user text as a finite number. Blank input is not a number.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_detection() {
        assert!(CellValue::Empty.is_empty());
        assert!(CellValue::from("").is_empty());
        assert!(!CellValue::from(" ").is_empty());
        assert!(!CellValue::Number(0.0).is_empty());
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(CellValue::from("1000").as_number(), Some(1000.0));
        assert_eq!(CellValue::from(" 12.5 ").as_number(), Some(12.5));
        assert_eq!(CellValue::from("").as_number(), None);
        assert_eq!(CellValue::from("abc").as_number(), None);
        assert_eq!(CellValue::from("inf").as_number(), None);
        assert_eq!(CellValue::Number(3.0).as_number(), Some(3.0));
        assert_eq!(CellValue::Empty.as_number(), None);
    }

    #[test]
    fn test_draft_rendering() {
        assert_eq!(CellValue::Number(1000.0).to_draft().as_deref(), Some("1000"));
        assert_eq!(CellValue::Number(1000.5).to_draft().as_deref(), Some("1000.5"));
        assert_eq!(CellValue::from("90899").to_draft().as_deref(), Some("90899"));
        assert_eq!(CellValue::Empty.to_draft(), None);
    }

    #[test]
    fn test_untagged_serde() {
        let values: Vec<CellValue> = serde_json::from_str(r#"[null, 1.5, "x"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                CellValue::Empty,
                CellValue::Number(1.5),
                CellValue::Text("x".into())
            ]
        );
        assert_eq!(serde_json::to_string(&values).unwrap(), r#"[null,1.5,"x"]"#);
    }

    #[test]
    fn test_whole_numbers_serialize_as_integers() {
        let values = vec![
            CellValue::Number(2000.0),
            CellValue::Number(1000.1),
            CellValue::Number(-3.0),
            CellValue::Number(0.0),
        ];
        assert_eq!(serde_json::to_string(&values).unwrap(), "[2000,1000.1,-3,0]");
        let back: Vec<CellValue> = serde_json::from_str("[2000,1000.1]").unwrap();
        assert_eq!(back, vec![CellValue::Number(2000.0), CellValue::Number(1000.1)]);
        // beyond exact integer range the float form is kept
        assert!(serde_json::to_string(&CellValue::Number(1e300)).unwrap().contains('e'));
    }
}
