//! Per-cell validity rules.
//!
//! The only cross-field rule is the threshold pair: a `high` value must be
//! strictly greater than the row's `low`. Everything else is valid unless the
//! host registers a text predicate for the field.

use std::rc::Rc;

use crate::types::{fields, parse_number, RowRecord};

/// Caller-supplied validity check for a text cell: `(row, candidate) -> valid`.
pub type RowPredicate = Rc<dyn Fn(&RowRecord, &str) -> bool>;

/// Predicate that accepts everything.
#[must_use]
pub fn accept_all() -> RowPredicate {
    Rc::new(|_: &RowRecord, _: &str| true)
}

/// Decide whether `candidate` is an acceptable value for `field` in `row`.
///
/// For `high` the candidate is invalid only when both it and the row's `low`
/// are numeric and `candidate <= low`. Blank or non-numeric input never trips
/// the rule.
#[must_use]
pub fn is_valid(row: &RowRecord, field: &str, candidate: &str) -> bool {
    if field != fields::HIGH {
        return true;
    }
    let (Some(high), Some(low)) = (parse_number(candidate), row.get(fields::LOW).as_number())
    else {
        return true;
    };
    high > low
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

    fn row(low: &str) -> RowRecord {
        RowRecord::new()
            .with("amount", "90899")
            .with("low", low)
            .with("high", "1000")
    }

    #[test]
    fn test_high_must_exceed_low() {
        let row = row("100");
        assert!(is_valid(&row, "high", "101"));
        assert!(!is_valid(&row, "high", "100"));
        assert!(!is_valid(&row, "high", "5"));
    }

    #[test]
    fn test_blank_candidate_is_not_checked() {
        let row = row("100");
        assert!(is_valid(&row, "high", ""));
        assert!(is_valid(&row, "high", "abc"));
    }

    #[test]
    fn test_blank_low_is_not_checked() {
        assert!(is_valid(&row(""), "high", "0"));
    }

    #[test]
    fn test_other_fields_always_valid() {
        let row = row("100");
        assert!(is_valid(&row, "low", "5000"));
        assert!(is_valid(&row, "amount", "-1"));
    }

    #[test]
    fn test_accept_all_predicate() {
        let predicate = accept_all();
        assert!(predicate(&RowRecord::new(), "anything"));
    }
}
