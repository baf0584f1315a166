//! Generalization label wire format: `{v1; v2; ...}` for buckets with more
//! than one member, the bare value for singleton buckets.
//!
//! Shared by the Domain Encoder (bucket labels), the diversity
//! post-processor (merged class labels), and the resamplers (parsing a cell
//! back into its constituent values).

/// Separator between members of a generalization label. Part of the wire
/// format, not an implementation detail.
pub const GEN_DELIMITER: &str = "; ";

/// Format a bucket's member values as an output cell.
///
/// A singleton bucket emits its value verbatim; anything larger emits
/// `{v1; v2; ...}` with members in the order given (callers are expected to
/// pass values already in ascending domain order).
#[must_use]
pub fn format_generalization<S: AsRef<str>>(values: &[S]) -> String {
    match values {
        [single] => single.as_ref().to_string(),
        _ => format!(
            "{{{}}}",
            values.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(GEN_DELIMITER)
        ),
    }
}

/// Whether a cell is a generalization label rather than an original value.
#[must_use]
pub fn is_generalized(cell: &str) -> bool {
    cell.starts_with('{') && cell.ends_with('}')
}

/// Parse a generalization label's member values back out. A non-label cell
/// is treated as a singleton containing itself.
#[must_use]
pub fn parse_generalization(cell: &str) -> Vec<&str> {
    if is_generalized(cell) {
        cell[1..cell.len() - 1].split(GEN_DELIMITER).collect()
    } else {
        vec![cell]
    }
}
