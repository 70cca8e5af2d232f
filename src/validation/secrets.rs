use subtle::ConstantTimeEq;

/// Compares two secrets without short-circuiting on the first differing byte.
///
/// Length is not hidden: inputs of different length compare unequal immediately.
pub fn constant_time_eq_str(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
