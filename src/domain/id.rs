use std::cmp::Ordering;

/// Orders record ids so that a numeric suffix compares by value:
/// `order_2` sorts before `order_10`. Ids without a suffix fall back to
/// plain string order.
pub fn cmp_ids(a: &str, b: &str) -> Ordering {
    let (a_prefix, a_num) = split_suffix(a);
    let (b_prefix, b_num) = split_suffix(b);
    a_prefix
        .cmp(b_prefix)
        .then_with(|| a_num.len().cmp(&b_num.len()))
        .then_with(|| a_num.cmp(b_num))
        .then_with(|| a.cmp(b))
}

/// Splits off trailing digits, dropping their leading zeros.
fn split_suffix(id: &str) -> (&str, &str) {
    let prefix = id.trim_end_matches(|c: char| c.is_ascii_digit());
    let digits = id[prefix.len()..].trim_start_matches('0');
    (prefix, digits)
}
