//! Naming-convention codec.
//!
//! The two artifacts spell the same entity differently: the schema uses
//! word-delimited lower case (`item_count`), the generated code uses
//! capitalized-word concatenation (`ItemCount`), and nested declarations
//! are flattened into underscore-joined chains (`Invoice_Order`). These
//! pure functions translate between the conventions; addresses always
//! carry the canonical (snake, lower-case) form.

/// Convert a canonical snake-case name to capitalized-concatenation form.
///
/// `item_count` → `ItemCount`. Total: empty segments are skipped, so
/// `__x` → `X`.
pub fn to_pascal(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for segment in name.split('_') {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.extend(chars.flat_map(|c| c.to_lowercase()));
        }
    }
    out
}

/// Convert a capitalized-concatenation name to canonical snake case.
///
/// `ItemCount` → `item_count`. An underscore is inserted before every
/// capital except a leading one, then the whole result is lower-cased.
pub fn to_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            out.push('_');
        }
        out.extend(c.to_lowercase());
    }
    out
}

/// Canonicalize a flattened identifier segment by segment.
///
/// `Invoice_OrderItem` → `invoice_order_item`. Running [`to_snake`] over
/// the whole string would double the underscores already present.
pub fn flattened_to_canonical(name: &str) -> String {
    name.split('_')
        .filter(|s| !s.is_empty())
        .map(to_snake)
        .collect::<Vec<_>>()
        .join("_")
}

/// Longest common prefix of two underscore-delimited names, in whole
/// segments.
///
/// Walks segment by segment while the segments are pairwise equal and
/// rejoins the shared run: `longest_common_prefix("order_item_status",
/// "order_item_status_active")` is `"order_item_status"`, and two names
/// with different first segments share `""`.
pub fn longest_common_prefix(a: &str, b: &str) -> String {
    a.split('_')
        .zip(b.split('_'))
        .take_while(|(x, y)| x == y)
        .map(|(x, _)| x)
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("item_count", "ItemCount")]
    #[case("order", "Order")]
    #[case("a", "A")]
    #[case("payment_status", "PaymentStatus")]
    #[case("", "")]
    fn pascal_from_snake(#[case] snake: &str, #[case] pascal: &str) {
        assert_eq!(to_pascal(snake), pascal);
    }

    #[rstest]
    #[case("ItemCount", "item_count")]
    #[case("Order", "order")]
    #[case("X", "x")]
    fn snake_from_pascal(#[case] pascal: &str, #[case] snake: &str) {
        assert_eq!(to_snake(pascal), snake);
    }

    #[rstest]
    #[case("item_count")]
    #[case("order")]
    #[case("payment_status_code")]
    fn snake_pascal_inverse(#[case] s: &str) {
        assert_eq!(to_snake(&to_pascal(s)), s);
    }

    #[rstest]
    #[case("ItemCount")]
    #[case("Order")]
    #[case("PaymentStatusCode")]
    fn pascal_snake_inverse(#[case] s: &str) {
        assert_eq!(to_pascal(&to_snake(s)), s);
    }

    #[rstest]
    #[case("order_item_status", "order_item_status_active", "order_item_status")]
    #[case("status", "status_active", "status")]
    #[case("a_b", "c_d", "")]
    #[case("order_x", "order_y", "order")]
    fn lcp_cases(#[case] a: &str, #[case] b: &str, #[case] expected: &str) {
        assert_eq!(longest_common_prefix(a, b), expected);
    }

    #[test]
    fn lcp_stops_at_first_mismatch() {
        // Segments equal after a mismatch must not be collected.
        assert_eq!(longest_common_prefix("a_x_c", "b_x_c"), "");
    }

    #[test]
    fn flattened_canonical_keeps_single_underscores() {
        assert_eq!(flattened_to_canonical("Invoice_Status"), "invoice_status");
        assert_eq!(
            flattened_to_canonical("Invoice_OrderItem"),
            "invoice_order_item"
        );
    }
}
