//! Character classification shared by the scanner and the percent-encoder.
//!
//! RFC 6570 defines its grammar over Unicode scalar values, so every
//! predicate here takes a `char`. All of them are pure and stateless.

/// `unreserved` per RFC 3986 section 2.3, extended over Unicode
/// alphanumerics so non-ASCII letters and digits pass through unencoded.
pub(crate) fn is_unreserved(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')
}

/// `reserved` per RFC 3986 section 2.2: gen-delims plus sub-delims.
pub(crate) fn is_reserved(c: char) -> bool {
    matches!(
        c,
        ':' | '/'
            | '?'
            | '#'
            | '['
            | ']'
            | '@'
            | '!'
            | '$'
            | '&'
            | '\''
            | '('
            | ')'
            | '*'
            | '+'
            | ','
            | ';'
            | '='
    )
}

pub(crate) fn is_reserved_or_unreserved(c: char) -> bool {
    is_reserved(c) || is_unreserved(c)
}

/// Scalars permitted in template literal text: everything except controls,
/// Unicode noncharacters, space, and `" % < > \ ^ `` { | }`.
///
/// `%` is excluded here because the scanner gives it its own component (a
/// percent-encoded triplet) rather than treating it as literal text.
pub(crate) fn is_literal(c: char) -> bool {
    !c.is_control()
        && !is_noncharacter(c)
        && !matches!(
            c,
            ' ' | '"' | '%' | '<' | '>' | '\\' | '^' | '`' | '{' | '|' | '}'
        )
}

pub(crate) fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

/// Scalars permitted in a variable name: alphanumerics plus `_ % .`.
pub(crate) fn is_varname_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '%' | '.')
}

/// Scalars that may follow `{` as an expression operator. Includes the
/// operators reserved for future RFC revisions (`= , ! @ |`).
pub(crate) fn is_expression_operator_scalar(c: char) -> bool {
    matches!(
        c,
        '+' | '#' | '.' | '/' | ';' | '?' | '&' | '=' | ',' | '!' | '@' | '|'
    )
}

/// Prefix-modifier lengths are ASCII digits only.
pub(crate) fn is_decimal_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Unicode noncharacters: U+FDD0..=U+FDEF and the last two code points of
/// every plane.
fn is_noncharacter(c: char) -> bool {
    let v = c as u32;
    (0xFDD0..=0xFDEF).contains(&v) || (v & 0xFFFE) == 0xFFFE
}
