//! Expansion: the per-operator configuration table, percent-encoding, and
//! value formatting.

use crate::ast::{Component, Expression, ExpressionOperator, VariableModifier, VariableSpec};
use crate::charset;
use crate::error::TemplateError;
use crate::value::{VariableProvider, VariableValue};

/// Which pass-through set percent-encoding honors for an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AllowedEncoding {
    Unreserved,
    UnreservedAndReserved,
}

impl AllowedEncoding {
    fn contains(self, c: char) -> bool {
        match self {
            AllowedEncoding::Unreserved => charset::is_unreserved(c),
            AllowedEncoding::UnreservedAndReserved => charset::is_reserved_or_unreserved(c),
        }
    }
}

/// The fixed expansion behavior of one operator.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ExpansionConfiguration {
    pub(crate) allowed: AllowedEncoding,
    pub(crate) prefix: Option<char>,
    pub(crate) separator: char,
    pub(crate) named: bool,
    pub(crate) omit_orphaned_equals: bool,
    pub(crate) allow_percent_encoded_triplets: bool,
}

impl ExpressionOperator {
    /// The canonical RFC 6570 behavior table (levels 1-4).
    pub(crate) fn expansion_configuration(self) -> ExpansionConfiguration {
        match self {
            ExpressionOperator::Simple => ExpansionConfiguration {
                allowed: AllowedEncoding::Unreserved,
                prefix: None,
                separator: ',',
                named: false,
                omit_orphaned_equals: false,
                allow_percent_encoded_triplets: false,
            },
            ExpressionOperator::Reserved => ExpansionConfiguration {
                allowed: AllowedEncoding::UnreservedAndReserved,
                prefix: None,
                separator: ',',
                named: false,
                omit_orphaned_equals: false,
                allow_percent_encoded_triplets: true,
            },
            ExpressionOperator::Fragment => ExpansionConfiguration {
                allowed: AllowedEncoding::UnreservedAndReserved,
                prefix: Some('#'),
                separator: ',',
                named: false,
                omit_orphaned_equals: false,
                allow_percent_encoded_triplets: true,
            },
            ExpressionOperator::Label => ExpansionConfiguration {
                allowed: AllowedEncoding::Unreserved,
                prefix: Some('.'),
                separator: '.',
                named: false,
                omit_orphaned_equals: false,
                allow_percent_encoded_triplets: false,
            },
            ExpressionOperator::PathSegment => ExpansionConfiguration {
                allowed: AllowedEncoding::Unreserved,
                prefix: Some('/'),
                separator: '/',
                named: false,
                omit_orphaned_equals: false,
                allow_percent_encoded_triplets: false,
            },
            ExpressionOperator::PathStyle => ExpansionConfiguration {
                allowed: AllowedEncoding::Unreserved,
                prefix: Some(';'),
                separator: ';',
                named: true,
                omit_orphaned_equals: true,
                allow_percent_encoded_triplets: false,
            },
            ExpressionOperator::Query => ExpansionConfiguration {
                allowed: AllowedEncoding::Unreserved,
                prefix: Some('?'),
                separator: '&',
                named: true,
                omit_orphaned_equals: false,
                allow_percent_encoded_triplets: false,
            },
            ExpressionOperator::QueryContinuation => ExpansionConfiguration {
                allowed: AllowedEncoding::Unreserved,
                prefix: Some('&'),
                separator: '&',
                named: true,
                omit_orphaned_equals: false,
                allow_percent_encoded_triplets: false,
            },
        }
    }
}

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Percent-encodes `input`: scalars in the allowed set pass through,
/// everything else is emitted as uppercase `%XX` triplets of its UTF-8
/// bytes.
///
/// With `allow_percent_encoded_triplets`, a `%25XX` (XX hex) produced from a
/// `%` that already headed a valid triplet in the input is restored to
/// `%XX`. The restoration is one left-to-right pass; restored triplets are
/// not re-examined.
pub(crate) fn percent_encode(
    input: &str,
    allowed: AllowedEncoding,
    allow_percent_encoded_triplets: bool,
) -> String {
    let mut encoded = String::with_capacity(input.len());
    let mut utf8 = [0u8; 4];
    for c in input.chars() {
        if allowed.contains(c) {
            encoded.push(c);
        } else {
            for &byte in c.encode_utf8(&mut utf8).as_bytes() {
                encoded.push('%');
                encoded.push(HEX_DIGITS[usize::from(byte >> 4)] as char);
                encoded.push(HEX_DIGITS[usize::from(byte & 0x0F)] as char);
            }
        }
    }
    if allow_percent_encoded_triplets {
        restore_percent_triplets(&encoded)
    } else {
        encoded
    }
}

/// Rewrites `%25XX` back to `%XX` wherever `XX` is a hex pair.
fn restore_percent_triplets(encoded: &str) -> String {
    let mut out = String::with_capacity(encoded.len());
    let mut rest = encoded;
    while let Some(index) = rest.find("%25") {
        let after = &rest[index + 3..];
        let mut hex = after.chars();
        let is_triplet = matches!(hex.next(), Some(c) if charset::is_hex_digit(c))
            && matches!(hex.next(), Some(c) if charset::is_hex_digit(c));
        if is_triplet {
            // Keep the `%`, drop the `25`; the hex pair is copied with the
            // remainder and never rescanned.
            out.push_str(&rest[..index + 1]);
        } else {
            out.push_str(&rest[..index + 3]);
        }
        rest = after;
    }
    out.push_str(rest);
    out
}

/// A value-level formatting failure; converted to
/// [`TemplateError::ExpansionFailure`] where the expression position is
/// known.
pub(crate) struct FormatFailure {
    reason: &'static str,
}

impl FormatFailure {
    const PREFIX_ON_COMPOSITE: FormatFailure = FormatFailure {
        reason: "Prefix operator can only be applied to string",
    };
}

/// Formats one variable's value under its modifier and the active
/// configuration. `Ok(None)` means the value contributes nothing to the
/// expression (an empty list or associative array).
pub(crate) fn format_value(
    value: &VariableValue,
    spec: &VariableSpec,
    configuration: &ExpansionConfiguration,
) -> Result<Option<String>, FormatFailure> {
    match value {
        VariableValue::String(text) => Ok(Some(format_string(text, spec, configuration))),
        VariableValue::List(items) => match spec.modifier {
            VariableModifier::Prefix(_) => Err(FormatFailure::PREFIX_ON_COMPOSITE),
            VariableModifier::Explode => Ok(explode_list(items, spec, configuration)),
            VariableModifier::None => Ok(format_list(items, spec, configuration)),
        },
        VariableValue::AssociativeArray(pairs) => match spec.modifier {
            VariableModifier::Prefix(_) => Err(FormatFailure::PREFIX_ON_COMPOSITE),
            VariableModifier::Explode => Ok(explode_pairs(pairs, spec, configuration)),
            VariableModifier::None => Ok(format_pairs(pairs, spec, configuration)),
        },
    }
}

/// `name=encoded` when the configuration is named (with the orphaned-equals
/// rule), bare `encoded` otherwise.
fn named_render(name: &str, encoded: String, configuration: &ExpansionConfiguration) -> String {
    if configuration.named {
        if encoded.is_empty() && configuration.omit_orphaned_equals {
            name.to_string()
        } else {
            format!("{name}={encoded}")
        }
    } else {
        encoded
    }
}

fn format_string(text: &str, spec: &VariableSpec, configuration: &ExpansionConfiguration) -> String {
    // Prefix truncation counts scalars, not bytes, and happens before
    // encoding. Explode is a no-op for strings.
    let truncated: String;
    let value = match spec.prefix_length() {
        Some(length) => {
            truncated = text.chars().take(length).collect();
            truncated.as_str()
        }
        None => text,
    };
    let encoded = percent_encode(
        value,
        configuration.allowed,
        configuration.allow_percent_encoded_triplets,
    );
    named_render(&spec.name, encoded, configuration)
}

fn format_list(
    items: &[String],
    spec: &VariableSpec,
    configuration: &ExpansionConfiguration,
) -> Option<String> {
    if items.is_empty() {
        return None;
    }
    // Non-exploded list elements always join with `,` regardless of the
    // operator separator.
    let mut joined = String::new();
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            joined.push(',');
        }
        joined.push_str(&percent_encode(
            item,
            configuration.allowed,
            configuration.allow_percent_encoded_triplets,
        ));
    }
    Some(named_render(&spec.name, joined, configuration))
}

fn explode_list(
    items: &[String],
    spec: &VariableSpec,
    configuration: &ExpansionConfiguration,
) -> Option<String> {
    if items.is_empty() {
        return None;
    }
    let mut out = String::new();
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            out.push(configuration.separator);
        }
        let encoded = percent_encode(
            item,
            configuration.allowed,
            configuration.allow_percent_encoded_triplets,
        );
        out.push_str(&named_render(&spec.name, encoded, configuration));
    }
    Some(out)
}

fn format_pairs(
    pairs: &[(String, String)],
    spec: &VariableSpec,
    configuration: &ExpansionConfiguration,
) -> Option<String> {
    if pairs.is_empty() {
        return None;
    }
    let mut joined = String::new();
    for (index, (key, item)) in pairs.iter().enumerate() {
        if index > 0 {
            joined.push(',');
        }
        joined.push_str(&percent_encode(
            key,
            configuration.allowed,
            configuration.allow_percent_encoded_triplets,
        ));
        joined.push(',');
        joined.push_str(&percent_encode(
            item,
            configuration.allowed,
            configuration.allow_percent_encoded_triplets,
        ));
    }
    // The flattened k,v list is named as a whole; the orphaned-equals rule
    // does not apply at this level.
    if configuration.named {
        Some(format!("{}={}", spec.name, joined))
    } else {
        Some(joined)
    }
}

fn explode_pairs(
    pairs: &[(String, String)],
    spec: &VariableSpec,
    configuration: &ExpansionConfiguration,
) -> Option<String> {
    if pairs.is_empty() {
        return None;
    }
    let mut out = String::new();
    for (index, (key, item)) in pairs.iter().enumerate() {
        if index > 0 {
            out.push(configuration.separator);
        }
        let encoded_key = percent_encode(
            key,
            configuration.allowed,
            configuration.allow_percent_encoded_triplets,
        );
        let encoded_value = percent_encode(
            item,
            configuration.allowed,
            configuration.allow_percent_encoded_triplets,
        );
        // Exploded pairs are named by their own key, so the orphaned-equals
        // rule drops the `=` after the key, not after the variable name.
        if configuration.named && encoded_value.is_empty() && configuration.omit_orphaned_equals {
            out.push_str(&encoded_key);
        } else {
            out.push_str(&encoded_key);
            out.push('=');
            out.push_str(&encoded_value);
        }
    }
    Some(out)
}

impl Component {
    pub(crate) fn expand(
        &self,
        variables: &dyn VariableProvider,
    ) -> Result<String, TemplateError> {
        match self {
            // Literal runs re-encode against reserved∪unreserved, so legal
            // URI characters pass through unchanged.
            Component::Literal(text) => Ok(percent_encode(
                text,
                AllowedEncoding::UnreservedAndReserved,
                false,
            )),
            Component::PercentEncodedTriplet(text) => Ok(text.clone()),
            Component::Expression(expression) => expression.expand(variables),
        }
    }
}

impl Expression {
    fn expand(&self, variables: &dyn VariableProvider) -> Result<String, TemplateError> {
        let configuration = self.operator.expansion_configuration();
        let mut expansions: Vec<String> = Vec::new();
        for spec in &self.variable_list {
            // Absent variables contribute nothing; this is not an error.
            let Some(value) = variables.value(&spec.name) else {
                continue;
            };
            match format_value(&value, spec, &configuration) {
                Ok(Some(expansion)) => expansions.push(expansion),
                Ok(None) => {}
                Err(failure) => {
                    return Err(TemplateError::ExpansionFailure {
                        position: self.position,
                        reason: format!(
                            "Failed expanding variable \"{}\": {}",
                            spec.name, failure.reason
                        ),
                    });
                }
            }
        }
        if expansions.is_empty() {
            return Ok(String::new());
        }
        let mut out = String::new();
        if let Some(prefix) = configuration.prefix {
            out.push(prefix);
        }
        for (index, expansion) in expansions.iter().enumerate() {
            if index > 0 {
                out.push(configuration.separator);
            }
            out.push_str(expansion);
        }
        Ok(out)
    }
}
