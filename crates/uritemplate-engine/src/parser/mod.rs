//! Template scanner.
//!
//! A single pass over the source's Unicode scalars produces the component
//! sequence. Every grammar violation surfaces as
//! [`TemplateError::MalformedTemplate`] with a scalar-offset position into
//! the original string; there is no best-effort mode and no partial result.

use std::str::Chars;

use crate::ast::{
    Component, Expression, ExpressionOperator, VariableList, VariableModifier, VariableSpec,
};
use crate::charset;
use crate::error::TemplateError;

/// Scans a whole template into its components.
pub(crate) fn scan_template(src: &str) -> Result<Vec<Component>, TemplateError> {
    let mut scanner = Scanner::new(src);
    let mut components = Vec::new();
    while !scanner.is_complete() {
        components.push(scanner.scan_component()?);
    }
    Ok(components)
}

struct Scanner<'a> {
    chars: Chars<'a>,
    /// Scalar (not byte) offset of the next unconsumed character.
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            chars: src.chars(),
            pos: 0,
        }
    }

    fn is_complete(&self) -> bool {
        self.peek().is_none()
    }

    fn scan_component(&mut self) -> Result<Component, TemplateError> {
        match self.peek() {
            Some('{') => self.scan_expression_component(),
            Some('%') => self.scan_percent_encoded_component(),
            Some(c) if charset::is_literal(c) => Ok(self.scan_literal_component()),
            _ => Err(self.malformed("Unexpected character")),
        }
    }

    /// A maximal run of literal-legal scalars becomes one component, so
    /// downstream expansion never walks literals scalar-by-scalar.
    fn scan_literal_component(&mut self) -> Component {
        Component::Literal(self.take_while(charset::is_literal))
    }

    /// A `%` must head a valid `%XX` triplet, which is carried through
    /// expansion verbatim; a bare `%` is not legal literal text.
    fn scan_percent_encoded_component(&mut self) -> Result<Component, TemplateError> {
        let position = self.pos;
        self.bump(); // `%`
        let first = self.next_if(charset::is_hex_digit);
        let second = self.next_if(charset::is_hex_digit);
        match (first, second) {
            (Some(first), Some(second)) => {
                let mut triplet = String::with_capacity(3);
                triplet.push('%');
                triplet.push(first);
                triplet.push(second);
                Ok(Component::PercentEncodedTriplet(triplet))
            }
            _ => Err(TemplateError::MalformedTemplate {
                position,
                reason: "% must be percent-encoded in literal".to_string(),
            }),
        }
    }

    fn scan_expression_component(&mut self) -> Result<Component, TemplateError> {
        let position = self.pos;
        self.bump(); // `{`
        let operator = self.scan_expression_operator()?;
        let variable_list = self.scan_variable_list()?;
        Ok(Component::Expression(Expression {
            operator,
            variable_list,
            position,
        }))
    }

    fn scan_expression_operator(&mut self) -> Result<ExpressionOperator, TemplateError> {
        match self.peek() {
            // A `,` here starts the (invalid, empty-named) variable list
            // rather than naming an operator.
            Some(c) if charset::is_expression_operator_scalar(c) && c != ',' => {
                match ExpressionOperator::from_scalar(c) {
                    Some(operator) => {
                        self.bump();
                        Ok(operator)
                    }
                    None => Err(self.malformed("Unsupported Operator")),
                }
            }
            _ => Ok(ExpressionOperator::Simple),
        }
    }

    fn scan_variable_list(&mut self) -> Result<VariableList, TemplateError> {
        let mut variable_list = VariableList::new();
        loop {
            let name = self.scan_variable_name()?;
            if self.is_complete() {
                return Err(self.malformed("Unterminated Expression"));
            }
            let modifier = self.scan_variable_modifier()?;
            if self.is_complete() {
                return Err(self.malformed("Unterminated Expression"));
            }
            variable_list.push(VariableSpec { name, modifier });
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some('}') => {
                    self.bump();
                    return Ok(variable_list);
                }
                _ => return Err(self.malformed("Unexpected Character in Expression")),
            }
        }
    }

    fn scan_variable_name(&mut self) -> Result<String, TemplateError> {
        let position = self.pos;
        let name = self.take_while(charset::is_varname_char);
        if name.is_empty() {
            return Err(TemplateError::MalformedTemplate {
                position,
                reason: "Empty Variable Name".to_string(),
            });
        }
        if name.starts_with('.') {
            return Err(TemplateError::MalformedTemplate {
                position,
                reason: "Variable Name Cannot Begin With '.'".to_string(),
            });
        }
        // Every `%` inside the name must head a valid triplet. Hex digits are
        // themselves varname-legal, so validating within the captured run is
        // equivalent to validating against the full source.
        let mut rest = name.as_str();
        while let Some(index) = rest.find('%') {
            let mut hex = rest[index + 1..].chars();
            let valid = matches!(hex.next(), Some(c) if charset::is_hex_digit(c))
                && matches!(hex.next(), Some(c) if charset::is_hex_digit(c));
            if !valid {
                return Err(TemplateError::MalformedTemplate {
                    position,
                    reason: "% must be percent-encoded in variable name".to_string(),
                });
            }
            rest = &rest[index + 3..];
        }
        Ok(name)
    }

    fn scan_variable_modifier(&mut self) -> Result<VariableModifier, TemplateError> {
        match self.peek() {
            Some('*') => {
                self.bump();
                Ok(VariableModifier::Explode)
            }
            Some(':') => {
                self.bump();
                let position = self.pos;
                let digits = self.take_while(charset::is_decimal_digit);
                if digits.is_empty() {
                    return Err(TemplateError::MalformedTemplate {
                        position,
                        reason: "Prefix length not specified".to_string(),
                    });
                }
                if digits.starts_with('0') {
                    return Err(TemplateError::MalformedTemplate {
                        position,
                        reason: "Prefix length cannot begin with 0".to_string(),
                    });
                }
                if digits.len() > 4 {
                    return Err(TemplateError::MalformedTemplate {
                        position,
                        reason: "Prefix modifier length too large".to_string(),
                    });
                }
                match digits.parse::<u16>() {
                    Ok(length) => Ok(VariableModifier::Prefix(length)),
                    // Unreachable for 1-4 ASCII digits, kept for symmetry
                    // with the grammar's error vocabulary.
                    Err(_) => Err(TemplateError::MalformedTemplate {
                        position,
                        reason: "Cannot parse prefix modifier length".to_string(),
                    }),
                }
            }
            _ => Ok(VariableModifier::None),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.pos += 1;
        Some(c)
    }

    fn next_if(&mut self, pred: impl Fn(char) -> bool) -> Option<char> {
        match self.peek() {
            Some(c) if pred(c) => {
                self.bump();
                Some(c)
            }
            _ => None,
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.bump();
            out.push(c);
        }
        out
    }

    fn malformed(&self, reason: &str) -> TemplateError {
        TemplateError::MalformedTemplate {
            position: self.pos,
            reason: reason.to_string(),
        }
    }
}
