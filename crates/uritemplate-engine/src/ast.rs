//! The parsed component model.
//!
//! A template is an ordered sequence of [`Component`]s that partition the
//! source string exactly. The component set is fixed by the grammar, so it is
//! a closed enum dispatched with `match` rather than an open trait hierarchy.

use smallvec::SmallVec;

/// One `{...}` expression operator (RFC 6570 section 2.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExpressionOperator {
    /// No operator scalar: simple string expansion.
    Simple,
    /// `+` reserved expansion.
    Reserved,
    /// `#` fragment expansion.
    Fragment,
    /// `.` label expansion.
    Label,
    /// `/` path segment expansion.
    PathSegment,
    /// `;` path-style parameter expansion.
    PathStyle,
    /// `?` form-style query expansion.
    Query,
    /// `&` form-style query continuation.
    QueryContinuation,
}

impl ExpressionOperator {
    /// Maps an operator scalar to its operator. Returns `None` for the
    /// scalars RFC 6570 reserves for future use (`= , ! @ |`).
    pub(crate) fn from_scalar(scalar: char) -> Option<Self> {
        match scalar {
            '+' => Some(Self::Reserved),
            '#' => Some(Self::Fragment),
            '.' => Some(Self::Label),
            '/' => Some(Self::PathSegment),
            ';' => Some(Self::PathStyle),
            '?' => Some(Self::Query),
            '&' => Some(Self::QueryContinuation),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VariableModifier {
    None,
    /// `:n` — expand only the first `n` scalars of a string value (1..=9999).
    Prefix(u16),
    /// `*` — expand each element of a composite value individually.
    Explode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct VariableSpec {
    pub(crate) name: String,
    pub(crate) modifier: VariableModifier,
}

impl VariableSpec {
    pub(crate) fn prefix_length(&self) -> Option<usize> {
        match self.modifier {
            VariableModifier::Prefix(length) => Some(usize::from(length)),
            _ => None,
        }
    }
}

/// Variable lists are almost always one or two entries; keep them inline.
pub(crate) type VariableList = SmallVec<[VariableSpec; 2]>;

/// A parsed `{...}` expression: operator, ordered variable list, and the
/// scalar offset of the opening `{` for error reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Expression {
    pub(crate) operator: ExpressionOperator,
    pub(crate) variable_list: VariableList,
    pub(crate) position: usize,
}

/// One parsed unit of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Component {
    /// A maximal run of literal-legal scalars, percent-encoded on expansion.
    Literal(String),
    /// An already-valid `%XX` triplet, emitted verbatim on expansion.
    PercentEncodedTriplet(String),
    Expression(Expression),
}

impl Component {
    /// Appends the variable names this component references, in order.
    pub(crate) fn append_variable_names<'a>(&'a self, names: &mut Vec<&'a str>) {
        if let Component::Expression(expression) = self {
            names.extend(
                expression
                    .variable_list
                    .iter()
                    .map(|spec| spec.name.as_str()),
            );
        }
    }
}
