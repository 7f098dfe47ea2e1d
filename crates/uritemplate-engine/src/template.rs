//! The public template type: parse-once construction, expansion, and the
//! source-text identity surface.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;

use crate::ast::Component;
use crate::error::TemplateError;
use crate::parser;
use crate::value::VariableProvider;

/// A parsed RFC 6570 URI Template.
///
/// Parsing happens eagerly at construction and is all-or-nothing; a
/// constructed template is immutable and freely shareable across threads.
/// Equality and hashing are by source text.
#[derive(Debug, Clone)]
pub struct UriTemplate {
    source: String,
    components: Vec<Component>,
}

impl UriTemplate {
    /// Parses a template string.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::MalformedTemplate`] for any grammar
    /// violation, carrying the scalar offset where it was detected.
    pub fn parse(template: impl Into<String>) -> Result<Self, TemplateError> {
        let source = template.into();
        let components = parser::scan_template(&source)?;
        Ok(Self { source, components })
    }

    /// Expands the template with the supplied bindings.
    ///
    /// Absent variables are not an error; they contribute nothing to their
    /// expression. The result is a pure function of the template and the
    /// bindings.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::ExpansionFailure`] when a value cannot be
    /// formatted, e.g. a prefix modifier applied to a list or associative
    /// array.
    pub fn expand<P: VariableProvider + ?Sized>(
        &self,
        variables: &P,
    ) -> Result<String, TemplateError> {
        let mut result = String::with_capacity(self.source.len());
        for component in &self.components {
            result.push_str(&component.expand(&variables)?);
        }
        Ok(result)
    }

    /// Variable names referenced by the template, in order of first-to-last
    /// appearance, duplicates retained.
    #[must_use]
    pub fn variable_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        for component in &self.components {
            component.append_variable_names(&mut names);
        }
        names
    }

    /// The original template source text, exactly as parsed.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for UriTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl PartialEq for UriTemplate {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for UriTemplate {}

impl Hash for UriTemplate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.hash(state);
    }
}

impl FromStr for UriTemplate {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for UriTemplate {
    type Error = TemplateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl serde::Serialize for UriTemplate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

impl<'de> serde::Deserialize<'de> for UriTemplate {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Self::parse(source).map_err(serde::de::Error::custom)
    }
}

/// A [`UriTemplate`] whose provider type is fixed at compile time.
///
/// Useful when a template's variables come from one known type and call
/// sites should not accept arbitrary providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedUriTemplate<P: VariableProvider> {
    template: UriTemplate,
    _provider: PhantomData<fn(&P)>,
}

impl<P: VariableProvider> TypedUriTemplate<P> {
    #[must_use]
    pub fn new(template: UriTemplate) -> Self {
        Self {
            template,
            _provider: PhantomData,
        }
    }

    /// Expands with a provider of the fixed type.
    ///
    /// # Errors
    ///
    /// See [`UriTemplate::expand`].
    pub fn expand(&self, variables: &P) -> Result<String, TemplateError> {
        self.template.expand(variables)
    }

    /// The underlying untyped template.
    #[must_use]
    pub fn template(&self) -> &UriTemplate {
        &self.template
    }
}

impl<P: VariableProvider> From<UriTemplate> for TypedUriTemplate<P> {
    fn from(template: UriTemplate) -> Self {
        Self::new(template)
    }
}
