#![forbid(unsafe_code)]
#![deny(unreachable_patterns)]

//! RFC 6570 URI Template parsing and expansion (levels 1-4).
//!
//! A template string is compiled once into an ordered sequence of typed
//! components ([`UriTemplate::parse`]) and can then be expanded any number
//! of times against caller-supplied variable bindings
//! ([`UriTemplate::expand`]). Parsing is strict: any grammar violation fails
//! construction with a scalar-offset position into the source. Expansion is
//! pure, synchronous, and all-or-nothing.
//!
//! Bindings are anything implementing [`VariableProvider`]; plain
//! `HashMap<String, String>` works for the common all-string case:
//!
//! ```
//! use std::collections::HashMap;
//! use uritemplate_engine::UriTemplate;
//!
//! let template = UriTemplate::parse("https://api.example.com/repos/{owner}/{repo}")?;
//! let variables: HashMap<String, String> = [
//!     ("owner".to_string(), "octocat".to_string()),
//!     ("repo".to_string(), "hello-world".to_string()),
//! ]
//! .into();
//! assert_eq!(
//!     template.expand(&variables)?,
//!     "https://api.example.com/repos/octocat/hello-world"
//! );
//! assert_eq!(template.variable_names(), ["owner", "repo"]);
//! # Ok::<(), uritemplate_engine::TemplateError>(())
//! ```
//!
//! List and associative-array values, and per-variable modifiers (`:n`
//! prefix, `*` explode), go through [`VariableValue`]:
//!
//! ```
//! use uritemplate_engine::{UriTemplate, VariableDictionary, VariableValue};
//!
//! let template = UriTemplate::parse("{/segments*}{?lang}")?;
//! let mut variables = VariableDictionary::new();
//! variables.insert("segments".to_string(), vec!["a", "b"].into());
//! variables.insert("lang".to_string(), "en".into());
//! assert_eq!(template.expand(&variables)?, "/a/b?lang=en");
//! # Ok::<(), uritemplate_engine::TemplateError>(())
//! ```

mod ast;
mod charset;
mod error;
mod eval;
mod parser;
mod template;
pub mod value;

pub use error::TemplateError;
pub use template::{TypedUriTemplate, UriTemplate};
pub use value::{SequenceVariableProvider, VariableDictionary, VariableProvider, VariableValue};

/// Parses a template string into a [`UriTemplate`].
///
/// Convenience for [`UriTemplate::parse`].
///
/// # Errors
///
/// Returns [`TemplateError::MalformedTemplate`] for any grammar violation.
pub fn parse_template(template: impl Into<String>) -> Result<UriTemplate, TemplateError> {
    UriTemplate::parse(template)
}
