//! Variable values and binding lookup.

use std::collections::{BTreeMap, HashMap};

/// A value bound to a template variable.
///
/// The three cases mirror the RFC 6570 value model: a single string, an
/// ordered list, or ordered key/value pairs. Ordering of `List` and
/// `AssociativeArray` is caller-determined and preserved; nothing here sorts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariableValue {
    String(String),
    List(Vec<String>),
    AssociativeArray(Vec<(String, String)>),
}

impl From<&str> for VariableValue {
    fn from(value: &str) -> Self {
        VariableValue::String(value.to_string())
    }
}

impl From<String> for VariableValue {
    fn from(value: String) -> Self {
        VariableValue::String(value)
    }
}

macro_rules! impl_from_scalar {
    ($($t:ty),* $(,)?) => {
        $(impl From<$t> for VariableValue {
            fn from(value: $t) -> Self {
                VariableValue::String(value.to_string())
            }
        })*
    };
}

impl_from_scalar!(bool, char, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

impl From<Vec<String>> for VariableValue {
    fn from(value: Vec<String>) -> Self {
        VariableValue::List(value)
    }
}

impl From<Vec<&str>> for VariableValue {
    fn from(value: Vec<&str>) -> Self {
        VariableValue::List(value.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for VariableValue {
    fn from(value: &[&str]) -> Self {
        VariableValue::List(value.iter().map(|item| (*item).to_string()).collect())
    }
}

impl From<Vec<(String, String)>> for VariableValue {
    fn from(value: Vec<(String, String)>) -> Self {
        VariableValue::AssociativeArray(value)
    }
}

impl From<Vec<(&str, &str)>> for VariableValue {
    fn from(value: Vec<(&str, &str)>) -> Self {
        VariableValue::AssociativeArray(
            value
                .into_iter()
                .map(|(key, item)| (key.to_string(), item.to_string()))
                .collect(),
        )
    }
}

/// Binding lookup used during expansion: answers "value for this name, or
/// absent".
///
/// Returning `None` is not an error; the variable simply contributes nothing
/// to its expression. Implementations are queried once per variable
/// occurrence per expansion call.
pub trait VariableProvider {
    fn value(&self, name: &str) -> Option<VariableValue>;
}

/// The common dictionary-of-typed-values provider.
pub type VariableDictionary = HashMap<String, VariableValue>;

impl VariableProvider for HashMap<String, VariableValue> {
    fn value(&self, name: &str) -> Option<VariableValue> {
        self.get(name).cloned()
    }
}

impl VariableProvider for BTreeMap<String, VariableValue> {
    fn value(&self, name: &str) -> Option<VariableValue> {
        self.get(name).cloned()
    }
}

impl VariableProvider for HashMap<String, String> {
    fn value(&self, name: &str) -> Option<VariableValue> {
        self.get(name).map(|text| VariableValue::String(text.clone()))
    }
}

impl VariableProvider for BTreeMap<String, String> {
    fn value(&self, name: &str) -> Option<VariableValue> {
        self.get(name).map(|text| VariableValue::String(text.clone()))
    }
}

impl<'a> VariableProvider for [(&'a str, VariableValue)] {
    fn value(&self, name: &str) -> Option<VariableValue> {
        self.iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.clone())
    }
}

impl<P: VariableProvider + ?Sized> VariableProvider for &P {
    fn value(&self, name: &str) -> Option<VariableValue> {
        (**self).value(name)
    }
}

/// Consults a sequence of providers in order; the first binding wins.
pub struct SequenceVariableProvider<'a> {
    providers: Vec<&'a dyn VariableProvider>,
}

impl<'a> SequenceVariableProvider<'a> {
    #[must_use]
    pub fn new(providers: Vec<&'a dyn VariableProvider>) -> Self {
        Self { providers }
    }
}

impl VariableProvider for SequenceVariableProvider<'_> {
    fn value(&self, name: &str) -> Option<VariableValue> {
        self.providers
            .iter()
            .find_map(|provider| provider.value(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_conversions_stringify() {
        assert_eq!(VariableValue::from(42i64), VariableValue::String("42".to_string()));
        assert_eq!(VariableValue::from(true), VariableValue::String("true".to_string()));
        assert_eq!(VariableValue::from(3.5f64), VariableValue::String("3.5".to_string()));
        assert_eq!(VariableValue::from('x'), VariableValue::String("x".to_string()));
    }

    #[test]
    fn string_map_provider_wraps_values() {
        let mut variables: HashMap<String, String> = HashMap::new();
        variables.insert("id".to_string(), "42".to_string());
        assert_eq!(
            variables.value("id"),
            Some(VariableValue::String("42".to_string()))
        );
        assert_eq!(variables.value("missing"), None);
    }

    #[test]
    fn sequence_provider_first_binding_wins() {
        let mut first: VariableDictionary = HashMap::new();
        first.insert("a".to_string(), "from-first".into());
        let mut second: VariableDictionary = HashMap::new();
        second.insert("a".to_string(), "from-second".into());
        second.insert("b".to_string(), "only-second".into());

        let provider = SequenceVariableProvider::new(vec![&first, &second]);
        assert_eq!(
            provider.value("a"),
            Some(VariableValue::String("from-first".to_string()))
        );
        assert_eq!(
            provider.value("b"),
            Some(VariableValue::String("only-second".to_string()))
        );
        assert_eq!(provider.value("c"), None);
    }
}
