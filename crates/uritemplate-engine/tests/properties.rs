//! Property tests over the parse/expand pipeline.

use proptest::prelude::*;
use uritemplate_engine::{UriTemplate, VariableDictionary, VariableValue};

proptest! {
    // Literal-only templates whose characters are already legal URI
    // characters expand to themselves with no bindings.
    #[test]
    fn literal_templates_round_trip(
        template in "[A-Za-z0-9._~:/?#\\[\\]@!$&'()*+,;=-]{1,64}",
    ) {
        let parsed = UriTemplate::parse(template.clone()).unwrap();
        prop_assert_eq!(parsed.as_str(), template.as_str());
        let empty = VariableDictionary::new();
        prop_assert_eq!(parsed.expand(&empty).unwrap(), template);
    }

    // Expansion is a pure function of (template, bindings).
    #[test]
    fn expansion_is_deterministic(value in "\\PC{0,48}") {
        let template =
            UriTemplate::parse("{var}{+var}{#var}{.var}{/var}{;var}{?var}{&var}").unwrap();
        let mut variables = VariableDictionary::new();
        variables.insert("var".to_string(), value.into());
        let first = template.expand(&variables);
        let second = template.expand(&variables);
        prop_assert_eq!(first.unwrap(), second.unwrap());
    }

    // Omitting a binding never errors; the variable contributes nothing.
    #[test]
    fn absent_variables_are_neutral(name in "[a-z][a-z0-9_]{0,7}") {
        let template = UriTemplate::parse(format!("{{{name}}}{{?{name}}}")).unwrap();
        let empty = VariableDictionary::new();
        prop_assert_eq!(template.expand(&empty).unwrap(), "");
    }

    // A prefix modifier on a composite value fails for every operator and
    // every length.
    #[test]
    fn prefix_modifier_rejects_composite_values(length in 1u16..=9999) {
        for operator in ["", "+", "#", ".", "/", ";", "?", "&"] {
            let template =
                UriTemplate::parse(format!("{{{operator}var:{length}}}")).unwrap();
            for value in [
                VariableValue::List(vec!["a".to_string()]),
                VariableValue::AssociativeArray(vec![("k".to_string(), "v".to_string())]),
            ] {
                let mut variables = VariableDictionary::new();
                variables.insert("var".to_string(), value);
                prop_assert!(template.expand(&variables).is_err());
            }
        }
    }

    // Whatever the string value, expanding never fails and parsing the
    // template again yields the same expansion.
    #[test]
    fn string_values_always_expand(value in "\\PC{0,48}") {
        let template = UriTemplate::parse("{?q}").unwrap();
        let mut variables = VariableDictionary::new();
        variables.insert("q".to_string(), value.into());
        let expansion = template.expand(&variables).unwrap();
        let reparsed = UriTemplate::parse("{?q}").unwrap();
        prop_assert_eq!(reparsed.expand(&variables).unwrap(), expansion);
    }
}
