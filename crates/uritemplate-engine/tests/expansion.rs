//! Operator-by-operator expansion behavior.

use pretty_assertions::assert_eq;
use uritemplate_engine::{UriTemplate, VariableDictionary, VariableValue};

fn rfc_variables() -> VariableDictionary {
    let mut variables = VariableDictionary::new();
    variables.insert("var".to_string(), "value".into());
    variables.insert("hello".to_string(), "Hello World!".into());
    variables.insert("empty".to_string(), "".into());
    variables.insert("path".to_string(), "/foo/bar".into());
    variables.insert("x".to_string(), "1024".into());
    variables.insert("y".to_string(), "768".into());
    variables.insert("list".to_string(), vec!["red", "green", "blue"].into());
    variables.insert(
        "keys".to_string(),
        vec![("semi", ";"), ("dot", "."), ("comma", ",")].into(),
    );
    variables
}

fn expand(template: &str) -> String {
    UriTemplate::parse(template)
        .unwrap_or_else(|e| panic!("parse {template:?}: {e}"))
        .expand(&rfc_variables())
        .unwrap_or_else(|e| panic!("expand {template:?}: {e}"))
}

#[test]
fn simple_expansion() {
    assert_eq!(expand("https://example.com/{var}"), "https://example.com/value");
    assert_eq!(expand("{hello}"), "Hello%20World%21");
    assert_eq!(expand("{x,hello,y}"), "1024,Hello%20World%21,768");
}

#[test]
fn reserved_expansion_leaves_reserved_characters() {
    assert_eq!(expand("{+path}"), "/foo/bar");
    assert_eq!(expand("{+hello}"), "Hello%20World!");
    assert_eq!(expand("{+path}/here"), "/foo/bar/here");
}

#[test]
fn fragment_expansion() {
    assert_eq!(expand("X{#var}"), "X#value");
    assert_eq!(expand("{#path,x}/here"), "#/foo/bar,1024/here");
}

#[test]
fn label_expansion() {
    assert_eq!(expand("X{.var}"), "X.value");
    assert_eq!(expand("X{.x,y}"), "X.1024.768");
    assert_eq!(expand("X{.list*}"), "X.red.green.blue");
}

#[test]
fn path_segment_expansion() {
    assert_eq!(expand("{/var}"), "/value");
    assert_eq!(expand("{/var,x}/here"), "/value/1024/here");
    assert_eq!(expand("{/list*}"), "/red/green/blue");
    assert_eq!(expand("{/list*,path:4}"), "/red/green/blue/%2Ffoo");
}

#[test]
fn path_style_expansion_omits_orphaned_equals() {
    assert_eq!(expand("{;x,y}"), ";x=1024;y=768");
    assert_eq!(expand("{;x,y,empty}"), ";x=1024;y=768;empty");
    assert_eq!(expand("{;empty}"), ";empty");
    assert_eq!(expand("{;list*}"), ";list=red;list=green;list=blue");
}

#[test]
fn query_expansion_keeps_orphaned_equals() {
    assert_eq!(expand("{?x,y}"), "?x=1024&y=768");
    assert_eq!(expand("{?x,y,empty}"), "?x=1024&y=768&empty=");
    assert_eq!(expand("{?list*}"), "?list=red&list=green&list=blue");
}

#[test]
fn query_continuation_expansion() {
    assert_eq!(expand("?fixed=yes{&x}"), "?fixed=yes&x=1024");
    assert_eq!(expand("{&var:3}"), "&var=val");
}

#[test]
fn prefix_modifier_truncates_scalars_before_encoding() {
    assert_eq!(expand("{var:3}"), "val");
    assert_eq!(expand("{var:30}"), "value");
    assert_eq!(expand("{+path:6}/here"), "/foo/b/here");
    assert_eq!(expand("{;hello:5}"), ";hello=Hello");
}

#[test]
fn prefix_modifier_counts_scalars_not_bytes() {
    let mut variables = VariableDictionary::new();
    variables.insert("snow".to_string(), "☃man".into());
    variables.insert("word".to_string(), "héllo".into());
    // One scalar, three encoded UTF-8 bytes.
    let template = UriTemplate::parse("{snow:1}").unwrap();
    assert_eq!(template.expand(&variables).unwrap(), "%E2%98%83");
    // Unicode alphanumerics are unreserved and pass through unencoded.
    let template = UriTemplate::parse("{word:2}").unwrap();
    assert_eq!(template.expand(&variables).unwrap(), "hé");
}

#[test]
fn list_expansion_joins_with_comma_unless_exploded() {
    assert_eq!(expand("{list}"), "red,green,blue");
    assert_eq!(expand("{list*}"), "red,green,blue");
    assert_eq!(expand("{?list}"), "?list=red,green,blue");
    assert_eq!(expand("{;list}"), ";list=red,green,blue");
}

#[test]
fn associative_array_expansion() {
    assert_eq!(expand("{keys}"), "semi,%3B,dot,.,comma,%2C");
    assert_eq!(expand("{keys*}"), "semi=%3B,dot=.,comma=%2C");
    assert_eq!(expand("{+keys}"), "semi,;,dot,.,comma,,");
    assert_eq!(expand("{?keys}"), "?keys=semi,%3B,dot,.,comma,%2C");
    assert_eq!(expand("{?keys*}"), "?semi=%3B&dot=.&comma=%2C");
    assert_eq!(expand("{;keys*}"), ";semi=%3B;dot=.;comma=%2C");
}

#[test]
fn exploded_pairs_with_empty_values_keep_their_own_key() {
    let mut variables = VariableDictionary::new();
    variables.insert(
        "pairs".to_string(),
        vec![("a", ""), ("b", "2")].into(),
    );
    let template = UriTemplate::parse("{;pairs*}").unwrap();
    assert_eq!(template.expand(&variables).unwrap(), ";a;b=2");
    // Without the omit rule the `=` stays.
    let template = UriTemplate::parse("{?pairs*}").unwrap();
    assert_eq!(template.expand(&variables).unwrap(), "?a=&b=2");
}

#[test]
fn absent_variables_contribute_nothing() {
    assert_eq!(expand("{undef}"), "");
    assert_eq!(expand("{?a,x,b}"), "?x=1024");
    assert_eq!(expand("X{.undef}Y"), "XY");
}

#[test]
fn query_with_partially_bound_variables() {
    let mut variables = VariableDictionary::new();
    variables.insert("a".to_string(), "1".into());
    let template = UriTemplate::parse("{?a,b}").unwrap();
    assert_eq!(template.expand(&variables).unwrap(), "?a=1");
}

#[test]
fn empty_composites_contribute_nothing() {
    let mut variables = VariableDictionary::new();
    variables.insert("list".to_string(), VariableValue::List(Vec::new()));
    variables.insert(
        "keys".to_string(),
        VariableValue::AssociativeArray(Vec::new()),
    );
    for template in ["{list}", "{/list*}", "{?list}", "{keys}", "{?keys*}"] {
        let parsed = UriTemplate::parse(template).unwrap();
        assert_eq!(parsed.expand(&variables).unwrap(), "", "{template:?}");
    }
}

#[test]
fn empty_string_values_still_take_the_prefix() {
    assert_eq!(expand("{/empty}"), "/");
    assert_eq!(expand("{#empty}"), "#");
    assert_eq!(expand("X{.empty}"), "X.");
}

#[test]
fn pre_encoded_triplets_in_the_template_pass_through() {
    assert_eq!(expand("a%20b{var}"), "a%20bvalue");
    // Lowercase hex survives untouched as well.
    assert_eq!(expand("a%2fb"), "a%2fb");
}

#[test]
fn percent_triplets_in_values_survive_reserved_expansion() {
    let mut variables = VariableDictionary::new();
    variables.insert("v".to_string(), "foo%25bar".into());
    variables.insert("p".to_string(), "50%".into());
    assert_eq!(
        UriTemplate::parse("{+v}").unwrap().expand(&variables).unwrap(),
        "foo%25bar"
    );
    assert_eq!(
        UriTemplate::parse("{#v}").unwrap().expand(&variables).unwrap(),
        "#foo%25bar"
    );
    // A bare `%` is still escaped.
    assert_eq!(
        UriTemplate::parse("{+p}").unwrap().expand(&variables).unwrap(),
        "50%25"
    );
    // Simple expansion double-encodes: no triplet preservation.
    assert_eq!(
        UriTemplate::parse("{v}").unwrap().expand(&variables).unwrap(),
        "foo%2525bar"
    );
}

#[test]
fn percent_encoded_variable_names_are_usable() {
    let mut variables = VariableDictionary::new();
    variables.insert("Some%20Thing".to_string(), "foo".into());
    let template = UriTemplate::parse("{?Some%20Thing}").unwrap();
    assert_eq!(template.expand(&variables).unwrap(), "?Some%20Thing=foo");
}

#[test]
fn string_map_convenience_bindings() {
    use std::collections::HashMap;

    let variables: HashMap<String, String> =
        [("id".to_string(), "value".to_string())].into();
    let template = UriTemplate::parse("https://example.com/{id}").unwrap();
    assert_eq!(
        template.expand(&variables).unwrap(),
        "https://example.com/value"
    );
}

#[test]
fn slice_bindings() {
    let variables = [("var", VariableValue::from("value"))];
    let template = UriTemplate::parse("{var}").unwrap();
    assert_eq!(template.expand(&variables[..]).unwrap(), "value");
}

#[test]
fn expansion_is_deterministic() {
    let template = UriTemplate::parse("{/list*}{?keys*,var}").unwrap();
    let variables = rfc_variables();
    let first = template.expand(&variables).unwrap();
    let second = template.expand(&variables).unwrap();
    assert_eq!(first, second);
}
