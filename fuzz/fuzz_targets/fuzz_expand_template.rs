#![no_main]

use libfuzzer_sys::fuzz_target;
use uritemplate_engine::{UriTemplate, VariableDictionary, VariableValue};

const MAX_TEMPLATE_CHARS: usize = 1_024;
const MAX_INPUT_BYTES: usize = MAX_TEMPLATE_CHARS * 4;

fn truncate_to_chars(s: &str, max_chars: usize) -> &str {
    let mut count = 0usize;
    for (idx, _) in s.char_indices() {
        if count == max_chars {
            return &s[..idx];
        }
        count += 1;
    }
    s
}

fuzz_target!(|data: &[u8]| {
    let data = if data.len() > MAX_INPUT_BYTES {
        &data[..MAX_INPUT_BYTES]
    } else {
        data
    };

    // The first NUL splits template bytes from value bytes.
    let mut parts = data.splitn(2, |&b| b == 0);
    let template_bytes = parts.next().unwrap_or_default();
    let value_bytes = parts.next().unwrap_or_default();

    let template_input = String::from_utf8_lossy(template_bytes);
    let template_input = truncate_to_chars(&template_input, MAX_TEMPLATE_CHARS);
    let Ok(template) = UriTemplate::parse(template_input) else {
        return;
    };

    let value_text = String::from_utf8_lossy(value_bytes).into_owned();

    // Bind every referenced variable, cycling through the three value kinds
    // so string, list, and associative-array formatting all get exercised.
    let mut variables = VariableDictionary::new();
    for (index, name) in template.variable_names().into_iter().enumerate() {
        let value = match index % 3 {
            0 => VariableValue::String(value_text.clone()),
            1 => VariableValue::List(vec![value_text.clone(), String::new()]),
            _ => VariableValue::AssociativeArray(vec![
                (value_text.clone(), value_text.clone()),
                (String::new(), value_text.clone()),
            ]),
        };
        variables.insert(name.to_string(), value);
    }

    // The only legal failure is a prefix modifier on a composite value.
    match template.expand(&variables) {
        Ok(expansion) => {
            let _ = expansion.len();
        }
        Err(error) => {
            assert!(error
                .reason()
                .contains("Prefix operator can only be applied to string"));
        }
    }
});
