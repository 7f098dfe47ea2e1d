#![no_main]

use libfuzzer_sys::fuzz_target;
use uritemplate_engine::{UriTemplate, VariableDictionary};

/// Keep the harness itself bounded: templates are short strings in practice,
/// and truncating up front avoids large allocations before the scanner even
/// runs.
const MAX_TEMPLATE_CHARS: usize = 4_096;
const MAX_INPUT_BYTES: usize = MAX_TEMPLATE_CHARS * 4; // max UTF-8 bytes per char

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

    // Accept arbitrary bytes as input; treat invalid UTF-8 lossy.
    let input = String::from_utf8_lossy(data);
    let template = truncate_to_chars(&input, MAX_TEMPLATE_CHARS);

    let Ok(parsed) = UriTemplate::parse(template) else {
        return;
    };

    // The source must survive parsing verbatim.
    assert_eq!(parsed.as_str(), template);

    // With no bindings every variable is absent, so expansion of any valid
    // template must succeed.
    let empty = VariableDictionary::new();
    let expansion = parsed.expand(&empty);
    assert!(expansion.is_ok());

    let _ = parsed.variable_names();
});
