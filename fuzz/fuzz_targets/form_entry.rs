#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(field) = ocrbench::fuzzing::parse_form_field_input(input) {
        debug_assert!(!field.name.is_empty());
    }
});
