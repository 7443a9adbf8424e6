#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(rendered) = ocrbench::fuzzing::frontend_descriptor_input(input) {
            debug_assert!(ocrbench::fuzzing::frontend_descriptor_input(&rendered).is_ok());
        }
    }
});
