#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(plan) = ocrbench::fuzzing::apply_config_from_json(input) {
            debug_assert!(plan.load.vus.get() > 0);
            debug_assert!(!plan.request_timeout.is_zero());
        }
    }
});
