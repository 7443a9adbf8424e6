#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(plan) = ocrbench::fuzzing::apply_config_from_toml(input) {
            debug_assert!(plan.load.vus.get() > 0);
            debug_assert!(!plan.load.duration.is_zero());
            debug_assert!(plan.max_check_failures_pct.is_none_or(|pct| pct <= 100));
        }
    }
});
