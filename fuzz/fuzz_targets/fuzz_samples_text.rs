#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Whatever the readers accept must be finite.
    if let Ok(rows) = arcfit_config::parse_samples_text(data) {
        assert!(rows.iter().all(|r| r.time.is_finite() && r.value.is_finite()));
    }
    if let Ok(rows) = arcfit_config::parse_samples_csv(data.as_bytes()) {
        assert!(rows.iter().all(|r| r.time.is_finite() && r.value.is_finite()));
    }
});
