#![no_main]
use libfuzzer_sys::fuzz_target;
use qc_review::{render, ActionScript};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        for script in [ActionScript::from_toml_str(s), ActionScript::from_json_str(s)]
            .into_iter()
            .flatten()
        {
            let report = render(&script.replay());
            let _ = report.to_plain_text();
            let _ = report.stats();
        }
    }
});
