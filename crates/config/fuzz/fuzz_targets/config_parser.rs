//! Arbitrary TOML and override values must never panic the config layer
//!
//! Run with: cargo fuzz run config_parser

#![no_main]
use libfuzzer_sys::fuzz_target;
use mentorscroll_config::{apply_overrides, Config, OVERRIDE_VARIABLES};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(mut config) = toml::from_str::<Config>(text) {
        let _ = config.validate();
        let _ = toml::to_string_pretty(&config);

        // Feed the same input to every override variable
        let _ = apply_overrides(&mut config, |name| {
            OVERRIDE_VARIABLES.contains(&name).then(|| text.to_string())
        });
    }
});
