// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! JSON configuration samples.

use srs_core::SystemConfig;

/// A complete system description: unary addition with explicit bounds.
pub const SAMPLE_CONFIG_JSON: &str = r#"{
  "alphabet": "0|",
  "rules": [
    { "left": "0|0", "right": "00" },
    { "left": "00", "right": "|" }
  ],
  "exploration": {
    "depth": 6,
    "width": 32,
    "max_length": 3,
    "max_steps": 200,
    "workers": 2
  }
}"#;

/// Parses [`SAMPLE_CONFIG_JSON`].
///
/// # Panics
/// Never in practice; the sample is a literal.
#[allow(clippy::expect_used)]
pub fn sample_config() -> SystemConfig {
    SystemConfig::from_json_slice(SAMPLE_CONFIG_JSON.as_bytes()).expect("sample config literal")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_parses_as_plain_json_too() {
        let value: serde_json::Value = serde_json::from_str(SAMPLE_CONFIG_JSON).unwrap();
        assert_eq!(value["rules"].as_array().map(Vec::len), Some(2));
        assert_eq!(sample_config().exploration.workers, Some(2));
    }
}
