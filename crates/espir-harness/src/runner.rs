//! # Harness Driver
//!
//! Runs the three phases against one validator, in order, stopping at the
//! first case that behaves unexpectedly:
//!
//! 1. the baseline must be accepted;
//! 2. every negative case must be rejected;
//! 3. every fuzz mutant must be rejected.
//!
//! The driver only sees a [`DocumentValidator`], so either engine can be
//! put under test.

use serde::Serialize;
use serde_json::Value;

use espir_schema::DocumentValidator;

use crate::config::HarnessConfig;
use crate::error::HarnessError;
use crate::fuzz::{FuzzHarness, FuzzReport};
use crate::mutation::MutationKind;
use crate::negative::negative_cases;

/// Summary of a fully successful harness run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HarnessReport {
    pub engine: String,
    /// Labels of the negative cases, in the order they were checked.
    pub negative_cases: Vec<String>,
    pub fuzz: FuzzReport,
}

pub struct Harness<'v> {
    validator: &'v dyn DocumentValidator,
    config: HarnessConfig,
}

impl<'v> Harness<'v> {
    pub fn new(validator: &'v dyn DocumentValidator, config: HarnessConfig) -> Self {
        Self { validator, config }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Run baseline, negative and fuzz phases against `baseline`.
    ///
    /// # Errors
    ///
    /// Returns the [`HarnessError`] naming the first case that behaved
    /// unexpectedly, or [`HarnessError::BaselineShape`] when a negative case
    /// cannot be derived from the baseline.
    pub fn run(&self, baseline: &Value) -> Result<HarnessReport, HarnessError> {
        let engine = self.validator.name().to_string();

        self.check_baseline(baseline)?;
        tracing::info!(engine = %engine, "baseline accepted");

        let negative_cases = self.check_negatives(baseline)?;
        tracing::info!(
            engine = %engine,
            cases = negative_cases.len(),
            "negative cases rejected"
        );

        let fuzz = FuzzHarness::from_config(&self.config).run(baseline, self.validator)?;
        tracing::info!(
            engine = %engine,
            seed = self.config.seed,
            iterations = fuzz.iterations(),
            drop_top = fuzz.count(MutationKind::DropTop),
            flip_type = fuzz.count(MutationKind::FlipType),
            clear_array = fuzz.count(MutationKind::ClearArray),
            "fuzz mutants rejected"
        );

        Ok(HarnessReport {
            engine,
            negative_cases,
            fuzz,
        })
    }

    fn check_baseline(&self, baseline: &Value) -> Result<(), HarnessError> {
        self.validator
            .check(baseline)
            .map_err(|violations| HarnessError::BaselineRejected {
                engine: self.validator.name().to_string(),
                violations,
            })
    }

    fn check_negatives(&self, baseline: &Value) -> Result<Vec<String>, HarnessError> {
        let mut labels = Vec::new();
        for case in negative_cases(baseline)? {
            if self.validator.validate(&case.document) {
                return Err(HarnessError::NegativeCaseAccepted { label: case.label });
            }
            tracing::debug!(label = %case.label, "negative case rejected");
            labels.push(case.label);
        }
        Ok(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use espir_core::{ValidationViolations, Violation, ViolationKind};
    use espir_schema::ConfigValidator;
    use serde_json::json;

    fn baseline() -> Value {
        json!({
            "schema_version": 1,
            "system": { "device_id": "d", "timezone": "UTC",
                        "boot_fail_limit": 3, "safe_mode_enabled": true },
            "network": { "wifi": { "ssid": "s", "password": "p", "reconnect_interval_sec": 10 } },
            "mqtt": { "broker": "b", "port": 1883, "base_topic": "t",
                      "enabled": true, "ha_discovery": true, "retain": true },
            "homes": [{ "home_id": "h", "name": "H", "rooms": [{
                "room_id": "r", "name": "R", "devices": [{
                    "device_id": "d", "name": "D", "remotes": [{
                        "remote_id": "rm", "name": "RM", "buttons": [{
                            "button_id": "b", "label": "B", "protocol": "NEC",
                            "address": 1, "command": 2, "repeat_behavior": "none"
                        }]
                    }]
                }]
            }]}]
        })
    }

    /// Accepts everything.
    struct AcceptAll;

    impl DocumentValidator for AcceptAll {
        fn name(&self) -> &str {
            "accept-all"
        }

        fn check(&self, _document: &Value) -> Result<(), ValidationViolations> {
            Ok(())
        }
    }

    /// Rejects everything.
    struct RejectAll;

    impl DocumentValidator for RejectAll {
        fn name(&self) -> &str {
            "reject-all"
        }

        fn check(&self, _document: &Value) -> Result<(), ValidationViolations> {
            Err(Violation::new("", ViolationKind::MissingKey).into())
        }
    }

    /// Native rules, except that any protocol string is accepted.
    struct LenientProtocol;

    impl DocumentValidator for LenientProtocol {
        fn name(&self) -> &str {
            "lenient-protocol"
        }

        fn check(&self, document: &Value) -> Result<(), ValidationViolations> {
            let mut patched = document.clone();
            if let Some(p) = patched.pointer_mut(crate::negative::FIRST_BUTTON_PROTOCOL) {
                if p.is_string() {
                    *p = json!("NEC");
                }
            }
            ConfigValidator::new().check(&patched)
        }
    }

    #[test]
    fn native_engine_passes_every_phase() {
        let validator = ConfigValidator::new();
        let report = Harness::new(&validator, HarnessConfig::default())
            .run(&baseline())
            .unwrap();
        assert_eq!(report.engine, "native");
        assert_eq!(report.negative_cases.len(), 7);
        assert_eq!(report.fuzz.iterations(), 100);
        assert_eq!(report.fuzz.seed, Some(1337));
    }

    #[test]
    fn rejected_baseline_names_engine() {
        let err = Harness::new(&RejectAll, HarnessConfig::default())
            .run(&baseline())
            .unwrap_err();
        match &err {
            HarnessError::BaselineRejected { engine, violations } => {
                assert_eq!(engine, "reject-all");
                assert_eq!(violations.len(), 1);
            }
            other => panic!("Expected BaselineRejected, got: {other}"),
        }
        assert!(err.to_string().starts_with("baseline config must pass"));
    }

    #[test]
    fn accepting_validator_fails_on_first_negative_case() {
        let err = Harness::new(&AcceptAll, HarnessConfig::default())
            .run(&baseline())
            .unwrap_err();
        assert_eq!(err.to_string(), "expected invalid: missing_schema_version");
    }

    #[test]
    fn lenient_protocol_fails_on_invalid_protocol() {
        let err = Harness::new(&LenientProtocol, HarnessConfig::default())
            .run(&baseline())
            .unwrap_err();
        assert_eq!(err.to_string(), "expected invalid: invalid_protocol");
    }

    #[test]
    fn invalid_baseline_stops_before_negatives() {
        let mut base = baseline();
        base["mqtt"]["port"] = json!("1883");
        let validator = ConfigValidator::new();
        let err = Harness::new(&validator, HarnessConfig::default())
            .run(&base)
            .unwrap_err();
        assert!(matches!(err, HarnessError::BaselineRejected { .. }));
    }

    #[test]
    fn config_controls_fuzz_run() {
        let validator = ConfigValidator::new();
        let config = HarnessConfig {
            seed: 7,
            iterations: 12,
        };
        let harness = Harness::new(&validator, config);
        assert_eq!(harness.config(), &config);
        let report = harness.run(&baseline()).unwrap();
        assert_eq!(report.fuzz.seed, Some(7));
        assert_eq!(report.fuzz.iterations(), 12);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let validator = ConfigValidator::new();
        let harness = Harness::new(&validator, HarnessConfig::default());
        assert_eq!(harness.run(&baseline()).unwrap(), harness.run(&baseline()).unwrap());
    }
}
