//! Configuration Journey Tests
//!
//! Parameters arrive as JSON documents (possibly written by an older FSRS
//! version) and get adjusted by environment overrides before scheduling.

use std::collections::HashMap;
use std::io::Write;

use cadence_core::params::{ENV_ENABLE_SHORT_TERM, ENV_MAXIMUM_INTERVAL, ENV_REQUEST_RETENTION};
use cadence_core::{Fsrs, FsrsError, Parameters, PartialParameters, Rating, State, DEFAULT_WEIGHTS};
use cadence_e2e_tests::mocks::CardFactory;

fn write_config(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn test_config_file_drives_scheduling() {
    let file = write_config(
        r#"{
            "request_retention": 0.9,
            "maximum_interval": 365,
            "enable_short_term": false
        }"#,
    );
    let partial = PartialParameters::from_json_file(file.path()).unwrap();
    let fsrs = Fsrs::new(partial).unwrap();

    assert_eq!(fsrs.parameters().maximum_interval, 365);
    let item = fsrs
        .next(&CardFactory::new_card(), CardFactory::epoch(), Rating::Good)
        .unwrap();
    assert_eq!(item.card.state, State::Review);

    let item = fsrs
        .next(
            &CardFactory::review_card(1.0, 1000.0, 500),
            CardFactory::epoch(),
            Rating::Easy,
        )
        .unwrap();
    assert_eq!(item.card.scheduled_days, 365);
}

#[test]
fn test_fsrs4_weights_are_migrated() {
    let file = write_config(&format!(
        r#"{{ "w": {} }}"#,
        serde_json::to_string(&CardFactory::legacy_v4_weights()).unwrap()
    ));
    let partial = PartialParameters::from_json_file(file.path()).unwrap();
    let params = Parameters::build(partial);

    assert_eq!(params.w.len(), 21);
    assert_eq!(params.w[4], 3.0);
    assert_eq!(params.w[5], 0.46209812);
    assert_eq!(params.w[6], 1.5);
    assert_eq!(&params.w[17..], &[0.0, 0.0, 0.0, 0.5]);
}

#[test]
fn test_fsrs5_weights_are_migrated() {
    let params = Parameters::build(
        PartialParameters::new().weights(CardFactory::legacy_v5_weights()),
    );
    assert_eq!(&params.w[..19], &DEFAULT_WEIGHTS[..19]);
    assert_eq!(params.w[19], 0.0);
    assert_eq!(params.w[20], 0.5);

    // The legacy decay flattens the curve: R at t = S stays 90%
    let fsrs = Fsrs::new(PartialParameters::new().weights(CardFactory::legacy_v5_weights()))
        .unwrap();
    let r = fsrs.algorithm().forgetting_curve(10.0, 10.0);
    assert!((r - 0.9).abs() < 1e-8);
}

#[test]
fn test_unsupported_weight_length_falls_back() {
    let params = Parameters::build(PartialParameters::new().weights(vec![1.0; 5]));
    assert_eq!(params.w, DEFAULT_WEIGHTS);
}

#[test]
fn test_environment_overrides() {
    let env: HashMap<&str, &str> = [
        (ENV_REQUEST_RETENTION, "0.8"),
        (ENV_MAXIMUM_INTERVAL, "100"),
        (ENV_ENABLE_SHORT_TERM, "false"),
    ]
    .into_iter()
    .collect();

    let partial = PartialParameters::from_json_str(r#"{ "request_retention": 0.95 }"#)
        .unwrap()
        .with_overrides_from(|key| env.get(key).map(|v| v.to_string()));
    let fsrs = Fsrs::new(partial).unwrap();

    assert_eq!(fsrs.parameters().request_retention, 0.8);
    assert_eq!(fsrs.parameters().maximum_interval, 100);
    assert!(!fsrs.parameters().enable_short_term);
    // Lower retention target stretches intervals
    assert!(fsrs.algorithm().interval_modifier() > 1.0);
}

#[test]
fn test_invalid_configs_are_rejected() {
    assert!(matches!(
        PartialParameters::from_json_str(r#"{ "request_retention": "high" }"#),
        Err(FsrsError::Config(_))
    ));
    assert!(matches!(
        Fsrs::new(PartialParameters::new().request_retention(1.5)),
        Err(FsrsError::InvalidRetention(_))
    ));
    assert!(matches!(
        Fsrs::new(PartialParameters::new().learning_steps(["10"])),
        Err(FsrsError::InvalidStepDuration(_))
    ));
}

#[test]
fn test_interval_past_the_calendar_is_an_error() {
    let fsrs = Fsrs::new(
        PartialParameters::new()
            .request_retention(0.01)
            .maximum_interval(1_000_000_000_000),
    )
    .unwrap();
    let result = fsrs.next(&CardFactory::new_card(), CardFactory::epoch(), Rating::Easy);
    assert!(matches!(result, Err(FsrsError::InvalidParameters(_))));
}
