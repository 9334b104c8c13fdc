//! End-to-end scenarios for the comfort calculator.

use ac_fan_comfort::storage::{self, AppConfig};
use ac_fan_comfort::{ComfortError, ComfortOutcome, ComfortRequest, ComfortSettingsCalculator};

fn calculate(request: &ComfortRequest) -> ac_fan_comfort::Result<ComfortOutcome> {
    ComfortSettingsCalculator::new().calculate(request)
}

#[test]
fn summer_evening_gets_a_recommendation() {
    let request = ComfortRequest::new(24.0, 30.0, 60.0, 85.0, "summer clothing");
    let outcome = calculate(&request).unwrap();
    let rec = outcome.recommendation().expect("recommendation");

    assert_eq!(rec.met, 1.5);
    assert_eq!(rec.clo, 0.5);
    assert_eq!(rec.target_pmv, 0.0);
    assert!(rec.ac_temp <= 28.0 && rec.ac_temp >= 24.0);
    assert!((1..=6).contains(&rec.fan.speed_level));
    assert_eq!(rec.lookup_table.len(), 9 * 32);
}

#[test]
fn humid_day_gets_advisory_only() {
    let request = ComfortRequest::new(24.0, 30.0, 80.0, 85.0, "summer clothing");
    let outcome = calculate(&request).unwrap();
    assert!(matches!(outcome, ComfortOutcome::Advisory(_)));
    assert!(outcome.recommendation().is_none());
}

#[test]
fn heating_request_rejected() {
    let request = ComfortRequest::new(24.0, 20.0, 60.0, 85.0, "summer clothing");
    let err = calculate(&request).unwrap_err();
    assert!(matches!(err, ComfortError::HeatingNotSupported { .. }));
}

#[test]
fn desired_temperature_boundaries() {
    for desired in [16.0, 32.0] {
        let request = ComfortRequest::new(desired, 35.0, 60.0, 85.0, "summer clothing");
        let result = calculate(&request);
        assert!(
            !matches!(result, Err(ComfortError::OutOfRangeTemperature { .. })),
            "{} rejected",
            desired
        );
    }
    for desired in [15.9, 32.1] {
        let request = ComfortRequest::new(desired, 35.0, 60.0, 85.0, "summer clothing");
        assert!(matches!(
            calculate(&request),
            Err(ComfortError::OutOfRangeTemperature { .. })
        ));
    }
}

#[test]
fn warm_target_above_initial_ac_temp() {
    // 32°C desired is valid but above the 28°C starting setpoint.
    let request = ComfortRequest::new(32.0, 35.0, 60.0, 85.0, "summer clothing");
    assert!(matches!(
        calculate(&request),
        Err(ComfortError::UnableToDetermineVelocity)
    ));
}

#[test]
fn bundled_up_sleeper_needs_more_air_than_the_fan_gives() {
    // Resting, under a heavy blanket, wanting 20°C: the closest PMV is at
    // 3.2 m/s, just beyond speed 6.
    let request = ComfortRequest::new(20.0, 25.0, 50.0, 55.0, "heavy blanket");
    let err = calculate(&request).unwrap_err();
    match err {
        ComfortError::UnableToAchieveVelocity {
            required,
            max_available,
        } => {
            assert_eq!(required, 3.2);
            assert!(max_available < required);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn repeated_calls_are_identical() {
    let calculator = ComfortSettingsCalculator::new();
    let request = ComfortRequest::new(25.0, 33.0, 55.0, 85.0, "shirt and trousers");
    let first = calculator.calculate(&request).unwrap();
    let second = calculator.calculate(&request).unwrap();
    assert_eq!(first, second);

    let (a, b) = (first.recommendation().unwrap(), second.recommendation().unwrap());
    assert_eq!(a.ac_temp.to_bits(), b.ac_temp.to_bits());
    assert_eq!(a.achieved_pmv.to_bits(), b.achieved_pmv.to_bits());
}

#[test]
fn unknown_clothing_uses_summer_default() {
    let known = ComfortRequest::new(24.0, 30.0, 60.0, 85.0, "summer clothing");
    let unknown = ComfortRequest::new(24.0, 30.0, 60.0, 85.0, "kimono");
    assert_eq!(calculate(&known).unwrap(), calculate(&unknown).unwrap());
}

#[test]
fn config_file_changes_limits() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    let mut config = AppConfig::default();
    config.limits.max_outdoor_humidity = 50.0;
    storage::save_config_to(&config, &path).unwrap();

    let loaded = storage::load_config_from(&path).unwrap();
    let calculator = ComfortSettingsCalculator::from_config(&loaded).unwrap();
    let request = ComfortRequest::new(24.0, 30.0, 60.0, 85.0, "summer clothing");
    assert!(calculator.calculate(&request).unwrap().is_advisory());
}

#[test]
fn recommendation_exports_its_lookup_table() {
    let request = ComfortRequest::new(26.0, 31.0, 45.0, 70.0, "light blanket");
    let outcome = calculate(&request).unwrap();
    let rec = outcome.recommendation().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = storage::export_lookup_table(&rec.lookup_table, dir.path(), 26.0, 45.0).unwrap();
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("lookup_table_"));
    assert!(name.ends_with("_temp26.0_humidity45.0.csv"));

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), rec.lookup_table.len() + 1);
}
