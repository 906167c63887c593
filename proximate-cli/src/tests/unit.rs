//! Focused unit tests covering CLI configuration and command execution.

use super::helpers::{DatasetFile, result_names};
use super::*;
use crate::between::{BetweenConfig, execute_between};
use crate::near::{NearConfig, execute_near};
use crate::nearest::{NearestConfig, execute_nearest};
use crate::origin::OriginSpec;
use crate::output::write_json;
use proximate_core::{DEFAULT_NEAREST_LIMIT, DEFAULT_RESULT_CAP, DistanceUnit, QueryParams};
use rstest::{fixture, rstest};

#[fixture]
fn dataset() -> DatasetFile {
    DatasetFile::front_range()
}

fn near_args(dataset: &DatasetFile) -> NearArgs {
    NearArgs {
        origin: Some("Denver".to_owned()),
        distance: Some(100.0),
        tolerance: Some(10.0),
        unit: Some(DistanceUnit::Kilometres),
        dataset: Some(dataset.path().to_path_buf()),
        ..NearArgs::default()
    }
}

fn near_config(dataset: &DatasetFile, origin: OriginSpec) -> NearConfig {
    NearConfig {
        origin,
        params: QueryParams {
            target: Some(100.0),
            tolerance: Some(10.0),
            unit: Some(DistanceUnit::Kilometres),
        },
        limit: DEFAULT_RESULT_CAP,
        dataset: dataset.path().to_path_buf(),
    }
}

#[rstest]
#[case::dataset(ARG_DATASET, ENV_NEAR_DATASET)]
#[case::distance(ARG_DISTANCE, ENV_NEAR_DISTANCE)]
#[case::origin(ARG_ORIGIN, ENV_NEAR_ORIGIN)]
fn converting_near_without_required_fields_errors(
    dataset: DatasetFile,
    #[case] field: &'static str,
    #[case] env_var: &'static str,
) {
    let mut args = near_args(&dataset);
    match field {
        ARG_DATASET => args.dataset = None,
        ARG_DISTANCE => args.distance = None,
        _ => args.origin = Some("   ".to_owned()),
    }
    let err = NearConfig::try_from(args).expect_err("missing field should error");
    match err {
        CliError::MissingArgument {
            field: missing,
            env,
        } => {
            assert_eq!(missing, field);
            assert_eq!(env, env_var);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn near_config_applies_default_limit(dataset: DatasetFile) {
    let config = NearConfig::try_from(near_args(&dataset)).expect("config should build");
    assert_eq!(config.limit, DEFAULT_RESULT_CAP);
    assert_eq!(config.origin, OriginSpec::Named("Denver".to_owned()));
    assert_eq!(config.params.target, Some(100.0));
}

#[rstest]
#[case::latitude_only(Some(39.7), None, ARG_LAT, ARG_LON)]
#[case::longitude_only(None, Some(-105.0), ARG_LON, ARG_LAT)]
fn half_coordinates_are_rejected(
    #[case] lat: Option<f64>,
    #[case] lon: Option<f64>,
    #[case] expected_provided: &'static str,
    #[case] expected_missing: &'static str,
) {
    let err = OriginSpec::from_parts(None, lat, lon, ENV_NEAR_ORIGIN).expect_err("half pair");
    match err {
        CliError::IncompleteCoordinate { provided, missing } => {
            assert_eq!(provided, expected_provided);
            assert_eq!(missing, expected_missing);
        }
        other => panic!("expected IncompleteCoordinate, found {other:?}"),
    }
}

#[rstest]
fn coordinates_take_precedence_over_names() {
    let origin = OriginSpec::from_parts(Some("Denver".to_owned()), Some(10.0), Some(20.0), "")
        .expect("valid coordinates");
    assert!(matches!(origin, OriginSpec::At(_)));
}

#[rstest]
fn out_of_range_coordinates_are_rejected() {
    let err = OriginSpec::from_parts(None, Some(95.0), Some(0.0), "").expect_err("bad latitude");
    assert!(matches!(err, CliError::InvalidOrigin(_)), "got {err:?}");
}

#[rstest]
fn near_ranks_places_by_deviation(dataset: DatasetFile) {
    let config = near_config(&dataset, OriginSpec::Named("denver".to_owned()));
    let report = execute_near(&config).expect("search succeeds");
    assert_eq!(
        report.origin.map(|origin| origin.display_name),
        Some("Denver, Colorado, US".to_owned())
    );
    assert_eq!(
        result_names(&report.results),
        ["Colorado Springs", "Fort Collins"]
    );
}

#[rstest]
fn near_accepts_explicit_coordinates(dataset: DatasetFile) {
    let origin = OriginSpec::from_parts(None, Some(39.7392), Some(-104.9903), "")
        .expect("valid coordinates");
    let report = execute_near(&near_config(&dataset, origin)).expect("search succeeds");
    assert_eq!(report.results.len(), 2);
}

#[rstest]
fn near_respects_the_limit(dataset: DatasetFile) {
    let mut config = near_config(&dataset, OriginSpec::Named("Denver".to_owned()));
    config.limit = 1;
    let report = execute_near(&config).expect("search succeeds");
    assert_eq!(result_names(&report.results), ["Colorado Springs"]);
}

#[rstest]
fn near_clamps_tolerance(dataset: DatasetFile) {
    let mut config = near_config(&dataset, OriginSpec::Named("Denver".to_owned()));
    config.params = QueryParams {
        target: Some(60.0),
        tolerance: Some(500.0),
        unit: None,
    };
    let report = execute_near(&config).expect("search succeeds");
    let search = report.search.expect("origin resolved");
    assert_eq!(search.unit, DistanceUnit::Miles);
    assert!((search.tolerance - 50.0).abs() < 1e-9);
}

#[rstest]
fn near_rejects_negative_distance(dataset: DatasetFile) {
    let mut config = near_config(&dataset, OriginSpec::Named("Denver".to_owned()));
    config.params.target = Some(-5.0);
    let err = execute_near(&config).expect_err("negative distance");
    assert!(matches!(err, CliError::InvalidQuery(_)), "got {err:?}");
}

#[rstest]
fn unresolved_origin_yields_empty_report(dataset: DatasetFile) {
    let config = near_config(&dataset, OriginSpec::Named("Atlantis".to_owned()));
    let report = execute_near(&config).expect("unresolved origin is not an error");
    assert!(report.origin.is_none());
    assert!(report.search.is_none());
    assert!(report.results.is_empty());
}

#[rstest]
fn missing_dataset_reports_its_path() {
    let dataset = DatasetFile::front_range();
    let missing = dataset.path().with_file_name("absent.json");
    let config = NearestConfig {
        origin: "Denver".to_owned(),
        limit: 6,
        dataset: missing.clone(),
    };
    let err = execute_nearest(&config).expect_err("missing dataset");
    match err {
        CliError::LoadDataset { path, .. } => assert_eq!(path, missing),
        other => panic!("expected LoadDataset, found {other:?}"),
    }
}

#[rstest]
fn nearest_excludes_the_origin(dataset: DatasetFile) {
    let config = NearestConfig {
        origin: "Denver".to_owned(),
        limit: 3,
        dataset: dataset.path().to_path_buf(),
    };
    let report = execute_nearest(&config).expect("lookup succeeds");
    assert_eq!(
        result_names(&report.results),
        ["Boulder", "Fort Collins", "Colorado Springs"]
    );
}

#[rstest]
fn nearest_config_defaults_to_six(dataset: DatasetFile) {
    let args = NearestArgs {
        origin: Some("Denver".to_owned()),
        limit: None,
        dataset: Some(dataset.path().to_path_buf()),
    };
    let config = NearestConfig::try_from(args).expect("config should build");
    assert_eq!(config.limit, 6);
}

#[rstest]
fn between_measures_resolved_places(dataset: DatasetFile) {
    let config = BetweenConfig {
        from: "Denver".to_owned(),
        to: "Cheyenne Wyoming".to_owned(),
        dataset: dataset.path().to_path_buf(),
    };
    let report = execute_between(&config).expect("measure succeeds");
    let summary = report.summary.expect("both ends resolve");
    assert!((summary.kilometres - 156.43).abs() < 0.5, "{summary:?}");
    assert!(summary.travel.driving.hours > 1.9);
}

#[rstest]
fn between_leaves_summary_empty_when_an_end_is_unknown(dataset: DatasetFile) {
    let config = BetweenConfig {
        from: "Denver".to_owned(),
        to: "El Dorado".to_owned(),
        dataset: dataset.path().to_path_buf(),
    };
    let report = execute_between(&config).expect("unresolved end is not an error");
    assert!(report.from.is_some());
    assert!(report.to.is_none());
    assert!(report.summary.is_none());
}

#[rstest]
fn converting_between_without_destination_errors(dataset: DatasetFile) {
    let args = BetweenArgs {
        from: Some("Denver".to_owned()),
        to: None,
        dataset: Some(dataset.path().to_path_buf()),
    };
    let err = BetweenConfig::try_from(args).expect_err("missing destination");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_TO);
            assert_eq!(env, ENV_BETWEEN_TO);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn json_output_ends_with_newline() {
    let mut buffer = Vec::new();
    write_json(&mut buffer, &vec![1, 2]).expect("write succeeds");
    let text = String::from_utf8(buffer).expect("utf-8 output");
    assert!(text.ends_with("]\n"), "{text:?}");
}

#[rstest]
fn near_layers_honour_cli_over_env_over_file(dataset: DatasetFile) {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let env_dataset = dataset.path().with_file_name("from-env.json");
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "distance": 250.0,
            "tolerance": 12.5,
            "limit": 4,
        }),
        None,
    );
    composer.push_environment(json!({
        "origin": "Boulder",
        "distance": 150.0,
        "dataset": env_dataset.as_str(),
    }));
    composer.push_cli(json!({
        "origin": "Denver",
        "dataset": dataset.path().as_str(),
    }));

    let config = crate::near::config_from_layers_for_test(composer.layers())
        .expect("merged config should build");
    assert_eq!(config.origin, OriginSpec::Named("Denver".to_owned()));
    assert_eq!(config.dataset, dataset.path());
    assert_eq!(config.params.target, Some(150.0));
    assert_eq!(config.params.tolerance, Some(12.5));
    assert_eq!(config.limit, 4);
}

#[rstest]
fn nearest_takes_origin_and_dataset_from_env(dataset: DatasetFile) {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_environment(json!({
        "origin": "Denver",
        "dataset": dataset.path().as_str(),
    }));

    let config = crate::nearest::config_from_layers_for_test(composer.layers())
        .expect("merged config should build");
    assert_eq!(config.origin, "Denver");
    assert_eq!(config.limit, DEFAULT_NEAREST_LIMIT);
    let report = execute_nearest(&config).expect("nearest runs");
    assert_eq!(result_names(&report.results).first(), Some(&"Boulder"));
}

#[rstest]
fn layered_type_errors_map_to_configuration() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "limit": "plenty" }));

    let err = crate::nearest::config_from_layers_for_test(composer.layers())
        .expect_err("invalid layer should fail");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected configuration error, found {other:?}"),
    }
}
