//! Integration tests for artifact bundle loading.

use std::io::Write;

use gridcast_data::{ArtifactBundle, WeatherTable, META_FILE, MODEL_FILE, TRAIN_FILE};
use gridcast_model::parse_timestamp;
use tempfile::TempDir;

fn write_artifacts(dir: &TempDir) {
    let mut model = std::fs::File::create(dir.path().join(MODEL_FILE)).unwrap();
    write!(
        model,
        r#"{{
            "t0": "2017-01-01T00:00:00",
            "t_scale": 31536000.0,
            "y_scale": 100.0,
            "k": 0.1,
            "m": 2.0,
            "delta": [0.05],
            "t_change": [0.5],
            "seasonality": [
                {{"name": "weekly", "period_days": 7.0, "order": 1, "beta": [0.01, -0.02]}}
            ],
            "regressors": [
                {{"name": "temperature", "mu": 25.0, "std": 5.0, "coef": 0.1}}
            ],
            "sigma_obs": 0.05,
            "interval_width": 0.8
        }}"#
    )
    .unwrap();

    let mut train = std::fs::File::create(dir.path().join(TRAIN_FILE)).unwrap();
    writeln!(train, "ds,y,temperature").unwrap();
    writeln!(train, "2017-12-31 22:00:00,300.0,23.5").unwrap();
    writeln!(train, "2017-12-31 23:00:00,280.0,23.1").unwrap();

    let mut meta = std::fs::File::create(dir.path().join(META_FILE)).unwrap();
    writeln!(meta, r#"{{"freq": "H", "regressors": ["temperature"]}}"#).unwrap();
}

#[test]
fn test_bundle_round_trip() {
    let dir = TempDir::new().unwrap();
    write_artifacts(&dir);

    let bundle = ArtifactBundle::load_from(dir.path()).unwrap();

    assert_eq!(bundle.meta.freq, "H");
    assert_eq!(bundle.meta.regressors, vec!["temperature"]);
    assert_eq!(bundle.training.len(), 2);
    assert_eq!(bundle.training_year(), Some(2017));
    assert_eq!(bundle.model.regressor_names(), vec!["temperature"]);

    let last = bundle.training.last_row().unwrap();
    assert_eq!(last.regressors.get("temperature"), Some(&23.1));
}

#[test]
fn test_loaded_model_predicts_over_enriched_rows() {
    let dir = TempDir::new().unwrap();
    write_artifacts(&dir);
    let bundle = ArtifactBundle::load_from(dir.path()).unwrap();

    let mut row = gridcast_model::FutureRow::new(parse_timestamp("2018-01-01 00:00:00").unwrap());
    row.set("temperature", Some(23.1));

    let forecast = bundle.model.predict(&[row]).unwrap();
    assert_eq!(forecast.len(), 1);
    assert!(forecast[0].yhat_lower <= forecast[0].yhat);
    assert!(forecast[0].yhat <= forecast[0].yhat_upper);
}

#[test]
fn test_weather_table_lookup_matches_training_grid() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("weather_holiday.csv");

    let mut weather = std::fs::File::create(&path).unwrap();
    writeln!(weather, "Datetime,temperature,humidity,cloud_cover").unwrap();
    writeln!(weather, "2017-12-31 23:00:00,23.1,60.0,10.0").unwrap();
    writeln!(weather, "2018-01-01 00:00:00,22.8,62.0,15.0").unwrap();

    let table = WeatherTable::load(&path).unwrap();
    assert_eq!(table.len(), 2);

    let ds = parse_timestamp("2018-01-01 00:00:00").unwrap();
    let values = table.lookup(ds).unwrap();
    assert_eq!(values.get("humidity"), Some(&Some(62.0)));
}
