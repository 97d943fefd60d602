use chrono::NaiveDate;
use streamflow_chart::api::{Dataset, DatasetKey, DatasetStore, PointColumns, parse_dataset_csv};
use streamflow_chart::core::{SegmentBuilder, start_of_day};
use streamflow_chart::error::ChartError;

const SITE_CSV: &str = "\
dt,result,pd,flow_min,flow_max
2024-06-01,12.5,moderate,10,15
2024-06-02,NA,moderate,9,14
not-a-date,3,severe,1,2
2024-06-03,4.25,severe,3,5
";

fn parse(site: &str, data_type: &str) -> Dataset {
    parse_dataset_csv(DatasetKey::new(site, data_type), SITE_CSV.as_bytes()).expect("valid csv")
}

#[test]
fn csv_rows_parse_dates_results_and_extra_columns() {
    let dataset = parse("01010000", "obs");

    assert_eq!(dataset.values.len(), 3);
    let first = &dataset.values[0];
    assert_eq!(
        first.date_time,
        start_of_day(NaiveDate::from_ymd_opt(2024, 6, 1).expect("date"))
    );
    assert_eq!(first.result, 12.5);
    assert_eq!(first.column("pd"), Some("moderate"));
    assert!(dataset.values[1].result.is_nan());
    assert_eq!(dataset.dataset_id(), "01010000obs");
}

#[test]
fn csv_without_date_column_is_rejected() {
    let result = parse_dataset_csv(DatasetKey::new("x", "obs"), "day,result\n1,2\n".as_bytes());
    assert!(matches!(result, Err(ChartError::Csv(_))));
}

#[test]
fn result_domain_ignores_non_numeric_results() {
    let mut store = DatasetStore::new(4);
    store.insert(parse("01010000", "obs"));

    let domain = store.result_domain("01010000", "obs").expect("domain");
    assert_eq!(domain.bounds(), (4.25, 12.5));
    assert!(store.result_domain("01010000", "forecast").is_none());

    let empty = parse_dataset_csv(
        DatasetKey::new("empty", "obs"),
        "dt,result\n2024-01-01,\n".as_bytes(),
    )
    .expect("valid csv");
    store.insert(empty);
    assert!(store.result_domain("empty", "obs").is_none());
}

#[test]
fn store_evicts_oldest_entry_past_capacity() {
    let mut store = DatasetStore::new(2);
    assert!(store.insert(parse("a", "obs")).is_none());
    assert!(store.insert(parse("b", "obs")).is_none());
    assert!(store.insert(parse("a", "obs")).is_none());

    let evicted = store.insert(parse("c", "obs")).expect("evicted");
    assert_eq!(evicted.key, DatasetKey::new("b", "obs"));
    assert_eq!(store.len(), 2);
    assert!(store.dataset("a", "obs").is_some());
    assert!(store.dataset("c", "obs").is_some());
}

#[test]
fn datasets_for_site_filters_by_site() {
    let mut store = DatasetStore::default();
    store.insert(parse("a", "obs"));
    store.insert(parse("a", "forecast"));
    store.insert(parse("b", "obs"));

    let types: Vec<&str> = store
        .datasets_for_site("a")
        .map(|dataset| dataset.key.data_type.as_str())
        .collect();
    assert_eq!(types, vec!["obs", "forecast"]);
    assert_eq!(store.capacity(), 32);
}

#[test]
fn dataset_points_feed_segment_building() {
    let dataset = parse("01010000", "obs");
    let columns = PointColumns::default()
        .with_range("flow_min", "flow_max")
        .with_class("pd");
    let points = dataset.to_points(&columns);

    assert_eq!(points[0].id, "01010000-2024-06-01");
    assert_eq!(points[0].value_min, Some(10.0));
    assert_eq!(points[0].class.as_deref(), Some("moderate"));

    let segments = SegmentBuilder::new("obs").build(points).expect("segments");
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].id, "obs-0");
    assert_eq!(segments[0].points().len(), 1);
    assert_eq!(segments[1].class.as_deref(), Some("severe"));
}

#[test]
fn lookup_matches_site_and_type_separately() {
    let mut store = DatasetStore::new(4);
    store.insert(parse("0101", "obs"));
    store.insert(parse("01010", "bs"));

    let dataset = store.dataset("0101", "obs").expect("dataset");
    assert_eq!(dataset.key, DatasetKey::new("0101", "obs"));
    assert_eq!(
        store.dataset("01010", "bs").expect("dataset").key,
        DatasetKey::new("01010", "bs")
    );
    assert!(store.dataset("0101", "bs").is_none());
    assert!(store.dataset("010", "1obs").is_none());
}
