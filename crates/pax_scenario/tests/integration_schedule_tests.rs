//! Parquet schedule → metadata → column index → allocation flow.

use std::fs::File;
use std::sync::Arc;

use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;

use pax_core::allocation::allocate;
use pax_core::index::ColumnIndex;
use pax_core::predicate::{Condition, Predicate};
use pax_core::rules::{RulePayload, RuleSet};
use pax_scenario::schedule::load_schedule_metadata;

fn schedule_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("flight_id", DataType::Utf8, false),
        Field::new("operating_carrier_iata", DataType::Utf8, true),
        Field::new("arrival_departure", DataType::Utf8, true),
    ]))
}

fn write_schedule(path: &std::path::Path) {
    let ids: ArrayRef = Arc::new(StringArray::from(vec!["F1", "F2", "F3", "F4", "F5"]));
    let carriers: ArrayRef = Arc::new(StringArray::from(vec![
        Some("KE"),
        Some("KE"),
        Some("OZ"),
        Some("7C"),
        None,
    ]));
    let directions: ArrayRef = Arc::new(StringArray::from(vec![
        Some("A"),
        Some("D"),
        Some("A"),
        Some("D"),
        Some("A"),
    ]));

    let batch = RecordBatch::try_new(schedule_schema(), vec![ids, carriers, directions])
        .expect("valid batch");
    let file = File::create(path).expect("create schedule file");
    let props = WriterProperties::builder().build();
    let mut writer =
        ArrowWriter::try_new(file, batch.schema(), Some(props)).expect("create writer");
    writer.write(&batch).expect("write batch");
    writer.close().expect("close writer");
}

#[test]
fn loaded_metadata_groups_values_and_records_indices() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("schedule.parquet");
    write_schedule(&path);

    let metadata = load_schedule_metadata(
        &path,
        "flight_id",
        &["operating_carrier_iata", "arrival_departure"],
    )
    .expect("loadable schedule");

    assert_eq!(metadata.len(), 2);
    let carriers = metadata
        .iter()
        .find(|m| m.column == "operating_carrier_iata")
        .expect("carrier column");
    assert_eq!(carriers.values["KE"].flights, vec!["F1", "F2"]);
    assert_eq!(carriers.values["KE"].indices, vec![0, 1]);
    // F5's carrier is null and is skipped for this column.
    assert_eq!(carriers.values.len(), 3);

    let directions = metadata
        .iter()
        .find(|m| m.column == "arrival_departure")
        .expect("direction column");
    assert_eq!(directions.values["A"].flights, vec!["F1", "F3", "F5"]);
}

#[test]
fn loaded_metadata_feeds_the_allocator() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("schedule.parquet");
    write_schedule(&path);

    let metadata = load_schedule_metadata(
        &path,
        "flight_id",
        &["operating_carrier_iata", "arrival_departure"],
    )
    .expect("loadable schedule");
    let index = ColumnIndex::build("ICN:2026-03-01", &metadata);

    // F5 only appears under arrival_departure; the universe still counts it.
    assert_eq!(index.total_flights(), 5);

    let mut set = RuleSet::new();
    let ke = set.add_rule(
        Predicate::new().with_condition(Condition::new("operating_carrier_iata", ["KE"])),
        RulePayload::load_factor_from_percent(85.0),
    );
    let arrivals = set.add_rule(
        Predicate::new().with_condition(Condition::new("arrival_departure", ["A"])),
        RulePayload::load_factor_from_percent(70.0),
    );

    let result = allocate(set.rules(), &index);
    assert_eq!(result.per_rule[&ke].claimed, 2);
    // F1 is already claimed by the KE rule.
    assert_eq!(result.per_rule[&arrivals].matched, 3);
    assert_eq!(result.per_rule[&arrivals].claimed, 2);
    assert_eq!(result.default_claimed, 1);
}

#[test]
fn missing_column_is_reported() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("schedule.parquet");
    write_schedule(&path);

    let err = load_schedule_metadata(&path, "flight_id", &["aircraft_type"])
        .expect_err("unknown column must fail");
    assert!(err.to_string().contains("aircraft_type"));
}
