use std::fs::File;
use std::sync::Arc;

use arrow::array::{
    ArrayRef, BooleanArray, DictionaryArray, Float32Array, Float64Array, Int32Array, StringArray,
};
use arrow::datatypes::{DataType, Field, Int32Type, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use tempfile::tempdir;

use super::*;
use crate::signal::SortedSignal;

fn source_batch(mz: Vec<f64>, rt: Vec<f64>, dt: Vec<f64>, intensity: Vec<f64>, levels: Vec<&str>) -> RecordBatch {
    let schema = Arc::new(Schema::new(vec![
        Field::new("mz", DataType::Float64, false),
        Field::new("rt", DataType::Float64, false),
        Field::new("dt", DataType::Float64, false),
        Field::new("intensity", DataType::Float64, false),
        Field::new("mslevel", DataType::Utf8, false),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(Float64Array::from(mz)),
        Arc::new(Float64Array::from(rt)),
        Arc::new(Float64Array::from(dt)),
        Arc::new(Float64Array::from(intensity)),
        Arc::new(StringArray::from(levels)),
    ];
    RecordBatch::try_new(schema, columns).unwrap()
}

#[test]
fn test_filters_by_ms_level_and_renames() {
    let batch = source_batch(
        vec![100.0, 100.5, 101.0],
        vec![1.0, 2.0, 3.0],
        vec![0.1, 0.2, 0.3],
        vec![10.0, 20.0, 30.0],
        vec!["1", "2", "1"],
    );

    let loaded = SignalLoader::default().load_record_batch(&batch).unwrap();
    assert_eq!(loaded.signal.mz, vec![100.0, 101.0]);
    assert_eq!(loaded.signal.retention_time, vec![1.0, 3.0]);
    assert_eq!(loaded.signal.drift_time, vec![0.1, 0.3]);
    assert_eq!(loaded.signal.intensity, vec![10.0, 30.0]);
    assert_eq!(loaded.stats.rows_read, 3);
    assert_eq!(loaded.stats.rows_kept, 2);
    assert_eq!(loaded.stats.batches_read, 1);
}

#[test]
fn test_all_levels_keeps_every_row() {
    let batch = source_batch(
        vec![100.0, 100.5, 101.0],
        vec![1.0, 2.0, 3.0],
        vec![0.1, 0.2, 0.3],
        vec![10.0, 20.0, 30.0],
        vec!["1", "2", "1"],
    );

    let loader = SignalLoader::new(LoaderConfig::default().all_ms_levels());
    let loaded = loader.load_record_batch(&batch).unwrap();
    assert_eq!(loaded.signal.len(), 3);
}

#[test]
fn test_sorts_stably_by_mz_rt_dt() {
    let batch = source_batch(
        vec![200.0, 100.0, 100.0, 100.0],
        vec![1.0, 5.0, 2.0, 2.0],
        vec![0.0, 0.0, 0.3, 0.3],
        vec![1.0, 2.0, 3.0, 4.0],
        vec!["1", "1", "1", "1"],
    );

    let loaded = SignalLoader::default().load_record_batch(&batch).unwrap();
    assert_eq!(loaded.signal.mz, vec![100.0, 100.0, 100.0, 200.0]);
    assert_eq!(loaded.signal.retention_time, vec![2.0, 2.0, 5.0, 1.0]);
    // Equal keys keep their source order
    assert_eq!(loaded.signal.intensity, vec![3.0, 4.0, 2.0, 1.0]);
}

#[test]
fn test_signed_zero_coordinates_load_as_sorted() {
    let batch = source_batch(
        vec![100.0, 100.0],
        vec![0.0, -0.0],
        vec![0.0, 1.5],
        vec![1.0, 2.0],
        vec!["1", "1"],
    );

    let loaded = SignalLoader::default().load_record_batch(&batch).unwrap();
    assert_eq!(loaded.signal.drift_time, vec![0.0, 1.5]);
    assert!(loaded.signal.retention_time.iter().all(|rt| rt.is_sign_positive()));
    assert!(SortedSignal::try_new(loaded.signal).is_ok());
}

#[test]
fn test_dictionary_encoded_columns() {
    let levels: DictionaryArray<Int32Type> = vec!["1", "1", "2"].into_iter().collect();
    let mz: DictionaryArray<Int32Type> = vec!["300.5", "100.25", "200.0"].into_iter().collect();
    let dictionary = DataType::Dictionary(Box::new(DataType::Int32), Box::new(DataType::Utf8));
    let schema = Arc::new(Schema::new(vec![
        Field::new("mz", dictionary.clone(), false),
        Field::new("rt", DataType::Float64, false),
        Field::new("dt", DataType::Float64, false),
        Field::new("intensity", DataType::Float64, false),
        Field::new("mslevel", dictionary, false),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(mz),
            Arc::new(Float64Array::from(vec![1.0, 2.0, 3.0])),
            Arc::new(Float64Array::from(vec![0.1, 0.2, 0.3])),
            Arc::new(Float64Array::from(vec![10.0, 20.0, 30.0])),
            Arc::new(levels),
        ],
    )
    .unwrap();

    let loaded = SignalLoader::default().load_record_batch(&batch).unwrap();
    assert_eq!(loaded.signal.mz, vec![100.25, 300.5]);
    assert_eq!(loaded.signal.intensity, vec![20.0, 10.0]);
    assert_eq!(loaded.stats.rows_kept, 2);
}

#[test]
fn test_casts_mixed_column_types() {
    let schema = Arc::new(Schema::new(vec![
        Field::new("mz", DataType::Utf8, false),
        Field::new("retention_time", DataType::Float32, false),
        Field::new("drift_time", DataType::Int32, false),
        Field::new("intensity", DataType::Int32, false),
        Field::new("mslevel", DataType::Int32, false),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(StringArray::from(vec!["150.25", "150.5"])),
            Arc::new(Float32Array::from(vec![1.5, 2.5])),
            Arc::new(Int32Array::from(vec![3, 4])),
            Arc::new(Int32Array::from(vec![100, 200])),
            Arc::new(Int32Array::from(vec![1, 1])),
        ],
    )
    .unwrap();

    let loaded = SignalLoader::default().load_record_batch(&batch).unwrap();
    assert_eq!(loaded.signal.mz, vec![150.25, 150.5]);
    assert_eq!(loaded.signal.retention_time, vec![1.5, 2.5]);
    assert_eq!(loaded.signal.drift_time, vec![3.0, 4.0]);
    assert_eq!(loaded.signal.intensity, vec![100.0, 200.0]);
}

#[test]
fn test_missing_column() {
    let schema = Arc::new(Schema::new(vec![
        Field::new("mz", DataType::Float64, false),
        Field::new("rt", DataType::Float64, false),
        Field::new("intensity", DataType::Float64, false),
        Field::new("mslevel", DataType::Utf8, false),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Float64Array::from(vec![1.0])),
            Arc::new(Float64Array::from(vec![1.0])),
            Arc::new(Float64Array::from(vec![1.0])),
            Arc::new(StringArray::from(vec!["1"])),
        ],
    )
    .unwrap();

    let err = SignalLoader::default().load_record_batch(&batch).unwrap_err();
    assert!(matches!(
        err,
        LoaderError::Schema(SchemaError::MissingColumn(ref c)) if c == "drift_time"
    ));
}

#[test]
fn test_missing_ms_level_column_only_matters_when_filtering() {
    let schema = Arc::new(Schema::new(vec![
        Field::new("mz", DataType::Float64, false),
        Field::new("rt", DataType::Float64, false),
        Field::new("dt", DataType::Float64, false),
        Field::new("intensity", DataType::Float64, false),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Float64Array::from(vec![1.0])),
            Arc::new(Float64Array::from(vec![1.0])),
            Arc::new(Float64Array::from(vec![1.0])),
            Arc::new(Float64Array::from(vec![1.0])),
        ],
    )
    .unwrap();

    let err = SignalLoader::default().load_record_batch(&batch).unwrap_err();
    assert!(matches!(
        err,
        LoaderError::Schema(SchemaError::MissingColumn(ref c)) if c == "mslevel"
    ));

    let loader = SignalLoader::new(LoaderConfig::default().all_ms_levels());
    assert_eq!(loader.load_record_batch(&batch).unwrap().signal.len(), 1);
}

#[test]
fn test_no_matching_rows() {
    let batch = source_batch(vec![1.0], vec![1.0], vec![1.0], vec![1.0], vec!["2"]);
    let err = SignalLoader::default().load_record_batch(&batch).unwrap_err();
    assert!(matches!(
        err,
        LoaderError::Schema(SchemaError::NoMatchingRows { ref ms_level }) if ms_level == "1"
    ));
}

#[test]
fn test_empty_source() {
    let loader = SignalLoader::default();
    let err = loader
        .load_batches(Vec::<Result<RecordBatch, LoaderError>>::new())
        .unwrap_err();
    assert!(matches!(err, LoaderError::Schema(SchemaError::EmptySource)));
}

#[test]
fn test_custom_alias() {
    let schema = Arc::new(Schema::new(vec![
        Field::new("MZ", DataType::Float64, false),
        Field::new("rt", DataType::Float64, false),
        Field::new("dt", DataType::Float64, false),
        Field::new("intensity", DataType::Float64, false),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Float64Array::from(vec![2.0, 1.0])),
            Arc::new(Float64Array::from(vec![0.0, 0.0])),
            Arc::new(Float64Array::from(vec![0.0, 0.0])),
            Arc::new(Float64Array::from(vec![5.0, 6.0])),
        ],
    )
    .unwrap();

    let config = LoaderConfig::default().all_ms_levels().with_alias("MZ", "mz");
    let loaded = SignalLoader::new(config).load_record_batch(&batch).unwrap();
    assert_eq!(loaded.signal.mz, vec![1.0, 2.0]);
    assert_eq!(loaded.signal.intensity, vec![6.0, 5.0]);
}

#[test]
fn test_load_parquet_in_small_batches() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("source.parquet");

    let batch = source_batch(
        vec![3.0, 1.0, 2.0, 4.0, 5.0],
        vec![0.0; 5],
        vec![0.0; 5],
        vec![1.0, 2.0, 3.0, 4.0, 5.0],
        vec!["1", "1", "2", "1", "1"],
    );
    let file = File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let loader = SignalLoader::new(LoaderConfig::default().with_batch_size(2));
    let loaded = loader.load(&path).unwrap();
    assert_eq!(loaded.signal.mz, vec![1.0, 3.0, 4.0, 5.0]);
    assert_eq!(loaded.stats.batches_read, 3);
    assert_eq!(loaded.stats.rows_read, 5);
    assert_eq!(loaded.stats.rows_kept, 4);
}

#[test]
fn test_load_missing_file() {
    let dir = tempdir().unwrap();
    let err = SignalLoader::default()
        .load(dir.path().join("absent.parquet"))
        .unwrap_err();
    assert!(matches!(err, LoaderError::IoError(_)));
}

#[test]
fn test_load_stats_display() {
    let stats = LoadStats {
        batches_read: 2,
        rows_read: 10,
        rows_kept: 7,
    };
    assert_eq!(stats.to_string(), "Kept 7 of 10 rows from 2 batches");
}

#[test]
fn test_peak_table_with_nulls_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("external.peaks.parquet");

    let schema = Arc::new(Schema::new(vec![
        Field::new("mz", DataType::Float64, true),
        Field::new("retention_time", DataType::Float64, true),
        Field::new("drift_time", DataType::Float64, true),
        Field::new("intensity", DataType::Float64, true),
        Field::new("peaks", DataType::Boolean, true),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Float64Array::from(vec![Some(100.0), Some(101.0)])),
            Arc::new(Float64Array::from(vec![Some(1.0), Some(1.0)])),
            Arc::new(Float64Array::from(vec![Some(0.5), Some(0.5)])),
            Arc::new(Float64Array::from(vec![Some(10.0), None])),
            Arc::new(BooleanArray::from(vec![true, false])),
        ],
    )
    .unwrap();
    let file = File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let err = read_peak_table(&path).unwrap_err();
    assert!(matches!(err, LoaderError::InvalidFormat(ref msg) if msg.contains("intensity")));
}
