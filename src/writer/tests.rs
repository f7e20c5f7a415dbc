use std::fs::File;
use std::io::Cursor;

use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use tempfile::tempdir;

use super::*;
use crate::detect::{PeakFlags, ToleranceConfig};
use crate::loader::read_peak_table;
use crate::schema::{
    KEY_FORMAT_VERSION, KEY_MS_LEVEL, KEY_PEAK_COUNT, KEY_SOFTWARE, KEY_SOURCE_FILE,
    KEY_TOLERANCES, PEAK_TABLE_FORMAT_VERSION,
};
use crate::signal::SignalArrays;

fn sample_signal() -> (SignalArrays, PeakFlags) {
    let signal = SignalArrays::new(
        vec![100.0, 100.0, 200.0],
        vec![1.0, 2.0, 1.0],
        vec![0.5, 0.5, 0.5],
        vec![10.0, 50.0, 5.0],
    )
    .unwrap();
    let flags = PeakFlags::from(vec![false, true, true]);
    (signal, flags)
}

#[test]
fn test_write_to_buffer() -> Result<(), WriterError> {
    let (signal, flags) = sample_signal();
    let mut writer = PeakTableWriter::new(
        Cursor::new(Vec::new()),
        &TableMetadata::new(),
        WriterConfig::default(),
    )?;
    writer.write(&signal, &flags)?;

    let stats = writer.finish()?;
    assert_eq!(stats.rows_written, 3);
    assert_eq!(stats.peaks_written, 2);
    assert_eq!(stats.row_groups_written, 1);
    Ok(())
}

#[test]
fn test_length_mismatch_is_invalid_data() {
    let (signal, _) = sample_signal();
    let mut writer = PeakTableWriter::new(
        Cursor::new(Vec::new()),
        &TableMetadata::new(),
        WriterConfig::default(),
    )
    .unwrap();

    let err = writer
        .write(&signal, &PeakFlags::from(vec![true]))
        .unwrap_err();
    assert!(matches!(err, WriterError::InvalidData(_)));
}

#[test]
fn test_round_trip_with_footer_metadata() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.peaks.parquet");
    let (signal, flags) = sample_signal();

    let metadata = TableMetadata::new()
        .with_tolerances(ToleranceConfig::default())
        .with_source_file("run.parquet")
        .with_ms_level("1");
    let mut writer = PeakTableWriter::new_file(&path, &metadata, WriterConfig::fast_write()).unwrap();
    writer.write(&signal, &flags).unwrap();
    let stats = writer.finish().unwrap();
    assert_eq!(stats.rows_written, 3);

    let builder = ParquetRecordBatchReaderBuilder::try_new(File::open(&path).unwrap()).unwrap();
    let kv = builder
        .metadata()
        .file_metadata()
        .key_value_metadata()
        .cloned()
        .unwrap_or_default();
    let lookup = |key: &str| {
        kv.iter()
            .find(|entry| entry.key == key)
            .and_then(|entry| entry.value.clone())
    };

    assert_eq!(
        lookup(KEY_FORMAT_VERSION).as_deref(),
        Some(PEAK_TABLE_FORMAT_VERSION)
    );
    assert_eq!(lookup(KEY_SOURCE_FILE).as_deref(), Some("run.parquet"));
    assert_eq!(lookup(KEY_MS_LEVEL).as_deref(), Some("1"));
    assert_eq!(lookup(KEY_PEAK_COUNT).as_deref(), Some("2"));
    assert!(lookup(KEY_SOFTWARE).unwrap().starts_with("peakfinder v"));

    let tolerances: ToleranceConfig =
        serde_json::from_str(&lookup(KEY_TOLERANCES).unwrap()).unwrap();
    assert_eq!(tolerances, ToleranceConfig::default());

    let (read_signal, read_flags) = read_peak_table(&path).unwrap();
    assert_eq!(read_signal, signal);
    assert_eq!(read_flags, flags);
}

#[test]
fn test_row_groups_follow_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("small_groups.parquet");
    let (signal, flags) = sample_signal();

    let config = WriterConfig {
        row_group_size: 2,
        compression: CompressionType::Uncompressed,
        ..WriterConfig::default()
    };
    let mut writer = PeakTableWriter::new_file(&path, &TableMetadata::new(), config).unwrap();
    writer.write(&signal, &flags).unwrap();
    writer.write(&signal, &flags).unwrap();
    let stats = writer.finish().unwrap();

    assert_eq!(stats.rows_written, 6);
    assert_eq!(stats.peaks_written, 4);
    assert_eq!(stats.row_groups_written, 3);

    let (read_signal, read_flags) = read_peak_table(&path).unwrap();
    assert_eq!(read_signal.len(), 6);
    assert_eq!(read_flags.peak_count(), 4);
}

#[test]
fn test_compression_parse() {
    assert_eq!(CompressionType::parse("zstd"), Some(CompressionType::Zstd(3)));
    assert_eq!(CompressionType::parse("ZSTD:12"), Some(CompressionType::Zstd(12)));
    assert_eq!(CompressionType::parse("snappy"), Some(CompressionType::Snappy));
    assert_eq!(CompressionType::parse("none"), Some(CompressionType::Uncompressed));
    assert_eq!(CompressionType::parse("lz4"), None);
    assert_eq!(CompressionType::parse("zstd:x"), None);
}

#[test]
fn test_metadata_timestamp_defaults_to_now() {
    let metadata = TableMetadata::new().to_parquet_metadata().unwrap();
    let timestamp = metadata
        .get(crate::schema::KEY_DETECTION_TIMESTAMP)
        .unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    assert!(!metadata.contains_key(KEY_TOLERANCES));
}
