use anyhow::{Context, Result};
use std::path::PathBuf;

use peakfinder::detect::{DetectionSummary, ToleranceConfig};
use peakfinder::loader::read_peak_table;
use peakfinder::schema::{KEY_FORMAT_VERSION, KEY_TOLERANCES};

/// Display information about a Parquet file, with a detection summary for peak tables
pub fn run(file: PathBuf) -> Result<()> {
    use parquet::file::reader::{FileReader, SerializedFileReader};
    use std::fs::File;

    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let file_handle = File::open(&file).context("Failed to open file")?;
    let reader = SerializedFileReader::new(file_handle).context("Failed to read Parquet file")?;

    let metadata = reader.metadata();
    let file_metadata = metadata.file_metadata();

    println!("Parquet File Information");
    println!("========================");
    println!("File: {}", file.display());
    println!();

    println!("File Statistics:");
    println!("  Row groups: {}", metadata.num_row_groups());
    println!("  Total rows: {}", file_metadata.num_rows());
    println!(
        "  Schema columns: {}",
        file_metadata.schema_descr().num_columns()
    );
    println!();

    let mut is_peak_table = false;
    let mut tolerances = None;
    if let Some(kv_metadata) = file_metadata.key_value_metadata() {
        println!("Metadata Keys:");
        for kv in kv_metadata {
            if kv.key == KEY_FORMAT_VERSION {
                is_peak_table = true;
            }
            if kv.key == KEY_TOLERANCES {
                tolerances = kv
                    .value
                    .as_deref()
                    .and_then(|v| serde_json::from_str::<ToleranceConfig>(v).ok());
            }
            let value_preview = kv
                .value
                .as_ref()
                .map(|v| {
                    if v.chars().count() > 100 {
                        let head: String = v.chars().take(100).collect();
                        format!("{}... ({} bytes)", head, v.len())
                    } else {
                        v.clone()
                    }
                })
                .unwrap_or_else(|| "<null>".to_string());
            println!("  {}: {}", kv.key, value_preview);
        }
        println!();
    }

    println!("Schema:");
    for i in 0..file_metadata.schema_descr().num_columns() {
        let col = file_metadata.schema_descr().column(i);
        println!("  {:3}. {} ({})", i + 1, col.name(), col.physical_type());
    }

    if is_peak_table {
        let (signal, flags) = read_peak_table(&file).context("Failed to read peak table")?;
        let summary = DetectionSummary::new(&signal, &flags, &tolerances.unwrap_or_default());
        println!();
        println!("{}", summary.format_colored());
    }

    Ok(())
}
