use crate::error::Result;
use crate::models::{ChartConfig, ChartData};
use crate::tool::ToolEvent;
use csv::WriterBuilder;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Load a chart record; missing fields get the defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ChartConfig> {
    let f = File::open(path)?;
    let data: ChartData = serde_json::from_reader(BufReader::new(f))?;
    Ok(ChartConfig::from_partial(data))
}

/// Save a chart record as pretty JSON, exactly as `save()` returned it.
pub fn save_config<P: AsRef<Path>>(config: &ChartConfig, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(config)?;
    f.write_all(s.as_bytes())?;
    f.write_all(b"\n")?;
    Ok(())
}

/// Read a JSON array of scripted tool events.
pub fn load_events<P: AsRef<Path>>(path: P) -> Result<Vec<ToolEvent>> {
    let f = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(f))?)
}

/// Export the chart table as CSV: one row per label, one column per dataset.
///
/// Short datasets are padded with 0, matching what the editor shows.
pub fn export_csv<P: AsRef<Path>>(config: &ChartConfig, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    let mut header = Vec::with_capacity(config.datasets.len() + 1);
    header.push("label".to_string());
    header.extend(config.datasets.iter().map(|d| d.label.clone()));
    wtr.write_record(&header)?;
    for (i, label) in config.labels.iter().enumerate() {
        let mut row = Vec::with_capacity(header.len());
        row.push(label.clone());
        row.extend(config.datasets.iter().map(|d| d.value_at(i).to_string()));
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}
