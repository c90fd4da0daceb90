//! CSV export of a derived view.
//!
//! Columns: date, price, change_point_price. The last column is empty on rows
//! without a change-point marker.

use std::io::Write;

use crate::data::DataError;
use crate::pipeline::DerivedView;

pub fn write_series_csv<W: Write>(view: &DerivedView, writer: W) -> Result<(), DataError> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(["date", "price", "change_point_price"])
        .map_err(|e| DataError::Csv(e.to_string()))?;

    for ((label, value), highlight) in view.labels.iter().zip(&view.values).zip(&view.highlights) {
        let price = value.to_string();
        let marker = highlight.map(|p| p.to_string()).unwrap_or_default();
        wtr.write_record([label.as_str(), price.as_str(), marker.as_str()])
            .map_err(|e| DataError::Csv(e.to_string()))?;
    }

    wtr.flush().map_err(|e| DataError::Io(e.to_string()))?;
    Ok(())
}

/// Export a view as a CSV string.
pub fn series_to_csv(view: &DerivedView) -> Result<String, DataError> {
    let mut buf = Vec::new();
    write_series_csv(view, &mut buf)?;
    String::from_utf8(buf).map_err(|e| DataError::Csv(e.to_string()))
}
