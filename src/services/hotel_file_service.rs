use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use log::{info, warn};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::Result;
use crate::models::{GeocodedHotelRecord, HotelRecord, GEOCODED_COLUMNS};
use crate::services::cleaning_service::clean_hotel_records;
use crate::services::geocoding_service::Geocoder;

/// Deserializes every CSV row. Invalid UTF-8 is replaced with U+FFFD rather
/// than failing the batch.
fn read_rows_lossy<R: Read, T: DeserializeOwned>(reader: R) -> Result<Vec<T>> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = StringRecord::from_byte_record_lossy(reader.byte_headers()?.clone());

    let mut rows = Vec::new();
    let mut lossy = 0;
    for row in reader.byte_records() {
        let record = match StringRecord::from_byte_record(row?) {
            Ok(record) => record,
            Err(err) => {
                lossy += 1;
                StringRecord::from_byte_record_lossy(err.into_byte_record())
            }
        };
        rows.push(record.deserialize(Some(&headers))?);
    }
    if lossy > 0 {
        warn!("{} rows contained invalid UTF-8 and were decoded lossily", lossy);
    }
    Ok(rows)
}

pub fn read_hotel_records_from<R: Read>(reader: R) -> Result<Vec<HotelRecord>> {
    read_rows_lossy(reader)
}

/// Scraped hotel rows. A missing file reads as no rows.
pub fn read_hotel_records(path: &Path) -> Result<Vec<HotelRecord>> {
    if !path.exists() {
        warn!("Hotel file {} not found, treating as empty", path.display());
        return Ok(Vec::new());
    }
    let records = read_hotel_records_from(File::open(path)?)?;
    info!("Loaded {} hotels from {}", records.len(), path.display());
    Ok(records)
}

pub fn read_geocoded_records(path: &Path) -> Result<Vec<GeocodedHotelRecord>> {
    let records: Vec<GeocodedHotelRecord> = read_rows_lossy(File::open(path)?)?;
    info!("Loaded {} geocoded hotels from {}", records.len(), path.display());
    Ok(records)
}

/// Writes the geocoded file in its fixed column order. The header is always
/// written, so an empty batch still produces a loadable file.
pub fn write_geocoded_records_to<W: Write>(
    writer: W,
    records: &[GeocodedHotelRecord],
) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    writer.write_record(GEOCODED_COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_geocoded_records(path: &Path, records: &[GeocodedHotelRecord]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    write_geocoded_records_to(File::create(path)?, records)?;
    info!("Wrote {} geocoded hotels to {}", records.len(), path.display());
    Ok(())
}

/// Reads scraped hotels from `input`, optionally cleans them, geocodes every
/// row and writes the result to `output`. Returns the number of rows written.
pub fn geocode_hotel_file(
    geocoder: &Geocoder<'_>,
    input: &Path,
    output: &Path,
    clean: bool,
) -> Result<usize> {
    let mut records = read_hotel_records(input)?;
    if clean {
        records = clean_hotel_records(records);
    }
    if records.is_empty() {
        info!("No hotels to process, writing header only");
    }
    let geocoded = geocoder.geocode_records(records);
    write_geocoded_records(output, &geocoded)?;
    Ok(geocoded.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRAPED: &str = "\
City,Name,Link,Image,Address,Distance,Rating,Reviews,Price (per night),Room Fees,Exclusions,Certified
New York,Hotel Indigo,https://example.com/indigo,,127 W 28th St,0.6 mi (1.0 km) from city center,4.4,\"1,024 reviews\",$210,,,
Chicago,The Langham,https://example.com/langham,,330 N Wabash,walking distance,4.8,900,$450,,,Yes
";

    #[test]
    fn test_read_scraped_rows() {
        let records = read_hotel_records_from(SCRAPED.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Hotel Indigo");
        assert_eq!(records[0].reviews, "1,024 reviews");
        assert_eq!(records[1].certified, "Yes");
    }

    #[test]
    fn test_invalid_utf8_row_is_kept() {
        let mut raw = b"City,Name,Link\nNew York,Hotel Indigo,https://example.com/indigo\n".to_vec();
        raw.extend_from_slice(b"Chicago,Caf\xE9 Hotel,https://example.com/cafe\n");
        raw.extend_from_slice(b"Seattle,Ace Hotel,https://example.com/ace\n");

        let records = read_hotel_records_from(raw.as_slice()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].city, "Chicago");
        assert_eq!(records[1].name, "Caf\u{FFFD} Hotel");
        assert_eq!(records[2].name, "Ace Hotel");
    }

    #[test]
    fn test_missing_columns_read_as_empty() {
        let records = read_hotel_records_from("Name,Link\nSolo,https://example.com\n".as_bytes()).unwrap();
        assert_eq!(records[0].name, "Solo");
        assert_eq!(records[0].city, "");
    }

    #[test]
    fn test_header_only_output_for_empty_batch() {
        let mut out = Vec::new();
        write_geocoded_records_to(&mut out, &[]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.trim_end(), GEOCODED_COLUMNS.join(","));
    }

    #[test]
    fn test_column_order() {
        let record = GeocodedHotelRecord::from_record(
            HotelRecord {
                city: "Boston".to_string(),
                name: "Omni Parker".to_string(),
                ..Default::default()
            },
            None,
            "Unknown city".to_string(),
        );
        let mut out = Vec::new();
        write_geocoded_records_to(&mut out, &[record]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "Boston,Omni Parker,,,,,,,,,,,,,Unknown city");
    }
}
