//! JSON codec.

use serde::{Deserialize, Deserializer, Serialize};
use sixtick_types::{EPOCH, EncodedRow, SecurityIdentity, TickSeries, parse_tick_datetime};
use std::io::{Read, Write};

use crate::{Codec, Existing, FormatError};

/// On-disk JSON document written by [`JsonCodec`].
#[derive(Debug, Serialize)]
struct JsonDocument<'a> {
    symbol: Option<&'a str>,
    isin: Option<&'a str>,
    ticks: Vec<EncodedRow>,
}

/// A complete document, as required by [`JsonCodec::read`].
///
/// All three keys must be present; `symbol` and `isin` may be `null`.
#[derive(Debug, Deserialize)]
struct OwnedJsonDocument {
    #[serde(deserialize_with = "nullable")]
    symbol: Option<String>,
    #[serde(deserialize_with = "nullable")]
    isin: Option<String>,
    ticks: Vec<EncodedRow>,
}

/// Reads a present-but-possibly-null string. A plain `Option` field would
/// also accept a missing key.
fn nullable<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Option::deserialize(deserializer)
}

/// Just the tick list, as needed by [`JsonCodec::peek`].
#[derive(Debug, Deserialize)]
struct TicksOnly {
    ticks: Vec<EncodedRow>,
}

/// JSON codec.
///
/// JSON has no natural append, so every write rewrites the whole document:
/// the stored rows learned by `peek` followed by the new ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    /// Creates a new JSON codec.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Codec for JsonCodec {
    fn write<W: Write>(
        &self,
        series: &TickSeries,
        existing: &Existing,
        mut writer: W,
    ) -> Result<(), FormatError> {
        let ticks = existing
            .rows
            .iter()
            .cloned()
            .chain(series.encoded_rows(existing.watermark))
            .collect();
        let document = JsonDocument {
            symbol: series.identity().symbol(),
            isin: series.identity().isin(),
            ticks,
        };

        serde_json::to_writer(&mut writer, &document)?;
        writer.flush()?;

        Ok(())
    }

    fn peek<R: Read>(&self, reader: R) -> Result<Existing, FormatError> {
        let document: TicksOnly =
            serde_json::from_reader(reader).map_err(|e| FormatError::Broken(e.to_string()))?;

        let watermark = match document.ticks.last() {
            Some(row) => parse_tick_datetime(row.datetime())
                .map_err(|e| FormatError::Broken(e.to_string()))?,
            None => EPOCH,
        };

        Ok(Existing {
            watermark,
            rows: document.ticks,
        })
    }

    fn read<R: Read>(&self, reader: R) -> Result<TickSeries, FormatError> {
        let document: OwnedJsonDocument =
            serde_json::from_reader(reader).map_err(|e| FormatError::Broken(e.to_string()))?;

        let identity = SecurityIdentity::from_parts(document.symbol, document.isin);
        TickSeries::from_encoded(identity, &document.ticks)
            .map_err(|e| FormatError::Broken(e.to_string()))
    }

    fn appends_in_place(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use sixtick_types::TickRecord;
    use std::io::Cursor;

    fn at(d: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2014, 7, d)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn create_test_series() -> TickSeries {
        TickSeries::new(
            SecurityIdentity::new("ABBN", "CH0012221716"),
            vec![
                TickRecord::new(at(29, 15, 23, 3), 21.52, 5738),
                TickRecord::new(at(29, 15, 24, 35), 21.6, 9010),
            ],
        )
    }

    fn write_to_value(series: &TickSeries, existing: &Existing) -> serde_json::Value {
        let mut output = Cursor::new(Vec::new());
        JsonCodec::new().write(series, existing, &mut output).unwrap();
        serde_json::from_slice(&output.into_inner()).unwrap()
    }

    #[test]
    fn test_write_json() {
        let value = write_to_value(&create_test_series(), &Existing::none());
        assert_eq!(
            value,
            serde_json::json!({
                "symbol": "ABBN",
                "isin": "CH0012221716",
                "ticks": [["29.07.2014 15:23:03", 21.52, 5738], ["29.07.2014 15:24:35", 21.6, 9010]]
            })
        );
    }

    #[test]
    fn test_write_json_keeps_existing_rows_first() {
        let existing = Existing {
            watermark: at(29, 15, 23, 3),
            rows: vec![EncodedRow("29.07.2014 15:23:03".into(), 21.52, 5738)],
        };
        let value = write_to_value(&create_test_series(), &existing);
        assert_eq!(
            value["ticks"],
            serde_json::json!([["29.07.2014 15:23:03", 21.52, 5738], ["29.07.2014 15:24:35", 21.6, 9010]])
        );
    }

    #[test]
    fn test_peek_invalid_json() {
        assert!(matches!(
            JsonCodec::new().peek(Cursor::new("")),
            Err(FormatError::Broken(_))
        ));
        let wrong_date = r#"{"ticks": [["2014-07-29 15:24:35", 21.6, 9010]}"#;
        assert!(matches!(
            JsonCodec::new().peek(Cursor::new(wrong_date)),
            Err(FormatError::Broken(_))
        ));
    }

    #[test]
    fn test_peek_wrong_date_format() {
        let wrong_date = r#"{"ticks": [["2014-07-29 15:24:35", 21.6, 9010]]}"#;
        assert!(matches!(
            JsonCodec::new().peek(Cursor::new(wrong_date)),
            Err(FormatError::Broken(_))
        ));
    }

    #[test]
    fn test_peek_empty_ticks() {
        let existing = JsonCodec::new().peek(Cursor::new(r#"{"ticks": []}"#)).unwrap();
        assert_eq!(existing, Existing::none());
    }

    #[test]
    fn test_peek_uses_last_entry() {
        let json = r#"{"ticks": [["29.07.2014 15:24:35", 21.6, 9010],
                                 ["29.07.2014 15:23:03", 21.52, 5738]],
                       "isin": "CH0012221716", "symbol": "ABBN"}"#;
        let existing = JsonCodec::new().peek(Cursor::new(json)).unwrap();
        assert_eq!(existing.watermark, at(29, 15, 23, 3));
        assert_eq!(existing.rows.len(), 2);
    }

    #[test]
    fn test_peek_malformed_ticks() {
        let json = r#"{"ticks": [["29.07.2014 15:24:35", 21.6]]}"#;
        assert!(JsonCodec::new().peek(Cursor::new(json)).is_err());
        assert!(JsonCodec::new().peek(Cursor::new(r#"{"symbol": "ABBN"}"#)).is_err());
    }

    #[test]
    fn test_read_json() {
        let json = r#"{"symbol": "ABBN", "isin": "CH0012221716",
                       "ticks": [["30.07.2014 15:05:20", 5.5, 1230]]}"#;
        let series = JsonCodec::new().read(Cursor::new(json)).unwrap();
        assert_eq!(series.security().unwrap().isin, "CH0012221716");
        assert_eq!(series.records(), &[TickRecord::new(at(30, 15, 5, 20), 5.5, 1230)]);
    }

    #[test]
    fn test_read_requires_identity() {
        let json = r#"{"symbol": "ABBN", "ticks": []}"#;
        assert!(matches!(
            JsonCodec::new().read(Cursor::new(json)),
            Err(FormatError::Broken(_))
        ));
    }

    #[test]
    fn test_read_null_identity() {
        let json = r#"{"symbol": null, "isin": null,
                       "ticks": [["30.07.2014 15:05:20", 5.5, 1230]]}"#;
        let series = JsonCodec::new().read(Cursor::new(json)).unwrap();
        assert_eq!(series.identity(), &SecurityIdentity::unresolved());
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_round_trip_unresolved_identity() {
        let series = TickSeries::new(
            SecurityIdentity::unresolved(),
            vec![TickRecord::new(at(30, 15, 5, 20), 5.5, 1230)],
        );
        let mut output = Cursor::new(Vec::new());
        JsonCodec::new()
            .write(&series, &Existing::none(), &mut output)
            .unwrap();

        let read = JsonCodec::new()
            .read(Cursor::new(output.into_inner()))
            .unwrap();
        assert_eq!(read, series);
    }

    #[test]
    fn test_round_trip() {
        let series = create_test_series();
        let mut output = Cursor::new(Vec::new());
        JsonCodec::new()
            .write(&series, &Existing::none(), &mut output)
            .unwrap();
        let read = JsonCodec::new()
            .read(Cursor::new(output.into_inner()))
            .unwrap();
        assert_eq!(read, series);
    }
}
