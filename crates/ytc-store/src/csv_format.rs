//! Snapshot file format.
//!
//! ```text
//! author,text,likes,published_at
//! @viewer,"Great video, thanks!",12,2024-03-01T10:15:00Z
//! ```
//!
//! Column order is fixed. Timestamps are RFC 3339 in UTC with a `Z` suffix;
//! sub-second precision is kept when present so a read-back is exact.

use std::io::Read;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use ytc_core::CommentRecord;

use crate::error::StorageError;

pub const HEADER: [&str; 4] = ["author", "text", "likes", "published_at"];

/// Serializes `records` into CSV bytes, header first, in input order.
///
/// # Errors
///
/// Returns [`StorageError::Csv`] if the writer fails, which for an in-memory
/// buffer only happens on internal csv errors.
pub fn encode(records: &[CommentRecord]) -> Result<Vec<u8>, StorageError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;
    for record in records {
        writer.write_record([
            record.author.as_str(),
            record.text.as_str(),
            &record.like_count.to_string(),
            &record
                .published_at
                .to_rfc3339_opts(SecondsFormat::AutoSi, true),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|e| StorageError::Csv(e.into_error().into()))
}

/// Parses snapshot CSV from `reader`. `path` only labels errors.
///
/// # Errors
///
/// - [`StorageError::InvalidRow`] if the header differs from [`HEADER`] or a
///   row has a bad like count or timestamp.
/// - [`StorageError::Csv`] for malformed CSV.
pub fn decode<R: Read>(reader: R, path: &Path) -> Result<Vec<CommentRecord>, StorageError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = reader.headers()?;
    if headers.iter().ne(HEADER) {
        return Err(StorageError::InvalidRow {
            path: path.to_path_buf(),
            row: 0,
            reason: format!(
                "expected header {:?}, found {:?}",
                HEADER.join(","),
                headers.iter().collect::<Vec<_>>().join(",")
            ),
        });
    }

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row?;
        let row_number = index + 1;
        let invalid = |reason: String| StorageError::InvalidRow {
            path: path.to_path_buf(),
            row: row_number,
            reason,
        };

        if row.len() != HEADER.len() {
            return Err(invalid(format!(
                "expected {} columns, found {}",
                HEADER.len(),
                row.len()
            )));
        }

        let like_count = row[2]
            .parse::<u64>()
            .map_err(|e| invalid(format!("likes \"{}\": {e}", &row[2])))?;
        let published_at = DateTime::parse_from_rfc3339(&row[3])
            .map_err(|e| invalid(format!("published_at \"{}\": {e}", &row[3])))?
            .with_timezone(&Utc);

        records.push(CommentRecord {
            author: row[0].to_owned(),
            text: row[1].to_owned(),
            like_count,
            published_at,
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn record(author: &str, text: &str, likes: u64) -> CommentRecord {
        CommentRecord {
            author: author.to_owned(),
            text: text.to_owned(),
            like_count: likes,
            published_at: Utc.with_ymd_and_hms(2024, 3, 1, 10, 15, 0).unwrap(),
        }
    }

    #[test]
    fn encode_writes_header_and_fixed_column_order() {
        let bytes = encode(&[record("@viewer", "Great video, thanks!", 12)]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            "author,text,likes,published_at\n@viewer,\"Great video, thanks!\",12,2024-03-01T10:15:00Z\n"
        );
    }

    #[test]
    fn encode_empty_snapshot_is_header_only() {
        let text = String::from_utf8(encode(&[]).unwrap()).unwrap();
        assert_eq!(text, "author,text,likes,published_at\n");
    }

    #[test]
    fn decode_preserves_quotes_newlines_and_emoji() {
        let original = vec![
            record("a", "line one\nline two", 0),
            record("b", "she said \"wow\" 😍", 5),
            record("", "", 0),
        ];
        let bytes = encode(&original).unwrap();
        let decoded = decode(bytes.as_slice(), Path::new("mem.csv")).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn decode_keeps_subsecond_timestamps() {
        let mut r = record("a", "t", 1);
        r.published_at = Utc.timestamp_opt(1_700_000_000, 123_000_000).unwrap();
        let bytes = encode(std::slice::from_ref(&r)).unwrap();
        let decoded = decode(bytes.as_slice(), Path::new("mem.csv")).unwrap();
        assert_eq!(decoded[0].published_at, r.published_at);
    }

    #[test]
    fn decode_rejects_foreign_header() {
        let err = decode(
            "Username,Comment,Likes\nx,y,1\n".as_bytes(),
            Path::new("other.csv"),
        )
        .unwrap_err();
        assert!(matches!(err, StorageError::InvalidRow { row: 0, .. }), "{err:?}");
    }

    #[test]
    fn decode_rejects_negative_likes() {
        let err = decode(
            "author,text,likes,published_at\nx,y,-1,2024-03-01T10:15:00Z\n".as_bytes(),
            Path::new("bad.csv"),
        )
        .unwrap_err();
        assert!(matches!(err, StorageError::InvalidRow { row: 1, .. }), "{err:?}");
    }
}
