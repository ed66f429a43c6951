use crate::error::{Result, SummaryError};
use crate::summary::core::{ParseStats, ReadRecord, SummaryProfile};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

const READ_BUFFER: usize = 4 * 1024 * 1024;
const FILENAME_MARKER: &str = "filename";
const READ_ID_MARKER: &str = "read_id";

/// Open a summary file, plain or compressed; the format is sniffed from
/// the first bytes.
pub fn open_path(path: &Path) -> Result<Box<dyn BufRead>> {
    let unreadable = |source| SummaryError::StreamUnreadable {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(unreadable)?;
    let (inner_reader, _compression) =
        niffler::get_reader(Box::new(file)).map_err(|e| unreadable(std::io::Error::other(e)))?;

    Ok(Box::new(BufReader::with_capacity(READ_BUFFER, inner_reader)))
}

/// Column positions resolved from the header line.
#[derive(Debug, Clone, Copy)]
struct Layout {
    length: usize,
    quality: Option<usize>,
    identifier: Option<usize>,
}

/// Lazy, single-pass reader over a whitespace-delimited sequencing summary.
///
/// Embedded header lines, blank lines, rows too short to hold the length
/// column and rows whose length is not an integer are skipped and counted
/// in [`ParseStats`].
pub struct SummaryTableReader<R: BufRead> {
    reader: R,
    source: PathBuf,
    layout: Layout,
    line: String,
    stats: ParseStats,
    done: bool,
}

impl<R: BufRead> SummaryTableReader<R> {
    /// Read the header and resolve the profile's columns. `source` only
    /// labels errors.
    pub fn new(mut reader: R, source: impl Into<PathBuf>, profile: &SummaryProfile) -> Result<Self> {
        let source = source.into();
        let columns = profile.columns();
        let mut line = String::new();

        let header: Vec<String> = loop {
            line.clear();
            let read = reader
                .read_line(&mut line)
                .map_err(|e| SummaryError::StreamUnreadable {
                    path: source.clone(),
                    source: e,
                })?;
            if read == 0 {
                break Vec::new();
            }
            if !line.trim().is_empty() {
                break line.split_whitespace().map(str::to_string).collect();
            }
        };

        let position = |name: &str| header.iter().position(|column| column == name);

        let length = position(&columns.length).ok_or_else(|| SummaryError::MissingColumn {
            path: source.clone(),
            column: columns.length.clone(),
        })?;
        let quality = columns.quality.as_deref().and_then(position);
        let identifier = columns.identifier.iter().find_map(|name| position(name));

        Ok(Self {
            reader,
            source,
            layout: Layout {
                length,
                quality,
                identifier,
            },
            line,
            stats: ParseStats::default(),
            done: false,
        })
    }

    pub fn stats(&self) -> ParseStats {
        self.stats
    }

    pub fn has_identifier_column(&self) -> bool {
        self.layout.identifier.is_some()
    }

    fn parse_line(&mut self) -> Option<ReadRecord> {
        let fields: Vec<&str> = self.line.split_whitespace().collect();
        if fields.is_empty() {
            return None;
        }

        if fields.iter().any(|f| f.contains(FILENAME_MARKER))
            && fields.iter().any(|f| f.contains(READ_ID_MARKER))
        {
            self.stats.embedded_headers += 1;
            return None;
        }

        let Some(raw_length) = fields.get(self.layout.length) else {
            self.stats.short_rows += 1;
            return None;
        };
        let Ok(length) = raw_length.parse::<u64>() else {
            self.stats.bad_lengths += 1;
            return None;
        };

        let quality = self
            .layout
            .quality
            .and_then(|idx| fields.get(idx))
            .and_then(|raw| raw.parse::<f64>().ok())
            .filter(|q| !q.is_nan());
        let source_tag = self
            .layout
            .identifier
            .and_then(|idx| fields.get(idx))
            .map(|raw| raw.to_string());

        self.stats.accepted += 1;
        Some(ReadRecord {
            length,
            quality,
            source_tag,
        })
    }
}

impl<R: BufRead> Iterator for SummaryTableReader<R> {
    type Item = Result<ReadRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    if let Some(record) = self.parse_line() {
                        return Some(Ok(record));
                    }
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(SummaryError::StreamUnreadable {
                        path: self.source.clone(),
                        source: e,
                    }));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "filename_pod5\tread_id\trun_id\tchannel\tsequence_length_template\tmean_qscore_template\n";

    fn records(data: &str, profile: &SummaryProfile) -> (Vec<ReadRecord>, ParseStats) {
        let mut reader = SummaryTableReader::new(data.as_bytes(), "test.txt", profile).unwrap();
        let records = reader.by_ref().collect::<Result<Vec<_>>>().unwrap();
        (records, reader.stats())
    }

    #[test]
    fn parses_rows_by_column_name() {
        let data = format!(
            "{}PAW1_pass_0.pod5\tr1\trun\t12\t1500\t11.2\nPAW1_pass_0.pod5\tr2\trun\t13\t800\t4.5\n",
            HEADER
        );
        let profile = SummaryProfile::coverage(1.0).unwrap();
        let (records, stats) = records(&data, &profile);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].length, 1500);
        assert_eq!(records[0].instrument_id(), Some("PAW1"));
        assert_eq!(records[0].quality, None);
        assert_eq!(stats.accepted, 2);

        let (records, _) = self::records(&data, &SummaryProfile::reads());
        assert_eq!(records[1].quality, Some(4.5));
        assert_eq!(records[1].source_tag, None);
    }

    #[test]
    fn skips_embedded_headers_and_malformed_rows() {
        let data = format!(
            "{h}PAW1_a.pod5\tr1\trun\t1\t100\t10\n{h}PAW1_a.pod5\tr2\n PAW1_a.pod5\tr3\trun\t1\tNaN\t10\n\nPAW1_a.pod5\tr4\trun\t1\t-5\t10\nPAW1_a.pod5\tr5\trun\t1\t300\t10\n",
            h = HEADER
        );
        let (records, stats) = records(&data, &SummaryProfile::reads());

        let lengths: Vec<u64> = records.iter().map(|r| r.length).collect();
        assert_eq!(lengths, [100, 300]);
        assert_eq!(stats.embedded_headers, 1);
        assert_eq!(stats.short_rows, 1);
        assert_eq!(stats.bad_lengths, 2);
        assert_eq!(stats.skipped(), 4);
    }

    #[test]
    fn missing_length_column_is_reported() {
        let data = "read_id\tchannel\n r1\t3\n";
        let err = SummaryTableReader::new(data.as_bytes(), "bad.txt", &SummaryProfile::reads())
            .err()
            .unwrap();
        match err {
            SummaryError::MissingColumn { column, path } => {
                assert_eq!(column, "sequence_length_template");
                assert_eq!(path, PathBuf::from("bad.txt"));
            }
            other => panic!("unexpected error {:?}", other),
        }

        let empty = SummaryTableReader::new("".as_bytes(), "empty.txt", &SummaryProfile::reads());
        assert!(matches!(empty, Err(SummaryError::MissingColumn { .. })));
    }

    #[test]
    fn identifier_column_falls_back_to_filename() {
        let data = "filename\tread_id\tsequence_length_template\nFAQ9_pass_1.fast5\tr1\t42\n";
        let profile = SummaryProfile::coverage(1.0).unwrap();
        let mut reader = SummaryTableReader::new(data.as_bytes(), "f.txt", &profile).unwrap();
        assert!(reader.has_identifier_column());
        let record = reader.next().unwrap().unwrap();
        assert_eq!(record.instrument_id(), Some("FAQ9"));

        let data = "read_id\tsequence_length_template\nr1\t42\n";
        let mut reader = SummaryTableReader::new(data.as_bytes(), "f.txt", &profile).unwrap();
        assert!(!reader.has_identifier_column());
        assert_eq!(reader.next().unwrap().unwrap().instrument_id(), None);
    }

    #[test]
    fn leading_blank_lines_before_header() {
        let data = "\n\nsequence_length_template\n7\n";
        let (records, _) = records(data, &SummaryProfile::reads());
        assert_eq!(records, vec![ReadRecord::new(7)]);
    }

    #[test]
    fn invalid_utf8_is_unreadable() {
        let mut data = b"sequence_length_template\n10\n".to_vec();
        data.extend_from_slice(&[0xff, 0xfe, b'\n']);
        let mut reader =
            SummaryTableReader::new(data.as_slice(), "bin.txt", &SummaryProfile::reads()).unwrap();
        assert!(reader.next().unwrap().is_ok());
        assert!(matches!(
            reader.next(),
            Some(Err(SummaryError::StreamUnreadable { .. }))
        ));
        assert!(reader.next().is_none());
    }
}
