//! File access for the CLI, built on `cap-std` and `camino`.

use std::io::{self, BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use listings_core::{RatingInput, RatingResult, RatingSink, SinkError};
use listings_scorer::BatchFailure;
use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;

use crate::CliError;

/// Open a UTF-8 file path using ambient authority.
fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Create (or truncate) `path`, creating missing parent directories.
pub(crate) fn create_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent.to_path_buf(),
        _ => Utf8PathBuf::from("."),
    };
    fs_utf8::Dir::create_ambient_dir_all(&parent, ambient_authority())?;
    let dir = fs_utf8::Dir::open_ambient_dir(&parent, ambient_authority())?;
    dir.create(file_name)
}

/// Records read from a record file.
#[derive(Debug, Default)]
pub(crate) struct RecordFile {
    /// Records that parsed.
    pub(crate) records: Vec<RatingInput>,
    /// Array elements that are not valid records, in file order.
    pub(crate) rejected: Vec<BatchFailure>,
}

/// Load a JSON array of records from `path`.
///
/// Only a file that is unreadable or not a JSON array fails as a whole. An
/// element that does not parse as a record is reported in
/// [`RecordFile::rejected`] and the remaining elements are kept.
pub(crate) fn load_records(path: &Utf8Path) -> Result<RecordFile, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenInput {
        path: path.to_path_buf(),
        source,
    })?;
    let elements: Vec<Value> =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParseInput {
            path: path.to_path_buf(),
            source,
        })?;

    let mut loaded = RecordFile::default();
    for (index, element) in elements.into_iter().enumerate() {
        let id = text_field(&element, "id");
        let name = text_field(&element, "name");
        match serde_json::from_value::<RatingInput>(element) {
            Ok(record) => loaded.records.push(record),
            Err(err) => {
                warn!("record {index} ('{name}', {id}) in {path} is not a valid record: {err}");
                loaded.rejected.push(BatchFailure {
                    id,
                    name,
                    reason: err.to_string(),
                });
            }
        }
    }
    Ok(loaded)
}

fn text_field(element: &Value, key: &str) -> String {
    element
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

#[derive(Serialize)]
struct PersistedRating<'a> {
    id: &'a str,
    rating: &'a RatingResult,
}

/// Sink writing one `{"id": ..., "rating": ...}` JSON object per line.
pub(crate) struct JsonLinesSink<W> {
    writer: W,
    written: usize,
}

impl<W: Write> JsonLinesSink<W> {
    pub(crate) const fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Ratings written so far.
    pub(crate) const fn written(&self) -> usize {
        self.written
    }

    pub(crate) fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl<W: Write> RatingSink for JsonLinesSink<W> {
    fn persist(&mut self, id: &str, rating: &RatingResult) -> Result<(), SinkError> {
        let mut line = serde_json::to_vec(&PersistedRating { id, rating }).map_err(|source| {
            SinkError::Encode {
                id: id.to_owned(),
                source: Box::new(source),
            }
        })?;
        line.push(b'\n');
        self.writer
            .write_all(&line)
            .map_err(|source| SinkError::Write {
                id: id.to_owned(),
                source,
            })?;
        self.written = self.written.saturating_add(1);
        debug!(
            "wrote rating for {id} (algorithm {}, computed {})",
            rating.algorithm_version(),
            rating.calculated_at()
        );
        Ok(())
    }
}
