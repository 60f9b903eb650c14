// Rendering tables to bytes and writing them out.
//
// All files are rendered in memory first. Only when every table (and every
// legacy-encoded copy) has rendered does anything touch the output
// directory, so a failed run never leaves a half-written set of tables.

use std::fs;
use std::path::{Path, PathBuf};

use encoding_rs::EUC_KR;
use serde::Serialize;
use tracing::info;

use super::tables::Table;
use crate::error::{Result, VectorError};

/// Suffix of the EUC-KR copy of a table.
pub const LEGACY_SUFFIX: &str = "_euckr";

/// A rendered file, not yet on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Render a table as UTF-8 CSV text.
pub fn render_csv(table: &Table) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&table.header)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| VectorError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| {
        VectorError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

/// Encode text as EUC-KR, refusing to substitute unmappable characters.
pub fn encode_legacy(table: &str, text: &str) -> Result<Vec<u8>> {
    let (bytes, _, had_errors) = EUC_KR.encode(text);
    if had_errors {
        return Err(VectorError::Encoding {
            table: table.to_string(),
            encoding: EUC_KR.name(),
        });
    }
    Ok(bytes.into_owned())
}

/// Render every table, plus legacy copies where requested.
pub fn render_all(tables: &[Table], legacy_encoding: bool) -> Result<Vec<OutputFile>> {
    let mut files = Vec::new();
    for table in tables {
        let text = render_csv(table)?;
        if legacy_encoding && table.legacy_copy {
            files.push(OutputFile {
                file_name: format!("{}{}.csv", table.name, LEGACY_SUFFIX),
                bytes: encode_legacy(&table.name, &text)?,
            });
        }
        files.push(OutputFile {
            file_name: format!("{}.csv", table.name),
            bytes: text.into_bytes(),
        });
    }
    Ok(files)
}

/// Render a JSON document as an output file.
pub fn render_json<T: Serialize>(file_name: &str, value: &T) -> Result<OutputFile> {
    let bytes = serde_json::to_vec_pretty(value).map_err(|e| VectorError::Io(e.into()))?;
    Ok(OutputFile {
        file_name: file_name.to_string(),
        bytes,
    })
}

/// Write rendered files into `dir`, creating it if needed. Existing files
/// with the same names are overwritten.
///
/// Every file is first written to a hidden `.<name>.tmp` sibling, and no
/// target is touched until all of them are staged. Staged files are removed
/// again if any step before the final renames fails.
pub fn write_all(dir: &Path, files: &[OutputFile]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let mut staged: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(files.len());
    for file in files {
        let target = dir.join(&file.file_name);
        let temp = dir.join(format!(".{}.tmp", file.file_name));
        if let Err(e) = stage(&temp, &target, &file.bytes) {
            let _ = fs::remove_file(&temp);
            discard(&staged);
            return Err(e);
        }
        staged.push((temp, target));
    }

    let mut written = Vec::with_capacity(staged.len());
    for (i, (temp, target)) in staged.iter().enumerate() {
        if let Err(e) = fs::rename(temp, target) {
            discard(&staged[i..]);
            return Err(e.into());
        }
        written.push(target.clone());
    }

    info!(files = written.len(), dir = %dir.display(), "Output tables written");
    Ok(written)
}

fn stage(temp: &Path, target: &Path, bytes: &[u8]) -> Result<()> {
    if target.is_dir() {
        return Err(VectorError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("output path {} is a directory", target.display()),
        )));
    }
    fs::write(temp, bytes)?;
    Ok(())
}

fn discard(staged: &[(PathBuf, PathBuf)]) {
    for (temp, _) in staged {
        let _ = fs::remove_file(temp);
    }
}
