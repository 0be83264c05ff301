// FofaSift - platform/fs.rs
//
// Reading scan dumps from files or standard input, and writing exports.
// Invalid UTF-8 is replaced rather than rejected: dumps are copied out of
// web pages and occasionally carry stray bytes in banner lines.

use crate::util::constants;
use crate::util::error::{ExportError, InputError};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Read the full content of a file as a string, enforcing the size limit.
///
/// For files with invalid UTF-8, uses lossy conversion.
pub fn read_file_lossy(path: &Path, max_size: u64) -> Result<String, InputError> {
    let metadata = std::fs::metadata(path).map_err(|e| InputError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    if metadata.len() > max_size {
        return Err(InputError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    let bytes = std::fs::read(path).map_err(|e| InputError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Read all of standard input as a string (lossy UTF-8).
pub fn read_stdin() -> Result<String, InputError> {
    let mut bytes = Vec::new();
    io::stdin()
        .lock()
        .read_to_end(&mut bytes)
        .map_err(|e| InputError::Stdin { source: e })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Read every input and join them with line breaks, in argument order.
///
/// An empty list, or the path `-`, reads standard input.
pub fn read_inputs(paths: &[PathBuf]) -> Result<String, InputError> {
    if paths.is_empty() {
        return read_stdin();
    }

    let mut chunks = Vec::with_capacity(paths.len());
    for path in paths {
        let content = if path.as_os_str() == constants::STDIN_PATH {
            read_stdin()?
        } else {
            read_file_lossy(path, constants::MAX_INPUT_FILE_SIZE)?
        };
        tracing::debug!(path = %path.display(), bytes = content.len(), "Input read");
        chunks.push(content);
    }
    Ok(chunks.join("\n"))
}

/// Write export content to `path`, creating parent directories as needed.
pub fn write_export(path: &Path, content: &[u8]) -> Result<(), ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ExportError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    std::fs::write(path, content).map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}
