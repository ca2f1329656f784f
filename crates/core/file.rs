use std::{
    fs::OpenOptions,
    io::Write,
    path::Path,
};

use eyre::{Context, Result};
use log::trace;

/// Writes `contents` to the file at `path`, replacing anything already in it.
pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    trace!("Writing output to '{}'", path.display());
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .wrap_err_with(|| format!("Failed to open the '{}' file for writing.", path.display()))?;

    file.write_all(contents.as_bytes())
        .and_then(|_| file.write_all(b"\n"))
        .wrap_err_with(|| format!("Cannot write records to '{}'", path.display()))
}
