//! Diagnostic log for the CLI
//!
//! Calculation results own stdout, so tracing output goes to
//! `{data_dir}/shinkoku.log` only. The file is trimmed at startup once it
//! grows past [`TRIM_THRESHOLD`], keeping the newest [`TRIM_RETAIN`] bytes.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_FILE_NAME: &str = "shinkoku.log";

/// 5 MB
const TRIM_THRESHOLD: u64 = 5 * 1024 * 1024;
/// 1 MB
const TRIM_RETAIN: u64 = 1024 * 1024;

const TRIM_MARKER: &[u8] = b"--- earlier shinkoku log entries trimmed ---\n";

/// Cut `path` down to its last `retain` bytes once it exceeds `threshold`.
///
/// The retained tail starts after the first newline so no partial record
/// survives. Returns whether the file was trimmed.
fn trim_log(path: &Path, threshold: u64, retain: u64) -> io::Result<bool> {
    let len = match fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };
    if len <= threshold {
        return Ok(false);
    }

    let mut tail = Vec::with_capacity(retain as usize);
    {
        let mut file = File::open(path)?;
        file.seek(SeekFrom::Start(len.saturating_sub(retain)))?;
        file.read_to_end(&mut tail)?;
    }
    let first_record = tail
        .iter()
        .position(|&b| b == b'\n')
        .map_or(0, |newline| newline + 1);

    let mut file = File::create(path)?;
    file.write_all(TRIM_MARKER)?;
    file.write_all(&tail[first_record..])?;
    Ok(true)
}

/// `MakeWriter` over one append-mode file shared by every span and event.
#[derive(Clone)]
struct SharedLogFile(Arc<Mutex<File>>);

impl SharedLogFile {
    fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self(Arc::new(Mutex::new(file))))
    }

    fn guard(&self) -> io::Result<MutexGuard<'_, File>> {
        self.0
            .lock()
            .map_err(|_| io::Error::other("shinkoku log file lock poisoned"))
    }
}

impl Write for SharedLogFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.guard()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.guard()?.flush()
    }
}

impl<'a> MakeWriter<'a> for SharedLogFile {
    type Writer = SharedLogFile;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Filter used when `RUST_LOG` is unset: the CLI at `level`, the engine at warn.
fn default_filter(level: &str) -> String {
    format!("shinkoku={level},shinkoku_core=warn")
}

/// Install the global subscriber writing to `{data_dir}/shinkoku.log`.
pub fn init_logging(data_dir: &Path, level: &str) -> color_eyre::Result<()> {
    fs::create_dir_all(data_dir)?;
    let path = data_dir.join(LOG_FILE_NAME);

    let trimmed = match trim_log(&path, TRIM_THRESHOLD, TRIM_RETAIN) {
        Ok(trimmed) => trimmed,
        Err(e) => {
            eprintln!("warning: could not trim {}: {e}", path.display());
            false
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(SharedLogFile::open(&path)?)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    tracing::debug!(path = %path.display(), trimmed, "logging to file");
    Ok(())
}
