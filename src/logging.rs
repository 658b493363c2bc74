use std::fs::{self, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::Level;
use tracing_subscriber::Layer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub const MAX_LOG_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Installs the global subscriber: stdout always, plus `log_file` when given.
pub fn init_logging(log_level: Level, log_file: Option<&Path>) -> anyhow::Result<()> {
    let level_filter = LevelFilter::from_level(log_level);
    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout)
        .with_filter(level_filter);

    let file_layer = log_file.map(|path| {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(CappedFile::new(path, MAX_LOG_FILE_BYTES))
            .with_filter(level_filter)
    });

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(file_layer)
        .try_init()?;
    Ok(())
}

/// Append-only log file that drops its older half once it reaches `max_len`.
#[derive(Clone)]
pub struct CappedFile {
    path: PathBuf,
    max_len: u64,
    lock: Arc<Mutex<()>>,
}

impl CappedFile {
    pub fn new(path: impl Into<PathBuf>, max_len: u64) -> Self {
        Self {
            path: path.into(),
            max_len,
            lock: Arc::new(Mutex::new(())),
        }
    }

    fn keep_tail(&self) -> io::Result<()> {
        let keep = self.max_len / 2;
        let mut tail = Vec::new();
        {
            let mut file = OpenOptions::new().read(true).open(&self.path)?;
            let size = file.metadata()?.len();
            file.seek(SeekFrom::Start(size.saturating_sub(keep)))?;
            file.read_to_end(&mut tail)?;
        }
        fs::write(&self.path, tail)
    }
}

impl Write for CappedFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;

        if fs::metadata(&self.path).map(|m| m.len() >= self.max_len).unwrap_or(false) {
            self.keep_tail()?;
        }

        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CappedFile {
    type Writer = CappedFile;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
