//! Write destinations.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

/// A shared handle to an append-only byte destination.
///
/// Clones refer to the same destination. Loggers derived from one another
/// share their parent's sink.
#[derive(Clone)]
pub struct Sink {
    inner: Arc<Mutex<dyn Write + Send>>,
    name: &'static str,
}

impl Sink {
    /// Wrap any writer.
    pub fn new<W>(writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            inner: Arc::new(Mutex::new(writer)),
            name: "writer",
        }
    }

    /// The process-wide standard error sink.
    pub fn stderr() -> Self {
        static STDERR: OnceLock<Sink> = OnceLock::new();
        STDERR
            .get_or_init(|| Sink {
                inner: Arc::new(Mutex::new(io::stderr())),
                name: "stderr",
            })
            .clone()
    }

    /// The process-wide standard output sink.
    pub fn stdout() -> Self {
        static STDOUT: OnceLock<Sink> = OnceLock::new();
        STDOUT
            .get_or_init(|| Sink {
                inner: Arc::new(Mutex::new(io::stdout())),
                name: "stdout",
            })
            .clone()
    }

    /// True when both handles write to the same destination.
    pub fn same_as(&self, other: &Sink) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn write_line(&self, line: &[u8]) -> io::Result<()> {
        let mut writer = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(line)?;
        writer.flush()
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Sink").field(&self.name).finish()
    }
}

impl Default for Sink {
    fn default() -> Self {
        Self::stderr()
    }
}

/// An in-memory destination whose clones share one buffer.
///
/// Useful for capturing output: hand a clone to [`Sink::new`] and read the
/// lines back from the original.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A `Sink` writing into this buffer.
    pub fn sink(&self) -> Sink {
        Sink {
            inner: Arc::new(Mutex::new(self.clone())),
            name: "memory",
        }
    }

    /// Everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    /// Written lines, without terminators.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.buf.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Write for MemorySink {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.lock().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
