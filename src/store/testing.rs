//! In-memory doubles for store tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};

use crate::context::ServiceContext;
use crate::ports::{BoxError, Clock, FileSystem, IdGenerator};

/// In-memory filesystem for testing the stores without touching disk.
#[derive(Default)]
pub(crate) struct MemFs {
    files: Mutex<HashMap<PathBuf, String>>,
    dirs: Mutex<Vec<PathBuf>>,
}

impl FileSystem for MemFs {
    fn read_to_string(&self, path: &Path) -> Result<String, BoxError> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| format!("File not found: {}", path.display()).into())
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), BoxError> {
        self.files.lock().unwrap().insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
            || self.dirs.lock().unwrap().iter().any(|d| d.starts_with(path))
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), BoxError> {
        self.dirs.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}

/// Advances one minute per call.
pub(crate) struct StepClock(Mutex<DateTime<Utc>>);

impl StepClock {
    /// A clock whose first reading is one minute after `start`.
    pub(crate) fn starting(start: DateTime<Utc>) -> Self {
        Self(Mutex::new(start))
    }
}

impl Clock for StepClock {
    fn now(&self) -> DateTime<Utc> {
        let mut t = self.0.lock().unwrap();
        *t += chrono::Duration::minutes(1);
        *t
    }
}

/// Hands out `0000000n-...` ids.
#[derive(Default)]
pub(crate) struct SeqIds(AtomicUsize);

impl IdGenerator for SeqIds {
    fn generate_id(&self) -> String {
        let n = self.0.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{n:08}-0000-4000-8000-000000000000")
    }
}

/// Memory-backed context whose clock starts at 2024-06-15 10:00 UTC.
pub(crate) fn test_context() -> ServiceContext {
    test_context_at(Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap())
}

/// Memory-backed context whose clock starts at `start` and ids count up.
pub(crate) fn test_context_at(start: DateTime<Utc>) -> ServiceContext {
    let mut ctx =
        ServiceContext::from_parts(Box::new(StepClock::starting(start)), Box::new(MemFs::default()));
    ctx.ids = Box::new(SeqIds::default());
    ctx
}
