use crate::context::ProjectContext;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// Entry files written by [`create_test_project`], relative to `config/`.
const CONFIG_FIXTURES: &[(&str, &str)] = &[
    ("file", "REAL1"),
    ("dir/file", "Real2\n"),
    ("empty", ""),
    ("int", " 42 \n\n\n"),
    ("badint", "42a"),
    ("twoint", "42 777"),
    ("float", "42.777"),
    ("negint", "-7\n"),
    ("multi_line", "line1\n\nline2\n\n\n"),
    ("two_lines", "line1\nline2\n"),
    ("single_line", "line1\n\n\n"),
    ("duration", "3s"),
    ("compound_duration", "1h30m\n"),
    ("badduration", "soon"),
    ("log/level", "INFO\n"),
    ("log/type", "syslog"),
];

/// Create a project directory with a populated `config/` tree.
pub(crate) fn create_test_project() -> (TempDir, ProjectContext) {
    let temp_dir = TempDir::new().unwrap();
    let ctx = ProjectContext::resolve_from(temp_dir.path());

    fs::create_dir_all(ctx.config_dir.join("dir")).unwrap();
    fs::create_dir_all(ctx.config_dir.join("log")).unwrap();
    for (name, content) in CONFIG_FIXTURES {
        fs::write(ctx.config_dir.join(name), content).unwrap();
    }

    (temp_dir, ctx)
}
