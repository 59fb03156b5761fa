//! Global test utilities for ensuring test isolation.

#[cfg(test)]
use std::path::PathBuf;
#[cfg(test)]
use std::sync::{Mutex, OnceLock};

#[cfg(test)]
/// Global mutex for tests that modify the PATH environment variable.
///
/// Since `std::env::set_var` affects the entire process, all tests that
/// modify PATH must serialize their execution using this mutex to prevent
/// race conditions between parallel tests.
static PATH_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

#[cfg(test)]
/// Global mutex for tests that modify the HOME environment variable.
static HOME_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

#[cfg(test)]
/// Acquire the global PATH mutex to safely modify the PATH environment variable.
///
/// Output:
/// - `MutexGuard<()>` that must be held while PATH is modified.
///
/// Details:
/// - Automatically recovers from a poisoned mutex (from panicked tests).
/// - Hold this guard for the entire duration that PATH is modified.
pub fn lock_path_mutex() -> std::sync::MutexGuard<'static, ()> {
    PATH_MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
/// Acquire the global HOME mutex to safely modify the HOME environment variable.
pub fn lock_home_mutex() -> std::sync::MutexGuard<'static, ()> {
    HOME_MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
/// PATH shim placing a fake `curl` executable first; restores PATH on drop.
///
/// Callers must hold [`lock_path_mutex`] for the shim's lifetime.
pub struct FakeCurl {
    root: PathBuf,
    original_path: Option<std::ffi::OsString>,
}

#[cfg(test)]
/// What: Install a scripted `curl` on PATH for the duration of a test.
///
/// Inputs:
/// - `script`: Shell script body used as the fake executable.
///
/// Output:
/// - A [`FakeCurl`] guard; dropping it restores PATH and removes the script.
pub fn fake_curl(script: &str) -> FakeCurl {
    let mut root = std::env::temp_dir();
    root.push(format!(
        "cinefile_fake_curl_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let bin = root.join("bin");
    std::fs::create_dir_all(&bin).unwrap();
    let curl = bin.join("curl");
    std::fs::write(&curl, script.as_bytes()).unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perm = std::fs::metadata(&curl).unwrap().permissions();
        perm.set_mode(0o755);
        std::fs::set_permissions(&curl, perm).unwrap();
    }
    let original_path = std::env::var_os("PATH");
    let new_path = match std::env::var("PATH") {
        Ok(p) => format!("{}:{}", bin.to_string_lossy(), p),
        Err(_) => bin.to_string_lossy().to_string(),
    };
    unsafe { std::env::set_var("PATH", &new_path) };
    FakeCurl {
        root,
        original_path,
    }
}

#[cfg(test)]
impl Drop for FakeCurl {
    fn drop(&mut self) {
        unsafe {
            if let Some(v) = self.original_path.take() {
                std::env::set_var("PATH", v);
            } else {
                std::env::remove_var("PATH");
            }
        }
        let _ = std::fs::remove_dir_all(&self.root);
    }
}
