//! Configuration system: filesystem locations and user settings.

mod paths;
mod settings;

pub use paths::{config_dir, lists_dir, logs_dir};
pub use settings::{Settings, settings};

#[cfg(test)]
static TEST_MUTEX: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();

#[cfg(test)]
/// What: Provide a process-wide mutex to serialize filesystem-mutating tests
/// in this module.
///
/// Inputs:
/// - None
///
/// Output:
/// - Shared reference to a lazily-initialized `Mutex<()>`.
pub(crate) fn test_mutex() -> &'static std::sync::Mutex<()> {
    TEST_MUTEX.get_or_init(|| std::sync::Mutex::new(()))
}

#[cfg(test)]
/// What: Acquire test mutex lock with automatic poison recovery.
pub(crate) fn lock_test_mutex() -> std::sync::MutexGuard<'static, ()> {
    test_mutex().lock().unwrap_or_else(|e| e.into_inner())
}
