// Conditional logging macros - only active in debug builds

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

/// Route log records to a file in debug builds.
///
/// The TUI owns the terminal, so records must not go to stderr. Release
/// builds skip setup entirely; the macros above compile to nothing there.
pub fn init() {
    #[cfg(debug_assertions)]
    {
        use chrono::Local;
        use env_logger::{Builder, Env, Target};
        use std::fs::{OpenOptions, create_dir_all};
        use std::io::Write;

        let Some(cache_dir) = dirs::cache_dir() else {
            return;
        };
        let dir = cache_dir.join("kelimece");
        if create_dir_all(&dir).is_err() {
            return;
        }
        let Ok(file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("debug.log"))
        else {
            return;
        };

        let _ = Builder::from_env(Env::default().default_filter_or("debug"))
            .format(|buf, record| {
                writeln!(
                    buf,
                    "[{} {}] {}",
                    Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                    record.level(),
                    record.args()
                )
            })
            .target(Target::Pipe(Box::new(file)))
            .try_init();
    }
}
