use env_logger::{Builder, Env, Target};
use std::fs::{self, OpenOptions};
use std::path::Path;

/// Route the `log` facade into a file; the terminal belongs to the TUI.
/// Level comes from `STEAKR_LOG`, defaulting to `info`.
pub fn init_file_logger(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().append(true).create(true).open(path)?;

    Builder::from_env(Env::default().filter_or("STEAKR_LOG", "info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_secs()
        .try_init()
        .map_err(std::io::Error::other)
}
