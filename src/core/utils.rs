use dirs::home_dir;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".tally_core";
const DATA_FILE: &str = "transactions.csv";

/// Returns the application data directory, defaulting to `~/.tally_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("TALLY_CORE_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Default path of the transaction file when the configuration does not
/// point elsewhere.
pub fn data_file() -> PathBuf {
    app_data_dir().join(DATA_FILE)
}

/// Creates `dir` (and any missing parents).
pub fn ensure_dir(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir)
}
