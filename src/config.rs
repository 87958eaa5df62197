use crate::spin::{
    DEFAULT_FULL_TURNS,
    DEFAULT_SPIN_DURATION,
};
use color_eyre::eyre::{
    Result,
    WrapErr,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
    time::Duration,
};

pub const DEFAULT_REDRAW_DELAY_MS: u64 = 1000;
const APP_DIR: &str = ".prize-wheel";
const LOG_DIR: &str = "logs";

/// Tunables for the wheel. Every field may be omitted from the settings
/// file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelSettings {
    pub spin_duration_ms: u64,
    pub full_turns: u32,
    pub redraw_delay_ms: u64,
    pub remove_winners: bool,
    pub sound: bool,
    pub overlay: bool,
    pub confirm_reset: bool,
}

impl Default for WheelSettings {
    fn default() -> Self {
        WheelSettings {
            spin_duration_ms: DEFAULT_SPIN_DURATION.as_millis() as u64,
            full_turns: DEFAULT_FULL_TURNS,
            redraw_delay_ms: DEFAULT_REDRAW_DELAY_MS,
            remove_winners: true,
            sound: true,
            overlay: true,
            confirm_reset: false,
        }
    }
}

impl WheelSettings {
    pub fn spin_duration(&self) -> Duration {
        Duration::from_millis(self.spin_duration_ms)
    }

    pub fn redraw_delay(&self) -> Duration {
        Duration::from_millis(self.redraw_delay_ms)
    }
}

pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}

pub fn default_log_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").wrap_err("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(APP_DIR).join(LOG_DIR))
}

pub fn resolve_log_dir(dir: Option<&str>) -> Result<PathBuf> {
    match dir {
        Some(raw) => Ok(expand_path(raw)),
        None => default_log_dir(),
    }
}

pub fn load_settings(path: impl AsRef<Path>) -> Result<WheelSettings> {
    let path = path.as_ref();
    let data = fs::read(path)
        .wrap_err_with(|| format!("Failed to read settings file {}", path.display()))?;
    if data.iter().all(u8::is_ascii_whitespace) {
        return Ok(WheelSettings::default());
    }
    serde_json::from_slice::<WheelSettings>(&data)
        .wrap_err_with(|| format!("Failed to parse settings JSON in {}", path.display()))
}

pub fn read_names_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read names file {}", path.display()))?;
    // one name per line is accepted as well as a single comma-separated line
    Ok(raw.lines().map(str::trim).filter(|l| !l.is_empty()).collect::<Vec<_>>().join(", "))
}
