//! Layered configuration.
//!
//! Settings are merged with figment, lowest precedence first:
//!
//! 1. built-in defaults
//! 2. the user file, `config.{toml,yaml,yml,json}` in the platform config
//!    directory (`~/.config/readable/` on Linux)
//! 3. project files, `.readable.<ext>` then `readable.<ext>`, from the
//!    nearest directory at or above the search root that has any; the walk
//!    stops at a `.git` directory
//! 4. files passed explicitly, in the order given
//! 5. `READABLE_*` environment variables
//!
//! ```no_run
//! use readable_core::config::ConfigLoader;
//!
//! let (config, sources) = ConfigLoader::new()
//!     .with_project_search("docs")
//!     .load()?;
//! if let Some(file) = sources.primary_file() {
//!     println!("using {file}");
//! }
//! println!("reading speed: {:?}", config.average_reading_speed);
//! # Ok::<(), readable_core::config::ConfigError>(())
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

pub use crate::error::{ConfigError, ConfigResult};

const APP_NAME: &str = "readable";
const ENV_PREFIX: &str = "READABLE_";
const EXTENSIONS: [&str; 4] = ["toml", "yaml", "yml", "json"];

/// Settings for the calculator and the CLI around it.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Minimum level written to the logs.
    pub log_level: LogLevel,
    /// Directory for JSONL log files. Unset means the platform data directory.
    pub log_dir: Option<Utf8PathBuf>,
    /// Words per minute used for reading time.
    ///
    /// Kept signed so a stored `0` or `-20` loads fine; the calculator
    /// replaces unset and non-positive values with
    /// [`DEFAULT_READING_SPEED`](crate::calculator::DEFAULT_READING_SPEED).
    pub average_reading_speed: Option<i64>,
    /// Largest input file accepted, in bytes.
    pub max_input_bytes: Option<usize>,
    /// Accept inputs of any size.
    pub disable_input_limit: bool,
}

impl Config {
    /// Byte limit for inputs: `max_input_bytes`, the 5 MiB default, or
    /// `None` when `disable_input_limit` is set.
    pub fn input_limit(&self) -> Option<usize> {
        (!self.disable_input_limit)
            .then(|| self.max_input_bytes.unwrap_or(crate::DEFAULT_MAX_INPUT_BYTES))
    }
}

/// Log verbosity.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything, including per-file scoring details.
    Debug,
    /// Lifecycle events.
    #[default]
    Info,
    /// Problems that did not stop the command.
    Warn,
    /// Failures only.
    Error,
}

impl LogLevel {
    /// The level as a tracing filter directive.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a configuration file came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// The per-user file in the platform config directory.
    User,
    /// Found by walking up from the search root.
    Project,
    /// Passed to [`ConfigLoader::with_file`].
    Explicit,
}

/// One configuration file that took part in a load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigSource {
    /// How the file was found.
    pub kind: SourceKind,
    /// Its path.
    pub path: Utf8PathBuf,
}

/// The files merged by [`ConfigLoader::load`], lowest precedence first.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ConfigSources {
    files: Vec<ConfigSource>,
}

impl ConfigSources {
    /// All merged files, lowest precedence first.
    pub fn files(&self) -> &[ConfigSource] {
        &self.files
    }

    /// Files of one kind, in merge order.
    pub fn of_kind(&self, kind: SourceKind) -> impl Iterator<Item = &Utf8Path> {
        self.files
            .iter()
            .filter(move |source| source.kind == kind)
            .map(|source| source.path.as_path())
    }

    /// The file whose values won, if any file was loaded.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.files.last().map(|source| source.path.as_path())
    }

    fn push(&mut self, kind: SourceKind, path: Utf8PathBuf) {
        self.files.push(ConfigSource { kind, path });
    }
}

/// Discovers and merges configuration files.
#[derive(Debug)]
pub struct ConfigLoader {
    search_root: Option<Utf8PathBuf>,
    user_config: bool,
    boundary: Option<String>,
    files: Vec<Utf8PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// A loader that reads the user file and stops project discovery at `.git`.
    pub fn new() -> Self {
        Self {
            search_root: None,
            user_config: true,
            boundary: Some(".git".to_string()),
            files: Vec::new(),
        }
    }

    /// Look for project files from `dir` upwards.
    pub fn with_project_search(mut self, dir: impl AsRef<Utf8Path>) -> Self {
        self.search_root = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Include or skip the per-user file.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.user_config = include;
        self
    }

    /// Stop project discovery above a directory containing `marker`.
    pub fn with_boundary_marker(mut self, marker: impl Into<String>) -> Self {
        self.boundary = Some(marker.into());
        self
    }

    /// Walk all the way to the filesystem root.
    pub fn without_boundary_marker(mut self) -> Self {
        self.boundary = None;
        self
    }

    /// Merge `path` above every discovered file. Later calls win.
    pub fn with_file(mut self, path: impl AsRef<Utf8Path>) -> Self {
        self.files.push(path.as_ref().to_path_buf());
        self
    }

    /// Merge every layer into a [`Config`] and report which files were used.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingFile`] when a file given to
    /// [`with_file`](Self::with_file) does not exist, and
    /// [`ConfigError::Deserialize`] when a file cannot be parsed or a value
    /// has the wrong type.
    #[tracing::instrument(skip(self), fields(search_root = ?self.search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        if let Some(missing) = self.files.iter().find(|path| !path.is_file()) {
            return Err(ConfigError::MissingFile(missing.clone()));
        }
        let sources = self.discover();
        let figment = sources
            .files()
            .iter()
            .fold(Figment::from(Serialized::defaults(Config::default())), |fig, source| {
                fig.merge(file_provider(&source.path))
            })
            .merge(Env::prefixed(ENV_PREFIX).lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        tracing::debug!(
            files = sources.files().len(),
            log_level = %config.log_level,
            average_reading_speed = ?config.average_reading_speed,
            "configuration loaded"
        );
        Ok((config, sources))
    }

    fn discover(&self) -> ConfigSources {
        let mut sources = ConfigSources::default();
        if self.user_config
            && let Some(path) = user_config_dir().and_then(|dir| first_existing(&dir, "config"))
        {
            sources.push(SourceKind::User, path);
        }
        if let Some(root) = &self.search_root {
            for path in self.project_files(root) {
                sources.push(SourceKind::Project, path);
            }
        }
        for path in &self.files {
            sources.push(SourceKind::Explicit, path.clone());
        }
        sources
    }

    /// Config files in the nearest directory that has any, dotfiles first.
    fn project_files(&self, root: &Utf8Path) -> Vec<Utf8PathBuf> {
        for dir in root.ancestors() {
            let found: Vec<Utf8PathBuf> = [format!(".{APP_NAME}"), APP_NAME.to_string()]
                .iter()
                .flat_map(|stem| EXTENSIONS.iter().map(move |ext| dir.join(format!("{stem}.{ext}"))))
                .filter(|path| path.is_file())
                .collect();
            if !found.is_empty() {
                return found;
            }

            let at_boundary = self
                .boundary
                .as_ref()
                .is_some_and(|marker| dir != root && dir.join(marker).exists());
            if at_boundary {
                break;
            }
        }
        Vec::new()
    }
}

/// The first `<stem>.<ext>` in `dir`, trying extensions in order.
fn first_existing(dir: &Utf8Path, stem: &str) -> Option<Utf8PathBuf> {
    EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{stem}.{ext}")))
        .find(|path| path.is_file())
}

fn file_provider(path: &Utf8Path) -> Figment {
    match path.extension() {
        Some("yaml" | "yml") => Figment::from(Yaml::file_exact(path.as_str())),
        Some("json") => Figment::from(Json::file_exact(path.as_str())),
        _ => Figment::from(Toml::file_exact(path.as_str())),
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", APP_NAME)
}

/// The per-user configuration directory, e.g. `~/.config/readable`.
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(project_dirs()?.config_dir().to_path_buf()).ok()
}

/// The machine-local data directory, used for log files.
pub fn user_data_local_dir() -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(project_dirs()?.data_local_dir().to_path_buf()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::{Mutex, MutexGuard};

    /// Loads read `READABLE_*`; tests that load or set them take this lock.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn dir() -> (tempfile::TempDir, Utf8PathBuf) {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        (tmp, path)
    }

    fn isolated() -> ConfigLoader {
        ConfigLoader::new().with_user_config(false)
    }

    #[test]
    fn nothing_found_gives_defaults() {
        let _env = env_lock();
        let (_tmp, root) = dir();
        let (config, sources) = isolated().with_project_search(&root).load().unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(sources.files().is_empty());
        assert!(sources.primary_file().is_none());
    }

    #[test]
    fn explicit_files_merge_in_order() {
        let _env = env_lock();
        let (_tmp, root) = dir();
        fs::write(root.join("a.toml"), "average_reading_speed = 180\nlog_level = \"warn\"\n")
            .unwrap();
        fs::write(root.join("b.json"), r#"{"average_reading_speed": 310}"#).unwrap();

        let (config, sources) = isolated()
            .with_file(root.join("a.toml"))
            .with_file(root.join("b.json"))
            .load()
            .unwrap();

        assert_eq!(config.average_reading_speed, Some(310));
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(sources.primary_file(), Some(root.join("b.json").as_path()));
        assert_eq!(sources.of_kind(SourceKind::Explicit).count(), 2);
    }

    #[test]
    fn project_file_found_from_subdirectory() {
        let _env = env_lock();
        let (_tmp, root) = dir();
        let nested = root.join("docs/guides");
        fs::create_dir_all(&nested).unwrap();
        fs::write(root.join("readable.yaml"), "average_reading_speed: 275\n").unwrap();

        let (config, sources) = isolated()
            .without_boundary_marker()
            .with_project_search(&nested)
            .load()
            .unwrap();

        assert_eq!(config.average_reading_speed, Some(275));
        assert_eq!(
            sources.files(),
            &[ConfigSource {
                kind: SourceKind::Project,
                path: root.join("readable.yaml"),
            }]
        );
    }

    #[test]
    fn nearest_directory_wins() {
        let _env = env_lock();
        let (_tmp, root) = dir();
        let inner = root.join("inner");
        fs::create_dir_all(&inner).unwrap();
        fs::write(root.join("readable.toml"), "average_reading_speed = 100").unwrap();
        fs::write(inner.join(".readable.toml"), "log_level = \"debug\"").unwrap();

        let (config, sources) = isolated()
            .without_boundary_marker()
            .with_project_search(&inner)
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert!(config.average_reading_speed.is_none());
        assert_eq!(sources.files().len(), 1);
    }

    #[test]
    fn regular_file_overrides_dotfile() {
        let _env = env_lock();
        let (_tmp, root) = dir();
        fs::write(root.join(".readable.toml"), "average_reading_speed = 100").unwrap();
        fs::write(root.join("readable.toml"), "average_reading_speed = 250").unwrap();

        let (config, sources) = isolated().with_project_search(&root).load().unwrap();

        assert_eq!(config.average_reading_speed, Some(250));
        let found: Vec<_> = sources.of_kind(SourceKind::Project).map(Utf8Path::as_str).collect();
        assert_eq!(found, [root.join(".readable.toml").as_str(), root.join("readable.toml").as_str()]);
    }

    #[test]
    fn walk_stops_at_repository_root() {
        let _env = env_lock();
        let (_tmp, root) = dir();
        let repo = root.join("repo");
        let work = repo.join("src");
        fs::create_dir_all(repo.join(".git")).unwrap();
        fs::create_dir_all(&work).unwrap();
        fs::write(root.join("readable.toml"), "average_reading_speed = 90").unwrap();

        let (config, sources) = isolated().with_project_search(&work).load().unwrap();

        assert!(config.average_reading_speed.is_none());
        assert!(sources.files().is_empty());
    }

    #[test]
    fn config_beside_marker_is_found() {
        let _env = env_lock();
        let (_tmp, root) = dir();
        let work = root.join("src");
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::create_dir_all(&work).unwrap();
        fs::write(root.join(".readable.toml"), "average_reading_speed = 90").unwrap();

        let (config, _) = isolated().with_project_search(&work).load().unwrap();
        assert_eq!(config.average_reading_speed, Some(90));
    }

    #[test]
    fn wrong_type_is_an_error() {
        let _env = env_lock();
        let (_tmp, root) = dir();
        fs::write(root.join("bad.toml"), "average_reading_speed = \"fast\"").unwrap();

        let result = isolated().with_file(root.join("bad.toml")).load();
        assert!(matches!(result, Err(ConfigError::Deserialize(_))));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let _env = env_lock();
        let (_tmp, root) = dir();
        let result = isolated().with_file(root.join("absent.toml")).load();
        assert!(matches!(result, Err(ConfigError::MissingFile(path)) if path.ends_with("absent.toml")));
    }

    #[test]
    #[allow(unsafe_code)]
    fn environment_beats_files() {
        let _env = env_lock();
        let (_tmp, root) = dir();
        fs::write(root.join("c.toml"), "average_reading_speed = 200\n").unwrap();

        // SAFETY: ENV_LOCK is held for the whole test.
        unsafe { std::env::set_var("READABLE_AVERAGE_READING_SPEED", "320") };
        let result = isolated().with_file(root.join("c.toml")).load();
        // SAFETY: as above.
        unsafe { std::env::remove_var("READABLE_AVERAGE_READING_SPEED") };

        assert_eq!(result.unwrap().0.average_reading_speed, Some(320));
    }

    #[test]
    fn input_limit() {
        let mut config = Config::default();
        assert_eq!(config.input_limit(), Some(crate::DEFAULT_MAX_INPUT_BYTES));
        config.max_input_bytes = Some(1024);
        assert_eq!(config.input_limit(), Some(1024));
        config.disable_input_limit = true;
        assert_eq!(config.input_limit(), None);
    }

    #[test]
    fn negative_speed_is_accepted_as_stored() {
        let config: Config = serde_yaml::from_str("average_reading_speed: -5\n").unwrap();
        assert_eq!(config.average_reading_speed, Some(-5));
    }

    #[test]
    fn sources_serialize_as_list() {
        let mut sources = ConfigSources::default();
        sources.push(SourceKind::User, Utf8PathBuf::from("/home/u/.config/readable/config.toml"));
        let json = serde_json::to_value(&sources).unwrap();
        assert_eq!(json[0]["kind"], "user");
    }
}
