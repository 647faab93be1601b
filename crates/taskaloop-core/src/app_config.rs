use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Store catalog YAML. `None` means the built-in catalog.
    pub catalog_path: Option<PathBuf>,
    pub default_radius_miles: f64,
    pub history_path: PathBuf,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field(
                "catalog_path",
                &self
                    .catalog_path
                    .as_ref()
                    .map_or_else(|| "[builtin]".to_string(), |p| p.display().to_string()),
            )
            .field("default_radius_miles", &self.default_radius_miles)
            .field("history_path", &self.history_path)
            .finish()
    }
}
