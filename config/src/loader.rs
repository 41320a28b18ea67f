use crate::{ConfigError, LogLevel, RelishConfig};
use regex::Regex;
use std::path::PathBuf;

pub struct ConfigLoader {
    explicit_file: Option<PathBuf>,
    search_paths: Vec<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        let mut search_paths = Vec::new();

        if let Some(home) = dirs::home_dir() {
            search_paths.push(home.join(".config/relish/relish.yaml"));
        }
        search_paths.push(PathBuf::from("./relish.yaml"));

        #[cfg(unix)]
        search_paths.insert(0, PathBuf::from("/etc/relish/relish.yaml"));

        Self {
            explicit_file: None,
            search_paths,
        }
    }

    pub fn with_file(mut self, path: &str) -> Self {
        self.explicit_file = Some(PathBuf::from(path));
        self
    }

    pub fn load(&self) -> Result<RelishConfig, ConfigError> {
        let mut config = RelishConfig::default();

        if let Ok(env_path) = std::env::var("RELISH_CONFIG") {
            let content =
                std::fs::read_to_string(&env_path).map_err(|e| ConfigError::ReadFile {
                    path: PathBuf::from(&env_path),
                    source: e,
                })?;
            config = self.parse_yaml(&content)?;
        } else if let Some(ref explicit) = self.explicit_file {
            let content = std::fs::read_to_string(explicit).map_err(|e| ConfigError::ReadFile {
                path: explicit.clone(),
                source: e,
            })?;
            config = self.parse_yaml(&content)?;
        } else {
            for path in &self.search_paths {
                if path.exists() {
                    if let Ok(content) = std::fs::read_to_string(path) {
                        config = self.parse_yaml(&content)?;
                        tracing::debug!("Loaded config from {}", path.display());
                    }
                }
            }
        }

        self.apply_env_overrides(&mut config);
        Ok(config)
    }

    fn parse_yaml(&self, content: &str) -> Result<RelishConfig, ConfigError> {
        let expanded = self.expand_env_vars(content);
        Ok(serde_yaml::from_str(&expanded)?)
    }

    fn expand_env_vars(&self, content: &str) -> String {
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();
        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_default()
        })
        .to_string()
    }

    fn apply_env_overrides(&self, config: &mut RelishConfig) {
        if let Ok(prompt) = std::env::var("RELISH_PROMPT") {
            config.repl.prompt = prompt;
        }
        if let Ok(welcome) = std::env::var("RELISH_WELCOME") {
            config.repl.welcome = welcome;
        }
        if let Ok(file) = std::env::var("RELISH_HISTORY_FILE") {
            config.repl.history.file = file;
        }
        if let Ok(file) = std::env::var("RELISH_ALIAS_FILE") {
            config.repl.aliases_file = file;
        }
        if let Ok(file) = std::env::var("RELISH_LOG_FILE") {
            config.logging.file = file;
        }
        if let Ok(level) = std::env::var("RELISH_LOG_LEVEL") {
            if let Ok(parsed) = serde_yaml::from_str::<LogLevel>(&level) {
                config.logging.level = parsed;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_env_vars_works() {
        std::env::set_var("RELISH_TEST_VAR_123", "hello");
        let loader = ConfigLoader::new();
        let result = loader.expand_env_vars("value: ${RELISH_TEST_VAR_123}");
        assert_eq!(result, "value: hello");
        std::env::remove_var("RELISH_TEST_VAR_123");
    }

    #[test]
    fn missing_env_var_becomes_empty() {
        let loader = ConfigLoader::new();
        let result = loader.expand_env_vars("value: ${RELISH_NONEXISTENT_VAR_XYZ}");
        assert_eq!(result, "value: ");
    }

    #[test]
    fn env_overrides_config() {
        std::env::set_var("RELISH_PROMPT", "override> ");
        let mut config = RelishConfig::default();
        let loader = ConfigLoader::new();
        loader.apply_env_overrides(&mut config);
        assert_eq!(config.repl.prompt, "override> ");
        std::env::remove_var("RELISH_PROMPT");
    }

    #[test]
    fn explicit_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relish.yaml");
        std::fs::write(&path, "repl:\n  prompt: \"calc> \"\n").unwrap();

        let config = ConfigLoader::new()
            .with_file(path.to_str().unwrap())
            .load()
            .unwrap();
        assert_eq!(config.repl.prompt, "calc> ");
        // Untouched sections keep their defaults.
        assert_eq!(config.repl.history.max_entries, 1000);
    }
}
