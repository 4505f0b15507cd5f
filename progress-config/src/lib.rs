//! Loader for auditor configuration with YAML + environment overlays.
//!
//! Precedence: `PROGRESS_`-prefixed environment variables win over the YAML
//! file, and `${VAR}` placeholders inside any string value are expanded
//! after the sources are merged. Every field has a default, so a run with
//! no `progress.yaml` at all is valid.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

/// Top-level configuration for one audit run.
#[derive(Debug, Deserialize)]
pub struct ProgressConfig {
    pub version: Option<String>,
    /// Roster file, resolved against the working directory.
    #[serde(default = "default_roster")]
    pub roster: PathBuf,
    #[serde(default)]
    pub webdriver: WebdriverConfig,
    #[serde(default)]
    pub site: SiteConfig,
}

/// Where to reach the WebDriver service and how to run the browser.
#[derive(Debug, Deserialize)]
pub struct WebdriverConfig {
    #[serde(default = "default_webdriver_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_headless")]
    pub headless: bool,
}

impl Default for WebdriverConfig {
    fn default() -> Self {
        Self {
            endpoint: default_webdriver_endpoint(),
            headless: default_headless(),
        }
    }
}

/// The remote site under audit.
#[derive(Debug, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_roster() -> PathBuf {
    PathBuf::from("users.txt")
}
fn default_webdriver_endpoint() -> String {
    "http://localhost:9515".into()
}
fn default_headless() -> bool {
    true
}
fn default_base_url() -> String {
    "https://sql-academy.org/ru".into()
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hiding the `config` crate wiring (YAML + env overrides).
pub struct ProgressConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for ProgressConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressConfigLoader {
    /// Start with the defaults: `PROGRESS_` env overrides, nothing else.
    pub fn new() -> Self {
        let builder =
            Config::builder().add_source(Environment::with_prefix("PROGRESS").separator("__"));
        Self { builder }
    }

    /// Attach a config file; the `config` crate infers the format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a config file that may legitimately be absent, so headless
    /// deployments can rely purely on environment variables and defaults.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Merge an inline YAML snippet; mainly for tests.
    ///
    /// ```
    /// use progress_config::ProgressConfigLoader;
    ///
    /// let cfg = ProgressConfigLoader::new()
    ///     .with_yaml_str("version: '1'\nroster: 'group-a.txt'")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(cfg.version.as_deref(), Some("1"));
    /// assert_eq!(cfg.roster.to_str(), Some("group-a.txt"));
    /// assert!(cfg.webdriver.headless);
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources.
    ///
    /// Sources are merged into a `serde_json::Value` first so `${VAR}`
    /// placeholders can be expanded recursively before materialising the
    /// typed struct.
    pub fn load(self) -> Result<ProgressConfig, ConfigError> {
        let cfg = self.builder.build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: ProgressConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok(typed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use temp_env;

    #[test]
    fn expands_simple_string() {
        temp_env::with_var("ROSTER_DIR", Some("/srv/rosters"), || {
            let mut v = json!("${ROSTER_DIR}/group-a.txt");
            expand_env_in_value(&mut v);
            assert_eq!(v, json!("/srv/rosters/group-a.txt"));
        });
    }

    #[test]
    fn expands_in_array_and_object() {
        temp_env::with_vars([("WD_HOST", Some("localhost")), ("WD_PORT", Some("9515"))], || {
            let mut v = json!([
                "http://$WD_HOST",
                { "endpoint": "http://${WD_HOST}:${WD_PORT}" },
                9515,
                false,
                null
            ]);
            expand_env_in_value(&mut v);
            assert_eq!(
                v,
                json!([
                    "http://localhost",
                    { "endpoint": "http://localhost:9515" },
                    9515,
                    false,
                    null
                ])
            );
        });
    }

    #[test]
    fn expands_recursively_across_env_values() {
        temp_env::with_vars(
            [
                // OUTER references INNER; TOP references OUTER — two hops.
                ("INNER", Some("9515")),
                ("OUTER", Some("localhost:${INNER}")),
                ("TOP", Some("http://${OUTER}/")),
            ],
            || {
                let mut v = json!("endpoint=${TOP}");
                expand_env_in_value(&mut v);
                assert_eq!(v, json!("endpoint=http://localhost:9515/"));
            },
        );
    }

    #[test]
    fn stops_on_cycles_and_terminates() {
        temp_env::with_vars([("A", Some("${B}")), ("B", Some("${A}"))], || {
            let mut v = json!("x=${A}-y");
            // The depth cap guarantees termination; the unresolved
            // placeholder is expected to survive.
            expand_env_in_value(&mut v);
            let s = v.as_str().unwrap();
            assert!(s.starts_with("x=") && s.ends_with("-y"));
            assert!(s.contains("${"));
        });
    }

    #[test]
    fn unknown_vars_are_left_as_is() {
        let mut v = json!("roster-${DOES_NOT_EXIST}");
        expand_env_in_value(&mut v);
        assert_eq!(v, json!("roster-${DOES_NOT_EXIST}"));
    }
}
