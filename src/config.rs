use crate::core::layout::LayoutParams;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "OutputConfig::default_dir")]
    pub dir: String,
    #[serde(default)]
    pub create_dir: bool,
}

impl OutputConfig {
    fn default_dir() -> String {
        crate::plots::figures::DEFAULT_OUTPUT_DIR.to_string()
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: Self::default_dir(),
            create_dir: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub layout: LayoutParams,
}

impl AppConfig {
    /// Default TOML with every key commented out, so the file documents
    /// the defaults without pinning them.
    pub fn commented_defaults() -> Option<String> {
        let text = toml::to_string_pretty(&Self::default()).ok()?;
        let lines: Vec<String> = text
            .lines()
            .map(|line| match line.trim() {
                "" => String::new(),
                header if header.starts_with('[') => line.to_string(),
                _ => format!("# {line}"),
            })
            .collect();
        Some(lines.join("\n") + "\n")
    }

    pub fn load_or_default(path: &str) -> Self {
        let path_obj = Path::new(path);
        if path_obj.exists() {
            match fs::read_to_string(path_obj) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(cfg) => return cfg,
                    Err(err) => {
                        warn!("Failed to parse config {path}: {err}. Using defaults.");
                    }
                },
                Err(err) => {
                    warn!("Failed to read config {path}: {err}. Using defaults.");
                }
            }
            return Self::default();
        }

        // File does not exist: write defaults and return them.
        match Self::commented_defaults() {
            Some(text) => {
                if let Err(err) = fs::write(path_obj, text) {
                    warn!("Failed to write default config to {path}: {err}");
                }
            }
            None => warn!("Failed to serialize default config; continuing with defaults"),
        }
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn unique_path(name: &str) -> std::path::PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!(
            "syncplot_config_test_{}_{}",
            name,
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        p
    }

    #[test]
    fn load_or_default_writes_defaults_cleanly() {
        let path = unique_path("defaults.toml");
        let path_str = path.to_string_lossy().to_string();
        let _ = fs::remove_file(&path);

        let cfg = AppConfig::load_or_default(&path_str);
        assert!(path.exists(), "config file should be created");
        assert_eq!(cfg.output.dir, "images");
        assert!(!cfg.output.create_dir);
        assert_eq!(cfg.layout.seed, 1);
        assert_eq!(cfg.layout.max_iter, 200);
        assert!((cfg.layout.epsilon - 1e-4).abs() < 1e-12);

        let contents = fs::read_to_string(&path).expect("read written config");
        assert!(contents.contains("[output]"), "should keep section headers");
        assert!(
            contents.contains("# dir = \"images\""),
            "should write commented dir"
        );
        assert!(
            contents.contains("# epsilon = "),
            "should write commented epsilon, got:\n{contents}"
        );

        // Uncommenting every key pins exactly the defaults.
        let uncommented = contents.replace("# ", "");
        let pinned: AppConfig =
            toml::from_str(&uncommented).expect("parse uncommented defaults");
        assert_eq!(pinned, AppConfig::default());

        // Commented file parses back to defaults.
        let reread = AppConfig::load_or_default(&path_str);
        assert_eq!(reread, AppConfig::default());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn load_or_default_reads_existing() {
        let path = unique_path("custom.toml");
        let path_str = path.to_string_lossy().to_string();
        let custom = AppConfig {
            output: OutputConfig {
                dir: "figs".to_string(),
                create_dir: true,
            },
            layout: LayoutParams {
                seed: 42,
                max_iter: 50,
                epsilon: 1e-3,
            },
        };
        let text = toml::to_string_pretty(&custom).unwrap();
        fs::write(&path, text).unwrap();

        let cfg = AppConfig::load_or_default(&path_str);
        assert_eq!(cfg, custom);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn partial_file_fills_missing_fields() {
        let path = unique_path("partial.toml");
        let path_str = path.to_string_lossy().to_string();
        fs::write(&path, "[layout]\nseed = 9\n").unwrap();

        let cfg = AppConfig::load_or_default(&path_str);
        assert_eq!(cfg.layout.seed, 9);
        assert_eq!(cfg.layout.max_iter, 200);
        assert_eq!(cfg.output, OutputConfig::default());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn unparsable_file_falls_back_to_defaults() {
        let path = unique_path("broken.toml");
        let path_str = path.to_string_lossy().to_string();
        fs::write(&path, "[output\ndir = ").unwrap();

        let cfg = AppConfig::load_or_default(&path_str);
        assert_eq!(cfg, AppConfig::default());
        let _ = fs::remove_file(&path);
    }
}
