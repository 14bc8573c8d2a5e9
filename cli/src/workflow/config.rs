use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8000";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub service_url: String,
    pub output_dir: PathBuf,
    pub model_labels: HashMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            output_dir: PathBuf::from("."),
            model_labels: default_model_labels(),
        }
    }
}

fn default_model_labels() -> HashMap<String, String> {
    HashMap::from([
        (
            "model1".to_string(),
            "model1- For boxes and cartons".to_string(),
        ),
        ("model2".to_string(), "model2- For bottle stacks".to_string()),
    ])
}

impl ClientConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading client config {}", path_ref.display()))?;
        let config: ClientConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing client config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(service_url: Option<String>, output_dir: Option<PathBuf>) -> Self {
        Self::default().with_overrides(service_url, output_dir)
    }

    /// Command-line flags win over whatever the file said.
    pub fn with_overrides(mut self, service_url: Option<String>, output_dir: Option<PathBuf>) -> Self {
        if let Some(url) = service_url {
            self.service_url = url;
        }
        if let Some(dir) = output_dir {
            self.output_dir = dir;
        }
        self
    }
}
