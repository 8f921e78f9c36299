use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const DEV_CONFIG: &str = r#"{
  "environment": "dev",
  "region": "us-west-2",
  "account": "123456789012",
  "cloudfront": { "priceClass": "PriceClass_100" }
}"#;

pub const PROD_CONFIG: &str = r#"{
  "environment": "prod",
  "region": "us-west-2",
  "account": "123456789012",
  "domain": "www.example.com",
  "hostedZoneId": "Z0123456789",
  "hostedZoneName": "example.com",
  "cloudfront": { "priceClass": "PriceClass_200" }
}"#;

pub struct TestProject {
    pub root: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        Self { root }
    }

    /// dev.json と prod.json を config/ に置いたプロジェクト
    #[allow(dead_code)]
    pub fn with_default_configs() -> Self {
        let project = Self::new();
        project.write_config("dev", DEV_CONFIG);
        project.write_config("prod", PROD_CONFIG);
        project
    }

    pub fn write_config(&self, environment: &str, content: &str) -> PathBuf {
        let dir = self.config_dir();
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(format!("{}.json", environment));
        fs::write(&path, content).unwrap();
        path
    }

    pub fn config_dir(&self) -> PathBuf {
        self.root.path().join("config")
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    #[allow(dead_code)]
    pub fn read_json(&self, environment: &str) -> serde_json::Value {
        let content = fs::read_to_string(self.config_dir().join(format!("{}.json", environment)))
            .unwrap();
        serde_json::from_str(&content).unwrap()
    }
}
