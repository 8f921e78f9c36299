//! 設定ファイルの更新
//!
//! アカウント ID やドメインなど、環境ごとに後から埋める値を書き込む。
//! 指定されていないキーはそのまま残す。

use crate::{Format, LoaderError, Result, load_document};
use serde_json::Value;
use std::path::Path;
use tracing::info;

/// 書き込む値（None のフィールドは変更しない）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigUpdate {
    pub account: Option<String>,
    pub domain: Option<String>,
    pub hosted_zone_id: Option<String>,
    pub hosted_zone_name: Option<String>,
    pub certificate_arn: Option<String>,
}

impl ConfigUpdate {
    fn entries(&self) -> [(&'static str, Option<&String>); 5] {
        [
            ("account", self.account.as_ref()),
            ("domain", self.domain.as_ref()),
            ("hostedZoneId", self.hosted_zone_id.as_ref()),
            ("hostedZoneName", self.hosted_zone_name.as_ref()),
            ("certificateArn", self.certificate_arn.as_ref()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.entries().iter().all(|(_, value)| value.is_none())
    }
}

/// JSON 設定ファイルを更新する
///
/// 値が変わった場合のみ書き戻し、`true` を返す。
pub fn update_config_file(path: &Path, update: &ConfigUpdate) -> Result<bool> {
    if Format::from_path(path)? != Format::Json {
        return Err(LoaderError::UnsupportedFormat(path.to_path_buf()));
    }

    let mut document = load_document(path)?;
    let object = document
        .as_object_mut()
        .ok_or_else(|| LoaderError::NotAnObject(path.to_path_buf()))?;

    let mut changed = Vec::new();
    for (key, value) in update.entries() {
        let Some(value) = value else { continue };
        if object.get(key).and_then(Value::as_str) != Some(value.as_str()) {
            object.insert(key.to_string(), Value::String(value.clone()));
            changed.push(key);
        }
    }

    if changed.is_empty() {
        return Ok(false);
    }

    let mut content = serde_json::to_string_pretty(&document)?;
    content.push('\n');
    std::fs::write(path, content)?;

    info!(path = %path.display(), keys = ?changed, "設定ファイルを更新しました");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_config(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("dev.json");
        fs::write(
            &path,
            r#"{
  "environment": "dev",
  "region": "us-west-2",
  "account": "000000000000",
  "cloudfront": { "priceClass": "PriceClass_100" }
}"#,
        )
        .unwrap();
        path
    }

    #[test]
    fn test_update_sets_values_and_keeps_other_keys() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_config(temp_dir.path());

        let update = ConfigUpdate {
            account: Some("123456789012".to_string()),
            domain: Some("dev.example.com".to_string()),
            certificate_arn: Some("arn:aws:acm:us-east-1:123456789012:certificate/abc".to_string()),
            ..Default::default()
        };
        assert!(update_config_file(&path, &update).unwrap());

        let document = load_document(&path).unwrap();
        assert_eq!(document["account"], "123456789012");
        assert_eq!(document["domain"], "dev.example.com");
        assert_eq!(
            document["certificateArn"],
            "arn:aws:acm:us-east-1:123456789012:certificate/abc"
        );
        assert_eq!(document["environment"], "dev");
        assert_eq!(document["cloudfront"]["priceClass"], "PriceClass_100");
        assert!(document.get("hostedZoneId").is_none());
    }

    #[test]
    fn test_update_preserves_key_order() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_config(temp_dir.path());

        let update = ConfigUpdate {
            account: Some("123456789012".to_string()),
            ..Default::default()
        };
        update_config_file(&path, &update).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let environment = content.find("\"environment\"").unwrap();
        let account = content.find("\"account\"").unwrap();
        let cloudfront = content.find("\"cloudfront\"").unwrap();
        assert!(environment < account && account < cloudfront);
    }

    #[test]
    fn test_update_without_changes_does_not_write() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_config(temp_dir.path());
        let before = fs::read_to_string(&path).unwrap();

        let update = ConfigUpdate {
            account: Some("000000000000".to_string()),
            ..Default::default()
        };
        assert!(!update_config_file(&path, &update).unwrap());
        assert!(!update_config_file(&path, &ConfigUpdate::default()).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_update_rejects_yaml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("dev.yaml");
        fs::write(&path, "environment: dev\n").unwrap();

        let update = ConfigUpdate {
            account: Some("123456789012".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            update_config_file(&path, &update),
            Err(LoaderError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_update_missing_file_is_io_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let update = ConfigUpdate {
            account: Some("123456789012".to_string()),
            ..Default::default()
        };

        assert!(matches!(
            update_config_file(&temp_dir.path().join("prod.json"), &update),
            Err(LoaderError::Io(_))
        ));
    }

    #[test]
    fn test_is_empty() {
        assert!(ConfigUpdate::default().is_empty());
        assert!(
            !ConfigUpdate {
                hosted_zone_name: Some("example.com".to_string()),
                ..Default::default()
            }
            .is_empty()
        );
    }
}
