//! 環境名

use serde::{Serialize, Serializer};
use std::fmt;

/// デプロイ先の環境
///
/// `dev` と `prod` 以外の名前も受け付ける。その場合は `prod` 以外の
/// 非 dev 環境として扱われる（保持ポリシーは retain、WAF なし）。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Environment {
    Dev,
    Prod,
    Other(String),
}

impl Environment {
    pub fn parse(name: &str) -> Self {
        match name.trim() {
            "dev" => Environment::Dev,
            "prod" => Environment::Prod,
            other => Environment::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Environment::Dev => "dev",
            Environment::Prod => "prod",
            Environment::Other(name) => name,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Environment::Dev)
    }

    pub fn is_prod(&self) -> bool {
        matches!(self, Environment::Prod)
    }

    /// 先頭だけ大文字にした名前（スタック名用: dev → Dev）
    pub fn title(&self) -> String {
        let mut chars = self.as_str().chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Environment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_profiles() {
        assert_eq!(Environment::parse("dev"), Environment::Dev);
        assert_eq!(Environment::parse(" prod "), Environment::Prod);
        assert_eq!(
            Environment::parse("staging"),
            Environment::Other("staging".to_string())
        );
    }

    #[test]
    fn test_title() {
        assert_eq!(Environment::Dev.title(), "Dev");
        assert_eq!(Environment::Other("staging".to_string()).title(), "Staging");
    }
}
