use crate::core::CodecError;
use serde::{Deserialize, Serialize};

/// チェックサムの生成・検証を切り替える設定
///
/// グローバルには持たず、ビルドと検証の呼び出しごとに渡す。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// 検証時にチェックサムと長さを確認するか
    pub verify_checksum: bool,
    /// 自動ビルド時にチェックサムを計算するか
    pub generate_checksum: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            verify_checksum: true,
            generate_checksum: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuration {
    pub codec: CodecConfig,
    pub log_level: String,
}

impl Configuration {
    pub fn from_env() -> Result<Self, CodecError> {
        dotenv::dotenv().ok();

        Ok(Configuration {
            codec: CodecConfig {
                verify_checksum: parse_flag("UDP_CHECKSUM_VERIFICATION", std::env::var("UDP_CHECKSUM_VERIFICATION").ok())?,
                generate_checksum: parse_flag("UDP_CHECKSUM_GENERATION", std::env::var("UDP_CHECKSUM_GENERATION").ok())?,
            },
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

// 未設定の場合は有効とみなす
fn parse_flag(name: &str, value: Option<String>) -> Result<bool, CodecError> {
    match value {
        None => Ok(true),
        Some(v) => v
            .trim()
            .to_ascii_lowercase()
            .parse::<bool>()
            .map_err(|e| CodecError::Config(format!("{}の値が不正です ({}): {}", name, v, e))),
    }
}
