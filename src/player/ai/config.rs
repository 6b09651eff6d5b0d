use serde::{Deserialize, Serialize};

/// コンピュータプレイヤーの設定
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// 思考中表示が見えるように最低限待つ時間
    pub min_think_ms: u64,
    /// 手の選択のばらつき。小さいほど最善手に寄る
    pub temperature: f64,
}

impl Default for AiConfig {
    fn default() -> Self {
        AiConfig {
            min_think_ms: 600,
            temperature: 0.35,
        }
    }
}
