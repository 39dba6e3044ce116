// ==========================================
// 生产数据仓库ETL - 管道配置
// ==========================================
// 职责: 显式配置对象,随入口函数传入
// 红线: 不使用进程级全局可变状态
// ==========================================

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ==========================================
// EtlConfig - 管道配置对象
// ==========================================
/// ETL 管道配置
///
/// JSON 文件加载或取默认值; 连接参数与路径属于编排层关注点,
/// 核心转换逻辑不读取任何配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EtlConfig {
    /// 源快照文件路径 (CSV 或 Excel)
    pub snapshot_path: PathBuf,
    /// 仓库数据库文件路径
    pub warehouse_path: String,
    /// 加载器每个事务提交的行数
    pub batch_size: usize,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from("mrp_production.csv"),
            warehouse_path: get_default_warehouse_path(),
            batch_size: crate::repository::DEFAULT_BATCH_SIZE,
        }
    }
}

impl EtlConfig {
    /// 从 JSON 文件加载配置
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {}", path.display()))?;
        let config: EtlConfig = serde_json::from_str(&raw)
            .with_context(|| format!("配置文件格式错误: {}", path.display()))?;
        Ok(config)
    }

    /// 有配置文件则加载,否则取默认值
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                tracing::info!("未指定配置文件, 使用默认配置");
                Ok(Self::default())
            }
        }
    }
}

/// 获取默认仓库数据库路径
///
/// 优先级: 环境变量 PRODUCTION_DW_PATH > 用户数据目录 > 当前目录回退
pub fn get_default_warehouse_path() -> String {
    if let Ok(path) = std::env::var("PRODUCTION_DW_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./production_dw.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("production-dw-etl");
        // best-effort: 目录创建失败时回退到当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("production_dw.db");
        }
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_positive_batch_size() {
        let config = EtlConfig::default();
        assert!(config.batch_size > 0);
        assert!(!config.warehouse_path.is_empty());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config: EtlConfig = serde_json::from_str(r#"{"batch_size": 250}"#).unwrap();
        assert_eq!(config.batch_size, 250);
        assert_eq!(config.snapshot_path, PathBuf::from("mrp_production.csv"));
    }
}
