// ==========================================
// 生产数据仓库ETL - 配置层
// ==========================================
// 职责: 管道配置加载与默认值
// ==========================================

pub mod etl_config;

// 重导出核心配置
pub use etl_config::{get_default_warehouse_path, EtlConfig};
