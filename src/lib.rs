// ==========================================
// 生产数据仓库ETL - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 生产跟踪数据 → 星型模型的批处理管道
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 源记录与星型模型行结构
pub mod domain;

// 引擎层 - 维度转换核心
pub mod engine;

// 导入层 - 快照读取
pub mod importer;

// 数据仓储层 - 批量加载
pub mod repository;

// 配置层 - 管道配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    DataTable, DimDateRow, DimDepartmentRow, DimProductCategoryRow, DimProductRow,
    FactProductionRow, LoadMode, RawProductionRecord, SqlValue,
};

// 引擎
pub use engine::{
    DateDimensionBuilder, DepartmentDimensionBuilder, EtlOrchestrator, EtlRunReport,
    FactProjector, KeyMapper, ProductCategoryDimensionBuilder, ProductDimensionBuilder,
};

// 导入与仓储
pub use importer::SnapshotReader;
pub use repository::{SqliteWarehouseRepository, WarehouseLoader};

// 配置
pub use config::EtlConfig;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "生产数据仓库ETL";
