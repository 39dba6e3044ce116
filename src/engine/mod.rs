// ==========================================
// 生产数据仓库ETL - 引擎层
// ==========================================
// 职责: 维度转换核心 (映射、去重、投影、编排)
// 红线: Engine 不拼 SQL, 不做磁盘/网络 I/O
// ==========================================

pub mod date_dimension;
pub mod entity_dimensions;
pub mod fact_projector;
pub mod key_mapper;
pub mod orchestrator;

// 重导出核心引擎
pub use date_dimension::{date_key, DateDimensionBuilder};
pub use entity_dimensions::{
    DepartmentDimensionBuilder, ProductCategoryDimensionBuilder, ProductDimensionBuilder,
};
pub use fact_projector::FactProjector;
pub use key_mapper::{distinct_first_seen, KeyMapper};
pub use orchestrator::{EtlOrchestrator, EtlRunReport, TableLoadOutcome};
