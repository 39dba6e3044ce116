// ==========================================
// 生产数据仓库ETL - 批量加载器接口
// ==========================================
// 职责: 定义核心与持久化之间的协作契约
// 红线: 核心不拼 SQL, 所有持久化经由本接口
// ==========================================

use crate::domain::table::{DataTable, LoadMode};
use crate::repository::error::RepositoryResult;

/// 批量加载器
///
/// 接收一张矩形数据集与目标表标识,按指定模式持久化。
/// 加载器负责建表、清空(Replace 模式)、分批提交与 NULL 转换;
/// 单表失败通过 Err 上报,由调用方决定兄弟表是否继续
pub trait WarehouseLoader {
    /// 加载一张表,返回写入行数
    fn load(&self, table: &DataTable, mode: LoadMode) -> RepositoryResult<usize>;
}
