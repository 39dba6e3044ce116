// ==========================================
// 生产数据仓库ETL - 快照读取入口
// ==========================================
// 职责: 文件解析 + 契约校验 + 字段映射
// 口径: 快照读取失败对整次运行致命 (上游无数据可建模)
// ==========================================

use crate::domain::production::RawProductionRecord;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::{FileParser, UniversalFileParser};
use std::path::Path;

/// 快照必须携带的列 (schema 契约的最小集)
const REQUIRED_COLUMNS: &[&str] = &["Reference", "Product_Code", "Responsible"];

// ==========================================
// SnapshotReader - 快照读取器
// ==========================================
/// 生产快照读取器
///
/// # 流程
/// 1. 按扩展名解析文件 → 原始字符串行
/// 2. 校验必需列存在 (空快照跳过校验, 零行是合法输入)
/// 3. 字段映射为类型化记录
pub struct SnapshotReader {
    parser: UniversalFileParser,
}

impl Default for SnapshotReader {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotReader {
    pub fn new() -> Self {
        Self {
            parser: UniversalFileParser,
        }
    }

    pub fn read(&self, path: &Path) -> ImportResult<Vec<RawProductionRecord>> {
        let rows = self.parser.parse_to_raw_rows(path)?;

        if let Some(first) = rows.first() {
            for column in REQUIRED_COLUMNS {
                if !first.contains_key(*column) {
                    return Err(ImportError::SchemaMismatch(column.to_string()));
                }
            }
        }

        let records = FieldMapper::map_rows(&rows);
        tracing::info!(
            path = %path.display(),
            rows = records.len(),
            "快照读取完成"
        );

        Ok(records)
    }
}
