// ==========================================
// 生产数据仓库ETL - 矩形数据集表示
// ==========================================
// 职责: 定义核心与加载器之间的数据交换格式
// 红线: 不含数据访问逻辑,不依赖具体数据库驱动
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// SQL 值 (SqlValue)
// ==========================================
// 缺失值显式表示为 Null,由加载器转换为数据库原生 NULL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SqlValue {
    Integer(i64),
    Real(f64),
    Text(String),
    Date(NaiveDate),
    Null,
}

impl From<Option<i64>> for SqlValue {
    fn from(v: Option<i64>) -> Self {
        v.map_or(SqlValue::Null, SqlValue::Integer)
    }
}

impl From<Option<f64>> for SqlValue {
    fn from(v: Option<f64>) -> Self {
        v.map_or(SqlValue::Null, SqlValue::Real)
    }
}

impl From<Option<String>> for SqlValue {
    fn from(v: Option<String>) -> Self {
        v.map_or(SqlValue::Null, SqlValue::Text)
    }
}

impl From<Option<NaiveDate>> for SqlValue {
    fn from(v: Option<NaiveDate>) -> Self {
        v.map_or(SqlValue::Null, SqlValue::Date)
    }
}

// ==========================================
// 列定义 (ColumnDef)
// ==========================================
/// 目标表的一列: 列名 + SQLite 类型声明
///
/// 列名与列序必须与目标 schema 完全一致,加载器不做重排
#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
    pub name: &'static str,
    pub sql_type: &'static str,
}

// ==========================================
// 矩形数据集 (DataTable)
// ==========================================
/// 交给加载器的单表数据: 表名 + 列定义 + 行值
#[derive(Debug, Clone)]
pub struct DataTable {
    pub name: &'static str,
    pub columns: &'static [ColumnDef],
    pub rows: Vec<Vec<SqlValue>>,
}

impl DataTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 校验每一行的宽度与列定义一致
    pub fn is_rectangular(&self) -> bool {
        self.rows.iter().all(|r| r.len() == self.columns.len())
    }
}

// ==========================================
// 加载模式 (Load Mode)
// ==========================================
// 本设计所有表均使用 Replace (先清空再写入)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadMode {
    Replace, // 全量替换
    Append,  // 追加写入
}

impl fmt::Display for LoadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadMode::Replace => write!(f, "REPLACE"),
            LoadMode::Append => write!(f, "APPEND"),
        }
    }
}
