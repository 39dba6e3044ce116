// ==========================================
// 生产数据仓库ETL - 星型模型行结构
// ==========================================
// 职责: 定义维度表/事实表的行类型与目标 schema
// 红线: 列名与列序与目标表逐位一致
// ==========================================

use crate::domain::table::{ColumnDef, DataTable, SqlValue};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// WarehouseRecord - 仓库表行契约
// ==========================================
/// 能写入仓库某张表的行类型
///
/// `values()` 的顺序必须与 `columns()` 一一对应
pub trait WarehouseRecord {
    fn table_name() -> &'static str;
    fn columns() -> &'static [ColumnDef];
    fn values(&self) -> Vec<SqlValue>;
}

/// 把一组行打包为交给加载器的矩形数据集
pub fn to_table<R: WarehouseRecord>(rows: &[R]) -> DataTable {
    DataTable {
        name: R::table_name(),
        columns: R::columns(),
        rows: rows.iter().map(|r| r.values()).collect(),
    }
}

// ==========================================
// DimDate - 日期维度
// ==========================================
/// 日期维度行
///
/// DateKey = YYYYMMDD 的 8 位整数,对 Date 是无损编码
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimDateRow {
    pub date_key: i64,
    pub date: NaiveDate,
    pub year: i32,
    /// 季度 1-4 (按月份计算)
    pub quarter: u32,
    pub month: u32,
    /// 英文月份全名 (January..December)
    pub month_name: String,
    pub day: u32,
    /// 1=周一 .. 7=周日
    pub day_of_week: u32,
    /// 英文星期全名 (Monday..Sunday)
    pub day_of_week_name: String,
}

impl WarehouseRecord for DimDateRow {
    fn table_name() -> &'static str {
        "DimDate"
    }

    fn columns() -> &'static [ColumnDef] {
        static COLS: &[ColumnDef] = &[
            ColumnDef { name: "DateKey", sql_type: "INTEGER NOT NULL" },
            ColumnDef { name: "Date", sql_type: "TEXT NOT NULL" },
            ColumnDef { name: "Year", sql_type: "INTEGER NOT NULL" },
            ColumnDef { name: "Quarter", sql_type: "INTEGER NOT NULL" },
            ColumnDef { name: "Month", sql_type: "INTEGER NOT NULL" },
            ColumnDef { name: "MonthName", sql_type: "TEXT NOT NULL" },
            ColumnDef { name: "Day", sql_type: "INTEGER NOT NULL" },
            ColumnDef { name: "DayOfWeek", sql_type: "INTEGER NOT NULL" },
            ColumnDef { name: "DayOfWeekName", sql_type: "TEXT NOT NULL" },
        ];
        COLS
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Integer(self.date_key),
            SqlValue::Date(self.date),
            SqlValue::Integer(self.year as i64),
            SqlValue::Integer(self.quarter as i64),
            SqlValue::Integer(self.month as i64),
            SqlValue::Text(self.month_name.clone()),
            SqlValue::Integer(self.day as i64),
            SqlValue::Integer(self.day_of_week as i64),
            SqlValue::Text(self.day_of_week_name.clone()),
        ]
    }
}

// ==========================================
// DimDepartment - 部门维度
// ==========================================
/// 部门维度行
///
/// DepartmentID 是 `DEPT_<序号>` 形式的合成标识,与 DepartmentKey
/// 取自同一序号,但只有 DepartmentKey 参与事实表关联
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimDepartmentRow {
    pub department_id: String,
    pub department_key: i64,
    pub department_name: String,
}

impl WarehouseRecord for DimDepartmentRow {
    fn table_name() -> &'static str {
        "DimDepartment"
    }

    fn columns() -> &'static [ColumnDef] {
        static COLS: &[ColumnDef] = &[
            ColumnDef { name: "DepartmentID", sql_type: "TEXT NOT NULL" },
            ColumnDef { name: "DepartmentKey", sql_type: "INTEGER NOT NULL" },
            ColumnDef { name: "DepartmentName", sql_type: "TEXT NOT NULL" },
        ];
        COLS
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Text(self.department_id.clone()),
            SqlValue::Integer(self.department_key),
            SqlValue::Text(self.department_name.clone()),
        ]
    }
}

// ==========================================
// DimProductCategory - 产品类别维度
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimProductCategoryRow {
    pub product_category_key: i64,
    pub product_category_name: String,
}

impl WarehouseRecord for DimProductCategoryRow {
    fn table_name() -> &'static str {
        "DimProductCategory"
    }

    fn columns() -> &'static [ColumnDef] {
        static COLS: &[ColumnDef] = &[
            ColumnDef { name: "ProductCategoryKey", sql_type: "INTEGER NOT NULL" },
            ColumnDef { name: "ProductCategoryName", sql_type: "TEXT NOT NULL" },
        ];
        COLS
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Integer(self.product_category_key),
            SqlValue::Text(self.product_category_name.clone()),
        ]
    }
}

// ==========================================
// DimProduct - 产品维度
// ==========================================
/// 产品维度行
///
/// 去重粒度是完整属性元组: 同一 ProductCode 带不同属性组合时
/// 产生多行,这些行共用代码映射分配的同一 ProductKey
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimProductRow {
    pub product_key: i64,
    pub product_code: String,
    pub product_name: Option<String>,
    pub product_category_key: Option<i64>,
    pub product_cost: Option<f64>,
    pub product_sales_price: Option<f64>,
    pub profit_margin_percent: Option<f64>,
    pub price_category: Option<String>,
    pub margin_category: Option<String>,
}

impl WarehouseRecord for DimProductRow {
    fn table_name() -> &'static str {
        "DimProduct"
    }

    fn columns() -> &'static [ColumnDef] {
        static COLS: &[ColumnDef] = &[
            ColumnDef { name: "ProductKey", sql_type: "INTEGER NOT NULL" },
            ColumnDef { name: "ProductCode", sql_type: "TEXT NOT NULL" },
            ColumnDef { name: "ProductName", sql_type: "TEXT" },
            ColumnDef { name: "ProductCategoryKey", sql_type: "INTEGER" },
            ColumnDef { name: "ProductCost", sql_type: "REAL" },
            ColumnDef { name: "ProductSalesPrice", sql_type: "REAL" },
            ColumnDef { name: "ProfitMarginPercent", sql_type: "REAL" },
            ColumnDef { name: "PriceCategory", sql_type: "TEXT" },
            ColumnDef { name: "MarginCategory", sql_type: "TEXT" },
        ];
        COLS
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Integer(self.product_key),
            SqlValue::Text(self.product_code.clone()),
            SqlValue::from(self.product_name.clone()),
            SqlValue::from(self.product_category_key),
            SqlValue::from(self.product_cost),
            SqlValue::from(self.product_sales_price),
            SqlValue::from(self.profit_margin_percent),
            SqlValue::from(self.price_category.clone()),
            SqlValue::from(self.margin_category.clone()),
        ]
    }
}

// ==========================================
// FactProduction - 生产事实表
// ==========================================
/// 生产事实行: 与源记录 1:1,外键缺失或未映射时为 NULL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactProductionRow {
    pub reference: Option<String>,
    pub product_key: Option<i64>,
    pub department_key: Option<i64>,
    pub start_date_key: Option<i64>,
    pub end_date_key: Option<i64>,
    pub deadline_date_key: Option<i64>,
    pub state: Option<String>,
    pub quantity_producing: Option<f64>,
    pub quantity_to_produce: Option<f64>,
    pub total_quantity: Option<f64>,
    pub production_efficiency: Option<f64>,
    pub production_duration_days: Option<f64>,
}

impl WarehouseRecord for FactProductionRow {
    fn table_name() -> &'static str {
        "FactProduction"
    }

    fn columns() -> &'static [ColumnDef] {
        static COLS: &[ColumnDef] = &[
            ColumnDef { name: "Reference", sql_type: "TEXT" },
            ColumnDef { name: "ProductKey", sql_type: "INTEGER" },
            ColumnDef { name: "DepartmentKey", sql_type: "INTEGER" },
            ColumnDef { name: "StartDateKey", sql_type: "INTEGER" },
            ColumnDef { name: "EndDateKey", sql_type: "INTEGER" },
            ColumnDef { name: "DeadlineDateKey", sql_type: "INTEGER" },
            ColumnDef { name: "State", sql_type: "TEXT" },
            ColumnDef { name: "QuantityProducing", sql_type: "REAL" },
            ColumnDef { name: "QuantityToProduce", sql_type: "REAL" },
            ColumnDef { name: "TotalQuantity", sql_type: "REAL" },
            ColumnDef { name: "ProductionEfficiency", sql_type: "REAL" },
            ColumnDef { name: "ProductionDurationDays", sql_type: "REAL" },
        ];
        COLS
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::from(self.reference.clone()),
            SqlValue::from(self.product_key),
            SqlValue::from(self.department_key),
            SqlValue::from(self.start_date_key),
            SqlValue::from(self.end_date_key),
            SqlValue::from(self.deadline_date_key),
            SqlValue::from(self.state.clone()),
            SqlValue::from(self.quantity_producing),
            SqlValue::from(self.quantity_to_produce),
            SqlValue::from(self.total_quantity),
            SqlValue::from(self.production_efficiency),
            SqlValue::from(self.production_duration_days),
        ]
    }
}
