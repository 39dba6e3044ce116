// ==========================================
// 生产数据仓库ETL - 源数据模型
// ==========================================
// 职责: 定义生产跟踪快照的类型化行结构
// 红线: 核心只读消费,不回写源数据
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// RawProductionRecord - 生产快照原始记录
// ==========================================
/// 生产跟踪快照的一行(制造命令粒度)
///
/// 除派生列外全部字段可缺失: 缺失在类型层面显式表示为 `None`,
/// 后续投影为输出表中的 NULL,而不是在行级报错
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawProductionRecord {
    // ===== 命令标识 =====
    /// 制造命令号 (如 MO001)
    pub reference: Option<String>,
    /// 负责部门/负责人名称
    pub responsible: Option<String>,
    /// 命令状态 (如 done / cancel)
    pub state: Option<String>,

    // ===== 日期字段 (三个日期列共同喂给日期维度) =====
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub deadline: Option<NaiveDate>,

    // ===== 数量与效率度量 =====
    pub quantity_producing: Option<f64>,
    pub quantity_to_produce: Option<f64>,
    pub total_quantity: Option<f64>,
    pub production_efficiency: Option<f64>,
    pub production_duration_days: Option<f64>,

    // ===== 产品属性 =====
    pub product_code: Option<String>,
    pub product_name: Option<String>,
    pub product_category: Option<String>,
    pub product_cost: Option<f64>,
    pub product_sales_price: Option<f64>,
    pub profit_margin_percent: Option<f64>,
    /// 价格分级 (如 Low/Medium/High)
    pub price_category: Option<String>,
    /// 毛利分级
    pub margin_category: Option<String>,
}
