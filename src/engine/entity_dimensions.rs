// ==========================================
// 生产数据仓库ETL - 实体维度构建器
// ==========================================
// 职责: 部门/产品类别/产品三个维度的去重与代理键分配
// 红线: 构建顺序 Department/Category → Product → Fact,
//       依赖的 KeyMapper 未就绪前不得开始下游构建
// ==========================================

use crate::domain::production::RawProductionRecord;
use crate::domain::warehouse::{DimDepartmentRow, DimProductCategoryRow, DimProductRow};
use crate::engine::key_mapper::{distinct_first_seen, KeyMapper};
use std::collections::{HashMap, HashSet};

// ==========================================
// DepartmentDimensionBuilder - 部门维度
// ==========================================
/// 部门维度构建器
///
/// 对 Responsible 列去缺失、按首次出现顺序去重,逐序号产出
/// `DEPT_<序号>` 合成标识与整数代理键
pub struct DepartmentDimensionBuilder;

impl DepartmentDimensionBuilder {
    pub fn build(records: &[RawProductionRecord]) -> (Vec<DimDepartmentRow>, KeyMapper) {
        let names = distinct_first_seen(records.iter().map(|r| r.responsible.as_deref()));
        let mapper = KeyMapper::from_distinct(names.iter().cloned());

        let rows = names
            .into_iter()
            .enumerate()
            .map(|(ordinal, name)| DimDepartmentRow {
                department_id: format!("DEPT_{}", ordinal + 1),
                department_key: ordinal as i64 + 1,
                department_name: name,
            })
            .collect();

        (rows, mapper)
    }
}

// ==========================================
// ProductCategoryDimensionBuilder - 产品类别维度
// ==========================================
pub struct ProductCategoryDimensionBuilder;

impl ProductCategoryDimensionBuilder {
    pub fn build(records: &[RawProductionRecord]) -> (Vec<DimProductCategoryRow>, KeyMapper) {
        let names = distinct_first_seen(records.iter().map(|r| r.product_category.as_deref()));
        let mapper = KeyMapper::from_distinct(names.iter().cloned());

        let rows = names
            .into_iter()
            .enumerate()
            .map(|(ordinal, name)| DimProductCategoryRow {
                product_category_key: ordinal as i64 + 1,
                product_category_name: name,
            })
            .collect();

        (rows, mapper)
    }
}

// ==========================================
// ProductDimensionBuilder - 产品维度
// ==========================================
/// 产品维度构建器
///
/// 去重粒度是完整属性元组,而 ProductKey 映射只按 ProductCode
/// 的去重顺序分配: 同一代码带多组属性时会产出多行并共用同一
/// ProductKey。这是对源口径的保留,构建时对每个这样的代码告警
pub struct ProductDimensionBuilder;

/// 去重用的属性元组指纹 (浮点按位参与比较)
#[derive(Hash, PartialEq, Eq)]
struct ProductTuple {
    code: String,
    name: Option<String>,
    category: Option<String>,
    cost_bits: Option<u64>,
    sales_price_bits: Option<u64>,
    margin_bits: Option<u64>,
    price_category: Option<String>,
    margin_category: Option<String>,
}

impl ProductTuple {
    fn of(record: &RawProductionRecord, code: &str) -> Self {
        Self {
            code: code.to_string(),
            name: record.product_name.clone(),
            category: record.product_category.clone(),
            cost_bits: record.product_cost.map(f64::to_bits),
            sales_price_bits: record.product_sales_price.map(f64::to_bits),
            margin_bits: record.profit_margin_percent.map(f64::to_bits),
            price_category: record.price_category.clone(),
            margin_category: record.margin_category.clone(),
        }
    }
}

impl ProductDimensionBuilder {
    /// # 参数
    /// - category_mapper: 同一次运行中先行构建的类别映射
    pub fn build(
        records: &[RawProductionRecord],
        category_mapper: &KeyMapper,
    ) -> (Vec<DimProductRow>, KeyMapper) {
        let codes = distinct_first_seen(records.iter().map(|r| r.product_code.as_deref()));
        let mapper = KeyMapper::from_distinct(codes.iter().cloned());

        let mut seen: HashSet<ProductTuple> = HashSet::new();
        let mut rows: Vec<DimProductRow> = Vec::new();

        for record in records {
            let code = match record.product_code.as_deref() {
                Some(code) => code,
                None => continue,
            };
            if !seen.insert(ProductTuple::of(record, code)) {
                continue;
            }
            let product_key = match mapper.lookup(code) {
                Some(key) => key,
                None => continue,
            };

            rows.push(DimProductRow {
                product_key,
                product_code: code.to_string(),
                product_name: record.product_name.clone(),
                product_category_key: record
                    .product_category
                    .as_deref()
                    .and_then(|c| category_mapper.lookup(c)),
                product_cost: record.product_cost,
                product_sales_price: record.product_sales_price,
                profit_margin_percent: record.profit_margin_percent,
                price_category: record.price_category.clone(),
                margin_category: record.margin_category.clone(),
            });
        }

        Self::warn_ambiguous_codes(&rows);

        (rows, mapper)
    }

    /// 同一代码产出多行时, 事实表的 ProductKey 无法区分指向哪一行
    fn warn_ambiguous_codes(rows: &[DimProductRow]) {
        let mut per_code: HashMap<&str, usize> = HashMap::new();
        for row in rows {
            *per_code.entry(row.product_code.as_str()).or_insert(0) += 1;
        }
        for (code, count) in per_code {
            if count > 1 {
                tracing::warn!(
                    product_code = code,
                    rows = count,
                    "产品代码携带多组属性元组, 多行共用同一 ProductKey"
                );
            }
        }
    }
}
