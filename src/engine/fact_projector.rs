// ==========================================
// 生产数据仓库ETL - 事实投影器
// ==========================================
// 职责: 源记录 1:1 投影为事实行,自然键替换为代理键
// 红线: 不得丢行, 输入行数 == 输出行数
// ==========================================

use crate::domain::production::RawProductionRecord;
use crate::domain::warehouse::FactProductionRow;
use crate::engine::date_dimension::date_key;
use crate::engine::key_mapper::KeyMapper;

// ==========================================
// FactProjector - 事实投影器
// ==========================================
/// 事实投影器
///
/// 每条源记录恰好产出一行事实: 外键字段在对应 KeyMapper 中查询,
/// 缺失或未映射时置 NULL; 度量字段原样通过, 缺失归一为 NULL。
/// 日期键直接由日期值派生(YYYYMMDD), 与日期维度的键构造一致
pub struct FactProjector;

impl FactProjector {
    /// # 参数
    /// - product_mapper: 产品代码 → ProductKey
    /// - department_mapper: 负责部门 → DepartmentKey
    pub fn project(
        records: &[RawProductionRecord],
        product_mapper: &KeyMapper,
        department_mapper: &KeyMapper,
    ) -> Vec<FactProductionRow> {
        records
            .iter()
            .map(|r| Self::project_one(r, product_mapper, department_mapper))
            .collect()
    }

    fn project_one(
        record: &RawProductionRecord,
        product_mapper: &KeyMapper,
        department_mapper: &KeyMapper,
    ) -> FactProductionRow {
        FactProductionRow {
            reference: record.reference.clone(),
            product_key: record
                .product_code
                .as_deref()
                .and_then(|code| product_mapper.lookup(code)),
            department_key: record
                .responsible
                .as_deref()
                .and_then(|name| department_mapper.lookup(name)),
            start_date_key: record.start_date.map(date_key),
            end_date_key: record.end_date.map(date_key),
            deadline_date_key: record.deadline.map(date_key),
            state: record.state.clone(),
            quantity_producing: record.quantity_producing,
            quantity_to_produce: record.quantity_to_produce,
            total_quantity: record.total_quantity,
            production_efficiency: record.production_efficiency,
            production_duration_days: record.production_duration_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn mapper(values: &[&str]) -> KeyMapper {
        KeyMapper::from_distinct(values.iter().map(|v| v.to_string()))
    }

    #[test]
    fn test_row_count_is_preserved() {
        let records = vec![
            RawProductionRecord::default(),
            RawProductionRecord::default(),
            RawProductionRecord::default(),
        ];

        let rows = FactProjector::project(&records, &mapper(&[]), &mapper(&[]));

        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let rows = FactProjector::project(&[], &mapper(&["P1"]), &mapper(&["Assembly"]));

        assert!(rows.is_empty());
    }

    #[test]
    fn test_mapped_keys_match_mapper_assignment() {
        let record = RawProductionRecord {
            reference: Some("MO001".to_string()),
            product_code: Some("P2".to_string()),
            responsible: Some("Assembly".to_string()),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 10),
            ..Default::default()
        };

        let rows = FactProjector::project(
            &[record],
            &mapper(&["P1", "P2"]),
            &mapper(&["Assembly"]),
        );

        assert_eq!(rows[0].product_key, Some(2));
        assert_eq!(rows[0].department_key, Some(1));
        assert_eq!(rows[0].start_date_key, Some(20_240_110));
    }

    #[test]
    fn test_unmapped_or_missing_keys_become_null() {
        let record = RawProductionRecord {
            // 维度构建后才出现的代码 → NULL 外键, 行仍然产出
            product_code: Some("P99".to_string()),
            responsible: None,
            ..Default::default()
        };

        let rows = FactProjector::project(&[record], &mapper(&["P1"]), &mapper(&["Assembly"]));

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].product_key, None);
        assert_eq!(rows[0].department_key, None);
        assert_eq!(rows[0].start_date_key, None);
        assert_eq!(rows[0].end_date_key, None);
        assert_eq!(rows[0].deadline_date_key, None);
    }

    #[test]
    fn test_measures_pass_through_unchanged() {
        let record = RawProductionRecord {
            state: Some("done".to_string()),
            quantity_producing: Some(5.0),
            quantity_to_produce: Some(10.0),
            total_quantity: Some(15.0),
            production_efficiency: Some(0.5),
            production_duration_days: Some(2.0),
            ..Default::default()
        };

        let rows = FactProjector::project(&[record], &mapper(&[]), &mapper(&[]));

        let row = &rows[0];
        assert_eq!(row.state.as_deref(), Some("done"));
        assert_eq!(row.quantity_producing, Some(5.0));
        assert_eq!(row.quantity_to_produce, Some(10.0));
        assert_eq!(row.total_quantity, Some(15.0));
        assert_eq!(row.production_efficiency, Some(0.5));
        assert_eq!(row.production_duration_days, Some(2.0));
    }
}
