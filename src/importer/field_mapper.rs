// ==========================================
// 生产数据仓库ETL - 字段映射器
// ==========================================
// 职责: 原始字符串记录 → 类型化 RawProductionRecord
// 口径: 缺失哨兵值与解析失败一律归一为 None,不在行级报错
// ==========================================

use crate::domain::production::RawProductionRecord;
use crate::importer::file_parser::RawRow;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// 快照中的缺失值哨兵 (大小写不敏感)
const MISSING_SENTINELS: &[&str] = &["", "nan", "null", "none", "n/a"];

// ==========================================
// FieldMapper - 字段映射器
// ==========================================
pub struct FieldMapper;

impl FieldMapper {
    /// 把解析出的原始行批量映射为类型化记录 (行数 1:1 保持)
    pub fn map_rows(rows: &[RawRow]) -> Vec<RawProductionRecord> {
        rows.iter().map(Self::map_row).collect()
    }

    fn map_row(row: &RawRow) -> RawProductionRecord {
        RawProductionRecord {
            reference: Self::opt_string(row, "Reference"),
            responsible: Self::opt_string(row, "Responsible"),
            state: Self::opt_string(row, "State"),
            start_date: Self::opt_date(row, "Start"),
            end_date: Self::opt_date(row, "End"),
            deadline: Self::opt_date(row, "Deadline"),
            quantity_producing: Self::opt_f64(row, "Quantity_Producing"),
            quantity_to_produce: Self::opt_f64(row, "Quantity_To_Produce"),
            total_quantity: Self::opt_f64(row, "Total_Quantity"),
            production_efficiency: Self::opt_f64(row, "Production_Efficiency"),
            production_duration_days: Self::opt_f64(row, "Production_Duration_Days"),
            product_code: Self::opt_string(row, "Product_Code"),
            product_name: Self::opt_string(row, "Product_Name"),
            product_category: Self::opt_string(row, "Product_Category"),
            product_cost: Self::opt_f64(row, "Product_Cost"),
            product_sales_price: Self::opt_f64(row, "Product_Sales_Price"),
            profit_margin_percent: Self::opt_f64(row, "Profit_Margin_Percent"),
            price_category: Self::opt_string(row, "Price_Category"),
            margin_category: Self::opt_string(row, "Margin_Category"),
        }
    }

    /// 取出单元格文本; 缺失哨兵 → None
    fn cell<'a>(row: &'a RawRow, column: &str) -> Option<&'a str> {
        let value = row.get(column)?.trim();
        if MISSING_SENTINELS.contains(&value.to_lowercase().as_str()) {
            None
        } else {
            Some(value)
        }
    }

    fn opt_string(row: &RawRow, column: &str) -> Option<String> {
        Self::cell(row, column).map(str::to_string)
    }

    fn opt_f64(row: &RawRow, column: &str) -> Option<f64> {
        let raw = Self::cell(row, column)?;
        match raw.parse::<f64>() {
            // 解析出的 NaN 哨兵同样归一为缺失
            Ok(v) if v.is_nan() => None,
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(column, value = raw, "数值解析失败, 按缺失处理");
                None
            }
        }
    }

    /// 日期单元格: 接受日期、日期时间、RFC3339 三种形式,
    /// 时间部分截断到日历日期
    fn opt_date(row: &RawRow, column: &str) -> Option<NaiveDate> {
        let raw = Self::cell(row, column)?;

        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date);
        }
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
            return Some(datetime.date());
        }
        if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
            return Some(datetime.date_naive());
        }

        tracing::warn!(column, value = raw, "日期解析失败, 按缺失处理");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_typed_fields_are_mapped() {
        let record = FieldMapper::map_row(&row(&[
            ("Reference", "MO001"),
            ("Product_Code", "P1"),
            ("Responsible", "Assembly"),
            ("Start", "2024-01-10"),
            ("Quantity_To_Produce", "10"),
            ("Product_Cost", "99.5"),
        ]));

        assert_eq!(record.reference.as_deref(), Some("MO001"));
        assert_eq!(record.product_code.as_deref(), Some("P1"));
        assert_eq!(record.responsible.as_deref(), Some("Assembly"));
        assert_eq!(
            record.start_date,
            NaiveDate::from_ymd_opt(2024, 1, 10)
        );
        assert_eq!(record.quantity_to_produce, Some(10.0));
        assert_eq!(record.product_cost, Some(99.5));
    }

    #[test]
    fn test_missing_sentinels_normalize_to_none() {
        for sentinel in ["", "NaN", "nan", "NULL", "None", "N/A"] {
            let record = FieldMapper::map_row(&row(&[
                ("Responsible", sentinel),
                ("Quantity_To_Produce", sentinel),
                ("Start", sentinel),
            ]));

            assert_eq!(record.responsible, None, "哨兵: {:?}", sentinel);
            assert_eq!(record.quantity_to_produce, None);
            assert_eq!(record.start_date, None);
        }
    }

    #[test]
    fn test_datetime_forms_truncate_to_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 10);

        let plain = FieldMapper::map_row(&row(&[("Start", "2024-01-10 08:30:00")]));
        assert_eq!(plain.start_date, expected);

        let rfc3339 = FieldMapper::map_row(&row(&[("Start", "2024-01-10T08:30:00Z")]));
        assert_eq!(rfc3339.start_date, expected);
    }

    #[test]
    fn test_unparseable_values_become_none() {
        let record = FieldMapper::map_row(&row(&[
            ("Start", "not-a-date"),
            ("Quantity_To_Produce", "ten"),
        ]));

        assert_eq!(record.start_date, None);
        assert_eq!(record.quantity_to_produce, None);
    }

    #[test]
    fn test_absent_columns_map_to_none() {
        let record = FieldMapper::map_row(&row(&[("Reference", "MO001")]));

        assert_eq!(record.product_code, None);
        assert_eq!(record.state, None);
        assert_eq!(record.deadline, None);
    }
}
