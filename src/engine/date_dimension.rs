// ==========================================
// 生产数据仓库ETL - 日期维度构建器
// ==========================================
// 职责: 从三个日期列派生去重、升序的日历维度
// 红线: DateKey 必须是 Date 的无损 YYYYMMDD 编码
// ==========================================

use crate::domain::production::RawProductionRecord;
use crate::domain::warehouse::DimDateRow;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

/// 日期 → YYYYMMDD 的 8 位整数键
///
/// 两个不同日期不会产生同一键,且键可精确还原年/月/日
pub fn date_key(date: NaiveDate) -> i64 {
    date.year() as i64 * 10_000 + date.month() as i64 * 100 + date.day() as i64
}

// ==========================================
// DateDimensionBuilder - 日期维度构建器
// ==========================================
/// 日期维度构建器
///
/// # 流程
/// 1. 收集 Start/End/Deadline 三列的全部非缺失日期
/// 2. 去重为日历日期集合
/// 3. 升序排序
/// 4. 逐日期派生年/季度/月/日/星期等属性
///
/// 三列全部为空时输出空维度(零行),这是合法结果而非错误
pub struct DateDimensionBuilder;

impl DateDimensionBuilder {
    pub fn build(records: &[RawProductionRecord]) -> Vec<DimDateRow> {
        // BTreeSet 同时完成去重与升序
        let mut dates: BTreeSet<NaiveDate> = BTreeSet::new();
        for record in records {
            for date in [record.start_date, record.end_date, record.deadline]
                .into_iter()
                .flatten()
            {
                dates.insert(date);
            }
        }

        dates.into_iter().map(Self::derive_row).collect()
    }

    fn derive_row(date: NaiveDate) -> DimDateRow {
        let month = date.month();
        DimDateRow {
            date_key: date_key(date),
            date,
            year: date.year(),
            // 按月份计算的季度: 1-3月=1, 4-6月=2, ...
            quarter: (month + 2) / 3,
            month,
            // %B/%A 输出与 locale 无关的英文全名
            month_name: date.format("%B").to_string(),
            day: date.day(),
            // 1=周一 .. 7=周日
            day_of_week: date.weekday().number_from_monday(),
            day_of_week_name: date.format("%A").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_dates(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        deadline: Option<NaiveDate>,
    ) -> RawProductionRecord {
        RawProductionRecord {
            start_date: start,
            end_date: end,
            deadline,
            ..Default::default()
        }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_date_key_encoding_round_trips() {
        let key = date_key(d(2024, 1, 10));
        assert_eq!(key, 20_240_110);

        let year = key / 10_000;
        let month = key / 100 % 100;
        let day = key % 100;
        assert_eq!((year, month, day), (2024, 1, 10));
    }

    #[test]
    fn test_distinct_dates_across_all_three_columns() {
        let records = vec![
            record_with_dates(Some(d(2024, 1, 10)), Some(d(2024, 1, 12)), Some(d(2024, 1, 15))),
            // 与上一条重叠的日期不产生新行
            record_with_dates(Some(d(2024, 1, 12)), None, Some(d(2024, 1, 10))),
        ];

        let rows = DateDimensionBuilder::build(&records);

        assert_eq!(rows.len(), 3);
        let keys: Vec<i64> = rows.iter().map(|r| r.date_key).collect();
        assert_eq!(keys, vec![20_240_110, 20_240_112, 20_240_115]);
    }

    #[test]
    fn test_rows_sorted_ascending_by_date() {
        let records = vec![
            record_with_dates(Some(d(2024, 6, 1)), None, None),
            record_with_dates(Some(d(2023, 12, 31)), None, None),
            record_with_dates(Some(d(2024, 2, 29)), None, None),
        ];

        let rows = DateDimensionBuilder::build(&records);
        let dates: Vec<NaiveDate> = rows.iter().map(|r| r.date).collect();

        assert_eq!(dates, vec![d(2023, 12, 31), d(2024, 2, 29), d(2024, 6, 1)]);
    }

    #[test]
    fn test_calendar_attributes() {
        let rows = DateDimensionBuilder::build(&[record_with_dates(
            Some(d(2024, 1, 10)),
            None,
            None,
        )]);

        let row = &rows[0];
        assert_eq!(row.year, 2024);
        assert_eq!(row.quarter, 1);
        assert_eq!(row.month, 1);
        assert_eq!(row.month_name, "January");
        assert_eq!(row.day, 10);
        // 2024-01-10 是周三
        assert_eq!(row.day_of_week, 3);
        assert_eq!(row.day_of_week_name, "Wednesday");
    }

    #[test]
    fn test_quarter_is_month_based() {
        let quarters: Vec<u32> = (1..=12)
            .map(|m| {
                let rows =
                    DateDimensionBuilder::build(&[record_with_dates(Some(d(2024, m, 1)), None, None)]);
                rows[0].quarter
            })
            .collect();

        assert_eq!(quarters, vec![1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4]);
    }

    #[test]
    fn test_sunday_maps_to_seven() {
        // 2024-01-14 是周日
        let rows =
            DateDimensionBuilder::build(&[record_with_dates(Some(d(2024, 1, 14)), None, None)]);

        assert_eq!(rows[0].day_of_week, 7);
        assert_eq!(rows[0].day_of_week_name, "Sunday");
    }

    #[test]
    fn test_no_dates_yields_empty_dimension() {
        let records = vec![record_with_dates(None, None, None)];

        assert!(DateDimensionBuilder::build(&records).is_empty());
        assert!(DateDimensionBuilder::build(&[]).is_empty());
    }
}
