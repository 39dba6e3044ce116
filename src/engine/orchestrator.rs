// ==========================================
// 生产数据仓库ETL - 管道编排器
// ==========================================
// 职责: 按固定依赖顺序驱动维度构建与表加载
// 红线: 依赖的 KeyMapper 全量就绪前不得投影下游表;
//       单表加载失败只隔离该表,兄弟表继续
// ==========================================

use crate::domain::production::RawProductionRecord;
use crate::domain::table::{DataTable, LoadMode};
use crate::domain::warehouse::to_table;
use crate::engine::date_dimension::DateDimensionBuilder;
use crate::engine::entity_dimensions::{
    DepartmentDimensionBuilder, ProductCategoryDimensionBuilder, ProductDimensionBuilder,
};
use crate::engine::fact_projector::FactProjector;
use crate::repository::warehouse_loader::WarehouseLoader;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

// ==========================================
// 运行结果
// ==========================================
/// 单表加载结果
#[derive(Debug, Clone)]
pub struct TableLoadOutcome {
    pub table: &'static str,
    /// 成功写入的行数 (失败时为 0)
    pub rows: usize,
    pub error: Option<String>,
}

impl TableLoadOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// 一次 ETL 运行的汇总报告
#[derive(Debug, Clone)]
pub struct EtlRunReport {
    pub run_id: String,
    /// 源快照行数
    pub source_rows: usize,
    /// 按加载顺序排列的单表结果
    pub outcomes: Vec<TableLoadOutcome>,
    pub elapsed_ms: u128,
}

impl EtlRunReport {
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(TableLoadOutcome::succeeded)
    }

    pub fn failed_tables(&self) -> Vec<&'static str> {
        self.outcomes
            .iter()
            .filter(|o| !o.succeeded())
            .map(|o| o.table)
            .collect()
    }
}

// ==========================================
// EtlOrchestrator - 管道编排器
// ==========================================
/// ETL 管道编排器
///
/// # 流程 (固定依赖顺序, 单线程顺序执行)
/// 1. DimDate
/// 2. DimDepartment (产出部门 KeyMapper)
/// 3. DimProductCategory (产出类别 KeyMapper)
/// 4. DimProduct (消费类别 KeyMapper, 产出产品 KeyMapper)
/// 5. FactProduction (消费产品/部门 KeyMapper)
///
/// 所有表以 Replace 模式加载; 单表失败记入报告后继续
pub struct EtlOrchestrator<L: WarehouseLoader> {
    loader: Arc<L>,
}

impl<L: WarehouseLoader> EtlOrchestrator<L> {
    pub fn new(loader: Arc<L>) -> Self {
        Self { loader }
    }

    /// 对一份源快照执行完整的维度建模与加载
    pub fn run(&self, records: &[RawProductionRecord]) -> EtlRunReport {
        let run_id = Uuid::new_v4().to_string();
        let started = Instant::now();
        let mut outcomes = Vec::with_capacity(5);

        tracing::info!(run_id = %run_id, source_rows = records.len(), "维度建模开始");

        // === 步骤 1: 日期维度 ===
        let dim_date = DateDimensionBuilder::build(records);
        self.load_step(to_table(&dim_date), &mut outcomes);

        // === 步骤 2: 部门维度 ===
        let (dim_department, department_mapper) = DepartmentDimensionBuilder::build(records);
        self.load_step(to_table(&dim_department), &mut outcomes);

        // === 步骤 3: 产品类别维度 ===
        let (dim_category, category_mapper) = ProductCategoryDimensionBuilder::build(records);
        self.load_step(to_table(&dim_category), &mut outcomes);

        // === 步骤 4: 产品维度 (依赖类别映射) ===
        let (dim_product, product_mapper) =
            ProductDimensionBuilder::build(records, &category_mapper);
        self.load_step(to_table(&dim_product), &mut outcomes);

        // === 步骤 5: 事实表 (依赖产品/部门映射) ===
        let fact = FactProjector::project(records, &product_mapper, &department_mapper);
        self.load_step(to_table(&fact), &mut outcomes);

        let report = EtlRunReport {
            run_id,
            source_rows: records.len(),
            outcomes,
            elapsed_ms: started.elapsed().as_millis(),
        };

        if report.all_succeeded() {
            tracing::info!(
                run_id = %report.run_id,
                elapsed_ms = report.elapsed_ms,
                "维度建模完成, 全部表加载成功"
            );
        } else {
            tracing::warn!(
                run_id = %report.run_id,
                failed = ?report.failed_tables(),
                "维度建模完成, 部分表加载失败"
            );
        }

        report
    }

    /// 加载一张表; 失败记录并继续, 不中断兄弟表
    fn load_step(&self, table: DataTable, outcomes: &mut Vec<TableLoadOutcome>) {
        let name = table.name;
        match self.loader.load(&table, LoadMode::Replace) {
            Ok(rows) => outcomes.push(TableLoadOutcome {
                table: name,
                rows,
                error: None,
            }),
            Err(e) => {
                tracing::error!(table = name, error = %e, "表加载失败, 继续其余表");
                outcomes.push(TableLoadOutcome {
                    table: name,
                    rows: 0,
                    error: Some(e.to_string()),
                });
            }
        }
    }
}
