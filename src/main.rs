// ==========================================
// 生产数据仓库ETL - 批处理入口
// ==========================================
// 职责: 初始化日志 → 加载配置 → 读取快照 → 运行管道
// 口径: 只有快照读取失败对整次运行致命;
//       单表加载失败已在管道内隔离,这里只反映到退出码
// ==========================================

use production_dw_etl::config::EtlConfig;
use production_dw_etl::engine::EtlOrchestrator;
use production_dw_etl::importer::SnapshotReader;
use production_dw_etl::repository::SqliteWarehouseRepository;
use production_dw_etl::logging;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", production_dw_etl::APP_NAME);
    tracing::info!("系统版本: {}", production_dw_etl::VERSION);
    tracing::info!("==================================================");

    // 可选的第一个参数: 配置文件路径
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = match EtlConfig::load_or_default(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("配置加载失败: {:#}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("使用仓库数据库: {}", config.warehouse_path);

    // 快照读取失败 → 致命, 没有任何表可以派生
    let records = match SnapshotReader::new().read(&config.snapshot_path) {
        Ok(records) => records,
        Err(e) => {
            tracing::error!("读取源快照失败: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let repository = match SqliteWarehouseRepository::new(&config.warehouse_path, config.batch_size)
    {
        Ok(repository) => repository,
        Err(e) => {
            tracing::error!("仓库数据库连接失败: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let orchestrator = EtlOrchestrator::new(Arc::new(repository));
    let report = orchestrator.run(&records);

    for outcome in &report.outcomes {
        match &outcome.error {
            None => tracing::info!(table = outcome.table, rows = outcome.rows, "加载成功"),
            Some(error) => tracing::error!(table = outcome.table, error = %error, "加载失败"),
        }
    }

    if report.all_succeeded() {
        tracing::info!(run_id = %report.run_id, "数据加载全部完成");
        ExitCode::SUCCESS
    } else {
        tracing::warn!(
            run_id = %report.run_id,
            failed = ?report.failed_tables(),
            "运行结束, 存在加载失败的表"
        );
        ExitCode::FAILURE
    }
}
