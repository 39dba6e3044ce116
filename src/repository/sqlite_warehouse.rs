// ==========================================
// 生产数据仓库ETL - SQLite 仓库实现
// ==========================================
// 职责: 建表、全量替换/追加、分批事务提交
// 约束: 所有写入使用参数化语句
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::table::{DataTable, LoadMode, SqlValue};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::warehouse_loader::WarehouseLoader;
use rusqlite::types::{ToSqlOutput, Value};
use rusqlite::{Connection, ToSql};
use std::sync::{Arc, Mutex};

/// 默认分批提交行数 (与源系统的周期提交口径一致)
pub const DEFAULT_BATCH_SIZE: usize = 1_000;

impl ToSql for SqlValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            SqlValue::Integer(v) => ToSqlOutput::from(*v),
            SqlValue::Real(v) => ToSqlOutput::from(*v),
            SqlValue::Text(v) => ToSqlOutput::from(v.as_str()),
            SqlValue::Date(d) => ToSqlOutput::from(d.format("%Y-%m-%d").to_string()),
            SqlValue::Null => ToSqlOutput::Owned(Value::Null),
        })
    }
}

// ==========================================
// SqliteWarehouseRepository
// ==========================================
/// SQLite 仓库加载器
///
/// 连接在构造时获取,随实例析构释放(所有退出路径一致)
pub struct SqliteWarehouseRepository {
    conn: Arc<Mutex<Connection>>,
    batch_size: usize,
}

impl SqliteWarehouseRepository {
    /// 创建新的仓库实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    /// - batch_size: 每个事务提交的行数
    pub fn new(db_path: &str, batch_size: usize) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            batch_size: batch_size.max(1),
        })
    }

    /// 从已有连接创建仓库实例 (连接 PRAGMA 已由 db 模块统一)
    pub fn from_connection(conn: Arc<Mutex<Connection>>, batch_size: usize) -> Self {
        Self {
            conn,
            batch_size: batch_size.max(1),
        }
    }

    fn create_table_sql(table: &DataTable) -> String {
        let columns = table
            .columns
            .iter()
            .map(|c| format!("{} {}", c.name, c.sql_type))
            .collect::<Vec<_>>()
            .join(", ");
        format!("CREATE TABLE IF NOT EXISTS {} ({})", table.name, columns)
    }

    fn insert_sql(table: &DataTable) -> String {
        let columns = table
            .columns
            .iter()
            .map(|c| c.name)
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = (1..=table.columns.len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table.name, columns, placeholders
        )
    }
}

impl WarehouseLoader for SqliteWarehouseRepository {
    fn load(&self, table: &DataTable, mode: LoadMode) -> RepositoryResult<usize> {
        if !table.is_rectangular() {
            return Err(RepositoryError::ValidationError(format!(
                "表 {} 存在与列定义宽度不一致的行",
                table.name
            )));
        }

        let mut conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        conn.execute(&Self::create_table_sql(table), [])?;

        if mode == LoadMode::Replace {
            let purged = conn.execute(&format!("DELETE FROM {}", table.name), [])?;
            if purged > 0 {
                tracing::debug!(table = table.name, rows = purged, "已清空既有数据");
            }
        }

        let insert_sql = Self::insert_sql(table);
        let mut total = 0usize;

        for chunk in table.rows.chunks(self.batch_size) {
            let tx = conn
                .transaction()
                .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
            {
                let mut stmt = tx.prepare(&insert_sql)?;
                for row in chunk {
                    stmt.execute(rusqlite::params_from_iter(row.iter()))?;
                    total += 1;
                }
            }
            tx.commit()
                .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
            tracing::debug!(table = table.name, committed = total, "分批提交");
        }

        tracing::info!(table = table.name, rows = total, mode = %mode, "表加载完成");
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::ColumnDef;

    fn sample_table(rows: Vec<Vec<SqlValue>>) -> DataTable {
        static COLS: &[ColumnDef] = &[
            ColumnDef { name: "Id", sql_type: "INTEGER NOT NULL" },
            ColumnDef { name: "Name", sql_type: "TEXT" },
        ];
        DataTable {
            name: "SampleTable",
            columns: COLS,
            rows,
        }
    }

    fn memory_repo(batch_size: usize) -> SqliteWarehouseRepository {
        let conn = Connection::open_in_memory().expect("打开内存数据库失败");
        SqliteWarehouseRepository::from_connection(Arc::new(Mutex::new(conn)), batch_size)
    }

    fn count_rows(repo: &SqliteWarehouseRepository) -> i64 {
        let conn = repo.conn.lock().unwrap();
        conn.query_row("SELECT COUNT(*) FROM SampleTable", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_replace_leaves_no_stale_rows() {
        let repo = memory_repo(2);

        let first = sample_table(vec![
            vec![SqlValue::Integer(1), SqlValue::Text("a".to_string())],
            vec![SqlValue::Integer(2), SqlValue::Text("b".to_string())],
            vec![SqlValue::Integer(3), SqlValue::Null],
        ]);
        assert_eq!(repo.load(&first, LoadMode::Replace).unwrap(), 3);

        let second = sample_table(vec![vec![SqlValue::Integer(9), SqlValue::Null]]);
        assert_eq!(repo.load(&second, LoadMode::Replace).unwrap(), 1);
        assert_eq!(count_rows(&repo), 1);
    }

    #[test]
    fn test_append_keeps_existing_rows() {
        let repo = memory_repo(10);

        let table = sample_table(vec![vec![SqlValue::Integer(1), SqlValue::Null]]);
        repo.load(&table, LoadMode::Replace).unwrap();
        repo.load(&table, LoadMode::Append).unwrap();

        assert_eq!(count_rows(&repo), 2);
    }

    #[test]
    fn test_null_markers_become_sql_null() {
        let repo = memory_repo(10);
        let table = sample_table(vec![vec![SqlValue::Integer(1), SqlValue::Null]]);
        repo.load(&table, LoadMode::Replace).unwrap();

        let conn = repo.conn.lock().unwrap();
        let name: Option<String> = conn
            .query_row("SELECT Name FROM SampleTable WHERE Id = 1", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(name, None);
    }

    #[test]
    fn test_ragged_table_is_rejected() {
        let repo = memory_repo(10);
        let table = sample_table(vec![vec![SqlValue::Integer(1)]]);

        let result = repo.load(&table, LoadMode::Replace);
        assert!(matches!(result, Err(RepositoryError::ValidationError(_))));
    }

    #[test]
    fn test_empty_table_loads_zero_rows() {
        let repo = memory_repo(10);
        let table = sample_table(Vec::new());

        assert_eq!(repo.load(&table, LoadMode::Replace).unwrap(), 0);
        assert_eq!(count_rows(&repo), 0);
    }
}
