// ==========================================
// 生产数据仓库ETL - 代理键映射器
// ==========================================
// 职责: 自然键(字符串) → 稠密整数代理键的稳定双射
// 红线: 同一输入序列必须产生同一映射 (确定性)
// ==========================================

use std::collections::{HashMap, HashSet};

// ==========================================
// KeyMapper - 代理键映射器
// ==========================================
/// 按输入序列的迭代顺序,从 1 开始分配无空洞的整数代理键
///
/// 未收录的自然键查询返回 `None`: 事实行引用维度构建时
/// 不存在的键时落为 NULL 外键,而不是中止整次加载
#[derive(Debug, Clone, Default)]
pub struct KeyMapper {
    keys: HashMap<String, i64>,
}

impl KeyMapper {
    /// 由去重后的自然键序列构建映射
    ///
    /// # 参数
    /// - values: 去重后的自然键,顺序即代理键分配顺序
    pub fn from_distinct<I>(values: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut keys = HashMap::new();
        for (ordinal, value) in values.into_iter().enumerate() {
            keys.entry(value).or_insert(ordinal as i64 + 1);
        }
        Self { keys }
    }

    /// 查询自然键对应的代理键,未收录返回 None
    pub fn lookup(&self, value: &str) -> Option<i64> {
        self.keys.get(value).copied()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// 按首次出现顺序提取非缺失的去重值
///
/// 代理键分配顺序由该函数的输出顺序决定: 显式采用源数据中的
/// 首次出现顺序,而不依赖哈希表的偶然迭代顺序
pub fn distinct_first_seen<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut seen: HashSet<&str> = HashSet::new();
    let mut distinct = Vec::new();
    for value in values.into_iter().flatten() {
        if seen.insert(value) {
            distinct.push(value.to_string());
        }
    }
    distinct
}
