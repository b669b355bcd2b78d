// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use parking_lot::Mutex;
use std::collections::HashSet;

/// 爬取预算与访问记录
///
/// 一次爬取执行的页面配额计数器和已访问URL集合。
/// 每次执行构造一个新实例并以引用传入该执行派生的所有并发任务，
/// 绝不作为长生命周期策略对象的字段复用——并发执行之间共享
/// 访问状态会互相污染去重结果。
///
/// `try_reserve`是唯一的准入口径：访问检查、配额检查、标记和计数
/// 在同一把锁下完成，任意扇出并发下保持无竞争。
pub struct CrawlBudget {
    max_pages: usize,
    inner: Mutex<BudgetInner>,
}

struct BudgetInner {
    visited: HashSet<String>,
    admitted: usize,
}

impl CrawlBudget {
    /// 创建新的预算实例
    ///
    /// # 参数
    ///
    /// * `max_pages` - 本次执行允许抓取的页面总数上限
    pub fn new(max_pages: usize) -> Self {
        Self {
            max_pages,
            inner: Mutex::new(BudgetInner {
                visited: HashSet::new(),
                admitted: 0,
            }),
        }
    }

    /// 原子地尝试为URL预留一个抓取配额
    ///
    /// 当URL未被访问过且配额未用尽时，标记URL为已访问、计数加一
    /// 并返回true（调用方可以抓取）；否则返回false且无任何副作用
    /// （调用方必须跳过）。
    ///
    /// # 参数
    ///
    /// * `url` - 候选URL
    ///
    /// # 返回值
    ///
    /// 是否允许抓取该URL
    pub fn try_reserve(&self, url: &str) -> bool {
        let mut inner = self.inner.lock();

        if inner.admitted >= self.max_pages {
            return false;
        }
        if inner.visited.contains(url) {
            return false;
        }

        inner.visited.insert(url.to_string());
        inner.admitted += 1;
        true
    }

    /// 判断配额是否已用尽
    pub fn is_exhausted(&self) -> bool {
        self.inner.lock().admitted >= self.max_pages
    }

    /// 已预留的页面数
    pub fn pages_admitted(&self) -> usize {
        self.inner.lock().admitted
    }
}
