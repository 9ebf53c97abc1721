//! 前后台判断模块
//!
//! # 设计思路
//!
//! 平台的任务栈（Android `ActivityManager#getRunningTasks`、桌面端的窗口焦点等）
//! 通过 [`TaskStack`] 接口注入，判断逻辑本身只是“栈顶任务是否属于本应用”。
//!
//! # 实现思路
//!
//! - 只查询栈顶 1 个任务。
//! - 包名比较忽略 ASCII 大小写。
//! - 任务栈为空或查询失败时一律视为“在后台”。

use serde::{Deserialize, Serialize};

use crate::error::UtilError;

/// 任务栈中的一条任务。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningTask {
    /// 任务根 Activity 所属包名
    pub base_package: String,
}

impl RunningTask {
    pub fn new(base_package: impl Into<String>) -> Self {
        Self {
            base_package: base_package.into(),
        }
    }
}

/// 任务栈查询接口。
pub trait TaskStack {
    /// 返回最多 `max` 条正在运行的任务，栈顶在前。
    fn running_tasks(&self, max: usize) -> Result<Vec<RunningTask>, UtilError>;
}

impl TaskStack for Vec<RunningTask> {
    fn running_tasks(&self, max: usize) -> Result<Vec<RunningTask>, UtilError> {
        Ok(self.iter().take(max).cloned().collect())
    }
}

/// 判断应用是否在后台运行
///
/// # 参数
/// * `own_package` - 本应用包名
/// * `tasks`       - 任务栈
///
/// # 返回
/// 栈顶任务属于本应用时返回 `false`，其余情况（含任务栈为空 / 不可用）返回 `true`。
pub fn is_app_in_background(own_package: &str, tasks: &impl TaskStack) -> bool {
    let top = match tasks.running_tasks(1) {
        Ok(list) => list.into_iter().next(),
        Err(e) => {
            log::debug!("任务栈不可用，按后台处理: {}", e);
            None
        }
    };

    match top {
        Some(task) => !task.base_package.eq_ignore_ascii_case(own_package),
        None => true,
    }
}
