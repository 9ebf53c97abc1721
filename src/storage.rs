//! 缓存目录与文件清理模块
//!
//! # 设计思路
//!
//! - 缓存目录在“外部存储”与“应用私有存储”之间二选一，选择逻辑是纯函数，
//!   平台状态通过 [`StorageState`] 以普通数据传入，便于覆盖所有组合测试。
//! - 目录清理只处理一层：删除目录下的直接子项，不递归。
//!
//! # 实现思路
//!
//! - 外部存储已挂载，或外部存储不可移除时，使用外部缓存目录；否则使用内部缓存目录。
//! - 选中外部目录但平台没有给出路径时，回退内部目录并记录警告。
//! - 清理时逐项删除，单项失败只记录到 [`DeleteSummary::failed`]，不中断其余项。
//! - 子目录只尝试一次非递归删除，非空子目录会删除失败并被记录。
//! - 路径不存在或不是目录时什么也不做。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::UtilError;

/// 外部存储介质状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaState {
    Mounted,
    MountedReadOnly,
    Unmounted,
    Removed,
    Checking,
    Shared,
    Unknown,
}

impl MediaState {
    /// 解析平台上报的状态字符串（如 `mounted`、`mounted_ro`）。未知值映射为 `Unknown`。
    pub fn from_platform_str(state: &str) -> Self {
        match state.trim() {
            "mounted" => Self::Mounted,
            "mounted_ro" => Self::MountedReadOnly,
            "unmounted" => Self::Unmounted,
            "removed" => Self::Removed,
            "checking" => Self::Checking,
            "shared" => Self::Shared,
            _ => Self::Unknown,
        }
    }
}

/// 平台存储状态快照。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageState {
    pub media_state: MediaState,
    /// 外部存储是否可移除（如 SD 卡）
    pub external_removable: bool,
    /// 外部缓存目录；平台不可用时为 `None`
    pub external_cache_dir: Option<PathBuf>,
    /// 应用私有缓存目录
    pub internal_cache_dir: PathBuf,
}

/// 获取缓存目录
///
/// # 返回
/// 外部存储已挂载或不可移除时返回外部缓存目录，否则返回内部缓存目录。
pub fn resolve_cache_dir(state: &StorageState) -> PathBuf {
    let prefer_external = state.media_state == MediaState::Mounted || !state.external_removable;
    if !prefer_external {
        return state.internal_cache_dir.clone();
    }

    match &state.external_cache_dir {
        Some(dir) => dir.clone(),
        None => {
            log::warn!(
                "⚠️ 外部存储可用但未提供缓存目录，回退内部缓存目录: {}",
                state.internal_cache_dir.display()
            );
            state.internal_cache_dir.clone()
        }
    }
}

/// 目录清理结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeleteSummary {
    /// 成功删除的子项数量
    pub deleted: u64,
    /// 删除失败的子项路径（如非空子目录、权限不足）
    pub failed: Vec<PathBuf>,
}

/// 删除目录下的文件（仅一层，不递归）
///
/// # 返回
/// - `Ok(DeleteSummary)` — 路径不存在或不是目录时为空摘要
/// - `Err(UtilError::Io)` — 目录存在但无法列出内容
pub fn delete_files_in(dir: impl AsRef<Path>) -> Result<DeleteSummary, UtilError> {
    let dir = dir.as_ref();
    let mut summary = DeleteSummary::default();

    if !dir.is_dir() {
        log::debug!("跳过清理，路径不存在或不是目录: {}", dir.display());
        return Ok(summary);
    }

    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("⚠️ 读取目录项失败 '{}': {}", dir.display(), e);
                continue;
            }
        };
        let path = entry.path();

        // 符号链接按文件删除，不跟随
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        let removed = if is_dir {
            fs::remove_dir(&path)
        } else {
            fs::remove_file(&path)
        };

        match removed {
            Ok(()) => summary.deleted += 1,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                log::warn!("⚠️ 删除失败 '{}': {}", path.display(), e);
                summary.failed.push(path);
            }
        }
    }

    log::debug!(
        "🧹 目录清理完成 - {} 删除: {} 失败: {}",
        dir.display(),
        summary.deleted,
        summary.failed.len()
    );
    Ok(summary)
}
