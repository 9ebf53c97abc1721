//! Tauri 平台实现
//!
//! # 设计思路
//!
//! 为 [`DisplayMetrics`] / [`TaskStack`] / [`StorageState`] 提供基于 Tauri `AppHandle`
//! 的实现，使同一套工具函数在桌面端与移动端（Tauri 2）都能直接使用。
//!
//! # 实现思路
//!
//! - 屏幕参数取自主显示器：物理尺寸 + `scale_factor` 作为密度。
//! - 任意 webview 窗口获得焦点时，栈顶任务即本应用（包名取 `identifier`）；否则任务栈为空。
//! - 缓存目录：外部目录取 `app_cache_dir`，内部目录取 `app_local_data_dir/cache`；
//!   桌面端磁盘视为“已挂载且不可移除”。

use tauri::{AppHandle, Manager, Runtime};

use crate::display::{DisplayMetrics, ScreenMetrics};
use crate::error::UtilError;
use crate::foreground::{RunningTask, TaskStack};
use crate::storage::{MediaState, StorageState};

/// 基于主显示器的屏幕参数提供方。
pub struct TauriDisplay<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> TauriDisplay<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }
}

impl<R: Runtime> DisplayMetrics for TauriDisplay<R> {
    fn current_metrics(&self) -> Result<ScreenMetrics, UtilError> {
        let monitor = self
            .app
            .primary_monitor()
            .map_err(|e| UtilError::Platform(format!("查询主显示器失败: {}", e)))?
            .ok_or_else(|| UtilError::Platform("未检测到主显示器".to_string()))?;

        let size = monitor.size();
        Ok(ScreenMetrics::new(size.width, size.height, monitor.scale_factor() as f32))
    }
}

/// 基于窗口焦点的任务栈。
pub struct TauriTaskStack<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> TauriTaskStack<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }

    /// 本应用标识，用作 `is_app_in_background` 的包名参数。
    pub fn own_package(&self) -> String {
        self.app.config().identifier.clone()
    }
}

impl<R: Runtime> TaskStack for TauriTaskStack<R> {
    fn running_tasks(&self, max: usize) -> Result<Vec<RunningTask>, UtilError> {
        if max == 0 {
            return Ok(Vec::new());
        }

        let focused = self
            .app
            .webview_windows()
            .values()
            .any(|window| window.is_focused().unwrap_or(false));

        if focused {
            Ok(vec![RunningTask::new(self.own_package())])
        } else {
            Ok(Vec::new())
        }
    }
}

/// 由应用目录构造存储状态快照。
pub fn tauri_storage_state<R: Runtime>(app: &AppHandle<R>) -> Result<StorageState, UtilError> {
    let path = app.path();

    let external = path
        .app_cache_dir()
        .inspect_err(|e| log::warn!("⚠️ 获取应用缓存目录失败: {}", e))
        .ok();
    let internal = path
        .app_local_data_dir()
        .map_err(|e| UtilError::Storage(format!("获取应用本地数据目录失败: {}", e)))?
        .join("cache");

    Ok(StorageState {
        media_state: MediaState::Mounted,
        external_removable: false,
        external_cache_dir: external,
        internal_cache_dir: internal,
    })
}

#[cfg(all(test, feature = "tauri-test"))]
mod tests {
    use super::*;
    use crate::foreground::is_app_in_background;
    use crate::storage::resolve_cache_dir;
    use tauri::test::mock_app;

    #[test]
    fn storage_state_uses_app_directories() {
        let app = mock_app();
        let state = tauri_storage_state(app.handle()).expect("storage state");

        assert_eq!(state.media_state, MediaState::Mounted);
        assert!(!state.external_removable);
        assert!(state.internal_cache_dir.ends_with("cache"));

        let external = state.external_cache_dir.clone().expect("app cache dir");
        assert_eq!(resolve_cache_dir(&state), external);
    }

    #[test]
    fn zero_max_yields_no_tasks() {
        let app = mock_app();
        let stack = TauriTaskStack::new(app.handle().clone());
        assert!(stack.running_tasks(0).expect("tasks").is_empty());
    }

    #[test]
    fn app_without_focused_window_is_background() {
        let app = mock_app();
        let stack = TauriTaskStack::new(app.handle().clone());

        assert!(stack.running_tasks(4).expect("tasks").is_empty());
        assert!(is_app_in_background(&stack.own_package(), &stack));
    }

    #[test]
    fn own_package_is_bundle_identifier() {
        let app = mock_app();
        let stack = TauriTaskStack::new(app.handle().clone());
        assert_eq!(stack.own_package(), app.config().identifier);
    }
}
