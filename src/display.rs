//! 屏幕参数查询模块
//!
//! # 设计思路
//!
//! 屏幕宽高与像素密度来自平台（Android `DisplayMetrics`、桌面端显示器等），
//! 这里只定义一个窄接口 [`DisplayMetrics`]，上层函数只依赖接口，不依赖具体平台。
//!
//! # 实现思路
//!
//! - 每次调用都重新查询平台，不做缓存，屏幕旋转后自然拿到新值。
//! - [`ScreenMetrics`] 自身实现了 `DisplayMetrics`，可作为固定屏幕用于测试或无头环境。

use serde::{Deserialize, Serialize};

use crate::error::UtilError;

/// 一次查询得到的屏幕参数快照。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenMetrics {
    /// 屏幕宽度（物理像素）
    pub width_pixels: u32,
    /// 屏幕高度（物理像素）
    pub height_pixels: u32,
    /// 密度比例（1dp 对应的像素数）
    pub density: f32,
}

impl ScreenMetrics {
    pub fn new(width_pixels: u32, height_pixels: u32, density: f32) -> Self {
        Self {
            width_pixels,
            height_pixels,
            density,
        }
    }
}

/// 屏幕参数提供方。
pub trait DisplayMetrics {
    /// 查询当前屏幕参数。
    fn current_metrics(&self) -> Result<ScreenMetrics, UtilError>;
}

impl DisplayMetrics for ScreenMetrics {
    fn current_metrics(&self) -> Result<ScreenMetrics, UtilError> {
        Ok(*self)
    }
}

impl<T: DisplayMetrics + ?Sized> DisplayMetrics for &T {
    fn current_metrics(&self) -> Result<ScreenMetrics, UtilError> {
        (**self).current_metrics()
    }
}

/// 获取屏幕宽度（像素）
pub fn screen_width(display: &impl DisplayMetrics) -> Result<u32, UtilError> {
    Ok(display.current_metrics()?.width_pixels)
}

/// 获取屏幕高度（像素）
pub fn screen_height(display: &impl DisplayMetrics) -> Result<u32, UtilError> {
    Ok(display.current_metrics()?.height_pixels)
}
