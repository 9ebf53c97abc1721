//! dp / px 单位换算
//!
//! 换算公式与平台一致：先乘（或除）密度，再加 0.5 向下取整完成四舍五入。
//! `as i32` 在溢出或 NaN 时饱和，不会 panic；密度应为正数，由调用方保证。

use crate::display::DisplayMetrics;
use crate::error::UtilError;

/// 根据密度从 dp 转为 px（像素）
pub fn dp_to_px(density: f32, dp: f32) -> i32 {
    (dp * density + 0.5).floor() as i32
}

/// 根据密度从 px（像素）转为 dp
pub fn px_to_dp(density: f32, px: f32) -> i32 {
    (px / density + 0.5).floor() as i32
}

/// 从屏幕参数读取密度后再换算 dp → px
pub fn dp_to_px_on(display: &impl DisplayMetrics, dp: f32) -> Result<i32, UtilError> {
    Ok(dp_to_px(display.current_metrics()?.density, dp))
}

/// 从屏幕参数读取密度后再换算 px → dp
pub fn px_to_dp_on(display: &impl DisplayMetrics, px: f32) -> Result<i32, UtilError> {
    Ok(px_to_dp(display.current_metrics()?.density, px))
}
