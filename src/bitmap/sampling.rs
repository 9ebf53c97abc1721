//! # 采样率计算
//!
//! 纯整数/浮点运算，不依赖解码器，便于单元测试。
//!
//! - [`calculate_sample_size`]：按“请求尺寸”计算缩放比，取宽高两个比率中较小者，
//!   保证解码结果在两个方向上都不小于请求尺寸。
//! - [`compress_sample_size`]：按“最大尺寸”计算缩放比，只看占优的那一条边。

/// 计算图片的缩放比（采样率）。
///
/// 已在请求范围内时返回 1；否则返回 `min(round(w / req_w), round(h / req_h))`，且至少为 1。
/// 请求尺寸为 0 时按 1 处理。
///
/// ```rust
/// use android_util::bitmap::calculate_sample_size;
///
/// assert_eq!(calculate_sample_size(2000, 1000, 500, 500), 2);
/// assert_eq!(calculate_sample_size(400, 300, 500, 500), 1);
/// ```
pub fn calculate_sample_size(width: u32, height: u32, req_width: u32, req_height: u32) -> u32 {
    let req_width = req_width.max(1);
    let req_height = req_height.max(1);

    if width <= req_width && height <= req_height {
        return 1;
    }

    // 实际宽高与目标宽高的比率，取较小者
    let width_ratio = (width as f32 / req_width as f32).round() as u32;
    let height_ratio = (height as f32 / req_height as f32).round() as u32;

    width_ratio.min(height_ratio).max(1)
}

/// 按占优边计算压缩采样率。
///
/// - 宽图且宽超过 `max_width`：`width / max_width`
/// - 高图且高超过 `max_height`：`height / max_height`
/// - 其余情况（包括正方形图）：1，即正方形图不缩小
pub fn compress_sample_size(width: u32, height: u32, max_width: u32, max_height: u32) -> u32 {
    let max_width = max_width.max(1);
    let max_height = max_height.max(1);

    let size = if width > height && width > max_width {
        width / max_width
    } else if width < height && height > max_height {
        height / max_height
    } else {
        1
    };

    size.max(1)
}

/// 以采样率 `sample_size` 解码后的尺寸（向上取整，至少 1 像素）。
pub fn sampled_dimensions(width: u32, height: u32, sample_size: u32) -> (u32, u32) {
    let n = sample_size.max(1);
    (width.div_ceil(n).max(1), height.div_ceil(n).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn within_bounds_returns_one() {
        assert_eq!(calculate_sample_size(500, 500, 500, 500), 1);
        assert_eq!(calculate_sample_size(100, 80, 500, 500), 1);
    }

    #[test]
    fn picks_smaller_ratio() {
        // 宽比率 4，高比率 2
        assert_eq!(calculate_sample_size(2000, 1000, 500, 500), 2);
        assert_eq!(calculate_sample_size(1000, 4000, 500, 500), 2);
    }

    #[test]
    fn ratios_are_rounded() {
        // 1250 / 500 = 2.5 → 3，1400 / 500 = 2.8 → 3
        assert_eq!(calculate_sample_size(1250, 1400, 500, 500), 3);
        // 1200 / 500 = 2.4 → 2
        assert_eq!(calculate_sample_size(1200, 1400, 500, 500), 2);
    }

    #[test]
    fn one_axis_far_below_request_still_yields_one() {
        // 宽比率 round(0.2) = 0，结果夹到 1
        assert_eq!(calculate_sample_size(100, 2000, 500, 500), 1);
    }

    #[test]
    fn zero_request_is_treated_as_one() {
        assert_eq!(calculate_sample_size(10, 10, 0, 0), 10);
    }

    #[test]
    fn compress_uses_dominant_edge() {
        assert_eq!(compress_sample_size(4000, 3000, 1000, 1000), 4);
        assert_eq!(compress_sample_size(3000, 4000, 1000, 1000), 4);
        assert_eq!(compress_sample_size(1500, 1000, 1000, 1000), 1);
        assert_eq!(compress_sample_size(800, 600, 1080, 1920), 1);
    }

    #[test]
    fn compress_keeps_square_source_at_full_size() {
        assert_eq!(compress_sample_size(3000, 3000, 1000, 1000), 1);
        assert_eq!(compress_sample_size(3000, 3000, 1000, 2000), 1);
    }

    #[test]
    fn sampled_dimensions_round_up() {
        assert_eq!(sampled_dimensions(4000, 3000, 4), (1000, 750));
        assert_eq!(sampled_dimensions(1001, 7, 2), (501, 4));
        assert_eq!(sampled_dimensions(5, 5, 0), (5, 5));
    }
}
