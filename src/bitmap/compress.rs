//! # 压缩编排模块
//!
//! ## 设计思路
//!
//! `compress_image` 只负责流程编排，单阶段逻辑分别在 `sampling` 与 `pipeline` 中。
//! 处理链路固定为：
//! 1. 嗅探文件类型并读取尺寸（不解码像素）
//! 2. 计算采样率
//! 3. 解码 + 降采样
//! 4. 质量压缩并写盘
//!
//! ## 实现思路
//!
//! - 每个阶段失败都以 `ImageError` 返回，不再吞掉异常。
//! - 像素缓冲与文件句柄均随作用域释放，任何退出路径都不会泄漏。
//! - 记录 `decode/encode/total` 阶段耗时，便于性能诊断。

use std::path::{Path, PathBuf};
use std::time::Instant;

use image::GenericImageView;
use serde::Serialize;

use super::config::CompressOptions;
use super::sampling::{compress_sample_size, sampled_dimensions};
use super::{pipeline, ImageError};

/// 一次压缩的结果摘要。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompressedImage {
    pub path: PathBuf,
    pub source_width: u32,
    pub source_height: u32,
    pub width: u32,
    pub height: u32,
    pub sample_size: u32,
    pub bytes_written: u64,
}

/// 图片压缩（尺寸压缩 + 质量压缩）。
///
/// # 参数
/// * `source`  - 源文件路径
/// * `dest`    - 压缩后的保存路径（已存在则覆盖）
/// * `options` - 最大宽高、质量、输出格式等
///
/// # 返回
/// - `Ok(CompressedImage)` — 已写入 `dest`
/// - `Err(ImageError)` — 任一阶段失败；此时 `dest` 不会留下半成品
pub fn compress_image(
    source: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    options: &CompressOptions,
) -> Result<CompressedImage, ImageError> {
    let source = source.as_ref();
    let dest = dest.as_ref();
    let started = Instant::now();

    let mime = pipeline::ensure_image_file(source)?;
    let (source_width, source_height) = pipeline::read_bounds(source)?;
    pipeline::validate_pixel_limits(options, source_width, source_height)?;

    let sample_size = compress_sample_size(source_width, source_height, options.max_width, options.max_height);
    let (width, height) = sampled_dimensions(source_width, source_height, sample_size);

    log::debug!(
        "📐 压缩参数 - 源: {} {}x{} 采样率: {} 目标: {}x{}",
        mime,
        source_width,
        source_height,
        sample_size,
        width,
        height
    );

    let decode_started = Instant::now();
    let decoded = pipeline::decode(source)?;
    let (raw_width, raw_height) = decoded.dimensions();
    if (raw_width, raw_height) != (source_width, source_height) {
        return Err(ImageError::Decode(format!(
            "解码尺寸与文件头不一致：{}x{} != {}x{}",
            raw_width, raw_height, source_width, source_height
        )));
    }
    let sampled = pipeline::downscale(decoded, width, height, options.filter);
    let decode_ms = decode_started.elapsed().as_millis();

    let encode_started = Instant::now();
    let bytes_written = pipeline::encode_to_file(&sampled, dest, options)?;
    let encode_ms = encode_started.elapsed().as_millis();
    drop(sampled);

    log::info!(
        "✅ 图片压缩完成 - {} -> {} 尺寸: {}x{} -> {}x{} 大小: {} bytes（decode={}ms encode={}ms total={}ms）",
        source.display(),
        dest.display(),
        source_width,
        source_height,
        width,
        height,
        bytes_written,
        decode_ms,
        encode_ms,
        started.elapsed().as_millis()
    );

    Ok(CompressedImage {
        path: dest.to_path_buf(),
        source_width,
        source_height,
        width,
        height,
        sample_size,
        bytes_written,
    })
}
