//! # 解码与编码流水线模块
//!
//! ## 设计思路
//!
//! 将“文件 → 尺寸 → 像素 → 降采样 → 编码写盘”的过程集中管理，并在关键节点增加资源上限控制。
//! 优先只读 header 做尺寸检查，再进行完整解码，降低超大输入触发高内存开销的风险。
//!
//! ## 实现思路
//!
//! 1. `infer` 嗅探文件头，确认是图片
//! 2. 只读 header 获取宽高（不分配像素缓冲）
//! 3. 按像素上限快速拒绝
//! 4. 完整解码后按采样率缩小（`fast_image_resize`，失败回退 `image::resize_exact`）
//! 5. 编码写入目标文件；失败时删除残留的半成品文件

use fast_image_resize as fr;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, GenericImageView, ImageBuffer, ImageReader, Rgba};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use super::config::{CompressFormat, CompressOptions, ResizeFilter};
use super::ImageError;

/// 确认源文件存在且文件头是图片格式。
pub(crate) fn ensure_image_file(path: &Path) -> Result<&'static str, ImageError> {
    if !path.exists() {
        return Err(ImageError::FileSystem(format!("文件不存在：{}", path.display())));
    }

    let kind = infer::get_from_path(path)
        .map_err(|e| ImageError::FileSystem(format!("无法读取文件头 '{}'：{}", path.display(), e)))?
        .ok_or_else(|| ImageError::InvalidFormat(format!("无法识别的文件类型：{}", path.display())))?;

    if kind.matcher_type() != infer::MatcherType::Image {
        return Err(ImageError::InvalidFormat(format!(
            "不是图片类型：{}（{}）",
            kind.mime_type(),
            path.display()
        )));
    }

    Ok(kind.mime_type())
}

/// 仅读取图片头信息中的宽高，不解码像素。
pub fn read_bounds(path: &Path) -> Result<(u32, u32), ImageError> {
    let reader = ImageReader::open(path)
        .map_err(|e| ImageError::FileSystem(format!("无法打开图片 '{}'：{}", path.display(), e)))?
        .with_guessed_format()
        .map_err(|e| ImageError::InvalidFormat(format!("无法识别图片格式：{}", e)))?;

    reader
        .into_dimensions()
        .map_err(|e| ImageError::InvalidFormat(format!("无法读取图片尺寸：{}", e)))
}

/// 校验像素数量是否超过配置上限。
pub(crate) fn validate_pixel_limits(options: &CompressOptions, width: u32, height: u32) -> Result<(), ImageError> {
    let pixels = (width as u64)
        .checked_mul(height as u64)
        .ok_or_else(|| ImageError::ResourceLimit("图片像素数溢出".to_string()))?;

    if pixels > options.max_source_pixels {
        return Err(ImageError::ResourceLimit(format!(
            "图片像素过大：{} 像素（限制：{} 像素）",
            pixels, options.max_source_pixels
        )));
    }

    Ok(())
}

/// 完整解码源文件。
pub(crate) fn decode(path: &Path) -> Result<DynamicImage, ImageError> {
    ImageReader::open(path)
        .map_err(|e| ImageError::FileSystem(format!("无法打开图片 '{}'：{}", path.display(), e)))?
        .with_guessed_format()
        .map_err(|e| ImageError::InvalidFormat(format!("无法识别图片格式：{}", e)))?
        .decode()
        .map_err(|e| ImageError::Decode(format!("图片解码失败：{}", e)))
}

/// 缩小到目标尺寸；尺寸未变化时原样返回。
pub(crate) fn downscale(
    image: DynamicImage,
    target_width: u32,
    target_height: u32,
    filter: ResizeFilter,
) -> DynamicImage {
    if image.dimensions() == (target_width, target_height) {
        return image;
    }

    match resize_with_fast_image_resize(&image, target_width, target_height, filter) {
        Ok(resized) => resized,
        Err(err) => {
            log::warn!("⚠️ fast_image_resize 降采样失败，回退 image::resize_exact：{}", err);
            image.resize_exact(target_width, target_height, filter.to_image_filter())
        }
    }
}

fn resize_with_fast_image_resize(
    image: &DynamicImage,
    target_width: u32,
    target_height: u32,
    filter: ResizeFilter,
) -> Result<DynamicImage, ImageError> {
    let src = image.to_rgba8();
    let (src_width, src_height) = src.dimensions();

    let src_image = fr::images::Image::from_vec_u8(src_width, src_height, src.into_raw(), fr::PixelType::U8x4)
        .map_err(|e| ImageError::Decode(format!("构建源图像缓冲失败：{}", e)))?;

    let mut dst_image = fr::images::Image::new(target_width, target_height, fr::PixelType::U8x4);

    let mut resizer = fr::Resizer::new();
    let options = fr::ResizeOptions::new().resize_alg(to_fast_alg(filter));

    resizer
        .resize(&src_image, &mut dst_image, Some(&options))
        .map_err(|e| ImageError::Decode(format!("fast_image_resize 执行失败：{}", e)))?;

    let rgba = ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(target_width, target_height, dst_image.into_vec())
        .ok_or_else(|| ImageError::Decode("fast_image_resize 输出缓冲长度异常".to_string()))?;

    Ok(DynamicImage::ImageRgba8(rgba))
}

fn to_fast_alg(filter: ResizeFilter) -> fr::ResizeAlg {
    match filter {
        ResizeFilter::Nearest => fr::ResizeAlg::Nearest,
        ResizeFilter::Triangle => fr::ResizeAlg::Convolution(fr::FilterType::Bilinear),
        ResizeFilter::CatmullRom => fr::ResizeAlg::Convolution(fr::FilterType::CatmullRom),
        ResizeFilter::Lanczos3 => fr::ResizeAlg::Convolution(fr::FilterType::Lanczos3),
    }
}

/// 按配置编码并写入目标文件，返回写入字节数。
///
/// 编码或刷盘失败时删除目标文件，避免留下半成品。
pub(crate) fn encode_to_file(image: &DynamicImage, dest: &Path, options: &CompressOptions) -> Result<u64, ImageError> {
    let result = write_encoded(image, dest, options);
    if result.is_err() {
        match fs::remove_file(dest) {
            Ok(_) => log::debug!("🧹 已删除未完成的输出文件：{}", dest.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("⚠️ 删除未完成的输出文件失败 '{}'：{}", dest.display(), e),
        }
    }
    result
}

fn write_encoded(image: &DynamicImage, dest: &Path, options: &CompressOptions) -> Result<u64, ImageError> {
    let file = File::create(dest)
        .map_err(|e| ImageError::FileSystem(format!("无法创建输出文件 '{}'：{}", dest.display(), e)))?;
    let mut writer = BufWriter::new(file);

    match options.format {
        CompressFormat::Jpeg => {
            // JPEG 不支持透明通道
            let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
            let encoder = JpegEncoder::new_with_quality(&mut writer, options.effective_quality());
            rgb.write_with_encoder(encoder)
                .map_err(|e| ImageError::Encode(format!("JPEG 编码失败：{}", e)))?;
        }
        CompressFormat::Png => {
            let encoder = PngEncoder::new(&mut writer);
            image
                .write_with_encoder(encoder)
                .map_err(|e| ImageError::Encode(format!("PNG 编码失败：{}", e)))?;
        }
    }

    writer
        .flush()
        .map_err(|e| ImageError::FileSystem(format!("写入输出文件失败 '{}'：{}", dest.display(), e)))?;
    let file = writer
        .into_inner()
        .map_err(|e| ImageError::FileSystem(format!("写入输出文件失败 '{}'：{}", dest.display(), e)))?;

    let written = file
        .metadata()
        .map_err(|e| ImageError::FileSystem(format!("读取输出文件信息失败：{}", e)))?
        .len();
    Ok(written)
}
