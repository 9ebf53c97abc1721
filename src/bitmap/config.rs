//! # 配置模块
//!
//! ## 设计思路
//!
//! 将压缩相关的可调参数集中到 `CompressOptions`，保证行为可观测、可调整、可测试。
//! 压缩档位（quality / balanced / speed）作为高层语义，映射到底层参数组合。
//!
//! ## 实现思路
//!
//! - `Default` 提供常见手机屏幕尺寸下的平衡配置。
//! - `CompressProfile` 负责档位字符串解析与反向输出。
//! - 配置可序列化为 JSON；从文件加载失败时回退默认值，不阻断调用方。

use std::fs;
use std::path::Path;

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use super::ImageError;

/// 输出编码格式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressFormat {
    /// 有损压缩，`quality` 生效。
    Jpeg,
    /// 无损压缩，忽略 `quality`。
    Png,
}

/// 降采样滤镜。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Lanczos3,
}

impl ResizeFilter {
    pub(crate) fn to_image_filter(self) -> FilterType {
        match self {
            Self::Nearest => FilterType::Nearest,
            Self::Triangle => FilterType::Triangle,
            Self::CatmullRom => FilterType::CatmullRom,
            Self::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// 图片压缩配置。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressOptions {
    /// 输出最大宽度（像素）。
    pub max_width: u32,
    /// 输出最大高度（像素）。
    pub max_height: u32,
    /// 质量（1-100，100 表示不压缩）。
    pub quality: u8,
    pub format: CompressFormat,
    pub filter: ResizeFilter,
    /// 允许解码的源图像素上限（`width * height`）。
    pub max_source_pixels: u64,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            max_width: 1080,
            max_height: 1920,
            quality: 80,
            format: CompressFormat::Jpeg,
            filter: ResizeFilter::Triangle,
            max_source_pixels: 40_000_000,
        }
    }
}

impl CompressOptions {
    /// 以给定尺寸与质量构造配置，其余字段取默认值。
    pub fn new(max_width: u32, max_height: u32, quality: u8) -> Self {
        Self {
            max_width,
            max_height,
            quality,
            ..Self::default()
        }
    }

    /// 编码器实际使用的质量值（夹到 1..=100）。
    pub(crate) fn effective_quality(&self) -> u8 {
        self.quality.clamp(1, 100)
    }

    /// 从 JSON 文件加载配置；文件不存在或内容损坏时回退默认值。
    pub fn load_from_path(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(options) => return options,
                    Err(e) => log::warn!("⚠️ 压缩配置解析失败，使用默认值 '{}': {}", path.display(), e),
                },
                Err(e) => log::warn!("⚠️ 压缩配置读取失败，使用默认值 '{}': {}", path.display(), e),
            }
        }
        Self::default()
    }

    /// 以格式化 JSON 写入配置文件。
    pub fn save_to_path(&self, path: &Path) -> Result<(), ImageError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ImageError::FileSystem(format!("序列化压缩配置失败：{}", e)))?;
        fs::write(path, content)
            .map_err(|e| ImageError::FileSystem(format!("写入压缩配置失败 '{}'：{}", path.display(), e)))
    }

    /// 应用指定档位，仅调整质量与滤镜，不改动尺寸上限。
    pub fn apply_profile(&mut self, profile: CompressProfile) {
        match profile {
            CompressProfile::Quality => {
                self.quality = 95;
                self.filter = ResizeFilter::Lanczos3;
            }
            CompressProfile::Balanced => {
                self.quality = 80;
                self.filter = ResizeFilter::Triangle;
            }
            CompressProfile::Speed => {
                self.quality = 60;
                self.filter = ResizeFilter::Nearest;
            }
        }
    }

    pub fn with_profile(mut self, profile: CompressProfile) -> Self {
        self.apply_profile(profile);
        self
    }
}

/// 压缩档位（面向产品/用户语义）。
///
/// - `Quality`：尽量保真
/// - `Balanced`：质量与体积平衡
/// - `Speed`：优先速度与体积
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressProfile {
    Quality,
    Balanced,
    Speed,
}

impl CompressProfile {
    /// 从外部字符串解析档位（忽略大小写与首尾空白）。
    pub fn from_str(profile: &str) -> Result<Self, ImageError> {
        match profile.trim().to_lowercase().as_str() {
            "quality" => Ok(Self::Quality),
            "balanced" => Ok(Self::Balanced),
            "speed" => Ok(Self::Speed),
            other => Err(ImageError::InvalidFormat(format!(
                "未知压缩档位：{}（可选：quality / balanced / speed）",
                other
            ))),
        }
    }

    /// 将档位输出为稳定字符串，供持久化使用。
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quality => "quality",
            Self::Balanced => "balanced",
            Self::Speed => "speed",
        }
    }
}
