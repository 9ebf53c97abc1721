//! # 图片采样与压缩模块（bitmap）
//!
//! ## 设计思路
//!
//! 该模块把“采样率计算 → 读取尺寸 → 解码缩放 → 质量压缩写盘”按职责拆分为多个子模块：
//!
//! - `sampling`：纯算术，计算采样率与采样后尺寸
//! - `pipeline`：文件嗅探、header 尺寸读取、解码、降采样、编码
//! - `compress`：统一编排，对外暴露 `compress_image`
//! - `config/error`：配置与错误
//!
//! ## 调用链
//!
//! ```text
//! compress_image
//!    ├─ pipeline::ensure_image_file / read_bounds（只读 header）
//!    ├─ sampling::compress_sample_size
//!    ├─ pipeline::decode + downscale
//!    └─ pipeline::encode_to_file（失败时清理半成品）
//! ```

mod compress;
mod config;
mod error;
mod pipeline;
mod sampling;

pub use compress::{compress_image, CompressedImage};
pub use config::{CompressFormat, CompressOptions, CompressProfile, ResizeFilter};
pub use error::ImageError;
pub use pipeline::read_bounds;
pub use sampling::{calculate_sample_size, compress_sample_size, sampled_dimensions};
