//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载图片压缩链路中的所有错误来源，替代“打印堆栈后静默返回”。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配。

/// 图片压缩统一错误类型。
///
/// 该类型会在库边界被上转为 `UtilError`。
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("文件错误：{0}")]
    FileSystem(String),

    #[error("格式错误：{0}")]
    InvalidFormat(String),

    #[error("解码错误：{0}")]
    Decode(String),

    #[error("编码错误：{0}")]
    Encode(String),

    #[error("资源限制：{0}")]
    ResourceLimit(String),
}
