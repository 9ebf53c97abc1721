//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义全局统一的 `UtilError` 枚举，各工具函数失败时返回结构化错误，
//! 不再使用“打印堆栈 + 返回哨兵值”或静默吞掉异常的模式。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `DateError` / `ImageError` / `std::io::Error` 提供 `From` 转换，调用侧直接 `?`。
//! - 实现 `Serialize` 将错误序列化为字符串，便于跨 IPC 边界传递（见 `tauri` feature）。

use serde::Serialize;

use crate::bitmap::ImageError;
use crate::datetime::DateError;

/// 库级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum UtilError {
    /// 日期解析 / 格式化失败
    #[error("{0}")]
    Date(#[from] DateError),

    /// 图片压缩流水线错误（读取 / 解码 / 编码）
    #[error("{0}")]
    Image(#[from] ImageError),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),

    /// 存储目录不可用
    #[error("存储目录不可用: {0}")]
    Storage(String),

    /// 平台服务（显示器、任务栈）查询失败
    #[error("平台服务不可用: {0}")]
    Platform(String),
}

/// 将错误序列化为人类可读的字符串。
impl Serialize for UtilError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
