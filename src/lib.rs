//! # 移动端常用工具集合 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 调用方（UI / 业务代码）                   │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↕ Result<T, UtilError>
//! ┌───────┼──────────────────────────────────────────────────┐
//! │       ↕            工具函数（无状态、同步）              │
//! │                                                          │
//! │  ┌─ error ────── UtilError (统一错误类型)                │
//! │  ├─ datetime ─── 时间戳 ↔ 时间字符串                     │
//! │  ├─ units ────── dp ↔ px                                 │
//! │  ├─ display ──── 屏幕宽高 (DisplayMetrics)               │
//! │  ├─ bitmap ───── 采样率计算 / 尺寸 + 质量压缩            │
//! │  ├─ foreground ─ 前后台判断 (TaskStack)                  │
//! │  └─ storage ──── 缓存目录选择 / 单层目录清理             │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↕ 平台接口（trait）
//! ┌───────┴──────────────────────────────────────────────────┐
//! │  tauri_platform (feature = "tauri") / 测试替身           │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `UtilError` |
//! | [`datetime`] | 毫秒时间戳与时间字符串互转，兼容 `yyyy-MM-dd` 字母模式 |
//! | [`units`] | 按屏幕密度换算 dp / px |
//! | [`display`] | 屏幕参数接口与宽高查询 |
//! | [`bitmap`] | 采样率计算、两遍解码、JPEG/PNG 压缩写盘 |
//! | [`foreground`] | 根据任务栈栈顶判断应用是否在后台 |
//! | [`storage`] | 外部/内部缓存目录选择、目录下文件删除 |

pub mod bitmap;
pub mod datetime;
pub mod display;
pub mod error;
pub mod foreground;
pub mod storage;
#[cfg(feature = "tauri")]
pub mod tauri_platform;
pub mod units;

pub use error::UtilError;
