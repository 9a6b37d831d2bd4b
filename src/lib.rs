//! # 图片缩放预览（库入口）
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    调用方（UI / 服务）                     │
//! │                                                          │
//! │  PreviewSession ── 双窗格状态 + 选择序号裁决               │
//! │       │  (原图 Data URL / 预览 Data URL / 失败信息)       │
//! └───────┼──────────────────────────────────────────────────┘
//!         ↕ Result<String, PreviewError>
//! ┌───────┼──────────────────────────────────────────────────┐
//! │       ↕            预览流水线 (Rust)                      │
//! │                                                          │
//! │  ┌─ service ──── ResizeService (稳定对外 API)             │
//! │  │                                                       │
//! │  ├─ handler ──── ResizeHandler 编排五个阶段               │
//! │  │   ├─ environment  解码/PNG 编码能力探测                │
//! │  │   ├─ media_type   声明类型受理 (image/* 且非 GIF)      │
//! │  │   ├─ loader       读取·签名校验·解码                   │
//! │  │   ├─ resample     目标尺寸推导 + 卷积重采样             │
//! │  │   └─ encoder      PNG 编码 + Base64 载荷               │
//! │  │                                                       │
//! │  ├─ config ───── 预算配置 + 性能档位                      │
//! │  ├─ data_url ─── Data URL 组装/解析 (限额解码)            │
//! │  ├─ source ───── 输入对象与中间模型                       │
//! │  └─ error ────── PreviewError (统一错误类型)              │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `PreviewError`，含稳定错误码与阶段标记 |
//! | [`source`] | 上传文件对象与流水线中间模型 |
//! | [`media_type`] | 声明媒体类型受理策略（`image/*` 且非 GIF） |
//! | [`environment`] | 运行环境的解码与 PNG 编码能力探测 |
//! | [`config`] | 体积/像素预算配置与性能档位映射 |
//! | [`data_url`] | Data URL 组装、解析与限额解码 |
//! | [`loader`] | 文件读取、签名校验、header 预检与位图解码 |
//! | [`resample`] | 目标尺寸推导与 SIMD 卷积重采样（含回退） |
//! | [`encoder`] | PNG 编码与纯 Base64 载荷输出 |
//! | [`handler`] | 流水线编排、阶段计时与配置热更新 |
//! | [`service`] | 对外服务 API（预览、档位、高级配置） |
//! | [`viewer`] | 双窗格展示会话与乱序结果裁决 |

pub mod config;
pub mod data_url;
pub mod encoder;
pub mod environment;
pub mod error;
pub mod handler;
pub mod loader;
pub mod media_type;
pub mod resample;
pub mod service;
pub mod source;
pub mod viewer;

pub use config::{ResizeConfig, ResizePerformanceProfile};
pub use environment::EnvironmentCapabilities;
pub use error::PreviewError;
pub use service::{ResizeAdvancedConfig, ResizeService};
pub use source::UploadedFile;
pub use viewer::{PreviewFailure, PreviewSession};
