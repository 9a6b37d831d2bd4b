//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载预览链路中的所有失败来源，避免字符串拼接式错误处理。
//! 分支与失败语义一一对应：输入形态、运行环境、声明类型、解码、缩放，
//! 另加资源预算一类。通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配。
//!
//! ## 实现思路
//!
//! - `code()` 输出稳定错误码，供调用方按类型提示。
//! - `stage()` 标记失败所处的流水线阶段，便于日志聚合。
//! - `Serialize` 将错误序列化为人类可读字符串。

use serde::Serialize;

/// 预览流水线统一错误类型。
///
/// 会在会话层被转换为 [`PreviewFailure`](crate::viewer::PreviewFailure) 展示给调用方。
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    /// 输入不是可识别的文件对象。
    #[error("输入无效：{0}")]
    InvalidInput(String),

    /// 当前运行环境缺少解码或 PNG 编码能力。
    #[error("环境不支持：{0}")]
    UnsupportedEnvironment(String),

    /// 声明的媒体类型不在受理范围内。
    #[error("文件类型不支持：{0}")]
    UnsupportedFileType(String),

    /// 字节流无法解码为位图。
    #[error("解码错误：{0}")]
    Decode(String),

    /// 目标尺寸退化，或重采样/编码阶段失败。
    #[error("缩放错误：{0}")]
    Resize(String),

    /// 超出体积、像素或内存预算。
    #[error("资源限制：{0}")]
    ResourceLimit(String),
}

impl PreviewError {
    /// 稳定错误码，供调用方按类型分支提示。
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "E_INVALID_INPUT",
            Self::UnsupportedEnvironment(_) => "E_UNSUPPORTED_ENVIRONMENT",
            Self::UnsupportedFileType(_) => "E_UNSUPPORTED_FILE_TYPE",
            Self::Decode(_) => "E_DECODE",
            Self::Resize(_) => "E_RESIZE",
            Self::ResourceLimit(_) => "E_RESOURCE_LIMIT",
        }
    }

    /// 失败发生的流水线阶段。
    pub fn stage(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "validate",
            Self::UnsupportedEnvironment(_) => "environment",
            Self::UnsupportedFileType(_) => "validate",
            Self::Decode(_) => "decode",
            Self::Resize(_) => "resize",
            Self::ResourceLimit(_) => "load",
        }
    }
}

impl From<PreviewError> for String {
    /// 兼容部分仍使用字符串错误的调用点。
    fn from(error: PreviewError) -> Self {
        error.to_string()
    }
}

/// 将错误序列化为人类可读的字符串。
impl Serialize for PreviewError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
