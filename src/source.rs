//! # 输入与中间模型
//!
//! ## 设计思路
//!
//! 将“外部输入类型”和“流水线中间结果”解耦：
//! - `UploadedFile` 表示调用方递交的文件对象（文件名、声明类型、内容字节）
//! - `DecodedImage` 表示解码完成的位图与其自然尺寸
//! - `TargetDimensions` 表示按最大宽度推导出的目标尺寸
//! - `EncodedPreview` 表示 PNG 编码后的 Base64 载荷

use bytes::Bytes;
use image::DynamicImage;

/// 调用方递交的上传文件。
///
/// `media_type` 是调用方声明的 MIME 类型；受理策略只看声明值，
/// 内容真伪由加载阶段的签名校验兜底。
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// 文件名（仅用于日志与诊断）。
    pub name: String,
    /// 声明的媒体类型，例如 `image/png`。
    pub media_type: String,
    /// 文件内容字节。
    pub content: Bytes,
}

impl UploadedFile {
    /// 构造上传文件对象。
    pub fn new(
        name: impl Into<String>,
        media_type: impl Into<String>,
        content: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            content: content.into(),
        }
    }

    /// 判断输入是否具备可处理的文件形态。
    ///
    /// 内容为空的对象视为“不是文件”，与声明类型无关。
    pub(crate) fn is_file_like(&self) -> bool {
        !self.content.is_empty()
    }
}

/// 解码阶段输出：位图与自然尺寸。
pub(crate) struct DecodedImage {
    /// 解码后的位图。
    pub(crate) image: DynamicImage,
    /// 自然宽度（像素）。
    pub(crate) width: u32,
    /// 自然高度（像素）。
    pub(crate) height: u32,
}

/// 目标尺寸：宽度固定为最大宽度，高度按纵横比推导。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TargetDimensions {
    pub(crate) width: u32,
    pub(crate) height: u32,
}

/// 编码阶段输出：PNG 的 Base64 载荷与最终尺寸。
pub(crate) struct EncodedPreview {
    /// 输出宽度（像素）。
    pub(crate) width: u32,
    /// 输出高度（像素）。
    pub(crate) height: u32,
    /// 不含 `data:` 前缀的纯 Base64 字符串。
    pub(crate) payload: String,
}
