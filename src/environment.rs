//! # 运行环境探测模块
//!
//! ## 设计思路
//!
//! 流水线开工前先确认两项能力：位图解码与 PNG 编码。
//! 能力由编译期启用的编解码特性决定，缺一即拒绝整个请求，
//! 而不是等到中途才暴露“无法编码”这类更难解释的失败。

use image::ImageFormat;

use crate::error::PreviewError;

/// 解码能力探测格式集合，命中其一即认为可解码。
const DECODE_PROBE_FORMATS: [ImageFormat; 5] = [
    ImageFormat::Png,
    ImageFormat::Jpeg,
    ImageFormat::WebP,
    ImageFormat::Bmp,
    ImageFormat::Tiff,
];

/// 运行环境能力快照。
#[derive(Debug, Clone, Copy)]
pub struct EnvironmentCapabilities {
    /// 是否能解码常见位图格式。
    pub can_decode: bool,
    /// 是否能编码 PNG。
    pub can_encode_png: bool,
}

impl EnvironmentCapabilities {
    /// 探测当前构建的编解码能力。
    pub fn probe() -> Self {
        Self {
            can_decode: DECODE_PROBE_FORMATS
                .iter()
                .any(|format| format.reading_enabled()),
            can_encode_png: ImageFormat::Png.writing_enabled(),
        }
    }

    /// 两项能力齐备才放行。
    pub fn is_supported(&self) -> bool {
        self.can_decode && self.can_encode_png
    }

    /// 校验环境能力，缺失时返回 [`PreviewError::UnsupportedEnvironment`]。
    pub(crate) fn ensure_supported(&self) -> Result<(), PreviewError> {
        if self.is_supported() {
            return Ok(());
        }

        Err(PreviewError::UnsupportedEnvironment(format!(
            "缺少图片处理能力（解码={} PNG 编码={}）",
            self.can_decode, self.can_encode_png
        )))
    }
}
