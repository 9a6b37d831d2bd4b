//! # 编码输出模块
//!
//! ## 设计思路
//!
//! 重采样后的表面固定序列化为 PNG，经 Data URL 组装后再剥离前缀，
//! 对外只交付纯 Base64 载荷。产物与浏览器侧
//! `canvas.toDataURL("image/png")` 再按 `;base64,` 切分的结果逐字节一致。

use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

use crate::data_url;
use crate::error::PreviewError;
use crate::handler::ResizeHandler;
use crate::source::{EncodedPreview, TargetDimensions};

impl ResizeHandler {
    /// 将重采样后的表面编码为 PNG Base64 载荷。
    pub(crate) fn encode_preview(
        surface: &DynamicImage,
        target: TargetDimensions,
    ) -> Result<EncodedPreview, PreviewError> {
        let mut cursor = Cursor::new(Vec::new());
        surface
            .write_to(&mut cursor, ImageFormat::Png)
            .map_err(|e| PreviewError::Resize(format!("PNG 序列化失败：{}", e)))?;

        let png_bytes = cursor.into_inner();
        let url = data_url::encode(data_url::PNG_MEDIA_TYPE, &png_bytes);
        let payload = data_url::split_payload(&url)
            .ok_or_else(|| PreviewError::Resize("Data URL 组装异常".to_string()))?
            .to_string();

        log::debug!(
            "✅ PNG 编码完成 - {}x{} png={}KB base64={}KB",
            target.width,
            target.height,
            png_bytes.len() / 1024,
            payload.len() / 1024
        );

        Ok(EncodedPreview {
            width: target.width,
            height: target.height,
            payload,
        })
    }
}
