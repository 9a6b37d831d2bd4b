//! # Data URL 模块
//!
//! ## 设计思路
//!
//! 预览链路里的图片字节以 Data URL 形态流转，与浏览器侧
//! `FileReader.readAsDataURL` / `canvas.toDataURL` 的中间产物同构。
//! 本模块集中组装与解析逻辑，避免各阶段重复拼接字符串。
//!
//! ## 实现思路
//!
//! - 组装：`data:{media_type};base64,{payload}`。
//! - 解析：定位 `;base64,` 标记，先估算解码上限再真正解码。
//! - 剥离：返回标记之后的纯 Base64 载荷。

use base64::{Engine as _, engine::general_purpose};

use crate::error::PreviewError;

/// PNG 输出使用的媒体类型。
pub(crate) const PNG_MEDIA_TYPE: &str = "image/png";

/// Data URL 中 Base64 载荷的起始标记。
const BASE64_MARKER: &str = ";base64,";

/// 将字节组装为 Data URL。
pub(crate) fn encode(media_type: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        media_type,
        general_purpose::STANDARD.encode(bytes)
    )
}

/// 剥离 Data URL 前缀，返回纯 Base64 载荷。
pub(crate) fn split_payload(data_url: &str) -> Option<&str> {
    let marker = data_url.find(BASE64_MARKER)?;
    Some(&data_url[marker + BASE64_MARKER.len()..])
}

/// 估算 Base64 解码后的体积上限（字节）。
fn estimate_decoded_upper_bound_len(payload: &str) -> Result<u64, PreviewError> {
    let len = payload.trim().len() as u64;
    let groups = len
        .checked_add(3)
        .ok_or_else(|| PreviewError::ResourceLimit("Base64 输入长度溢出".to_string()))?
        / 4;

    groups
        .checked_mul(3)
        .ok_or_else(|| PreviewError::ResourceLimit("Base64 解码体积估算溢出".to_string()))
}

/// 解析 Data URL 并解码出原始字节。
///
/// 在真正解码前按估算体积拦截超限输入。
pub(crate) fn decode_with_limit(
    data_url: &str,
    max_file_size: u64,
) -> Result<Vec<u8>, PreviewError> {
    let normalized = data_url.trim();

    if !normalized.starts_with("data:") {
        return Err(PreviewError::Decode("缺少 data: 前缀".to_string()));
    }

    let payload = split_payload(normalized)
        .ok_or_else(|| PreviewError::Decode("缺少 base64 标记".to_string()))?;

    let estimated_len = estimate_decoded_upper_bound_len(payload)?;
    if estimated_len > max_file_size {
        return Err(PreviewError::ResourceLimit(format!(
            "Base64 预计解码体积过大：{:.2} MB（限制：{:.2} MB）",
            estimated_len as f64 / 1024.0 / 1024.0,
            max_file_size as f64 / 1024.0 / 1024.0
        )));
    }

    general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| PreviewError::Decode(format!("Base64 解码失败：{}", e)))
}
