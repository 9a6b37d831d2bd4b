//! 声明类型策略模块
//!
//! # 设计思路
//!
//! 受理策略只看调用方声明的 MIME 字符串：声明为图片、且不是 GIF 才放行。
//! 两条模式保持历史行为：不锚定、区分大小写，子串命中即算匹配。
//!
//! # 实现思路
//!
//! - 使用 `once_cell::sync::Lazy` 在首次调用时编译正则，后续零成本复用。
//! - 匹配结果仅决定受理与否，内容真伪交由加载阶段的签名校验。

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::PreviewError;

/// 声明类型需要命中的图片模式。
static IMAGE_TYPE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"image.*").unwrap());

/// 命中即拒绝的 GIF 模式（动图不做静态预览）。
static GIF_TYPE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"image/gif").unwrap());

/// 判断声明类型是否在受理范围内。
///
/// # 参数
/// * `declared` - 调用方声明的 MIME 字符串，如 `image/png`
///
/// # 返回
/// - `true`：受理，进入加载阶段
/// - `false`：拒绝，不会触碰文件内容
pub fn is_supported_media_type(declared: &str) -> bool {
    IMAGE_TYPE_PATTERN.is_match(declared) && !GIF_TYPE_PATTERN.is_match(declared)
}

/// 校验声明类型，不受理时返回 [`PreviewError::UnsupportedFileType`]。
pub(crate) fn ensure_supported_media_type(declared: &str) -> Result<(), PreviewError> {
    if is_supported_media_type(declared) {
        return Ok(());
    }

    Err(PreviewError::UnsupportedFileType(format!(
        "声明类型不受支持：{}",
        if declared.is_empty() { "<empty>" } else { declared }
    )))
}
