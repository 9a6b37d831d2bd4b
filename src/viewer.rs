//! # 展示会话模块
//!
//! ## 设计思路
//!
//! 调用方通常以“原图 + 缩放预览”双窗格展示结果，并会快速连续更换文件。
//! 流水线是异步的，旧文件的结果可能晚于新文件返回，直接回填会出现
//! “新选择被旧结果覆盖”的乱序问题。`PreviewSession` 用单调递增的选择
//! 序号裁决：每次选择文件产生新序号，结果携带来源序号回填，序号不一致
//! 的结果直接丢弃。
//!
//! ## 实现思路
//!
//! - `select_file` 记录原图并自增序号，同时清除上一轮失败信息
//! - `apply_result` 按序号判定结果是否过期，过期结果不产生任何状态变化
//! - 预览载荷保持纯 Base64 存储，展示时再拼 `data:image/png;base64,` 前缀
//! - 换文件后旧预览保留到新结果回填为止

use crate::data_url;
use crate::error::PreviewError;
use crate::source::UploadedFile;

/// 面向展示层的失败信息。
///
/// 三个字段均为稳定字符串，可直接序列化给调用方。
#[derive(Debug, Clone, serde::Serialize)]
pub struct PreviewFailure {
    /// 稳定错误码，见 [`PreviewError::code`]。
    pub code: String,
    /// 失败所处的流水线阶段，见 [`PreviewError::stage`]。
    pub stage: String,
    /// 人类可读的错误描述。
    pub message: String,
}

impl From<&PreviewError> for PreviewFailure {
    fn from(error: &PreviewError) -> Self {
        Self {
            code: error.code().to_string(),
            stage: error.stage().to_string(),
            message: error.to_string(),
        }
    }
}

/// 双窗格预览会话状态。
///
/// 不持有流水线本身；调用方先 [`select_file`](Self::select_file) 拿到序号，
/// 再把 [`ResizeService::get_resized_image`](crate::service::ResizeService::get_resized_image)
/// 的结果连同序号交给 [`apply_result`](Self::apply_result)。
#[derive(Debug, Default)]
pub struct PreviewSession {
    original: Option<UploadedFile>,
    preview_payload: Option<String>,
    failure: Option<PreviewFailure>,
    selection_seq: u64,
}

impl PreviewSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// 选择新文件，返回本次选择的序号。
    ///
    /// 清除上一轮失败信息；旧预览保留到新结果回填为止。
    pub fn select_file(&mut self, file: UploadedFile) -> u64 {
        self.selection_seq += 1;
        self.original = Some(file);
        self.failure = None;
        self.selection_seq
    }

    /// 回填流水线结果。
    ///
    /// 仅当 `seq` 与当前选择序号一致时生效，返回结果是否被采纳。
    pub fn apply_result(&mut self, seq: u64, result: Result<String, PreviewError>) -> bool {
        if seq != self.selection_seq {
            log::warn!("⚠️ 丢弃过期预览结果 - 来源序号: {} 当前序号: {}", seq, self.selection_seq);
            return false;
        }

        match result {
            Ok(payload) => {
                self.preview_payload = Some(payload);
                self.failure = None;
            }
            Err(error) => {
                log::warn!("⚠️ 预览生成失败 - 阶段: {} 错误: {}", error.stage(), error);
                self.failure = Some(PreviewFailure::from(&error));
            }
        }

        true
    }

    /// 当前选中的原始文件。
    pub fn selected_file(&self) -> Option<&UploadedFile> {
        self.original.as_ref()
    }

    /// 原图的完整 Data URL（按声明类型组装）。
    pub fn original_data_url(&self) -> Option<String> {
        let file = self.original.as_ref()?;
        Some(data_url::encode(&file.media_type, &file.content))
    }

    /// 预览图的完整 Data URL（PNG）。
    pub fn preview_data_url(&self) -> Option<String> {
        self.preview_payload
            .as_ref()
            .map(|payload| format!("data:{};base64,{}", data_url::PNG_MEDIA_TYPE, payload))
    }

    /// 预览图的纯 Base64 载荷。
    pub fn preview_payload(&self) -> Option<&str> {
        self.preview_payload.as_deref()
    }

    /// 最近一次失败信息。
    pub fn last_failure(&self) -> Option<&PreviewFailure> {
        self.failure.as_ref()
    }
}
