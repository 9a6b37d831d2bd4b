//! # 加载与校验模块
//!
//! ## 设计思路
//!
//! 统一处理上传文件的读取与解码，并在“尽可能早”的阶段执行输入校验。
//! 目标是尽快失败，减少不必要内存与 CPU 消耗。
//!
//! ## 实现思路
//!
//! 1. 文件形态校验（空内容视为非文件输入）
//! 2. 体积上限校验
//! 3. 读取为 Data URL（与浏览器 FileReader 产物同构）
//! 4. 解析 Data URL，并用文件签名确认内容确为图片
//! 5. 仅读 header 尺寸做像素/内存预算检查，再完整解码
//!
//! 读取与解码均为 CPU 密集步骤，放入阻塞线程池执行。

use image::GenericImageView;
use std::io::Cursor;

use crate::config::ResizeConfig;
use crate::data_url;
use crate::error::PreviewError;
use crate::handler::ResizeHandler;
use crate::source::{DecodedImage, UploadedFile};

impl ResizeHandler {
    /// 加载入口：把上传文件转成解码完成的位图。
    pub(crate) async fn load_image(
        &self,
        file: &UploadedFile,
        config: &ResizeConfig,
    ) -> Result<DecodedImage, PreviewError> {
        Self::ensure_file_like(file)?;
        Self::validate_file_size(file, config)?;

        let data_url = Self::read_as_data_url(file).await?;
        Self::decode_from_data_url(data_url, config).await
    }

    /// 文件形态校验：内容为空的对象视为“不是文件”。
    fn ensure_file_like(file: &UploadedFile) -> Result<(), PreviewError> {
        if !file.is_file_like() {
            return Err(PreviewError::InvalidInput(format!(
                "输入不是可读取的文件对象：{}",
                if file.name.is_empty() {
                    "<unnamed>"
                } else {
                    &file.name
                }
            )));
        }

        Ok(())
    }

    fn validate_file_size(file: &UploadedFile, config: &ResizeConfig) -> Result<(), PreviewError> {
        if file.content.len() as u64 > config.max_file_size {
            return Err(PreviewError::ResourceLimit(format!(
                "文件过大：{:.2} MB（限制：{:.2} MB）",
                file.content.len() as f64 / 1024.0 / 1024.0,
                config.max_file_size as f64 / 1024.0 / 1024.0
            )));
        }

        Ok(())
    }

    /// 把文件内容读取为 Data URL。
    async fn read_as_data_url(file: &UploadedFile) -> Result<String, PreviewError> {
        log::debug!(
            "📝 读取上传文件 - 名称: {} 声明类型: {} 体积: {} bytes",
            file.name,
            file.media_type,
            file.content.len()
        );

        let media_type = file.media_type.clone();
        let content = file.content.clone();

        tokio::task::spawn_blocking(move || data_url::encode(&media_type, &content))
            .await
            .map_err(|e| PreviewError::Decode(format!("读取任务中断：{}", e)))
    }

    /// 解析 Data URL 并解码为位图。
    async fn decode_from_data_url(
        data_url: String,
        config: &ResizeConfig,
    ) -> Result<DecodedImage, PreviewError> {
        let config = config.clone();

        tokio::task::spawn_blocking(move || {
            let bytes = data_url::decode_with_limit(&data_url, config.max_file_size)?;
            Self::validate_image_signature(&bytes)?;

            let (header_width, header_height) = Self::inspect_dimensions_from_memory(&bytes)?;
            Self::validate_pixel_limits(&config, header_width, header_height)?;
            Self::validate_decoded_memory_limits(&config, header_width, header_height)?;

            let image = image::load_from_memory(&bytes)
                .map_err(|e| PreviewError::Decode(format!("图片解码失败：{}", e)))?;

            let (width, height) = image.dimensions();
            Self::validate_pixel_limits(&config, width, height)?;
            Self::validate_decoded_memory_limits(&config, width, height)?;

            log::debug!("✅ 图片解码成功 - 自然尺寸: {}x{}", width, height);

            Ok(DecodedImage {
                image,
                width,
                height,
            })
        })
        .await
        .map_err(|e| PreviewError::Decode(format!("解码任务中断：{}", e)))?
    }

    /// 通过文件签名（magic bytes）校验输入确为图片。
    fn validate_image_signature(bytes: &[u8]) -> Result<(), PreviewError> {
        if bytes.is_empty() {
            return Err(PreviewError::Decode("图片内容为空".to_string()));
        }

        let kind = infer::get(bytes)
            .ok_or_else(|| PreviewError::Decode("无法识别图片内容".to_string()))?;

        if kind.matcher_type() != infer::MatcherType::Image {
            return Err(PreviewError::Decode(format!(
                "文件签名不是图片类型：{}",
                kind.mime_type()
            )));
        }

        Ok(())
    }

    /// 仅通过内存中的图片头信息读取宽高。
    ///
    /// 用于在完整解码前做像素限制检查。
    fn inspect_dimensions_from_memory(bytes: &[u8]) -> Result<(u32, u32), PreviewError> {
        let cursor = Cursor::new(bytes);
        let reader = image::ImageReader::new(cursor)
            .with_guessed_format()
            .map_err(|e| PreviewError::Decode(format!("无法识别图片格式：{}", e)))?;

        reader
            .into_dimensions()
            .map_err(|e| PreviewError::Decode(format!("无法读取图片尺寸：{}", e)))
    }

    /// 校验像素数量是否超过配置上限。
    fn validate_pixel_limits(
        config: &ResizeConfig,
        width: u32,
        height: u32,
    ) -> Result<(), PreviewError> {
        let pixels = (width as u64)
            .checked_mul(height as u64)
            .ok_or_else(|| PreviewError::ResourceLimit("图片像素数溢出".to_string()))?;

        if pixels > config.max_decoded_pixels {
            return Err(PreviewError::ResourceLimit(format!(
                "图片像素过大：{} 像素（限制：{} 像素）",
                pixels, config.max_decoded_pixels
            )));
        }

        Ok(())
    }

    fn validate_decoded_memory_limits(
        config: &ResizeConfig,
        width: u32,
        height: u32,
    ) -> Result<(), PreviewError> {
        let estimated = (width as u64)
            .checked_mul(height as u64)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or_else(|| PreviewError::ResourceLimit("图片解码内存估算溢出".to_string()))?;

        if estimated > config.max_decoded_bytes {
            return Err(PreviewError::ResourceLimit(format!(
                "图片解码预计内存过大：{:.2} MB（限制：{:.2} MB）",
                estimated as f64 / 1024.0 / 1024.0,
                config.max_decoded_bytes as f64 / 1024.0 / 1024.0
            )));
        }

        Ok(())
    }
}
