//! # 重采样模块
//!
//! ## 设计思路
//!
//! 把“自然尺寸 → 目标尺寸”的推导与真正的重采样分开：
//! 推导只做尺寸数学，重采样优先走 SIMD 卷积实现，
//! 失败时回退 `image::resize_exact` 保证可用性。
//!
//! ## 实现思路
//!
//! 1. 目标宽度固定为请求的最大宽度（小图照常放大）
//! 2. 目标高度按 `max_width * height / width` 四舍五入
//! 3. 退化目标（任一边为 0）直接报缩放错误
//! 4. 目标像素预算检查后执行卷积重采样

use fast_image_resize as fr;
use image::{DynamicImage, ImageBuffer, Rgba};

use crate::config::ResizeConfig;
use crate::error::PreviewError;
use crate::handler::ResizeHandler;
use crate::source::{DecodedImage, TargetDimensions};

impl ResizeHandler {
    /// 按最大宽度推导目标尺寸。
    ///
    /// 宽度恒等于 `max_width`，高度按纵横比四舍五入。
    pub(crate) fn compute_target_dimensions(
        width: u32,
        height: u32,
        max_width: u32,
    ) -> Result<TargetDimensions, PreviewError> {
        if width == 0 || height == 0 {
            return Err(PreviewError::Resize(format!(
                "源图尺寸退化：{}x{}",
                width, height
            )));
        }

        if max_width == 0 {
            return Err(PreviewError::Resize("目标宽度为 0".to_string()));
        }

        let scale = max_width as f64 / width as f64;
        let target_height = (height as f64 * scale).round() as u32;

        if target_height == 0 {
            return Err(PreviewError::Resize(format!(
                "目标尺寸退化：{}x0（源图 {}x{}）",
                max_width, width, height
            )));
        }

        Ok(TargetDimensions {
            width: max_width,
            height: target_height,
        })
    }

    /// 校验目标像素是否超过预算。
    pub(crate) fn validate_target_limits(
        config: &ResizeConfig,
        target: TargetDimensions,
    ) -> Result<(), PreviewError> {
        let pixels = (target.width as u64)
            .checked_mul(target.height as u64)
            .ok_or_else(|| PreviewError::ResourceLimit("目标像素数溢出".to_string()))?;

        if pixels > config.max_target_pixels {
            return Err(PreviewError::ResourceLimit(format!(
                "目标像素过大：{} 像素（限制：{} 像素）",
                pixels, config.max_target_pixels
            )));
        }

        Ok(())
    }

    /// 在离屏 RGBA 表面上执行重采样。
    pub(crate) fn resample(
        decoded: &DecodedImage,
        target: TargetDimensions,
        config: &ResizeConfig,
    ) -> Result<DynamicImage, PreviewError> {
        log::debug!(
            "🧩 重采样：{}x{} -> {}x{}（filter={:?}）",
            decoded.width,
            decoded.height,
            target.width,
            target.height,
            config.resize_filter
        );

        match Self::resample_with_convolution(&decoded.image, target, config.resize_filter) {
            Ok(resized) => Ok(resized),
            Err(err) => {
                log::warn!(
                    "⚠️ fast_image_resize 重采样失败，回退 image::resize_exact：{}",
                    err
                );
                Ok(decoded
                    .image
                    .resize_exact(target.width, target.height, config.resize_filter))
            }
        }
    }

    fn resample_with_convolution(
        image: &DynamicImage,
        target: TargetDimensions,
        filter: image::imageops::FilterType,
    ) -> Result<DynamicImage, PreviewError> {
        let src = image.to_rgba8();
        let (src_width, src_height) = src.dimensions();

        let src_image = fr::images::Image::from_vec_u8(
            src_width,
            src_height,
            src.into_raw(),
            fr::PixelType::U8x4,
        )
        .map_err(|e| PreviewError::Resize(format!("构建源图像缓冲失败：{}", e)))?;

        let mut dst_image = fr::images::Image::new(target.width, target.height, fr::PixelType::U8x4);

        let mut resizer = fr::Resizer::new();
        let options = fr::ResizeOptions::new()
            .resize_alg(fr::ResizeAlg::Convolution(Self::to_fast_filter(filter)));

        resizer
            .resize(&src_image, &mut dst_image, Some(&options))
            .map_err(|e| PreviewError::Resize(format!("fast_image_resize 执行失败：{}", e)))?;

        let rgba = ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(
            target.width,
            target.height,
            dst_image.into_vec(),
        )
        .ok_or_else(|| PreviewError::Resize("重采样输出缓冲长度异常".to_string()))?;

        Ok(DynamicImage::ImageRgba8(rgba))
    }

    /// 卷积核映射。最近邻诉求一律落到 Box 核。
    fn to_fast_filter(filter: image::imageops::FilterType) -> fr::FilterType {
        match filter {
            image::imageops::FilterType::Nearest => fr::FilterType::Box,
            image::imageops::FilterType::Triangle => fr::FilterType::Bilinear,
            image::imageops::FilterType::CatmullRom => fr::FilterType::CatmullRom,
            image::imageops::FilterType::Gaussian => fr::FilterType::Mitchell,
            image::imageops::FilterType::Lanczos3 => fr::FilterType::Lanczos3,
        }
    }
}
