//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `ResizeHandler` 只负责流程编排与配置管理，不绑定任何宿主框架。
//! 处理链路固定为：
//! 1. 读取配置快照
//! 2. 环境能力与声明类型校验
//! 3. 读取并解码上传文件
//! 4. 推导目标尺寸并重采样
//! 5. PNG 编码并输出 Base64 载荷
//!
//! ## 实现思路
//!
//! - 配置通过 `Arc<RwLock<ResizeConfig>>` 支持运行时动态切档。
//! - 单次请求内使用“同一配置快照”，避免处理中途配置漂移。
//! - 重采样与编码为 CPU 密集步骤，放入阻塞线程池执行。
//! - 记录 `load/resample/encode/total` 阶段耗时，便于性能诊断。

use std::sync::{Arc, RwLock};
use std::time::Instant;

use crate::config::{ResizeConfig, ResizePerformanceProfile};
use crate::environment::EnvironmentCapabilities;
use crate::error::PreviewError;
use crate::media_type;
use crate::source::{EncodedPreview, UploadedFile};

/// 预览处理器。
///
/// 封装配置状态，并编排各子模块实现完整流程。
pub(crate) struct ResizeHandler {
    config: Arc<RwLock<ResizeConfig>>,
}

impl ResizeHandler {
    /// 根据初始配置创建处理器。
    pub(crate) fn new(config: ResizeConfig) -> Result<Self, PreviewError> {
        Ok(Self {
            config: Arc::new(RwLock::new(config)),
        })
    }

    /// 获取配置快照。
    ///
    /// 作用：保证单次请求链路使用一致参数。
    pub(crate) fn config_snapshot(&self) -> Result<ResizeConfig, PreviewError> {
        self.config
            .read()
            .map(|cfg| cfg.clone())
            .map_err(|_| PreviewError::ResourceLimit("配置读取锁已中毒".to_string()))
    }

    /// 设置性能档位。
    pub(crate) fn set_performance_profile(
        &self,
        profile: ResizePerformanceProfile,
    ) -> Result<(), PreviewError> {
        let mut config = self
            .config
            .write()
            .map_err(|_| PreviewError::ResourceLimit("配置写入锁已中毒".to_string()))?;
        config.apply_performance_profile(profile);

        log::info!(
            "⚙️ 已切换预览性能档位：{:?}（target_pixels={}, filter={:?}）",
            profile,
            config.max_target_pixels,
            config.resize_filter
        );

        Ok(())
    }

    /// 获取当前生效档位。
    pub(crate) fn get_performance_profile(
        &self,
    ) -> Result<ResizePerformanceProfile, PreviewError> {
        let config = self
            .config
            .read()
            .map_err(|_| PreviewError::ResourceLimit("配置读取锁已中毒".to_string()))?;
        Ok(config.infer_performance_profile())
    }

    /// 设置体积与像素预算等高级配置。
    pub(crate) fn set_advanced_config(
        &self,
        max_file_size: u64,
        max_decoded_pixels: u64,
        max_decoded_bytes: u64,
        max_target_pixels: u64,
    ) -> Result<(), PreviewError> {
        if !(1024 * 1024..=512 * 1024 * 1024).contains(&max_file_size) {
            return Err(PreviewError::InvalidInput(
                "max_file_size 必须在 1MB~512MB 之间".to_string(),
            ));
        }
        if max_decoded_pixels < 1_000_000 {
            return Err(PreviewError::InvalidInput(
                "max_decoded_pixels 不能小于 1000000".to_string(),
            ));
        }
        if max_decoded_bytes < 8 * 1024 * 1024 {
            return Err(PreviewError::InvalidInput(
                "max_decoded_bytes 不能小于 8MB".to_string(),
            ));
        }
        if max_target_pixels < 250_000 {
            return Err(PreviewError::InvalidInput(
                "max_target_pixels 不能小于 250000".to_string(),
            ));
        }
        if max_target_pixels > max_decoded_pixels {
            return Err(PreviewError::InvalidInput(
                "max_target_pixels 不能大于 max_decoded_pixels".to_string(),
            ));
        }

        let mut config = self
            .config
            .write()
            .map_err(|_| PreviewError::ResourceLimit("配置写入锁已中毒".to_string()))?;

        config.max_file_size = max_file_size;
        config.max_decoded_pixels = max_decoded_pixels;
        config.max_decoded_bytes = max_decoded_bytes;
        config.max_target_pixels = max_target_pixels;

        Ok(())
    }

    /// 获取高级配置快照。
    pub(crate) fn get_advanced_config(&self) -> Result<(u64, u64, u64, u64), PreviewError> {
        let config = self
            .config
            .read()
            .map_err(|_| PreviewError::ResourceLimit("配置读取锁已中毒".to_string()))?;

        Ok((
            config.max_file_size,
            config.max_decoded_pixels,
            config.max_decoded_bytes,
            config.max_target_pixels,
        ))
    }

    /// 处理主入口：上传文件 → PNG Base64 预览。
    pub(crate) async fn resize_to_preview(
        &self,
        file: &UploadedFile,
        max_width: u32,
    ) -> Result<EncodedPreview, PreviewError> {
        let config = self.config_snapshot()?;
        let total_start = Instant::now();

        EnvironmentCapabilities::probe().ensure_supported()?;
        media_type::ensure_supported_media_type(&file.media_type)?;

        let load_start = Instant::now();
        let decoded = self.load_image(file, &config).await?;
        let (natural_width, natural_height) = (decoded.width, decoded.height);
        let load_elapsed = load_start.elapsed();

        let target = Self::compute_target_dimensions(natural_width, natural_height, max_width)?;
        Self::validate_target_limits(&config, target)?;

        let resample_start = Instant::now();
        let surface =
            tokio::task::spawn_blocking(move || Self::resample(&decoded, target, &config))
                .await
                .map_err(|e| PreviewError::Resize(format!("重采样任务中断：{}", e)))??;
        let resample_elapsed = resample_start.elapsed();

        let encode_start = Instant::now();
        let preview = tokio::task::spawn_blocking(move || Self::encode_preview(&surface, target))
            .await
            .map_err(|e| PreviewError::Resize(format!("编码任务中断：{}", e)))??;
        let encode_elapsed = encode_start.elapsed();

        let total_elapsed = total_start.elapsed();
        log::info!(
            "✅ 预览生成完成 - 名称: {} {}x{} -> {}x{} load={}ms resample={}ms encode={}ms total={}ms",
            file.name,
            natural_width,
            natural_height,
            preview.width,
            preview.height,
            load_elapsed.as_millis(),
            resample_elapsed.as_millis(),
            encode_elapsed.as_millis(),
            total_elapsed.as_millis()
        );

        Ok(preview)
    }
}
