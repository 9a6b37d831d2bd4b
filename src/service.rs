//! # 服务层（可注入状态）
//!
//! ## 设计思路
//!
//! 使用 `ResizeService` 作为对外入口，替代全局单例函数。
//! 好处：
//! 1. 生命周期清晰（由宿主统一管理）
//! 2. 测试可创建独立实例，减少共享状态副作用
//! 3. 后续可扩展多实例或按会话配置
//!
//! ## 实现思路
//!
//! 对外仅暴露少量稳定 API：
//! - `get_resized_image`：执行完整预览链路，返回 Base64 载荷
//! - `set_performance_profile` / `get_performance_profile`：档位切换与查询
//! - `set_advanced_config` / `get_advanced_config`：预算阈值调整

use crate::config::{ResizeConfig, ResizePerformanceProfile};
use crate::error::PreviewError;
use crate::handler::ResizeHandler;
use crate::source::UploadedFile;

/// 高级配置 DTO，字段与 [`ResizeConfig`] 中的预算项一一对应。
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ResizeAdvancedConfig {
    pub max_file_size: u64,
    pub max_decoded_pixels: u64,
    pub max_decoded_bytes: u64,
    pub max_target_pixels: u64,
}

/// 预览服务。
///
/// 内部持有 `ResizeHandler`；接口只需 `&self`，可被多处共享。
pub struct ResizeService {
    handler: ResizeHandler,
}

impl ResizeService {
    /// 使用默认配置创建服务。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use image_resizer::ResizeService;
    ///
    /// let service = ResizeService::new()?;
    /// # Ok::<(), image_resizer::PreviewError>(())
    /// ```
    pub fn new() -> Result<Self, PreviewError> {
        Self::with_config(ResizeConfig::default())
    }

    /// 使用自定义配置创建服务。
    ///
    /// 主要用于测试或按场景注入不同策略。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use image_resizer::{ResizeConfig, ResizeService};
    ///
    /// let mut config = ResizeConfig::default();
    /// config.max_file_size = 8 * 1024 * 1024;
    /// let service = ResizeService::with_config(config)?;
    /// # Ok::<(), image_resizer::PreviewError>(())
    /// ```
    pub fn with_config(config: ResizeConfig) -> Result<Self, PreviewError> {
        let handler = ResizeHandler::new(config)?;
        Ok(Self { handler })
    }

    /// 执行完整预览链路：校验 → 解码 → 重采样 → PNG 编码。
    ///
    /// 返回不含 `data:` 前缀的 Base64 字符串；目标宽度为 `max_width`，
    /// 高度按纵横比推导，小于目标宽度的图片照常放大。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use image_resizer::{ResizeService, UploadedFile};
    ///
    /// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
    /// let service = ResizeService::new()?;
    /// let file = UploadedFile::new("photo.png", "image/png", std::fs::read("photo.png")?);
    ///
    /// let payload = service.get_resized_image(&file, 1248).await?;
    /// assert!(!payload.starts_with("data:"));
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_resized_image(
        &self,
        file: &UploadedFile,
        max_width: u32,
    ) -> Result<String, PreviewError> {
        let preview = self.handler.resize_to_preview(file, max_width).await?;
        Ok(preview.payload)
    }

    /// 设置性能档位。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use image_resizer::ResizeService;
    ///
    /// let service = ResizeService::new()?;
    /// service.set_performance_profile("speed")?;
    /// # Ok::<(), image_resizer::PreviewError>(())
    /// ```
    pub fn set_performance_profile(&self, profile: &str) -> Result<(), PreviewError> {
        let profile = ResizePerformanceProfile::from_str(profile)?;
        self.handler.set_performance_profile(profile)
    }

    /// 获取当前生效性能档位（字符串）。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use image_resizer::ResizeService;
    ///
    /// let service = ResizeService::new()?;
    /// let profile = service.get_performance_profile()?;
    /// assert!(matches!(profile.as_str(), "quality" | "balanced" | "speed"));
    /// # Ok::<(), image_resizer::PreviewError>(())
    /// ```
    pub fn get_performance_profile(&self) -> Result<String, PreviewError> {
        let profile = self.handler.get_performance_profile()?;
        Ok(profile.as_str().to_string())
    }

    /// 调整体积与像素预算。
    pub fn set_advanced_config(&self, config: ResizeAdvancedConfig) -> Result<(), PreviewError> {
        self.handler.set_advanced_config(
            config.max_file_size,
            config.max_decoded_pixels,
            config.max_decoded_bytes,
            config.max_target_pixels,
        )
    }

    /// 获取当前生效的预算配置。
    pub fn get_advanced_config(&self) -> Result<ResizeAdvancedConfig, PreviewError> {
        let (max_file_size, max_decoded_pixels, max_decoded_bytes, max_target_pixels) =
            self.handler.get_advanced_config()?;

        Ok(ResizeAdvancedConfig {
            max_file_size,
            max_decoded_pixels,
            max_decoded_bytes,
            max_target_pixels,
        })
    }
}
