//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有“可调策略”集中到 `ResizeConfig`，保证运行时行为可观测、可调整、可测试。
//! 其中性能档位（quality / balanced / speed）作为高层语义，映射到底层参数组合。
//!
//! ## 实现思路
//!
//! - `Default` 提供面向预览质量的默认配置。
//! - `ResizePerformanceProfile` 负责档位字符串解析与反向输出。
//! - `apply_performance_profile` 将档位转换为具体滤镜与像素预算。
//! - `infer_performance_profile` 用于从当前配置反推档位（给调用方展示状态）。

use image::imageops::FilterType;

use crate::error::PreviewError;

/// 预览流水线配置。
///
/// 字段覆盖了读取、解码与重采样三个阶段的预算与策略。
#[derive(Debug, Clone)]
pub struct ResizeConfig {
    /// 读取原始字节时允许的最大文件体积（字节）。
    pub max_file_size: u64,
    /// 解码后的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
    /// 解码阶段允许的预计内存上限（按 RGBA 估算，字节）。
    pub max_decoded_bytes: u64,
    /// 重采样目标像素上限（拦截失控的放大请求）。
    pub max_target_pixels: u64,
    /// 重采样滤镜策略。
    pub resize_filter: FilterType,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            max_file_size: 50 * 1024 * 1024,
            max_decoded_pixels: 40_000_000,
            max_decoded_bytes: 160 * 1024 * 1024,
            max_target_pixels: 40_000_000,
            resize_filter: FilterType::Lanczos3,
        }
    }
}

/// 预览性能档位（面向产品/用户语义）。
///
/// - `Quality`：尽量保真
/// - `Balanced`：质量与性能平衡
/// - `Speed`：优先出图速度
#[derive(Debug, Clone, Copy)]
pub enum ResizePerformanceProfile {
    Quality,
    Balanced,
    Speed,
}

impl ResizePerformanceProfile {
    /// 从外部字符串解析档位。
    ///
    /// # 示例
    /// ```rust,ignore
    /// use image_resizer::ResizePerformanceProfile;
    ///
    /// let p = ResizePerformanceProfile::from_str("balanced")?;
    /// assert_eq!(p.as_str(), "balanced");
    /// # Ok::<(), image_resizer::PreviewError>(())
    /// ```
    pub(crate) fn from_str(profile: &str) -> Result<Self, PreviewError> {
        match profile.trim().to_lowercase().as_str() {
            "quality" => Ok(Self::Quality),
            "balanced" => Ok(Self::Balanced),
            "speed" => Ok(Self::Speed),
            other => Err(PreviewError::InvalidInput(format!(
                "未知性能档位：{}（可选：quality / balanced / speed）",
                other
            ))),
        }
    }

    /// 将档位输出为稳定字符串，供调用方展示与持久化。
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Quality => "quality",
            Self::Balanced => "balanced",
            Self::Speed => "speed",
        }
    }
}

impl ResizeConfig {
    /// 基于当前参数反推性能档位。
    ///
    /// 用于“当前生效档位”查询场景。
    pub(crate) fn infer_performance_profile(&self) -> ResizePerformanceProfile {
        if matches!(self.resize_filter, FilterType::Lanczos3)
            && self.max_target_pixels >= self.max_decoded_pixels
        {
            return ResizePerformanceProfile::Quality;
        }

        if matches!(
            self.resize_filter,
            FilterType::Triangle | FilterType::Nearest
        ) || self.max_target_pixels <= 16_000_000
        {
            return ResizePerformanceProfile::Speed;
        }

        ResizePerformanceProfile::Balanced
    }

    /// 应用指定性能档位到实际参数。
    ///
    /// 保持“档位语义稳定”，调用方按档位切换而无需了解底层细节。
    /// 任何档位都不会落到最近邻滤镜，预览平滑度是硬约束。
    pub(crate) fn apply_performance_profile(&mut self, profile: ResizePerformanceProfile) {
        match profile {
            ResizePerformanceProfile::Quality => {
                self.max_target_pixels = self.max_decoded_pixels;
                self.resize_filter = FilterType::Lanczos3;
            }
            ResizePerformanceProfile::Balanced => {
                self.max_target_pixels = 24_000_000;
                self.resize_filter = FilterType::CatmullRom;
            }
            ResizePerformanceProfile::Speed => {
                self.max_target_pixels = 16_000_000;
                self.resize_filter = FilterType::Triangle;
            }
        }
    }
}
