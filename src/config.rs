// src/config.rs

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::dictionary::{self, PinyinDictionary, PolyphoneDictionary};
use crate::transcriber::TranscribeOptions;

pub const APP_DIR_NAME: &str = "HanziPinyin";
pub const CONFIG_FILENAME: &str = "config.json";

// ============================================================================
// 词库来源配置
// ============================================================================

/// 词库来源
///
/// 未指定文件时使用内置词库（需启用 `builtin-dict` feature）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryConfig {
    /// 单字读音表路径
    #[serde(default)]
    pub characters_path: Option<PathBuf>,
    /// 多音词表路径
    #[serde(default)]
    pub polyphones_path: Option<PathBuf>,
    /// 未指定多音词表时是否使用内置多音词表（默认启用）
    #[serde(default = "default_builtin_polyphones")]
    pub builtin_polyphones: bool,
}

fn default_builtin_polyphones() -> bool {
    true
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            characters_path: None,
            polyphones_path: None,
            builtin_polyphones: default_builtin_polyphones(),
        }
    }
}

impl DictionaryConfig {
    /// 按配置加载词库
    pub fn load(&self) -> Result<PinyinDictionary> {
        let characters = match &self.characters_path {
            Some(path) => dictionary::load_characters(path)?,
            None => Self::builtin_characters()?,
        };

        let polyphones = match &self.polyphones_path {
            Some(path) => dictionary::load_polyphones(path)?,
            None if self.builtin_polyphones => Self::builtin_polyphones()?,
            None => PolyphoneDictionary::new(),
        };

        Ok(PinyinDictionary::new(characters, polyphones))
    }

    #[cfg(feature = "builtin-dict")]
    fn builtin_characters() -> Result<dictionary::CharacterPronunciations> {
        Ok(dictionary::builtin_characters())
    }

    #[cfg(not(feature = "builtin-dict"))]
    fn builtin_characters() -> Result<dictionary::CharacterPronunciations> {
        anyhow::bail!("未指定单字词库，且未启用内置词库（builtin-dict）")
    }

    #[cfg(feature = "builtin-dict")]
    fn builtin_polyphones() -> Result<PolyphoneDictionary> {
        dictionary::builtin_polyphones()
    }

    #[cfg(not(feature = "builtin-dict"))]
    fn builtin_polyphones() -> Result<PolyphoneDictionary> {
        tracing::warn!("未启用内置词库（builtin-dict），多音词表为空");
        Ok(PolyphoneDictionary::new())
    }
}

// ============================================================================
// 应用配置
// ============================================================================

/// 应用配置（JSON）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// 转写参数默认值
    #[serde(default)]
    pub transcribe: TranscribeOptions,
    #[serde(default)]
    pub dictionary: DictionaryConfig,
}

impl AppConfig {
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| anyhow::anyhow!("无法获取配置目录"))?;
        Ok(config_dir.join(APP_DIR_NAME).join(CONFIG_FILENAME))
    }

    /// 从默认路径加载，文件不存在时返回默认配置
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from_path(&path)
    }

    /// 从默认路径加载；无法确定配置目录时使用默认配置
    ///
    /// 配置文件为可选项，仅解析失败时报错
    pub fn load_or_default() -> Result<Self> {
        let path = Self::config_path()
            .map_err(|e| tracing::warn!("{}，使用默认配置", e))
            .ok();
        Self::load_from_optional_path(path.as_deref())
    }

    pub fn load_from_optional_path(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        tracing::info!("尝试从以下路径加载配置: {:?}", path);

        if !path.exists() {
            tracing::info!("配置文件不存在，使用默认配置");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("配置解析失败 {:?}: {}", path, e))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to_path(&path)
    }

    /// 原子写入：先写临时文件，备份旧文件后重命名替换
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        let temp_path = path.with_extension("json.tmp");
        let backup_path = path.with_extension("json.bak");

        std::fs::write(&temp_path, &content).map_err(|e| {
            tracing::error!("写入临时文件失败 {:?}: {}", temp_path, e);
            e
        })?;

        if path.exists() {
            if backup_path.exists() {
                let _ = std::fs::remove_file(&backup_path);
            }
            std::fs::rename(path, &backup_path).map_err(|e| {
                tracing::error!("备份旧配置文件失败: {}", e);
                e
            })?;
        }

        match std::fs::rename(&temp_path, path) {
            Ok(()) => {
                let _ = std::fs::remove_file(&backup_path);
                tracing::info!("配置已保存: {:?}", path);
                Ok(())
            }
            Err(e) => {
                tracing::error!("重命名临时文件失败: {}", e);
                if backup_path.exists() {
                    if let Err(restore_err) = std::fs::rename(&backup_path, path) {
                        tracing::error!("恢复备份失败: {}", restore_err);
                    } else {
                        tracing::info!("已从备份恢复配置");
                    }
                }
                Err(e.into())
            }
        }
    }
}
