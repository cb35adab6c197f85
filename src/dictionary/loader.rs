//! 词库加载
//!
//! 支持两种格式：
//! - 文本：每行 `键<Tab 或 : 或 =>读音,读音,...`，`#` 开头为注释
//! - JSON：`{ "键": "读音,读音" }` 或 `{ "键": ["读音", "读音"] }`，保持键顺序
//!
//! 加载时校验词库约束，不合法直接报错，转写引擎不再校验。

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use unicode_normalization::UnicodeNormalization;

use crate::dictionary::lookup::{CharacterPronunciations, PinyinDictionary, PolyphoneDictionary};

/// 读音分隔符
pub const READING_SEPARATOR: char = ',';

/// 词库文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictionaryFormat {
    Text,
    Json,
}

impl DictionaryFormat {
    /// 按扩展名判断，`.json` 为 JSON，其余按文本处理
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

/// JSON 中的读音：逗号拼接的字符串或字符串数组
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawReadings {
    Joined(String),
    List(Vec<String>),
}

impl RawReadings {
    fn into_readings(self) -> Vec<String> {
        match self {
            RawReadings::Joined(joined) => split_readings(&joined),
            RawReadings::List(list) => list
                .iter()
                .map(|s| normalize_syllable(s))
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

/// 规范化音节：去空白、NFC、转小写
///
/// NFC 保证组合形式的声调符号（如 `a` + U+0301）也能命中声调表
pub fn normalize_syllable(syllable: &str) -> String {
    syllable.trim().nfc().collect::<String>().to_lowercase()
}

fn split_readings(joined: &str) -> Vec<String> {
    joined
        .split(READING_SEPARATOR)
        .map(normalize_syllable)
        .filter(|s| !s.is_empty())
        .collect()
}

/// 解析原始条目（键, 读音列表），保持出现顺序
///
/// 文本格式错误时报告行号
pub fn parse_entries(content: &str, format: DictionaryFormat) -> Result<Vec<(String, Vec<String>)>> {
    match format {
        DictionaryFormat::Text => parse_text_entries(content),
        DictionaryFormat::Json => parse_json_entries(content),
    }
}

fn parse_text_entries(content: &str) -> Result<Vec<(String, Vec<String>)>> {
    let mut entries = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, readings)) = line.split_once(|c: char| c == '\t' || c == ':' || c == '=')
        else {
            anyhow::bail!("第 {} 行缺少分隔符: {}", idx + 1, line);
        };

        let key = key.trim();
        if key.is_empty() {
            anyhow::bail!("第 {} 行缺少词条: {}", idx + 1, line);
        }

        entries.push((key.nfc().collect::<String>(), split_readings(readings)));
    }

    Ok(entries)
}

fn parse_json_entries(content: &str) -> Result<Vec<(String, Vec<String>)>> {
    let map: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(content).context("词库 JSON 解析失败")?;

    let mut entries = Vec::with_capacity(map.len());
    for (key, value) in map {
        let raw: RawReadings = serde_json::from_value(value)
            .with_context(|| format!("词条 {} 的读音格式不合法", key))?;
        entries.push((key.trim().nfc().collect::<String>(), raw.into_readings()));
    }

    Ok(entries)
}

/// 解析单字读音表
///
/// 约束：键为单个字符、读音非空、键不重复
pub fn parse_characters(content: &str, format: DictionaryFormat) -> Result<CharacterPronunciations> {
    let mut characters = CharacterPronunciations::new();

    for (key, readings) in parse_entries(content, format)? {
        let mut chars = key.chars();
        let (Some(ch), None) = (chars.next(), chars.next()) else {
            anyhow::bail!("单字词库的键必须是单个字符: {}", key);
        };

        if readings.is_empty() {
            anyhow::bail!("单字 {} 没有读音", key);
        }
        if characters.contains(ch) {
            anyhow::bail!("单字 {} 重复", key);
        }

        characters.insert(ch, readings);
    }

    Ok(characters)
}

/// 解析多音词表
///
/// 约束：词至少两个字、读音数与字数一致、词不重复
pub fn parse_polyphones(content: &str, format: DictionaryFormat) -> Result<PolyphoneDictionary> {
    let mut polyphones = PolyphoneDictionary::new();
    let mut seen: HashSet<String> = HashSet::new();

    for (word, readings) in parse_entries(content, format)? {
        let char_count = word.chars().count();
        if char_count < 2 {
            anyhow::bail!("多音词至少两个字: {}", word);
        }
        if readings.len() != char_count {
            anyhow::bail!(
                "多音词 {} 读音数不匹配: {} 字 / {} 个读音",
                word,
                char_count,
                readings.len()
            );
        }
        if !seen.insert(word.clone()) {
            anyhow::bail!("多音词 {} 重复", word);
        }

        polyphones.insert(&word, readings);
    }

    Ok(polyphones)
}

/// 从文件加载单字读音表
pub fn load_characters(path: &Path) -> Result<CharacterPronunciations> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("读取单字词库失败: {:?}", path))?;
    let characters = parse_characters(&content, DictionaryFormat::from_path(path))
        .with_context(|| format!("单字词库不合法: {:?}", path))?;

    tracing::info!("已加载单字词库 {:?}，{} 个字", path, characters.len());
    Ok(characters)
}

/// 从文件加载多音词表
pub fn load_polyphones(path: &Path) -> Result<PolyphoneDictionary> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("读取多音词库失败: {:?}", path))?;
    let polyphones = parse_polyphones(&content, DictionaryFormat::from_path(path))
        .with_context(|| format!("多音词库不合法: {:?}", path))?;

    tracing::info!("已加载多音词库 {:?}，{} 个词", path, polyphones.len());
    Ok(polyphones)
}

/// 从两个文件加载完整词库
pub fn load_dictionary(characters_path: &Path, polyphones_path: &Path) -> Result<PinyinDictionary> {
    Ok(PinyinDictionary::new(
        load_characters(characters_path)?,
        load_polyphones(polyphones_path)?,
    ))
}
