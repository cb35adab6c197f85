//! 转写类型定义

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// 声调样式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToneStyle {
    /// 声调符号（默认），如 "háng"
    #[default]
    #[serde(alias = "0")]
    Marked,
    /// 数字声调在末尾，如 "hang2"
    #[serde(alias = "1")]
    Numeric,
    /// 无声调，如 "hang"
    #[serde(alias = "2")]
    Toneless,
}

impl FromStr for ToneStyle {
    type Err = anyhow::Error;

    /// 支持名称与旧式数字编码（0-声调符号，1-数字声调，2-无声调）
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "marked" | "mark" | "0" => Ok(Self::Marked),
            "numeric" | "number" | "num" | "1" => Ok(Self::Numeric),
            "toneless" | "plain" | "none" | "2" => Ok(Self::Toneless),
            other => anyhow::bail!("未知的声调样式: {}", other),
        }
    }
}

/// ü 的输出写法（仅影响数字声调与无声调样式）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UmlautStyle {
    /// 保留 ü（默认）
    #[default]
    Umlaut,
    /// 以 v 代替 ü，如 "lv4"
    V,
}

/// 多音词候选的枚举顺序
///
/// 同一位置可能有多个多音词匹配，先匹配者生效
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// 词库插入顺序（默认）
    #[default]
    DictionaryOrder,
    /// 词长降序，同长按字典序升序
    LongestFirst,
}

impl FromStr for MatchPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "dictionary_order" | "dictionary" | "first" => Ok(Self::DictionaryOrder),
            "longest_first" | "longest" => Ok(Self::LongestFirst),
            other => anyhow::bail!("未知的多音词匹配策略: {}", other),
        }
    }
}

/// Token 类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    /// 原样输出的字符（符号、字母、数字、未收录汉字）
    Literal,
    /// 单字读音（单音字，或多音字无词组命中时的默认读音）
    SingleReading,
    /// 由多音词组确定的读音
    ResolvedPolyphone,
}

impl TokenKind {
    /// 是否为拼音音节（参与声调转换、大小写与分隔符）
    pub fn is_syllable(self) -> bool {
        !matches!(self, TokenKind::Literal)
    }
}

/// 中间 Token，与输入字符位置一一对应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// 原字符或带声调音节
    pub text: String,
    pub kind: TokenKind,
}

impl Token {
    pub fn literal(ch: char) -> Self {
        Self {
            text: ch.to_string(),
            kind: TokenKind::Literal,
        }
    }

    pub fn syllable(text: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

/// 转写参数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscribeOptions {
    #[serde(default)]
    pub tone_style: ToneStyle,
    /// 全部大写
    #[serde(default)]
    pub upper: bool,
    /// 首字母大写（upper 为 false 时生效）
    #[serde(default)]
    pub cap: bool,
    /// 音节分隔符，空串表示不分隔
    #[serde(default = "default_separator")]
    pub separator: String,
    #[serde(default)]
    pub umlaut: UmlautStyle,
    #[serde(default)]
    pub match_policy: MatchPolicy,
}

fn default_separator() -> String {
    " ".to_string()
}

impl Default for TranscribeOptions {
    fn default() -> Self {
        Self {
            tone_style: ToneStyle::default(),
            upper: false,
            cap: false,
            separator: default_separator(),
            umlaut: UmlautStyle::default(),
            match_policy: MatchPolicy::default(),
        }
    }
}

impl TranscribeOptions {
    /// 按五个基本参数构造，其余取默认值
    pub fn new(tone_style: ToneStyle, upper: bool, cap: bool, separator: &str) -> Self {
        Self {
            tone_style,
            upper,
            cap,
            separator: separator.to_string(),
            ..Self::default()
        }
    }

    pub fn with_tone_style(mut self, tone_style: ToneStyle) -> Self {
        self.tone_style = tone_style;
        self
    }

    pub fn with_separator(mut self, separator: &str) -> Self {
        self.separator = separator.to_string();
        self
    }

    pub fn with_umlaut(mut self, umlaut: UmlautStyle) -> Self {
        self.umlaut = umlaut;
        self
    }

    pub fn with_match_policy(mut self, match_policy: MatchPolicy) -> Self {
        self.match_policy = match_policy;
        self
    }
}

/// 一次多音词命中记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedWord {
    /// 命中的词组
    pub word: String,
    /// 起始位置（字符索引）
    pub start: usize,
    /// 结束位置（字符索引，不含）
    pub end: usize,
}

/// 转写结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcription {
    /// 最终拼音文本
    pub text: String,
    /// 中间 Token 序列
    pub tokens: Vec<Token>,
    /// 多音词命中记录
    pub resolved: Vec<ResolvedWord>,
    /// 处理耗时（微秒）
    pub elapsed_us: u64,
}
