//! 声调表与声调转换
//!
//! 声调表固定 24 个带调元音，按基础元音主序、声调次序排列：
//! 序号 `k` 的声调为 `k % 4 + 1`，基础元音为 `BASE_VOWELS[k / 4]`。

use std::collections::HashMap;

use crate::transcriber::types::{Token, ToneStyle, TranscribeOptions, UmlautStyle};

/// 带调元音（a e i o u ü 各四声）
pub const TONE_VOWELS: &str = "āáǎàēéěèīíǐìōóǒòūúǔùǖǘǚǜ";

/// 基础元音
pub const BASE_VOWELS: [char; 6] = ['a', 'e', 'i', 'o', 'u', 'ü'];

/// 轻声（无声调符号）在数字样式下的声调数字
pub const NEUTRAL_TONE_DIGIT: char = '0';

lazy_static::lazy_static! {
    /// 进程级声调表，首次使用时构建
    static ref TONE_TABLE: ToneTable = ToneTable::new();
}

/// 单个带调元音的解析结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneMark {
    /// 基础元音
    pub base: char,
    /// 声调 1-4
    pub tone: u8,
}

/// 声调表
pub struct ToneTable {
    marks: HashMap<char, ToneMark>,
}

impl ToneTable {
    fn new() -> Self {
        let marks = TONE_VOWELS
            .chars()
            .enumerate()
            .map(|(k, symbol)| {
                (
                    symbol,
                    ToneMark {
                        base: BASE_VOWELS[k / 4],
                        tone: (k % 4) as u8 + 1,
                    },
                )
            })
            .collect();

        Self { marks }
    }

    /// 获取进程级声调表
    pub fn global() -> &'static ToneTable {
        &TONE_TABLE
    }

    /// 查询带调元音，非带调元音返回 None
    pub fn lookup(&self, ch: char) -> Option<ToneMark> {
        self.marks.get(&ch).copied()
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }
}

/// 声调转换器
///
/// 将单个音节按声调样式渲染，并处理大小写与分隔符
pub struct ToneTranscoder<'a> {
    options: &'a TranscribeOptions,
    table: &'static ToneTable,
}

impl<'a> ToneTranscoder<'a> {
    pub fn new(options: &'a TranscribeOptions) -> Self {
        Self {
            options,
            table: ToneTable::global(),
        }
    }

    /// 渲染整个 Token 序列
    ///
    /// 分隔符仅插在音节之前，且前面已有输出；原样字符直接拼接
    pub fn render(&self, tokens: &[Token]) -> String {
        let mut output = String::new();

        for token in tokens {
            if !token.kind.is_syllable() {
                output.push_str(&token.text);
                continue;
            }

            let rendered = self.render_syllable(&token.text);
            if !self.options.separator.is_empty() && !output.is_empty() {
                output.push_str(&self.options.separator);
            }
            output.push_str(&rendered);
        }

        output
    }

    /// 渲染单个音节（声调样式 + 大小写）
    pub fn render_syllable(&self, syllable: &str) -> String {
        let toned = match self.options.tone_style {
            ToneStyle::Marked => syllable.to_string(),
            ToneStyle::Numeric => self.strip_tones(syllable, true),
            ToneStyle::Toneless => self.strip_tones(syllable, false),
        };

        if self.options.upper {
            toned.to_uppercase()
        } else if self.options.cap {
            capitalize(&toned)
        } else {
            toned
        }
    }

    /// 带调元音替换为基础元音，可选在末尾追加声调数字
    ///
    /// 多个带调元音时以最后一个为准
    fn strip_tones(&self, syllable: &str, append_digit: bool) -> String {
        let mut result = String::with_capacity(syllable.len() + 1);
        let mut tone: Option<u8> = None;

        for ch in syllable.chars() {
            match self.table.lookup(ch) {
                Some(mark) => {
                    result.push(self.umlaut(mark.base));
                    tone = Some(mark.tone);
                }
                None => result.push(self.umlaut(ch)),
            }
        }

        if append_digit {
            match tone {
                Some(t) => result.push(char::from(b'0' + t)),
                None => result.push(NEUTRAL_TONE_DIGIT),
            }
        }

        result
    }

    fn umlaut(&self, ch: char) -> char {
        match (self.options.umlaut, ch) {
            (UmlautStyle::V, 'ü') => 'v',
            _ => ch,
        }
    }
}

/// 首字母大写，其余不变
fn capitalize(syllable: &str) -> String {
    let mut chars = syllable.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
