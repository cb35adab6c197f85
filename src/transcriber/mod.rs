//! 汉字转拼音
//!
//! ## 处理流程
//! 1. 按码位分类（汉字 / 原样字符）
//! 2. 单音字直接取读音，多音字开窗口匹配多音词，命中时回写整个词组
//! 3. 按声调样式渲染音节，处理大小写并插入分隔符

mod classifier;
mod engine;
mod resolver;
mod tone;
mod types;

pub use classifier::{CharClass, CharacterClassifier, HANZI_END, HANZI_START};
pub use engine::{transcribe, PinyinEngine};
pub use resolver::{PolyphoneResolver, SpanMatch, TokenBuffer};
pub use tone::{ToneMark, ToneTable, ToneTranscoder, BASE_VOWELS, TONE_VOWELS};
pub use types::{
    MatchPolicy, ResolvedWord, Token, TokenKind, ToneStyle, TranscribeOptions, Transcription,
    UmlautStyle,
};
