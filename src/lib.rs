//! 汉字转拼音
//!
//! 支持声调符号、数字声调、无声调三种样式，多音字按上下文词组消歧。
//! 词库由调用方加载后注入引擎，引擎本身不做任何 I/O。

pub mod config;
pub mod dictionary;
pub mod transcriber;

pub use config::{AppConfig, DictionaryConfig};
pub use dictionary::{
    CharacterPronunciations, PinyinDictionary, PolyphoneDictionary, PolyphoneEntry,
    PronunciationLookup,
};
pub use transcriber::{
    transcribe, MatchPolicy, PinyinEngine, Token, TokenKind, ToneStyle, TranscribeOptions,
    Transcription, UmlautStyle,
};

/// 初始化日志（输出到 stderr）
///
/// 通过 `RUST_LOG` 控制级别，默认 warn；可多次调用
pub fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // 重复初始化时 try_init 返回错误，忽略即可
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}
