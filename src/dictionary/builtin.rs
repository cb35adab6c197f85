//! 内置词库
//!
//! 单字读音由 pinyin crate 生成（多音字按常用度排序，首个为默认读音），
//! 多音词表随二进制嵌入。

use anyhow::Result;
use pinyin::ToPinyinMulti;

use crate::dictionary::loader::{normalize_syllable, parse_polyphones, DictionaryFormat};
use crate::dictionary::lookup::{CharacterPronunciations, PinyinDictionary, PolyphoneDictionary};
use crate::transcriber::{ToneTable, HANZI_END, HANZI_START};

const EMBEDDED_POLYPHONES: &str = include_str!("../../data/polyphones.txt");

/// 生成支持区间内全部汉字的读音表
pub fn builtin_characters() -> CharacterPronunciations {
    let mut characters = CharacterPronunciations::new();

    for code in HANZI_START..=HANZI_END {
        let Some(ch) = char::from_u32(code) else {
            continue;
        };
        let Some(multi) = ch.to_pinyin_multi() else {
            continue;
        };

        let mut readings: Vec<String> = Vec::new();
        for reading in multi {
            let syllable = normalize_syllable(reading.with_tone());
            if !is_encodable(&syllable) {
                tracing::debug!("跳过声调表无法表示的读音: {} {}", ch, syllable);
                continue;
            }
            // 数据中偶有重复读音，保留首次出现
            if !readings.contains(&syllable) {
                readings.push(syllable);
            }
        }

        characters.insert(ch, readings);
    }

    tracing::info!("已生成内置单字词库，{} 个字", characters.len());
    characters
}

/// 音节只含 a-z、ü 与声调表中的带调元音
///
/// 数据中有 ń、ḿ、ê̄ 之类的读音，声调表无法转成数字或无声调形式
fn is_encodable(syllable: &str) -> bool {
    let table = ToneTable::global();
    !syllable.is_empty()
        && syllable
            .chars()
            .all(|c| c.is_ascii_lowercase() || c == 'ü' || table.lookup(c).is_some())
}

/// 解析嵌入的多音词表
pub fn builtin_polyphones() -> Result<PolyphoneDictionary> {
    parse_polyphones(EMBEDDED_POLYPHONES, DictionaryFormat::Text)
}

/// 完整内置词库
pub fn builtin_dictionary() -> Result<PinyinDictionary> {
    Ok(PinyinDictionary::new(
        builtin_characters(),
        builtin_polyphones()?,
    ))
}
