//! 读音词库
//!
//! 转写引擎只通过 `PronunciationLookup` 读取词库；加载与校验在本模块完成

#[cfg(feature = "builtin-dict")]
mod builtin;
mod loader;
mod lookup;

#[cfg(feature = "builtin-dict")]
pub use builtin::{builtin_characters, builtin_dictionary, builtin_polyphones};
pub use loader::{
    load_characters, load_dictionary, load_polyphones, normalize_syllable, parse_characters,
    parse_entries, parse_polyphones, DictionaryFormat, READING_SEPARATOR,
};
pub use lookup::{
    CharacterPronunciations, PinyinDictionary, PolyphoneDictionary, PolyphoneEntry,
    PronunciationLookup,
};
