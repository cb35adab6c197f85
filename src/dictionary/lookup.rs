//! 读音词库
//!
//! 单字读音表 + 多音词表，通过 `PronunciationLookup` 注入转写引擎

use std::collections::HashMap;
use std::sync::Arc;

/// 读音查询接口
pub trait PronunciationLookup {
    /// 单字的全部读音，首个为默认读音；未收录返回空切片
    fn readings(&self, ch: char) -> &[String];

    /// 多音词精确查询
    fn lookup_word(&self, word: &str) -> Option<&[String]>;

    /// 包含该字的多音词，按词库枚举顺序
    fn candidates(&self, ch: char) -> Vec<&PolyphoneEntry>;
}

impl<T: PronunciationLookup + ?Sized> PronunciationLookup for &T {
    fn readings(&self, ch: char) -> &[String] {
        (**self).readings(ch)
    }

    fn lookup_word(&self, word: &str) -> Option<&[String]> {
        (**self).lookup_word(word)
    }

    fn candidates(&self, ch: char) -> Vec<&PolyphoneEntry> {
        (**self).candidates(ch)
    }
}

impl<T: PronunciationLookup + ?Sized> PronunciationLookup for Arc<T> {
    fn readings(&self, ch: char) -> &[String] {
        (**self).readings(ch)
    }

    fn lookup_word(&self, word: &str) -> Option<&[String]> {
        (**self).lookup_word(word)
    }

    fn candidates(&self, ch: char) -> Vec<&PolyphoneEntry> {
        (**self).candidates(ch)
    }
}

/// 单字读音表
#[derive(Debug, Clone, Default)]
pub struct CharacterPronunciations {
    readings: HashMap<char, Vec<String>>,
}

impl CharacterPronunciations {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入或覆盖单字读音，空读音列表忽略
    pub fn insert<S: Into<String>>(&mut self, ch: char, readings: impl IntoIterator<Item = S>) {
        let readings: Vec<String> = readings.into_iter().map(Into::into).collect();
        if readings.is_empty() {
            return;
        }
        self.readings.insert(ch, readings);
    }

    pub fn get(&self, ch: char) -> &[String] {
        self.readings.get(&ch).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, ch: char) -> bool {
        self.readings.contains_key(&ch)
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

/// 多音词条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolyphoneEntry {
    pub word: String,
    /// 词的字符序列（预拆分，窗口匹配时按字符比较）
    pub chars: Vec<char>,
    /// 与 `chars` 逐位对应的读音
    pub pronunciations: Vec<String>,
}

impl PolyphoneEntry {
    /// 字符长度
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// 读音数与字数一致
    pub fn is_well_formed(&self) -> bool {
        self.chars.len() >= 2 && self.pronunciations.len() == self.chars.len()
    }
}

/// 多音词表（保持插入顺序）
#[derive(Debug, Clone, Default)]
pub struct PolyphoneDictionary {
    entries: Vec<PolyphoneEntry>,
    /// 词 → 条目索引
    index: HashMap<String, usize>,
    /// 字 → 包含该字的条目索引（插入顺序）
    by_char: HashMap<char, Vec<usize>>,
}

impl PolyphoneDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入多音词；同词再次插入时覆盖读音，保留原位置
    pub fn insert<S: Into<String>>(
        &mut self,
        word: &str,
        pronunciations: impl IntoIterator<Item = S>,
    ) {
        let pronunciations: Vec<String> = pronunciations.into_iter().map(Into::into).collect();

        if let Some(&idx) = self.index.get(word) {
            self.entries[idx].pronunciations = pronunciations;
            return;
        }

        let idx = self.entries.len();
        let chars: Vec<char> = word.chars().collect();

        for &ch in &chars {
            let slots = self.by_char.entry(ch).or_default();
            // 同字在词中重复出现时只登记一次
            if slots.last() != Some(&idx) {
                slots.push(idx);
            }
        }

        self.index.insert(word.to_string(), idx);
        self.entries.push(PolyphoneEntry {
            word: word.to_string(),
            chars,
            pronunciations,
        });
    }

    pub fn get(&self, word: &str) -> Option<&PolyphoneEntry> {
        self.index.get(word).map(|&idx| &self.entries[idx])
    }

    /// 包含该字的条目，按插入顺序
    pub fn containing(&self, ch: char) -> Vec<&PolyphoneEntry> {
        self.by_char
            .get(&ch)
            .map(|slots| slots.iter().map(|&idx| &self.entries[idx]).collect())
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PolyphoneEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 完整词库：单字读音 + 多音词
#[derive(Debug, Clone, Default)]
pub struct PinyinDictionary {
    pub characters: CharacterPronunciations,
    pub polyphones: PolyphoneDictionary,
}

impl PinyinDictionary {
    pub fn new(characters: CharacterPronunciations, polyphones: PolyphoneDictionary) -> Self {
        Self {
            characters,
            polyphones,
        }
    }
}

impl PronunciationLookup for PinyinDictionary {
    fn readings(&self, ch: char) -> &[String] {
        self.characters.get(ch)
    }

    fn lookup_word(&self, word: &str) -> Option<&[String]> {
        self.polyphones
            .get(word)
            .map(|entry| entry.pronunciations.as_slice())
    }

    fn candidates(&self, ch: char) -> Vec<&PolyphoneEntry> {
        self.polyphones.containing(ch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_readings() {
        let mut chars = CharacterPronunciations::new();
        chars.insert('行', ["xíng", "háng"]);
        chars.insert('空', Vec::<String>::new());

        assert_eq!(chars.get('行'), ["xíng", "háng"]);
        assert!(chars.get('空').is_empty());
        assert!(!chars.contains('空'));
        assert_eq!(chars.len(), 1);
    }

    #[test]
    fn test_polyphone_insertion_order() {
        let mut words = PolyphoneDictionary::new();
        words.insert("银行", ["yín", "háng"]);
        words.insert("行走", ["xíng", "zǒu"]);
        words.insert("行长", ["háng", "zhǎng"]);

        let found: Vec<&str> = words
            .containing('行')
            .iter()
            .map(|e| e.word.as_str())
            .collect();
        assert_eq!(found, vec!["银行", "行走", "行长"]);
        assert!(words.containing('中').is_empty());
    }

    #[test]
    fn test_polyphone_reinsert_keeps_position() {
        let mut words = PolyphoneDictionary::new();
        words.insert("银行", ["yín", "xíng"]);
        words.insert("行走", ["xíng", "zǒu"]);
        words.insert("银行", ["yín", "háng"]);

        assert_eq!(words.len(), 2);
        assert_eq!(words.iter().next().unwrap().word, "银行");
        assert_eq!(words.get("银行").unwrap().pronunciations, ["yín", "háng"]);
    }

    #[test]
    fn test_repeated_char_registered_once() {
        let mut words = PolyphoneDictionary::new();
        words.insert("数数", ["shǔ", "shù"]);
        assert_eq!(words.containing('数').len(), 1);
    }

    #[test]
    fn test_lookup_trait() {
        let mut dict = PinyinDictionary::default();
        dict.characters.insert('重', ["zhòng", "chóng"]);
        dict.polyphones.insert("重庆", ["chóng", "qìng"]);

        let lookup: &dyn PronunciationLookup = &dict;
        assert_eq!(lookup.readings('重')[0], "zhòng");
        assert_eq!(lookup.lookup_word("重庆").unwrap(), ["chóng", "qìng"]);
        assert!(lookup.lookup_word("重要").is_none());
        assert_eq!(lookup.candidates('庆').len(), 1);
    }

    #[test]
    fn test_entry_well_formed() {
        let mut words = PolyphoneDictionary::new();
        words.insert("银行", ["yín"]);
        assert!(!words.get("银行").unwrap().is_well_formed());
    }
}
