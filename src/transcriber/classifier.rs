//! 字符分类器
//!
//! 按码位判断字符是否为需要查询读音的汉字

use crate::dictionary::PronunciationLookup;

/// 支持的汉字码位下界（U+4E00）
pub const HANZI_START: u32 = 19968;
/// 支持的汉字码位上界，含（U+9FA5）
pub const HANZI_END: u32 = 40869;

/// 分类结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass<'a> {
    /// 原样输出
    Literal,
    /// 单音字
    Single(&'a str),
    /// 多音字，附全部读音（首个为默认读音）
    Polyphone(&'a [String]),
}

/// 字符分类器
pub struct CharacterClassifier;

impl CharacterClassifier {
    /// 码位是否在支持的汉字区间内
    pub fn is_hanzi(ch: char) -> bool {
        (HANZI_START..=HANZI_END).contains(&(ch as u32))
    }

    /// 对单个字符分类；区间外不查询词库，未收录的汉字按原样处理
    pub fn classify<'a, L: PronunciationLookup + ?Sized>(lookup: &'a L, ch: char) -> CharClass<'a> {
        if !Self::is_hanzi(ch) {
            return CharClass::Literal;
        }

        match lookup.readings(ch) {
            [] => CharClass::Literal,
            [single] => CharClass::Single(single.as_str()),
            readings => CharClass::Polyphone(readings),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::PinyinDictionary;

    #[test]
    fn test_is_hanzi_bounds() {
        assert!(CharacterClassifier::is_hanzi('一')); // U+4E00
        assert!(CharacterClassifier::is_hanzi('龥')); // U+9FA5
        assert!(!CharacterClassifier::is_hanzi('\u{9FA6}'));
        assert!(!CharacterClassifier::is_hanzi('\u{4DFF}'));
        assert!(!CharacterClassifier::is_hanzi('a'));
        assert!(!CharacterClassifier::is_hanzi('，'));
        assert!(!CharacterClassifier::is_hanzi('あ'));
    }

    #[test]
    fn test_classify() {
        let mut dict = PinyinDictionary::default();
        dict.characters.insert('中', ["zhōng", "zhòng"]);
        dict.characters.insert('国', ["guó"]);

        assert_eq!(CharacterClassifier::classify(&dict, 'x'), CharClass::Literal);
        assert_eq!(CharacterClassifier::classify(&dict, '国'), CharClass::Single("guó"));
        assert!(matches!(
            CharacterClassifier::classify(&dict, '中'),
            CharClass::Polyphone(readings) if readings.len() == 2
        ));
        // 区间内但未收录
        assert_eq!(CharacterClassifier::classify(&dict, '龘'), CharClass::Literal);
    }

    #[test]
    fn test_out_of_range_skips_lookup() {
        // 区间外字符即使词库中有条目也按原样处理
        let mut dict = PinyinDictionary::default();
        dict.characters.insert('〇', ["líng"]);
        assert_eq!(CharacterClassifier::classify(&dict, '〇'), CharClass::Literal);
    }
}
