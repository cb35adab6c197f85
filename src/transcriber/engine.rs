//! 拼音转写主引擎
//!
//! 组合字符分类、多音字消歧、声调转换

use std::time::Instant;

use crate::dictionary::PronunciationLookup;
use crate::transcriber::classifier::{CharClass, CharacterClassifier};
use crate::transcriber::resolver::{PolyphoneResolver, TokenBuffer};
use crate::transcriber::tone::ToneTranscoder;
use crate::transcriber::types::{
    MatchPolicy, ResolvedWord, Token, TokenKind, ToneStyle, TranscribeOptions, Transcription,
};

/// 拼音转写引擎（可复用，词库只读）
pub struct PinyinEngine<L: PronunciationLookup> {
    lookup: L,
}

impl<L: PronunciationLookup> PinyinEngine<L> {
    /// 创建转写引擎
    ///
    /// # Arguments
    /// * `lookup` - 已加载完成的读音词库
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// 转写文本
    ///
    /// 纯函数，不可失败
    pub fn transcribe(&self, input: &str, options: &TranscribeOptions) -> String {
        let (tokens, _) = self.tokenize(input, options.match_policy);
        ToneTranscoder::new(options).render(&tokens)
    }

    /// 转写文本，附带中间 Token 与多音词命中记录
    pub fn transcribe_detailed(&self, input: &str, options: &TranscribeOptions) -> Transcription {
        let start = Instant::now();

        let (tokens, resolved) = self.tokenize(input, options.match_policy);
        let text = ToneTranscoder::new(options).render(&tokens);

        let elapsed_us = start.elapsed().as_micros() as u64;
        tracing::debug!(
            "转写完成: {} 个 Token，{} 个多音词，耗时 {}us",
            tokens.len(),
            resolved.len(),
            elapsed_us
        );

        Transcription {
            text,
            tokens,
            resolved,
            elapsed_us,
        }
    }

    /// 扫描输入，生成与字符位置一一对应的 Token 序列
    pub fn tokenize(&self, input: &str, policy: MatchPolicy) -> (Vec<Token>, Vec<ResolvedWord>) {
        let chars: Vec<char> = input.chars().collect();
        let mut buffer = TokenBuffer::with_capacity(chars.len());
        let mut resolver = PolyphoneResolver::new(policy);
        let mut resolved = Vec::new();

        let mut pos = 0;
        while pos < chars.len() {
            let ch = chars[pos];

            match CharacterClassifier::classify(&self.lookup, ch) {
                CharClass::Literal => buffer.push(Token::literal(ch)),
                CharClass::Single(reading) => {
                    buffer.push(Token::syllable(reading, TokenKind::SingleReading));
                }
                CharClass::Polyphone(readings) => {
                    match resolver.resolve(&self.lookup, &chars, pos, &mut buffer) {
                        Some(word) => {
                            // 跳到词末，循环末尾再前进一位
                            pos = word.end - 1;
                            resolved.push(word);
                        }
                        None => {
                            // 无词组命中，使用默认读音
                            buffer.push(Token::syllable(
                                readings[0].as_str(),
                                TokenKind::SingleReading,
                            ));
                        }
                    }
                }
            }

            pos += 1;
        }

        (buffer.into_tokens(), resolved)
    }
}

/// 以五个基本参数转写文本
pub fn transcribe<L: PronunciationLookup + ?Sized>(
    lookup: &L,
    input: &str,
    tone_style: ToneStyle,
    upper: bool,
    cap: bool,
    separator: &str,
) -> String {
    let options = TranscribeOptions::new(tone_style, upper, cap, separator);
    PinyinEngine::new(lookup).transcribe(input, &options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::PinyinDictionary;

    fn sample_dictionary() -> PinyinDictionary {
        let mut dict = PinyinDictionary::default();
        dict.characters.insert('我', ["wǒ"]);
        dict.characters.insert('去', ["qù"]);
        dict.characters.insert('银', ["yín"]);
        dict.characters.insert('行', ["xíng", "háng", "hàng", "héng"]);
        dict.characters.insert('长', ["cháng", "zhǎng"]);
        dict.characters.insert('重', ["zhòng", "chóng"]);
        dict.characters.insert('庆', ["qìng"]);
        dict.characters.insert('中', ["zhōng", "zhòng"]);
        dict.characters.insert('国', ["guó"]);
        dict.characters.insert('人', ["rén"]);
        dict.characters.insert('绿', ["lǜ", "lù"]);
        dict.characters.insert('患', ["huàn"]);
        dict.characters.insert('难', ["nán", "nàn"]);
        dict.characters.insert('与', ["yǔ", "yù", "yú"]);
        dict.characters.insert('共', ["gòng", "gōng"]);

        dict.polyphones.insert("银行", ["yín", "háng"]);
        dict.polyphones.insert("行长", ["háng", "zhǎng"]);
        dict.polyphones.insert("重庆", ["chóng", "qìng"]);
        dict.polyphones.insert("患难", ["huàn", "nàn"]);
        dict.polyphones.insert("与共", ["yǔ", "gòng"]);
        dict
    }

    fn engine() -> PinyinEngine<PinyinDictionary> {
        PinyinEngine::new(sample_dictionary())
    }

    #[test]
    fn test_single_reading() {
        let engine = engine();
        let output = engine.transcribe("我去", &TranscribeOptions::default());
        assert_eq!(output, "wǒ qù");
    }

    #[test]
    fn test_polyphone_precedence() {
        // 单字默认读音 xíng，词组读音 háng
        let engine = engine();
        let output = engine.transcribe("我去银行", &TranscribeOptions::default());
        assert_eq!(output, "wǒ qù yín háng");
    }

    #[test]
    fn test_polyphone_word_start() {
        // 触发字为词首，后续字一并确定
        let engine = engine();
        let output = engine.transcribe("重庆人", &TranscribeOptions::default());
        assert_eq!(output, "chóng qìng rén");
    }

    #[test]
    fn test_polyphone_default_fallback() {
        let engine = engine();
        let output = engine.transcribe("行人", &TranscribeOptions::default());
        assert_eq!(output, "xíng rén");
    }

    #[test]
    fn test_adjacent_polyphone_words() {
        // 患难与共：难、与、共 都是多音字，两个词组互不干扰
        let engine = engine();
        let detailed = engine.transcribe_detailed("患难与共", &TranscribeOptions::default());
        assert_eq!(detailed.text, "huàn nàn yǔ gòng");
        assert_eq!(detailed.resolved.len(), 2);
        assert_eq!(detailed.resolved[0].word, "患难");
        assert_eq!(detailed.resolved[1].word, "与共");
        assert!(detailed
            .tokens
            .iter()
            .all(|t| t.kind == TokenKind::ResolvedPolyphone));
    }

    #[test]
    fn test_tokens_aligned_with_chars() {
        let engine = engine();
        let input = "A银行长,重庆!";
        let (tokens, _) = engine.tokenize(input, MatchPolicy::DictionaryOrder);
        assert_eq!(tokens.len(), input.chars().count());
        assert_eq!(tokens[0].kind, TokenKind::Literal);
        assert_eq!(tokens[4], Token::literal(','));
    }

    #[test]
    fn test_literal_passthrough() {
        let engine = engine();
        let output = engine.transcribe("Hi, 2024年！", &TranscribeOptions::default());
        // 年 未收录，原样输出
        assert_eq!(output, "Hi, 2024年！");
    }

    #[test]
    fn test_separator_around_literals() {
        let engine = engine();
        let output = engine.transcribe("中国, 人", &TranscribeOptions::default());
        assert_eq!(output, "zhōng guó,  rén");
    }

    #[test]
    fn test_separator_count() {
        let engine = engine();
        let output = engine.transcribe("我去中", &TranscribeOptions::default());
        assert_eq!(output.matches(' ').count(), 2);
        assert!(!output.starts_with(' '));
    }

    #[test]
    fn test_empty_separator() {
        let engine = engine();
        let options = TranscribeOptions::default().with_separator("");
        assert_eq!(engine.transcribe("我去银行", &options), "wǒqùyínháng");
    }

    #[test]
    fn test_custom_separator() {
        let engine = engine();
        let options = TranscribeOptions::default().with_separator("-");
        assert_eq!(engine.transcribe("我去", &options), "wǒ-qù");
    }

    #[test]
    fn test_numeric_style() {
        let engine = engine();
        let options = TranscribeOptions::default().with_tone_style(ToneStyle::Numeric);
        let output = engine.transcribe("银行绿", &options);
        assert_eq!(output, "yin2 hang2 lü4");

        for syllable in output.split(' ') {
            let last = syllable.chars().last().unwrap();
            assert!(('1'..='4').contains(&last));
        }
    }

    #[test]
    fn test_toneless_style() {
        let engine = engine();
        let options = TranscribeOptions::default().with_tone_style(ToneStyle::Toneless);
        let output = engine.transcribe("重庆人", &options);
        assert_eq!(output, "chong qing ren");
        assert!(!output.chars().any(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_casing() {
        let engine = engine();
        let upper = TranscribeOptions::new(ToneStyle::Numeric, true, false, " ");
        assert_eq!(engine.transcribe("行长", &upper), "HANG2 ZHANG3");

        let cap = TranscribeOptions::new(ToneStyle::Numeric, false, true, " ");
        assert_eq!(engine.transcribe("行长", &cap), "Hang2 Zhang3");
    }

    #[test]
    fn test_deterministic() {
        let engine = engine();
        let options = TranscribeOptions::default();
        let first = engine.transcribe("我去银行找行长，重庆人", &options);
        let second = engine.transcribe("我去银行找行长，重庆人", &options);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input() {
        let engine = engine();
        assert_eq!(engine.transcribe("", &TranscribeOptions::default()), "");
    }

    #[test]
    fn test_free_function() {
        let dict = sample_dictionary();
        let output = transcribe(&dict, "银行", ToneStyle::Numeric, false, true, "");
        assert_eq!(output, "Yin2Hang2");
    }

    #[test]
    fn test_shared_engine_across_threads() {
        let engine = std::sync::Arc::new(engine());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = engine.clone();
                std::thread::spawn(move || engine.transcribe("银行", &TranscribeOptions::default()))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), "yín háng");
        }
    }
}
