//! 多音字消歧
//!
//! 以当前多音字为中心开窗口，在词库中寻找包含该字的多音词；
//! 命中后一次性确定整个词组的读音，并覆盖已写入的 Token。

use crate::dictionary::{PolyphoneEntry, PronunciationLookup};
use crate::transcriber::types::{MatchPolicy, ResolvedWord, Token, TokenKind};

/// Token 缓冲区
///
/// 与输入字符位置一一对应；多音词命中时可回写已写入的位置
#[derive(Debug, Default)]
pub struct TokenBuffer {
    tokens: Vec<Token>,
}

impl TokenBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tokens: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// 从 `start` 起逐位写入音节：已有位置覆盖，超出部分追加
    ///
    /// `start` 不得超过当前长度，保证写入后仍连续
    pub fn overwrite_span(&mut self, start: usize, syllables: &[String], kind: TokenKind) {
        debug_assert!(start <= self.tokens.len());

        for (k, syllable) in syllables.iter().enumerate() {
            let token = Token::syllable(syllable.clone(), kind);
            match self.tokens.get_mut(start + k) {
                Some(slot) => *slot = token,
                None => self.tokens.push(token),
            }
        }
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }
}

/// 窗口内命中的多音词
#[derive(Debug, Clone, Copy)]
pub struct SpanMatch<'a> {
    pub entry: &'a PolyphoneEntry,
    /// 词在输入中的起始字符索引
    pub start: usize,
}

impl SpanMatch<'_> {
    pub fn end(&self) -> usize {
        self.start + self.entry.len()
    }

    /// 词末字符索引，扫描从其后继续
    pub fn last_index(&self) -> usize {
        self.end() - 1
    }
}

/// 多音字消歧器
///
/// 一次扫描内复用，记录最近一次命中的词末位置
pub struct PolyphoneResolver {
    policy: MatchPolicy,
    last_resolved_index: usize,
}

impl PolyphoneResolver {
    pub fn new(policy: MatchPolicy) -> Self {
        Self {
            policy,
            last_resolved_index: 0,
        }
    }

    pub fn last_resolved_index(&self) -> usize {
        self.last_resolved_index
    }

    /// 查找覆盖 `pos` 的多音词
    ///
    /// 窗口 `[max(last_resolved_index, pos - L), min(pos + L, len))`，
    /// 词必须整体落在窗口内且与当前字对齐。先命中者生效。
    pub fn find_match<'a, L: PronunciationLookup + ?Sized>(
        &self,
        lookup: &'a L,
        chars: &[char],
        pos: usize,
    ) -> Option<SpanMatch<'a>> {
        let ch = *chars.get(pos)?;

        let mut candidates = lookup.candidates(ch);
        if self.policy == MatchPolicy::LongestFirst {
            candidates.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.word.cmp(&b.word)));
        }

        for entry in candidates {
            if !entry.is_well_formed() {
                tracing::warn!(
                    "跳过不合法的多音词条目: {} ({} 字 / {} 个读音)",
                    entry.word,
                    entry.len(),
                    entry.pronunciations.len()
                );
                continue;
            }

            let len = entry.len();
            let begin = self.last_resolved_index.max(pos.saturating_sub(len));
            let end = (pos + len).min(chars.len());
            if end < begin + len {
                continue;
            }

            // 当前字在词中的偏移，可能出现多次
            let offsets = entry
                .chars
                .iter()
                .enumerate()
                .filter(|(_, c)| **c == ch)
                .map(|(offset, _)| offset);

            for offset in offsets {
                let Some(start) = pos.checked_sub(offset) else {
                    continue;
                };
                if start < begin || start + len > end {
                    continue;
                }
                if chars[start..start + len] == entry.chars[..] {
                    return Some(SpanMatch { entry, start });
                }
            }
        }

        None
    }

    /// 尝试消歧；命中时回写整个词组的读音并返回命中记录
    ///
    /// 调用方应从返回记录的词末位置之后继续扫描
    pub fn resolve<L: PronunciationLookup + ?Sized>(
        &mut self,
        lookup: &L,
        chars: &[char],
        pos: usize,
        buffer: &mut TokenBuffer,
    ) -> Option<ResolvedWord> {
        let span = self.find_match(lookup, chars, pos)?;

        buffer.overwrite_span(
            span.start,
            &span.entry.pronunciations,
            TokenKind::ResolvedPolyphone,
        );
        self.last_resolved_index = span.last_index();

        tracing::debug!(
            "多音词命中: {} [{}, {}) -> {}",
            span.entry.word,
            span.start,
            span.end(),
            span.entry.pronunciations.join(",")
        );

        Some(ResolvedWord {
            word: span.entry.word.clone(),
            start: span.start,
            end: span.end(),
        })
    }
}
