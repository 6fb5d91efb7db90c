use crate::block::BlockNode;
use thiserror::Error;

/// A literal replacement applied before ornament glyphs are stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SanitizeRule {
    pub pattern: &'static str,
    pub replacement: &'static str,
}

const fn rule(pattern: &'static str, replacement: &'static str) -> SanitizeRule {
    SanitizeRule {
        pattern,
        replacement,
    }
}

/// Ornaments that carry meaning as list prefixes or arrows get an ASCII
/// stand-in; every other ornament is deleted.
pub const DEFAULT_RULES: &[SanitizeRule] = &[
    rule("\u{2713} ", "- "),
    rule("\u{2714} ", "- "),
    rule("\u{2714}\u{FE0F} ", "- "),
    rule("\u{2705} ", "- "),
    rule("\u{2611} ", "- "),
    rule("\u{2611}\u{FE0F} ", "- "),
    rule("\u{27A4} ", "- "),
    rule("\u{25BA} ", "- "),
    rule("\u{25B6} ", "- "),
    rule("\u{25B6}\u{FE0F} ", "- "),
    rule("\u{2023} ", "- "),
    rule("\u{2043} ", "- "),
    rule("\u{2192}", "->"),
    rule("\u{2190}", "<-"),
    rule("\u{2605}", "*"),
    rule("\u{2B50}", "*"),
];

/// Whether `c` belongs to the ornament and emoji category the sanitizer
/// removes. Alphanumeric characters never do.
pub fn is_ornament(c: char) -> bool {
    if c.is_alphanumeric() {
        return false;
    }
    matches!(c,
        '\u{2190}'..='\u{21FF}'
        | '\u{2300}'..='\u{23FF}'
        | '\u{2500}'..='\u{25FF}'
        | '\u{2600}'..='\u{27BF}'
        | '\u{2900}'..='\u{297F}'
        | '\u{2B00}'..='\u{2BFF}'
        | '\u{FE00}'..='\u{FE0F}'
        | '\u{200B}'..='\u{200D}'
        | '\u{2023}'
        | '\u{2043}'
        | '\u{2060}'
        | '\u{FEFF}'
        | '\u{20E3}'
        | '\u{1F000}'..='\u{1FAFF}'
        | '\u{E0020}'..='\u{E007F}'
    ) || (c.is_control() && c != '\t' && c != '\n')
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleTableError {
    #[error("Rule pattern {0:?} does not start with an ornament character")]
    PatternNotOrnament(&'static str),
    #[error("Rule pattern {inner:?} is contained in pattern {outer:?}")]
    OverlappingPatterns {
        inner: &'static str,
        outer: &'static str,
    },
    #[error("Replacement {0:?} is not plain ASCII")]
    NonAsciiReplacement(&'static str),
    #[error("Replacement {replacement:?} reintroduces pattern {pattern:?}")]
    ReplacementContainsPattern {
        replacement: &'static str,
        pattern: &'static str,
    },
}

/// Applies a rule table, then deletes any ornament left over.
///
/// The rule table is validated on construction so that sanitizing is
/// idempotent: replacements are ASCII, and patterns start with an ornament,
/// so sanitized text never contains anything a second pass would touch.
#[derive(Debug, Clone, Copy)]
pub struct Sanitizer {
    rules: &'static [SanitizeRule],
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self {
            rules: DEFAULT_RULES,
        }
    }
}

impl Sanitizer {
    pub fn with_rules(rules: &'static [SanitizeRule]) -> Result<Self, RuleTableError> {
        validate_rules(rules)?;
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &'static [SanitizeRule] {
        self.rules
    }

    pub fn sanitize(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        'scan: while let Some(c) = rest.chars().next() {
            if is_ornament(c) {
                for rule in self.rules {
                    if let Some(after) = rest.strip_prefix(rule.pattern) {
                        out.push_str(rule.replacement);
                        rest = after;
                        continue 'scan;
                    }
                }
            } else {
                out.push(c);
            }
            rest = &rest[c.len_utf8()..];
        }
        out
    }

    /// Sanitizes the text of every block, keeping order and count. Surrounding
    /// whitespace left behind by deleted glyphs is trimmed.
    pub fn sanitize_blocks(&self, blocks: Vec<BlockNode>) -> Vec<BlockNode> {
        blocks
            .into_iter()
            .map(|mut block| {
                let cleaned = self.sanitize(&block.text);
                let cleaned = cleaned.trim();
                if cleaned != block.text {
                    log::trace!(
                        "Sanitized {:?} block: {:?} -> {:?}",
                        block.kind,
                        block.text,
                        cleaned
                    );
                    block.text = cleaned.to_string();
                }
                block
            })
            .collect()
    }
}

fn validate_rules(rules: &'static [SanitizeRule]) -> Result<(), RuleTableError> {
    for rule in rules {
        if !rule.pattern.chars().next().is_some_and(is_ornament) {
            return Err(RuleTableError::PatternNotOrnament(rule.pattern));
        }
        if !rule.replacement.is_ascii() {
            return Err(RuleTableError::NonAsciiReplacement(rule.replacement));
        }
    }
    for (i, a) in rules.iter().enumerate() {
        for (j, b) in rules.iter().enumerate() {
            if i != j && b.pattern.contains(a.pattern) {
                return Err(RuleTableError::OverlappingPatterns {
                    inner: a.pattern,
                    outer: b.pattern,
                });
            }
            if a.replacement.contains(b.pattern) {
                return Err(RuleTableError::ReplacementContainsPattern {
                    replacement: a.replacement,
                    pattern: b.pattern,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_rule_table_is_valid() {
        assert_eq!(validate_rules(DEFAULT_RULES), Ok(()));
    }

    #[test]
    fn invalid_tables_are_rejected() {
        static OVERLAP: &[SanitizeRule] = &[rule("\u{2713}", "-"), rule("\u{2713} ", "- ")];
        static PLAIN: &[SanitizeRule] = &[rule("a", "b")];
        static LOOPING: &[SanitizeRule] = &[rule("\u{2192}", "\u{2192}")];
        assert!(matches!(
            Sanitizer::with_rules(OVERLAP),
            Err(RuleTableError::OverlappingPatterns { .. })
        ));
        assert_eq!(
            Sanitizer::with_rules(PLAIN).unwrap_err(),
            RuleTableError::PatternNotOrnament("a")
        );
        assert_eq!(
            Sanitizer::with_rules(LOOPING).unwrap_err(),
            RuleTableError::NonAsciiReplacement("\u{2192}")
        );
    }

    #[test]
    fn checkmark_prefixes_become_dashes() {
        let s = Sanitizer::default();
        assert_eq!(s.sanitize("\u{2705} Install the toolchain"), "- Install the toolchain");
        assert_eq!(s.sanitize("\u{2714}\u{FE0F} Done"), "- Done");
        assert_eq!(s.sanitize("\u{25B6} Next"), "- Next");
    }

    #[test]
    fn arrows_and_stars_get_ascii_stand_ins() {
        let s = Sanitizer::default();
        assert_eq!(s.sanitize("input \u{2192} output"), "input -> output");
        assert_eq!(s.sanitize("\u{2B50}\u{2B50}\u{2B50} rating"), "*** rating");
    }

    #[test]
    fn other_ornaments_are_deleted() {
        let s = Sanitizer::default();
        assert_eq!(s.sanitize("Great job \u{1F389}\u{1F680}!"), "Great job !");
        assert_eq!(s.sanitize("\u{1F468}\u{200D}\u{1F4BB}coder"), "coder");
        assert_eq!(s.sanitize("1\u{FE0F}\u{20E3} step"), "1 step");
        assert_eq!(s.sanitize("bell\u{7}"), "bell");
    }

    #[test]
    fn triangular_and_hyphen_bullets_become_dashes() {
        let s = Sanitizer::default();
        assert_eq!(s.sanitize("\u{2023} item one"), "- item one");
        assert_eq!(s.sanitize("\u{2043} item two"), "- item two");
        assert_eq!(s.sanitize("a\u{2023}b"), "ab");
    }

    #[test]
    fn invisible_format_characters_are_deleted() {
        let s = Sanitizer::default();
        assert_eq!(s.sanitize("\u{FEFF}text with bom"), "text with bom");
        assert_eq!(s.sanitize("Hello\u{200B}world."), "Helloworld.");
        assert_eq!(s.sanitize("non\u{200C}joiner"), "nonjoiner");
        assert_eq!(s.sanitize("word\u{2060}joiner"), "wordjoiner");
    }

    #[test]
    fn letters_and_punctuation_pass_through() {
        let s = Sanitizer::default();
        let text = "Caf\u{e9} \u{201C}quoted\u{201D} \u{2014} 50% off, na\u{ef}ve? (yes)\tend\n";
        assert_eq!(s.sanitize(text), text);
    }

    #[test]
    fn blocks_keep_order_and_count() {
        let s = Sanitizer::default();
        let blocks = vec![
            BlockNode::heading(1, "\u{1F4DA} Reading"),
            BlockNode::paragraph("\u{2728}\u{1F680}"),
            BlockNode::list_item("\u{2705} done", None, 0),
        ];
        let cleaned = s.sanitize_blocks(blocks);
        assert_eq!(
            cleaned.iter().map(|b| b.text.as_str()).collect::<Vec<_>>(),
            vec!["Reading", "", "- done"]
        );
    }

    fn alphanumerics(text: &str) -> String {
        text.chars().filter(|c| c.is_alphanumeric()).collect()
    }

    proptest! {
        #[test]
        fn alphanumerics_survive(input in "\\PC{0,120}") {
            let out = Sanitizer::default().sanitize(&input);
            prop_assert_eq!(alphanumerics(&out), alphanumerics(&input));
        }

        #[test]
        fn sanitizing_twice_changes_nothing(
            input in "[a-z \u{2705}\u{2714}\u{FE0F}\u{2192}\u{2B50}\u{1F389}\u{200D}]{0,60}"
        ) {
            let s = Sanitizer::default();
            let once = s.sanitize(&input);
            prop_assert_eq!(s.sanitize(&once), once.clone());
            prop_assert!(!once.chars().any(is_ornament));
        }
    }
}
