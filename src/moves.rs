//! Move-log comment patterns.
//!
//! When an article is renamed, MediaWiki records the move as a regular
//! revision whose edit summary follows a localized phrasing naming the old
//! and the new title as wiki links. The phrasings are treated as
//! configuration data - a list of pattern templates with two capture groups
//! - so further languages can be added without touching the extraction
//! code (see [`crate::config::MovesConfig`]).
//!
//! Patterns are anchored to the entire comment: a summary with extra
//! trailing text does not count as a move. Comments in languages not on
//! the list are simply not recognized.

use regex::Regex;

use crate::error::Error;

/// Default templates: the German "moved page" phrasing, plain and with the
/// overwritten-redirect suffix.
pub const DEFAULT_MOVE_PATTERNS: [&str; 2] = [
    r".* verschob die Seite \[\[(.*)\]\] nach \[\[(.*)\]\]",
    r".* verschob die Seite \[\[(.*)\]\] nach \[\[(.*)\]\] und überschrieb dabei eine Weiterleitung",
];

/// A compiled move-comment pattern capturing the old and new title.
#[derive(Debug, Clone)]
pub struct MovePattern {
    regex: Regex,
}

impl MovePattern {
    /// Compile a template, anchoring it to the whole comment string.
    ///
    /// # Errors
    /// Returns [`Error::Pattern`] when the template does not compile and
    /// [`Error::PatternArity`] when it does not capture exactly two groups.
    pub fn compile(template: &str) -> Result<Self, Error> {
        let regex = Regex::new(&format!(r"\A(?:{template})\z"))?;
        let groups = regex.captures_len() - 1;
        if groups != 2 {
            return Err(Error::PatternArity { groups });
        }
        Ok(Self { regex })
    }

    /// Match `comment` in full, returning the captured old and new title.
    #[must_use]
    pub fn extract<'a>(&self, comment: &'a str) -> Option<(&'a str, &'a str)> {
        self.regex.captures(comment).map(|captures| {
            let old = captures.get(1).map_or("", |m| m.as_str());
            let new = captures.get(2).map_or("", |m| m.as_str());
            (old, new)
        })
    }
}

/// An ordered list of [`MovePattern`]s; the first full match wins.
#[derive(Debug, Clone)]
pub struct MovePatterns(Vec<MovePattern>);

impl MovePatterns {
    /// Wrap already-compiled patterns.
    #[must_use]
    pub const fn new(patterns: Vec<MovePattern>) -> Self {
        Self(patterns)
    }

    /// Compile every template in `templates`.
    ///
    /// # Errors
    /// Returns the first compilation failure, see [`MovePattern::compile`].
    pub fn compile_all<I, S>(templates: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = templates
            .into_iter()
            .map(|template| MovePattern::compile(template.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self(patterns))
    }

    /// Match `comment` against each pattern in order.
    #[must_use]
    pub fn extract<'a>(&self, comment: &'a str) -> Option<(&'a str, &'a str)> {
        self.0
            .iter()
            .find_map(|pattern| pattern.extract(comment))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for MovePatterns {
    #[allow(clippy::expect_used)]
    fn default() -> Self {
        Self::compile_all(DEFAULT_MOVE_PATTERNS).expect("default templates compile")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_templates_compile() {
        let patterns = MovePatterns::default();
        assert_eq!(patterns.len(), 2);
    }

    #[test]
    fn plain_move_comment_captures_both_titles() {
        let patterns = MovePatterns::default();
        let (old, new) = patterns
            .extract("Admin verschob die Seite [[Mathe für Nicht-Freaks]] nach [[Serlo]]")
            .unwrap();
        assert_eq!(old, "Mathe für Nicht-Freaks");
        assert_eq!(new, "Serlo");
    }

    #[test]
    fn redirect_variant_captures_both_titles() {
        let patterns = MovePatterns::default();
        let comment = "Admin verschob die Seite [[Alt]] nach [[Neu]] \
                       und überschrieb dabei eine Weiterleitung";
        let (old, new) = patterns.extract(comment).unwrap();
        assert_eq!(old, "Alt");
        assert_eq!(new, "Neu");
    }

    #[test]
    fn trailing_text_is_not_a_match() {
        let patterns = MovePatterns::default();
        let comment = "Admin verschob die Seite [[Alt]] nach [[Neu]]: Begründung";
        assert_eq!(patterns.extract(comment), None);
    }

    #[test]
    fn unrelated_comments_are_not_matches() {
        let patterns = MovePatterns::default();
        let cases = [
            "",
            "typo fix",
            "moved [[A]] to [[B]]",
            "verschob die Seite",
        ];
        for comment in cases {
            assert_eq!(patterns.extract(comment), None, "comment: {comment:?}");
        }
    }

    #[test]
    fn compile_rejects_wrong_group_count() {
        let err = MovePattern::compile(r"verschob \[\[(.*)\]\]").unwrap_err();
        assert!(matches!(err, Error::PatternArity { groups: 1 }));
    }

    #[test]
    fn compile_rejects_invalid_regex() {
        let err = MovePattern::compile(r"(").unwrap_err();
        assert!(matches!(err, Error::Pattern(_)));
    }
}
