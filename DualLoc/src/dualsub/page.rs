//! Splitting subtitle values into time-tagged pages

use crate::error::{Error, Result};

/// Opening of a display-time-span tag
pub const TS_TAG_OPEN: &str = "<ts=";

/// Prefix of the speaker-name tag that may precede the first page
pub const NAME_TAG_PREFIX: &str = "<name";

/// Separator placed between the two languages
pub const LINE_BREAK: &str = "<br>";

/// Quote entity wrapping the span inside a tag
const QUOTE: &str = "&quot;";

/// Structural error without the raw values; `merge_value` fills those in
pub(super) fn structural(reason: impl Into<String>) -> Error {
    Error::SubtitleMismatch {
        key: None,
        main: String::new(),
        sub: String::new(),
        reason: reason.into(),
    }
}

/// One page of a subtitle: its time-span tag and the text shown during it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub tag: String,
    pub text: String,
}

impl Page {
    pub fn new(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            text: text.into(),
        }
    }

    /// End time of this page in seconds
    pub fn end_seconds(&self) -> Result<f64> {
        TimeSpan::parse(&self.tag)?.end_seconds()
    }
}

/// A subtitle value split at its time-span tags.
///
/// `lead` is whatever precedes the first tag: empty, a speaker-name tag, or
/// the whole value when it carries no tags at all (then `pages` is empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedText {
    pub lead: String,
    pub pages: Vec<Page>,
}

impl PagedText {
    /// Split a value at every `<ts=` tag.
    ///
    /// A tag runs up to the first `>` after `<ts=`; an unterminated tag takes
    /// the rest of the value and gets an empty page text.
    pub fn split(value: &str) -> Self {
        let mut parts = value.split(TS_TAG_OPEN);
        let lead = parts.next().unwrap_or_default().to_string();
        let pages = parts
            .map(|part| match part.split_once('>') {
                Some((span, text)) => Page::new(format!("{TS_TAG_OPEN}{span}>"), text),
                None => Page::new(format!("{TS_TAG_OPEN}{part}>"), ""),
            })
            .collect();
        Self { lead, pages }
    }

    /// Whether the value contained any time-span tag
    #[must_use]
    pub fn is_tagged(&self) -> bool {
        !self.pages.is_empty()
    }

    /// Whether the leading segment is a speaker-name tag
    #[must_use]
    pub fn has_name_lead(&self) -> bool {
        self.lead.starts_with(NAME_TAG_PREFIX)
    }

    /// Turn an untagged value into a single page that reuses `other`'s first tag
    pub fn adopt_first_tag(&mut self, other: &PagedText) {
        if let Some(first) = other.pages.first() {
            let text = std::mem::take(&mut self.lead);
            self.pages.push(Page::new(first.tag.clone(), text));
        }
    }

    /// Reassemble the value
    #[must_use]
    pub fn join(&self) -> String {
        let mut out = self.lead.clone();
        for page in &self.pages {
            out.push_str(&page.tag);
            out.push_str(&page.text);
        }
        out
    }
}

/// The `start;end` pair inside a time-span tag, kept as the original text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSpan<'a> {
    pub start: &'a str,
    pub end: &'a str,
}

impl<'a> TimeSpan<'a> {
    /// Parse `<ts=&quot;start;end&quot;>`
    pub fn parse(tag: &'a str) -> Result<Self> {
        let invalid = || Error::InvalidTimestamp(tag.to_string());
        let span = tag.split(QUOTE).nth(1).ok_or_else(invalid)?;
        let mut fields = span.split(';');
        let start = fields.next().ok_or_else(invalid)?;
        let end = fields.next().ok_or_else(invalid)?;
        Ok(Self { start, end })
    }

    pub fn end_seconds(&self) -> Result<f64> {
        self.end
            .trim()
            .parse()
            .map_err(|_| Error::InvalidTimestamp(self.end.to_string()))
    }

    /// Render back into tag form
    #[must_use]
    pub fn to_tag(&self) -> String {
        format!("{TS_TAG_OPEN}{QUOTE}{};{}{QUOTE}>", self.start, self.end)
    }

    /// Tag spanning from the start of `first` to the end of `second`
    pub fn join_tags(first: &str, second: &str) -> Result<String> {
        let start = TimeSpan::parse(first)?.start;
        let end = TimeSpan::parse(second)?.end;
        Ok(TimeSpan { start, end }.to_tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_untagged() {
        let split = PagedText::split("Hello");
        assert_eq!(split.lead, "Hello");
        assert!(!split.is_tagged());
    }

    #[test]
    fn test_split_with_name_and_pages() {
        let value = "<name=Ann><ts=&quot;0;1.5&quot;>Hi<ts=&quot;1.5;3&quot;>there";
        let split = PagedText::split(value);
        assert_eq!(split.lead, "<name=Ann>");
        assert!(split.has_name_lead());
        assert_eq!(
            split.pages,
            vec![
                Page::new("<ts=&quot;0;1.5&quot;>", "Hi"),
                Page::new("<ts=&quot;1.5;3&quot;>", "there"),
            ]
        );
        assert_eq!(split.join(), value);
    }

    #[test]
    fn test_split_keeps_later_angle_brackets_in_text() {
        let split = PagedText::split("<ts=&quot;0;1&quot;>a > b<i>c</i>");
        assert_eq!(split.pages[0].text, "a > b<i>c</i>");
    }

    #[test]
    fn test_split_unterminated_tag() {
        let split = PagedText::split("x<ts=&quot;0;1&quot;");
        assert_eq!(split.pages, vec![Page::new("<ts=&quot;0;1&quot;>", "")]);
    }

    #[test]
    fn test_time_span() {
        let span = TimeSpan::parse("<ts=&quot;1.25;3.5&quot;>").unwrap();
        assert_eq!(span.start, "1.25");
        assert_eq!(span.end, "3.5");
        assert!((span.end_seconds().unwrap() - 3.5).abs() < f64::EPSILON);
        assert_eq!(span.to_tag(), "<ts=&quot;1.25;3.5&quot;>");
    }

    #[test]
    fn test_join_tags() {
        let joined =
            TimeSpan::join_tags("<ts=&quot;0.5;1&quot;>", "<ts=&quot;1;2.75&quot;>").unwrap();
        assert_eq!(joined, "<ts=&quot;0.5;2.75&quot;>");
    }

    #[test]
    fn test_invalid_span() {
        assert!(matches!(
            TimeSpan::parse("<ts=0;1>"),
            Err(Error::InvalidTimestamp(_))
        ));
        assert!(TimeSpan::parse("<ts=&quot;01&quot;>").is_err());
        let span = TimeSpan::parse("<ts=&quot;0;soon&quot;>").unwrap();
        assert!(span.end_seconds().is_err());
    }

    #[test]
    fn test_adopt_first_tag() {
        let mut plain = PagedText::split("Hallo");
        let tagged = PagedText::split("<ts=&quot;0;2&quot;>Hello");
        plain.adopt_first_tag(&tagged);
        assert_eq!(plain.lead, "");
        assert_eq!(plain.pages, vec![Page::new("<ts=&quot;0;2&quot;>", "Hallo")]);
    }
}
