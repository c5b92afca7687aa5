use std::fmt;
use std::str::FromStr;

use crate::consts::{MAX_SUBTAG_LEN, MIN_LANGUAGE_LEN, PRIVATE_USE_SINGLETON};
use crate::error::TagSyntaxError;

/// A syntactically valid language tag.
///
/// `language` and `private_use` are lowercase. Subtags between the primary
/// language and the private-use singleton (script, region, extensions) are
/// kept in `ignored` as written; they never take part in matching.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageTag {
    pub language: String,
    pub ignored: Vec<String>,
    /// Reconstructed variant identifier, present iff the tag has `-x-...`.
    pub private_use: Option<String>,
}

impl LanguageTag {
    pub fn parse(tag: &str) -> Result<Self, TagSyntaxError> {
        if tag.is_empty() {
            return Err(TagSyntaxError::Empty);
        }

        // Сначала вся грамматика, без какой-либо семантики.
        let mut subtags = Vec::new();
        for (pos, sub) in tag.split('-').enumerate() {
            if sub.is_empty() {
                return Err(TagSyntaxError::EmptySubtag(pos));
            }
            if sub.len() > MAX_SUBTAG_LEN {
                return Err(TagSyntaxError::TooLong(sub.to_string()));
            }
            if !sub.bytes().all(|b| b.is_ascii_alphanumeric()) {
                return Err(TagSyntaxError::NotAlphanumeric(sub.to_string()));
            }
            subtags.push(sub);
        }

        let primary = subtags[0];
        if primary.len() < MIN_LANGUAGE_LEN || !primary.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(TagSyntaxError::BadLanguage(primary.to_string()));
        }

        let rest = &subtags[1..];
        let (ignored, private) = match rest
            .iter()
            .position(|s| s.eq_ignore_ascii_case(PRIVATE_USE_SINGLETON))
        {
            Some(i) => (&rest[..i], Some(&rest[i + 1..])),
            None => (rest, None),
        };

        let private_use = match private {
            Some([]) => return Err(TagSyntaxError::EmptyPrivateUse),
            Some(parts) => Some(parts.concat().to_ascii_lowercase()),
            None => None,
        };

        Ok(Self {
            language: primary.to_ascii_lowercase(),
            ignored: ignored.iter().map(|s| s.to_string()).collect(),
            private_use,
        })
    }
}

impl FromStr for LanguageTag {
    type Err = TagSyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LanguageTag {
    /// Canonical form: ignored subtags are dropped, private use is re-split
    /// into 8-character chunks.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.language)?;
        if let Some(pu) = &self.private_use {
            write!(f, "-{}", PRIVATE_USE_SINGLETON)?;
            let chars: Vec<char> = pu.chars().collect();
            for chunk in chars.chunks(MAX_SUBTAG_LEN) {
                f.write_str("-")?;
                for c in chunk {
                    write!(f, "{}", c)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pu(tag: &str) -> Option<String> {
        LanguageTag::parse(tag).unwrap().private_use
    }

    #[test]
    fn primary_language_only() {
        let t = LanguageTag::parse("Fi").unwrap();
        assert_eq!(t.language, "fi");
        assert!(t.ignored.is_empty());
        assert_eq!(t.private_use, None);
    }

    #[test]
    fn region_and_script_are_kept_but_ignored() {
        let t = LanguageTag::parse("sr-Latn-RS").unwrap();
        assert_eq!(t.language, "sr");
        assert_eq!(t.ignored, vec!["Latn".to_string(), "RS".to_string()]);
        assert_eq!(t.private_use, None);
    }

    #[test]
    fn private_use_is_concatenated_and_lowercased() {
        assert_eq!(pu("fi-x-dictiona-ryinfote-st").as_deref(), Some("dictionaryinfotest"));
        assert_eq!(pu("fi-x-Dictio-nary-info-test").as_deref(), Some("dictionaryinfotest"));
        assert_eq!(pu("fi-FI-X-medicine").as_deref(), Some("medicine"));
        assert_eq!(pu("fi-x-a-b-c").as_deref(), Some("abc"));
    }

    #[test]
    fn grammar_violations() {
        assert_eq!(LanguageTag::parse(""), Err(TagSyntaxError::Empty));
        assert_eq!(
            LanguageTag::parse("dictionaryinfotest"),
            Err(TagSyntaxError::TooLong("dictionaryinfotest".into()))
        );
        assert_eq!(LanguageTag::parse("fi--x"), Err(TagSyntaxError::EmptySubtag(1)));
        assert_eq!(LanguageTag::parse("-fi"), Err(TagSyntaxError::EmptySubtag(0)));
        assert_eq!(LanguageTag::parse("fi-"), Err(TagSyntaxError::EmptySubtag(1)));
        assert_eq!(
            LanguageTag::parse("fi_FI"),
            Err(TagSyntaxError::NotAlphanumeric("fi_FI".into()))
        );
        assert_eq!(LanguageTag::parse("f"), Err(TagSyntaxError::BadLanguage("f".into())));
        assert_eq!(LanguageTag::parse("x-foo"), Err(TagSyntaxError::BadLanguage("x".into())));
        assert_eq!(LanguageTag::parse("12-x-a"), Err(TagSyntaxError::BadLanguage("12".into())));
        assert_eq!(LanguageTag::parse("fi-x"), Err(TagSyntaxError::EmptyPrivateUse));
        assert!(LanguageTag::parse("fi-x-toolongsubtag").is_err());
    }

    #[test]
    fn display_is_canonical() {
        let t: LanguageTag = "FI-fi-x-Dictio-nary-info-test".parse().unwrap();
        assert_eq!(t.to_string(), "fi-x-dictiona-ryinfote-st");
        let t: LanguageTag = "sv-SE".parse().unwrap();
        assert_eq!(t.to_string(), "sv");
    }
}
