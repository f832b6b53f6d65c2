//! Channel member list formatting.

use crate::colour::{ColourAllocator, paint};

/// Rank glyphs from highest to lowest privilege, with their sort weight.
const RANK_GLYPHS: [(char, u8); 5] = [('~', 5), ('&', 4), ('@', 3), ('%', 2), ('+', 1)];

/// Rank of a name token. Unprefixed or unknown prefixes rank 0.
pub fn rank(token: &str) -> u8 {
    token
        .chars()
        .next()
        .and_then(|first| RANK_GLYPHS.iter().find(|(glyph, _)| *glyph == first))
        .map_or(0, |&(_, weight)| weight)
}

/// Nickname part of a token: everything after the leading non-letters.
pub fn nick_of(token: &str) -> &str {
    token.trim_start_matches(|c: char| !c.is_alphabetic())
}

/// Sort tokens by rank descending, then by token ascending.
///
/// Idempotent, and leaves an already sorted list untouched.
pub fn sort_names<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut sorted: Vec<String> = names.iter().map(|name| name.as_ref().to_owned()).collect();
    sorted.sort_by(|a, b| rank(b).cmp(&rank(a)).then_with(|| a.cmp(b)));
    sorted
}

/// Sort, colour by nickname, and join tokens with single spaces.
///
/// The rendered token keeps its rank glyph; the colour is allocated for the
/// bare nickname so it matches the colour of that person's chat lines.
pub fn colour_names<S: AsRef<str>>(names: &[S], colours: &mut ColourAllocator) -> String {
    sort_names(names)
        .iter()
        .map(|token| paint(colours.allocate(nick_of(token)), token))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_values() {
        assert_eq!(rank("~nako"), 5);
        assert_eq!(rank("+nako"), 1);
        assert_eq!(rank("*nako"), 0);
        assert_eq!(rank("nako"), 0);
        assert_eq!(rank(""), 0);
    }

    #[test]
    fn sorting() {
        let cases: [(&[&str], &[&str]); 6] = [
            (&[], &[]),
            (&["~nako", "&a", "b", "c"], &["~nako", "&a", "b", "c"]),
            (&["b", "a", "c"], &["a", "b", "c"]),
            (&["b", "@nako", "c"], &["@nako", "b", "c"]),
            (&["@nako", "@a", "c"], &["@a", "@nako", "c"]),
            (&["b", "%c", "@nako"], &["@nako", "%c", "b"]),
        ];

        for (input, expected) in cases {
            assert_eq!(sort_names(input), expected, "sorting {input:?}");
        }
    }

    #[test]
    fn nick_strips_leading_glyphs() {
        assert_eq!(nick_of("~nako"), "nako");
        assert_eq!(nick_of("@+nako"), "nako");
        assert_eq!(nick_of("nako_"), "nako_");
    }

    #[test]
    fn colouring_uses_bare_nick() {
        let mut colours = ColourAllocator::new(1);
        let expected_root = paint(ColourAllocator::new(1).allocate("root"), "~root");
        let out = colour_names(&["b", "~root"], &mut colours);

        assert!(out.starts_with(&expected_root));
        assert!(out.ends_with(&paint(colours.allocate("b"), "b")));
        assert_eq!(colours.len(), 2);
    }

    #[test]
    fn empty_list_renders_empty() {
        let mut colours = ColourAllocator::new(0);
        assert_eq!(colour_names::<&str>(&[], &mut colours), "");
    }
}
