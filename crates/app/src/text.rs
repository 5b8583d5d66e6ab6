//! Document text: the built-in poem or lines read from a file

use std::fs;
use std::path::Path;

use anyhow::Context;

/// "Jabberwocky", by Lewis Carroll
pub const JABBERWOCKY: &[&str] = &[
    "\u{2019}Twas brillig, and the slithy toves",
    "Did gyre and gimble in the wabe;",
    "All mimsy were the borogoves,",
    "And the mome raths outgrabe.",
    "",
    "\u{201c}Beware the Jabberwock, my son!",
    "The jaws that bite, the claws that catch!",
    "Beware the Jubjub bird, and shun",
    "The frumious Bandersnatch!\u{201d}",
    "",
    "He took his vorpal sword in hand:",
    "Long time the manxome foe he sought\u{2014}",
    "So rested he by the Tumtum tree,",
    "And stood awhile in thought.",
    "",
    "And as in uffish thought he stood,",
    "The Jabberwock, with eyes of flame,",
    "Came whiffling through the tulgey wood,",
    "And burbled as it came!",
    "",
    "One, two! One, two! and through and through",
    "The vorpal blade went snicker-snack!",
    "He left it dead, and with its head",
    "He went galumphing back.",
    "",
    "\u{201c}And hast thou slain the Jabberwock?",
    "Come to my arms, my beamish boy!",
    "O frabjous day! Callooh! Callay!\u{201d}",
    "He chortled in his joy.",
    "",
    "\u{2019}Twas brillig, and the slithy toves",
    "Did gyre and gimble in the wabe;",
    "All mimsy were the borogoves,",
    "And the mome raths outgrabe.",
];

/// Lines to render: the contents of `path`, or the poem when there is none
pub fn load_lines(path: Option<&Path>) -> anyhow::Result<Vec<String>> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read text file {}", path.display()))?;
            Ok(split_lines(&text))
        }
        None => Ok(JABBERWOCKY.iter().map(|line| line.to_string()).collect()),
    }
}

/// Split on `\n` or `\r\n`; a trailing newline does not add an empty line
fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_poem() {
        let lines = load_lines(None).unwrap();
        assert_eq!(lines.len(), 34);
        assert_eq!(lines.iter().filter(|l| l.is_empty()).count(), 6);
        assert_eq!(lines.first(), lines.get(30));
    }

    #[test]
    fn test_split_lines_keeps_blank_lines() {
        assert_eq!(split_lines("a\r\n\nb\n"), vec!["a", "", "b"]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_missing_text_file() {
        let err = load_lines(Some(Path::new("/nonexistent/poem.txt"))).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to read text file"));
    }
}
