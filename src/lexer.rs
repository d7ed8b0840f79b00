//! Splitting raw input lines into a command name and its arguments.
//!
//! The two shells tokenize differently. The top-level shell splits on single
//! spaces into at most three parts so the last argument keeps its spacing
//! verbatim (file contents, echoed text). The game splits on runs of
//! whitespace since all of its arguments are single words.

/// A tokenized line: lowercased command name plus arguments as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation<'a> {
    pub name: String,
    pub args: Vec<&'a str>,
}

/// Tokenize a top-level shell line.
///
/// Leading whitespace is ignored. Returns `None` for blank lines.
pub fn split_command_line(line: &str) -> Option<Invocation<'_>> {
    let line = line.trim_start();
    if line.trim_end().is_empty() {
        return None;
    }
    let mut parts = line.splitn(3, ' ');
    let name = parts.next()?.to_lowercase();
    Some(Invocation {
        name,
        args: parts.collect(),
    })
}

/// Tokenize a game line on whitespace. Returns `None` for blank lines.
pub fn split_words(line: &str) -> Option<Invocation<'_>> {
    let mut words = line.split_whitespace();
    let name = words.next()?.to_lowercase();
    Some(Invocation {
        name,
        args: words.collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines_yield_nothing() {
        assert_eq!(split_command_line(""), None);
        assert_eq!(split_command_line("   \t "), None);
        assert_eq!(split_words(""), None);
        assert_eq!(split_words("  "), None);
    }

    #[test]
    fn test_command_line_keeps_tail_verbatim() {
        let inv = split_command_line("WRITE Notes.txt Hello   big  World ").unwrap();
        assert_eq!(inv.name, "write");
        assert_eq!(inv.args, vec!["Notes.txt", "Hello   big  World "]);
    }

    #[test]
    fn test_command_line_without_args() {
        let inv = split_command_line("  ls").unwrap();
        assert_eq!(inv.name, "ls");
        assert!(inv.args.is_empty());
    }

    #[test]
    fn test_command_line_trailing_space_gives_empty_arg() {
        let inv = split_command_line("create ").unwrap();
        assert_eq!(inv.args, vec![""]);
    }

    #[test]
    fn test_words_collapse_whitespace() {
        let inv = split_words("  Create   process\tMyProc ").unwrap();
        assert_eq!(inv.name, "create");
        assert_eq!(inv.args, vec!["process", "MyProc"]);
    }
}
