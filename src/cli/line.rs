use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LineError {
    #[error("Unterminated {0} quote")]
    UnterminatedQuote(char),
}

/// Split a command line into words the way a shell would for simple input:
/// whitespace separates words, single or double quotes group them, and a
/// backslash escapes the next character outside single quotes.
pub fn split_line(line: &str) -> Result<Vec<String>, LineError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some('\''), c) => current.push(c),
            (_, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
                in_word = true;
            }
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(ch);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(LineError::UnterminatedQuote(q));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_words() {
        assert_eq!(
            split_line("  bookings   --status cancelled ").unwrap(),
            vec!["bookings", "--status", "cancelled"]
        );
    }

    #[test]
    fn test_quotes_group_words() {
        assert_eq!(
            split_line(r#"book --customer "Alex Smith" --provider 'Handyman Heroes'"#).unwrap(),
            vec![
                "book",
                "--customer",
                "Alex Smith",
                "--provider",
                "Handyman Heroes"
            ]
        );
    }

    #[test]
    fn test_empty_quotes_are_a_word() {
        assert_eq!(
            split_line(r#"book --customer """#).unwrap(),
            vec!["book", "--customer", ""]
        );
    }

    #[test]
    fn test_escapes() {
        assert_eq!(split_line(r"select Handyman\ Heroes").unwrap(), vec!["select", "Handyman Heroes"]);
        assert_eq!(split_line(r#"x "say \"hi\"""#).unwrap(), vec!["x", r#"say "hi""#]);
    }

    #[test]
    fn test_unterminated_quote() {
        assert_eq!(
            split_line(r#"book --customer "Alex"#),
            Err(LineError::UnterminatedQuote('"'))
        );
    }

    #[test]
    fn test_blank_line() {
        assert!(split_line("   ").unwrap().is_empty());
    }
}
