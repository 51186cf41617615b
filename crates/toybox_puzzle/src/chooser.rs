//! Choosing the next piece after a four-row clear

use std::fmt;
use std::io::{self, BufRead, Write};

/// In-window selection over the catalog's shape names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceChooser {
    options: Vec<String>,
    selected: usize,
}

impl PieceChooser {
    /// Start a selection with the first option highlighted
    pub fn new(options: Vec<String>) -> Self {
        Self { options, selected: 0 }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_name(&self) -> Option<&str> {
        self.options.get(self.selected).map(String::as_str)
    }

    /// Move the highlight down, wrapping to the first option
    pub fn select_next(&mut self) {
        if !self.options.is_empty() {
            self.selected = (self.selected + 1) % self.options.len();
        }
    }

    /// Move the highlight up, wrapping to the last option
    pub fn select_prev(&mut self) {
        if !self.options.is_empty() {
            self.selected = (self.selected + self.options.len() - 1) % self.options.len();
        }
    }
}

/// Ask on the console which piece comes next
///
/// Prints the numbered options and keeps reading lines until one holds a number
/// in `1..=options.len()`. Returns the zero-based index of the choice.
pub fn prompt_choice<R, W, S>(input: &mut R, output: &mut W, options: &[S]) -> Result<usize, PromptError>
where
    R: BufRead,
    W: Write,
    S: AsRef<str>,
{
    if options.is_empty() {
        return Err(PromptError::NoOptions);
    }

    writeln!(output, "You cleared a Tetris! Choose your next block:")?;
    for (idx, option) in options.iter().enumerate() {
        writeln!(output, "{}: {}", idx + 1, option.as_ref())?;
    }

    let mut line = String::new();
    loop {
        write!(output, "Enter the number of your choice: ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(PromptError::Closed);
        }

        match line.trim().parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => return Ok(n - 1),
            _ => log::debug!("Ignoring invalid choice {:?}", line.trim()),
        }
    }
}

/// Console prompt failures
#[derive(Debug)]
pub enum PromptError {
    /// Reading or writing the console failed
    Io(io::Error),
    /// Input ended before a valid choice was entered
    Closed,
    /// Nothing to choose from
    NoOptions,
}

impl fmt::Display for PromptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptError::Io(err) => write!(f, "Console IO error: {}", err),
            PromptError::Closed => write!(f, "Console input closed before a choice was made"),
            PromptError::NoOptions => write!(f, "No pieces to choose from"),
        }
    }
}

impl std::error::Error for PromptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PromptError::Io(err) => Some(err),
            PromptError::Closed | PromptError::NoOptions => None,
        }
    }
}

impl From<io::Error> for PromptError {
    fn from(err: io::Error) -> Self {
        PromptError::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn options() -> Vec<String> {
        vec!["I".to_string(), "L".to_string(), "O".to_string()]
    }

    #[test]
    fn test_chooser_wraps() {
        let mut chooser = PieceChooser::new(options());
        assert_eq!(chooser.selected_name(), Some("I"));

        chooser.select_prev();
        assert_eq!(chooser.selected_name(), Some("O"));

        chooser.select_next();
        chooser.select_next();
        assert_eq!(chooser.selected(), 1);
    }

    #[test]
    fn test_chooser_empty_is_inert() {
        let mut chooser = PieceChooser::new(Vec::new());
        chooser.select_next();
        chooser.select_prev();
        assert_eq!(chooser.selected(), 0);
        assert_eq!(chooser.selected_name(), None);
    }

    #[test]
    fn test_prompt_accepts_valid_number() {
        let mut input = Cursor::new("2\n");
        let mut output = Vec::new();
        let choice = prompt_choice(&mut input, &mut output, &options()).unwrap();
        assert_eq!(choice, 1);

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("1: I"));
        assert!(text.contains("3: O"));
    }

    #[test]
    fn test_prompt_retries_invalid_input() {
        let mut input = Cursor::new("cat\n0\n4\n  3 \n");
        let mut output = Vec::new();
        let choice = prompt_choice(&mut input, &mut output, &options()).unwrap();
        assert_eq!(choice, 2);

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Enter the number of your choice: ").count(), 4);
    }

    #[test]
    fn test_prompt_closed_input() {
        let mut input = Cursor::new("nope\n");
        let mut output = Vec::new();
        let err = prompt_choice(&mut input, &mut output, &options()).unwrap_err();
        assert!(matches!(err, PromptError::Closed));
    }

    #[test]
    fn test_prompt_no_options() {
        let mut input = Cursor::new("1\n");
        let mut output = Vec::new();
        let empty: [&str; 0] = [];
        let err = prompt_choice(&mut input, &mut output, &empty).unwrap_err();
        assert!(matches!(err, PromptError::NoOptions));
    }
}
