//! Rendering of errors for the terminal.
//!
//! The text is the same with and without colour: static errors read
//! `[line N] Error<where>: <message>` and runtime errors `<message>\n[line N]`.

use owo_colors::OwoColorize;

use crate::error::{LexError, ParseError, RunError, RuntimeError, StaticError};

pub fn render_static(error: &StaticError, color: bool) -> String {
    match error {
        StaticError::Lex(e) => render_lex(e, color),
        StaticError::Parse(e) => render_parse(e, color),
    }
}

fn render_lex(error: &LexError, color: bool) -> String {
    if !color {
        return error.to_string();
    }
    format!(
        "[line {}] {}: {}",
        error.line,
        "Error".red().bold(),
        error.message
    )
}

fn render_parse(error: &ParseError, color: bool) -> String {
    if !color {
        return error.to_string();
    }
    format!(
        "[line {}] {}{}: {}",
        error.token.line,
        "Error".red().bold(),
        error.location().yellow(),
        error.message
    )
}

pub fn render_runtime(error: &RuntimeError, color: bool) -> String {
    if !color {
        return error.to_string();
    }
    format!(
        "{}\n{}",
        error.message.red().bold(),
        format!("[line {}]", error.token.line).dimmed()
    )
}

pub fn render(error: &RunError, color: bool) -> Vec<String> {
    match error {
        RunError::Io(_) if color => vec![error.to_string().red().to_string()],
        RunError::Io(_) => vec![error.to_string()],
        RunError::Static(errors) => errors.iter().map(|e| render_static(e, color)).collect(),
        RunError::Runtime(e) => vec![render_runtime(e, color)],
    }
}

/// Writes every diagnostic carried by `error` to stderr.
pub fn report(error: &RunError, color: bool) {
    for line in render(error, color) {
        eprintln!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Token, TokenType};

    #[test]
    fn plain_rendering_matches_display() {
        let errors = RunError::Static(vec![
            LexError::new(1, "Unexpected character.").into(),
            ParseError::new(&Token::eof(1), "Expect expression.").into(),
        ]);

        assert_eq!(
            render(&errors, false),
            vec![
                "[line 1] Error: Unexpected character.",
                "[line 1] Error at end: Expect expression."
            ]
        );
    }

    #[test]
    fn coloured_rendering_keeps_the_text() {
        let token = Token::new(TokenType::Plus, "+", None, 3);
        let error = RunError::Runtime(RuntimeError::new(&token, "Operands must be numbers."));
        let rendered = render(&error, true).join("\n");

        assert!(rendered.contains("Operands must be numbers."));
        assert!(rendered.contains("[line 3]"));
        assert!(rendered.contains('\u{1b}'));
    }
}
