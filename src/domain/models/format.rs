use serde::Serialize;

/// Position and message of the first diagnostic reported by the formatter
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FormatError {
    pub line: u32,
    pub column: u32,
    pub msg: String,
}

impl FormatError {
    /// Parse a `file:line:col: message` diagnostic. Text that does not follow
    /// that shape is kept whole as the message at position 0:0.
    pub fn parse(diagnostic: &str) -> Self {
        let first = diagnostic.lines().find(|l| !l.trim().is_empty()).unwrap_or("").trim();

        let mut parts = first.splitn(4, ':');
        let (_file, line, column, msg) = (parts.next(), parts.next(), parts.next(), parts.next());
        match (
            line.and_then(|l| l.trim().parse::<u32>().ok()),
            column.and_then(|c| c.trim().parse::<u32>().ok()),
            msg,
        ) {
            (Some(line), Some(column), Some(msg)) => Self {
                line,
                column,
                msg: msg.trim().to_string(),
            },
            _ => Self {
                line: 0,
                column: 0,
                msg: first.to_string(),
            },
        }
    }
}

/// Formatted source, or the reason it could not be formatted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatResponse {
    pub body: String,
    pub error: Option<FormatError>,
}

impl FormatResponse {
    pub fn formatted(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            error: None,
        }
    }

    pub fn failed(error: FormatError) -> Self {
        Self {
            body: String::new(),
            error: Some(error),
        }
    }
}
