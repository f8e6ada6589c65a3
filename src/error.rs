use std::fmt;

/// Errors that can occur while parsing an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseError {
    /// The text is not four dot-separated decimal fields of 1-3 digits
    InvalidFormat,
}

impl ParseError {
    /// Short description without hint or color
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseError::InvalidFormat => "invalid IPv4 address",
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let use_color = should_use_color();

        match self {
            ParseError::InvalidFormat => {
                if use_color {
                    writeln!(f, "\x1b[1;31merror:\x1b[0m {}", self.as_str())?;
                    write!(
                        f,
                        "\x1b[1;36mhint:\x1b[0m expected four dot-separated fields of 1-3 digits, at most 15 characters"
                    )?;
                } else {
                    writeln!(f, "error: {}", self.as_str())?;
                    write!(
                        f,
                        "hint: expected four dot-separated fields of 1-3 digits, at most 15 characters"
                    )?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Check if colored output should be used
pub(crate) fn should_use_color() -> bool {
    // Respect NO_COLOR environment variable
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    use std::io::IsTerminal;
    std::io::stderr().is_terminal()
}
