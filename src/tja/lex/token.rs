//! Definitions of the token in TJA format.

use std::borrow::Cow;

use crate::tja::command::mixin::SourceRangeMixin;

use super::cursor::SourceLine;

/// A token content of TJA format.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[non_exhaustive]
pub enum Token<'a> {
    /// `KEY:VALUE`. A header line, which sets the song metadata or the header of the next course.
    Header {
        /// String before the first `:`. It is always uppercase.
        name: Cow<'a, str>,
        /// String after the first `:`, trimmed.
        value: &'a str,
    },
    /// `#NAME ARGS`. A command line, which controls the timeline of the course.
    Command {
        /// String after `#` and until the first whitespace. It is always uppercase.
        name: Cow<'a, str>,
        /// String after `#NAME` and whitespaces.
        args: &'a str,
    },
    /// Other lines, the note codes of measures terminated by `,`. Whitespaces in it are not removed yet.
    Notes(&'a str),
}

/// A token with position information.
pub type TokenWithRange<'a> = SourceRangeMixin<Token<'a>>;

fn uppercase(name: &str) -> Cow<'_, str> {
    if name.bytes().any(|b| b.is_ascii_lowercase()) {
        Cow::Owned(name.to_ascii_uppercase())
    } else {
        Cow::Borrowed(name)
    }
}

fn is_header_name(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && name.chars().all(|c| c.is_ascii_alphanumeric())
}

impl<'a> Token<'a> {
    pub(crate) fn from_line(line: SourceLine<'a>) -> TokenWithRange<'a> {
        let SourceLine { line, range, text } = line;
        let token = if let Some(command) = text.strip_prefix('#') {
            let (name, args) = command
                .split_once(char::is_whitespace)
                .unwrap_or((command, ""));
            Self::Command {
                name: uppercase(name),
                args: args.trim(),
            }
        } else if let Some((name, value)) = text
            .split_once(':')
            .filter(|(name, _)| is_header_name(name.trim()))
        {
            Self::Header {
                name: uppercase(name.trim()),
                value: value.trim(),
            }
        } else {
            Self::Notes(text)
        };
        SourceRangeMixin::new(token, line, range)
    }

    /// Creates a [`Token::Command`] token with string literals.
    #[must_use]
    pub fn command(name: &'a str, args: &'a str) -> Self {
        Self::Command {
            name: name.into(),
            args,
        }
    }

    /// Creates a [`Token::Header`] token with string literals.
    #[must_use]
    pub fn header(name: &'a str, value: &'a str) -> Self {
        Self::Header {
            name: name.into(),
            value,
        }
    }

    /// Checks whether the token is the named command.
    #[must_use]
    pub fn is_command(&self, expected: &str) -> bool {
        matches!(self, Self::Command { name, .. } if name == expected)
    }
}

impl std::fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Header { name, value } => write!(f, "{name}:{value}"),
            Self::Command { name, args } if args.is_empty() => write!(f, "#{name}"),
            Self::Command { name, args } => write!(f, "#{name} {args}"),
            Self::Notes(notes) => write!(f, "{notes}"),
        }
    }
}
