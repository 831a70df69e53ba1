//! Slack mrkdwn reply helpers
//!
//! Small pure utilities shared by the command handlers so reply text is
//! built one way everywhere.

use std::fmt::Display;

/// Bold mrkdwn (`*text*`)
pub fn bold(text: impl Display) -> String {
    format!("*{text}*")
}

/// Italic mrkdwn (`_text_`)
pub fn italic(text: impl Display) -> String {
    format!("_{text}_")
}

/// Join non-empty sections with a blank line between each.
pub fn join_sections<I, S>(sections: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    sections
        .into_iter()
        .filter(|s| !s.as_ref().trim().is_empty())
        .map(|s| s.as_ref().trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n\n")
}
