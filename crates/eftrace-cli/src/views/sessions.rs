use eftrace_engine::SessionSummary;
use std::fmt;

use super::{Palette, format_duration};

/// Sessions as an aligned table, one row each
pub struct SessionTable<'a> {
    sessions: &'a [&'a SessionSummary],
    palette: Palette,
}

impl<'a> SessionTable<'a> {
    pub fn new(sessions: &'a [&'a SessionSummary], palette: Palette) -> Self {
        Self { sessions, palette }
    }
}

impl fmt::Display for SessionTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.sessions.is_empty() {
            return writeln!(f, "No sessions found");
        }

        let width = self
            .sessions
            .iter()
            .map(|s| s.id.len())
            .max()
            .unwrap_or(0)
            .max("SESSION".len());
        writeln!(
            f,
            "{}",
            self.palette.heading(&format!(
                "{:<width$}  {:>5}  {:>7}  {:>6}  {:>8}  {:>9}  START",
                "SESSION", "FILES", "EVENTS", "ERRORS", "WARNINGS", "DURATION"
            ))
        )?;

        for session in self.sessions {
            let duration = session
                .duration_seconds()
                .map(format_duration)
                .unwrap_or_else(|| "-".to_string());
            let start = session
                .start
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| "-".to_string());

            writeln!(
                f,
                "{:<width$}  {:>5}  {:>7}  {:>6}  {:>8}  {:>9}  {}",
                session.id,
                session.file_count,
                session.event_count,
                session.error_count,
                session.warning_count,
                duration,
                self.palette.dim(&start),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: &str) -> SessionSummary {
        SessionSummary {
            id: id.to_string(),
            log_types: Vec::new(),
            file_count: 9,
            event_count: 35,
            error_count: 3,
            warning_count: 1,
            start: None,
            end: None,
            build_version: None,
        }
    }

    #[test]
    fn test_session_table_without_timestamps() {
        let session = summary("2024.03.12_x");
        let sessions = [&session];
        let text = SessionTable::new(&sessions, Palette::plain()).to_string();

        assert_eq!(
            text,
            "SESSION       FILES   EVENTS  ERRORS  WARNINGS   DURATION  START\n2024.03.12_x      9       35       3         1          -  -\n"
        );
    }

    #[test]
    fn test_empty_session_table() {
        assert_eq!(SessionTable::new(&[], Palette::plain()).to_string(), "No sessions found\n");
    }
}
