//! Interactive terminal UI.

use console::Term;
use std::io::Write;

use super::{
    should_use_colors, NonInteractiveUI, OutputMode, PrereqTheme, ProgressSpinner, SpinnerHandle,
    UserInterface,
};

/// Interactive terminal UI implementation.
///
/// Warnings, errors and hints go to stderr so `--json` output on stdout
/// stays parseable.
pub struct TerminalUI {
    term: Term,
    err_term: Term,
    theme: PrereqTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        Self::with_terms(mode, Term::stdout(), Term::stderr())
    }

    /// Create a terminal UI writing to explicit output and error terminals.
    pub fn with_terms(mode: OutputMode, term: Term, err_term: Term) -> Self {
        let theme = if should_use_colors() {
            PrereqTheme::new()
        } else {
            PrereqTheme::plain()
        };

        Self {
            term,
            err_term,
            theme,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.err_term, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err_term, "{}", self.theme.format_error(msg)).ok();
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "\n{}\n", self.theme.format_header(title)).ok();
        }
    }

    fn show_hint(&mut self, hint: &str) {
        writeln!(self.err_term, "{}", self.theme.format_hint(hint)).ok();
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            Box::new(ProgressSpinner::new(message, self.theme.clone()))
        } else {
            Box::new(ProgressSpinner::hidden())
        }
    }

    fn is_interactive(&self) -> bool {
        self.term.is_term()
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }
}

/// Create the appropriate UI based on context.
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    if interactive && Term::stdout().is_term() {
        Box::new(TerminalUI::new(mode))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_ui_output_mode() {
        let ui = TerminalUI::new(OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }

    #[cfg(unix)]
    #[test]
    fn warnings_and_errors_go_to_stderr() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = |name: &str| {
            std::fs::OpenOptions::new()
                .read(true)
                .write(true)
                .create(true)
                .truncate(true)
                .open(dir.path().join(name))
                .unwrap()
        };
        let out = Term::read_write_pair(file("in"), file("out"));
        let err = Term::read_write_pair(file("in"), file("err"));
        let mut ui = TerminalUI::with_terms(OutputMode::Normal, out, err);

        ui.success("claude");
        ui.warning("ANTHROPIC_API_KEY is not set");
        ui.error("Phase 3 verification failed");

        let stdout = std::fs::read_to_string(dir.path().join("out")).unwrap();
        let stderr = std::fs::read_to_string(dir.path().join("err")).unwrap();
        assert!(stdout.contains("claude"));
        assert!(!stdout.contains("ANTHROPIC_API_KEY"));
        assert!(stderr.contains("ANTHROPIC_API_KEY is not set"));
        assert!(stderr.contains("Phase 3 verification failed"));
    }

    #[test]
    fn create_ui_non_interactive() {
        let ui = create_ui(false, OutputMode::Normal);
        assert!(!ui.is_interactive());
    }

    #[test]
    fn create_ui_respects_mode() {
        let ui = create_ui(false, OutputMode::Silent);
        assert_eq!(ui.output_mode(), OutputMode::Silent);
    }
}
