use colored::Colorize;
use std::io::{BufRead, Write};
use westward_game::journey::PROMPT_QUIT;
use westward_game::{Action, Collaborator, MenuOption, TrailEvent};

/// Terminal player: numbered menus on `output`, answers read line by line from `input`.
///
/// Once input runs out the player quits, so piping a short script into the
/// binary always ends the journey.
pub struct ConsolePlayer<R, W> {
    input: R,
    output: W,
    exhausted: bool,
}

impl<R: BufRead, W: Write> ConsolePlayer<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            exhausted: false,
        }
    }

    /// Ask a free-form question, falling back to `default` on empty or missing input.
    pub fn ask_text(&mut self, prompt: &str, default: &str) -> String {
        let _ = write!(self.output, "{prompt} [{default}] ");
        let _ = self.output.flush();
        match self.read_line() {
            Some(answer) if !answer.is_empty() => answer,
            _ => default.to_string(),
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> Option<String> {
        if self.exhausted {
            return None;
        }
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => {
                self.exhausted = true;
                None
            }
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    fn fallback_choice(options: &[MenuOption]) -> &'static str {
        options
            .iter()
            .find(|option| option.key == Action::Quit.as_str())
            .or_else(|| options.first())
            .map_or("", |option| option.key)
    }
}

impl<R: BufRead, W: Write> Collaborator for ConsolePlayer<R, W> {
    fn choose(&mut self, prompt: &str, options: &[MenuOption]) -> &'static str {
        loop {
            let _ = writeln!(self.output, "{}", prompt.bold());
            for (idx, option) in options.iter().enumerate() {
                let _ = writeln!(self.output, "  {}. {}", idx + 1, option.label);
            }
            let _ = write!(self.output, "> ");
            let _ = self.output.flush();

            let Some(answer) = self.read_line() else {
                return Self::fallback_choice(options);
            };
            let picked = answer
                .parse::<usize>()
                .ok()
                .and_then(|number| number.checked_sub(1))
                .and_then(|idx| options.get(idx))
                .or_else(|| {
                    options
                        .iter()
                        .find(|option| option.key.eq_ignore_ascii_case(&answer))
                });
            if let Some(option) = picked {
                return option.key;
            }
            let _ = writeln!(self.output, "{}", "Invalid choice. Try again.".yellow());
        }
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        loop {
            let _ = write!(self.output, "{prompt} (y/n) ");
            let _ = self.output.flush();
            let Some(answer) = self.read_line() else {
                return prompt == PROMPT_QUIT;
            };
            match answer.to_ascii_lowercase().as_str() {
                "y" | "yes" => return true,
                "n" | "no" => return false,
                _ => {
                    let _ = writeln!(self.output, "{}", "Please answer y or n.".yellow());
                }
            }
        }
    }

    fn display(&mut self, event: &TrailEvent) {
        let text = event.to_string();
        let styled = match event {
            TrailEvent::Status(_) => format!("\n{}", text.cyan()),
            TrailEvent::Died { .. } | TrailEvent::Starving { .. } => text.red().bold().to_string(),
            TrailEvent::FellIll { .. } | TrailEvent::Mishap(_) => text.yellow().to_string(),
            TrailEvent::LandmarkReached { .. } | TrailEvent::RiverAhead { .. } => {
                text.bright_white().bold().to_string()
            }
            TrailEvent::Finished(summary) if summary.is_victory() => {
                text.bright_green().bold().to_string()
            }
            TrailEvent::Finished(_) => text.bright_red().bold().to_string(),
            _ => text,
        };
        let _ = writeln!(self.output, "{styled}");
    }
}
