//! Interactive text menu over a [`SocialNetwork`].
//!
//! The menu only offers what the network's state allows: loading before a
//! file is in, statistics and lookups after. Options are picked by their
//! first letter or number, case-insensitive. Reading and writing go through
//! generic `BufRead`/`Write` handles so sessions can be replayed in tests.

use std::io::{self, BufRead, Write};

use socialtrack_core::CoreError;
use socialtrack_network::SocialNetwork;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Load,
    Stats,
    Find,
    Exit,
}

impl Choice {
    fn label(self) -> &'static str {
        match self {
            Choice::Load => "[L] Load data file",
            Choice::Stats => "[S] Show statistics",
            Choice::Find => "[F] Find closest connection",
            Choice::Exit => "[E] Exit",
        }
    }

    fn matches(self, input: &str, number: usize) -> bool {
        let letter = self.label().chars().nth(1).unwrap_or_default();
        input == number.to_string()
            || input
                .chars()
                .next()
                .is_some_and(|c| c.eq_ignore_ascii_case(&letter))
    }
}

pub struct Menu<R, W> {
    input: R,
    out: W,
    network: SocialNetwork,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, out: W, network: SocialNetwork) -> Self {
        Menu {
            input,
            out,
            network,
        }
    }

    /// Runs the main menu until the user exits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        while self.main_menu()? {}
        Ok(())
    }

    /// Shows the available options and handles one selection. Returns
    /// false once the session should end.
    pub fn main_menu(&mut self) -> io::Result<bool> {
        let choices = self.available();
        writeln!(self.out, "Main Menu:")?;
        for (i, choice) in choices.iter().enumerate() {
            writeln!(self.out, "{}) {}", i + 1, choice.label())?;
        }
        let Some(input) = self.prompt("Enter your command: ")? else {
            self.show_exit_message()?;
            return Ok(false);
        };

        let selected = choices
            .iter()
            .enumerate()
            .find(|(i, choice)| choice.matches(&input, i + 1))
            .map(|(_, choice)| *choice);
        debug!(input = %input, ?selected, "menu selection");

        match selected {
            Some(Choice::Load) => self.load_data_file()?,
            Some(Choice::Stats) => self.show_statistics()?,
            Some(Choice::Find) => self.find_closest_connection()?,
            Some(Choice::Exit) => {
                self.show_exit_message()?;
                return Ok(false);
            }
            None => writeln!(self.out, "Invalid choice. Please try again.")?,
        }
        Ok(true)
    }

    fn available(&self) -> Vec<Choice> {
        if self.network.is_loaded() {
            vec![Choice::Stats, Choice::Find, Choice::Exit]
        } else {
            vec![Choice::Load, Choice::Exit]
        }
    }

    fn load_data_file(&mut self) -> io::Result<()> {
        let Some(path) = self.prompt("Enter data file path: ")? else {
            return Ok(());
        };
        if path.is_empty() {
            writeln!(self.out, "Please enter a file path.")?;
            return Ok(());
        }
        match self.network.load_dot_file(&path) {
            Ok(summary) => writeln!(
                self.out,
                "Loaded {} users and {} friendships from {}.",
                summary.users_added, summary.friendships_added, path
            ),
            Err(err) => writeln!(self.out, "Error loading data file: {}", err),
        }
    }

    fn show_statistics(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", self.network.stats())
    }

    fn find_closest_connection(&mut self) -> io::Result<()> {
        let Some(first) = self.prompt("Enter the first person's name: ")? else {
            return Ok(());
        };
        let Some(second) = self.prompt("Enter the second person's name: ")? else {
            return Ok(());
        };

        let missing: Vec<&str> = [first.as_str(), second.as_str()]
            .into_iter()
            .filter(|user| !user.is_empty() && !self.network.contains_user(user))
            .collect();
        if !missing.is_empty() {
            for user in missing {
                writeln!(self.out, "{} is not in the dataset.", user)?;
            }
            return Ok(());
        }

        match self.network.closest_connection(&first, &second) {
            Ok(result) => {
                writeln!(self.out, "Closest connection: {}", result.path().join(" -> "))?;
                if result.intermediary_count() == 0 {
                    writeln!(self.out, "Intermediary friends: none")
                } else {
                    writeln!(
                        self.out,
                        "Intermediary friends: {} ({})",
                        result.intermediary_count(),
                        result.intermediaries().join(", ")
                    )
                }
            }
            Err(CoreError::NoPath { .. }) => {
                writeln!(self.out, "No connection found between {} and {}.", first, second)
            }
            Err(CoreError::InvalidArgument { .. }) => writeln!(self.out, "Please enter two names."),
            Err(err) => writeln!(self.out, "Error: {}", err),
        }
    }

    fn show_exit_message(&mut self) -> io::Result<()> {
        writeln!(self.out, "Exiting the application. Goodbye!")
    }

    /// Prints `text` and reads one trimmed line; `None` at end of input.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.out, "{}", text)?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.out)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
