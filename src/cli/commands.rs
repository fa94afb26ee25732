use crate::cli::{Config, Console};
use crate::error::{AppError, Result};
use crate::store::{CardStore, StoreError};
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Menu printed before every command.
pub const MENU: &str =
    "Input the action (add, remove, import, export, ask, exit, log, hardest card, reset stats):";

/// Interactive commands understood by the session loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Create a new card
    Add,
    /// Delete a card and its statistics
    Remove,
    /// Load cards from a file
    Import,
    /// Save cards to a file
    Export,
    /// Quiz the user on the first N cards
    Ask,
    /// Save the session transcript to a file
    Log,
    /// Show the cards with the most wrong answers
    HardestCard,
    /// Forget all wrong answer counts
    ResetStats,
    /// Save to the configured export file and quit
    Exit,
}

impl Command {
    pub const ALL: [Command; 9] = [
        Command::Add,
        Command::Remove,
        Command::Import,
        Command::Export,
        Command::Ask,
        Command::Log,
        Command::HardestCard,
        Command::ResetStats,
        Command::Exit,
    ];

    /// The exact text the user types to run this command.
    pub fn name(self) -> &'static str {
        match self {
            Command::Add => "add",
            Command::Remove => "remove",
            Command::Import => "import",
            Command::Export => "export",
            Command::Ask => "ask",
            Command::Log => "log",
            Command::HardestCard => "hardest card",
            Command::ResetStats => "reset stats",
            Command::Exit => "exit",
        }
    }

    /// Matches a line of input against the command vocabulary. Matching is
    /// exact; anything else is not a command.
    pub fn parse(input: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.name() == input)
    }
}

/// Whether the session loop should keep prompting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// One run of the flashcard trainer: the cards, the transcript, and the
/// terminal they are shown on.
pub struct Session<R, W> {
    store: CardStore,
    console: Console<R, W>,
    exit_export: PathBuf,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(console: Console<R, W>, config: &Config) -> Self {
        Self {
            store: CardStore::new(),
            console,
            exit_export: config.exit_export_path().to_path_buf(),
        }
    }

    pub fn store(&self) -> &CardStore {
        &self.store
    }

    #[cfg(test)]
    pub fn console(&self) -> &Console<R, W> {
        &self.console
    }

    /// Runs the command loop until `exit` or end of input.
    ///
    /// End of input is treated like `exit`, so the final export still
    /// happens.
    ///
    /// # Errors
    ///
    /// Only terminal I/O failures end the loop with an error; every command
    /// level failure is reported to the user and the loop continues.
    pub fn run(&mut self) -> Result<()> {
        info!("Starting flashcard session");
        loop {
            match self.step() {
                Ok(Flow::Continue) => {},
                Ok(Flow::Exit) => break,
                Err(AppError::InputClosed) => {
                    info!("Input closed, exiting");
                    self.exit()?;
                    break;
                },
                Err(e) => {
                    error!("Session aborted: {:?}", e);
                    return Err(e);
                },
            }
        }
        info!("Flashcard session finished");
        Ok(())
    }

    /// Prints the menu, reads one line and runs the matching command.
    pub fn step(&mut self) -> Result<Flow> {
        let input = self.console.prompt(MENU)?;

        let Some(command) = Command::parse(&input) else {
            debug!("Ignoring unknown command {:?}", input);
            self.console.say("")?;
            return Ok(Flow::Continue);
        };

        let flow = match self.run_command(command) {
            Err(AppError::InvalidCount(answer)) => {
                warn!("Rejected question count {:?}", answer);
                self.console
                    .say(format!("\"{}\" is not a valid number of questions.", answer))?;
                Flow::Continue
            },
            other => other?,
        };

        if flow == Flow::Continue {
            self.console.say("")?;
        }
        Ok(flow)
    }

    /// Runs a single command.
    pub fn run_command(&mut self, command: Command) -> Result<Flow> {
        debug!("Running command {:?}", command);
        match command {
            Command::Add => self.add_card()?,
            Command::Remove => self.remove_card()?,
            Command::Import => {
                let path = self.console.prompt("File name:")?;
                self.import_cards(Path::new(&path))?;
            },
            Command::Export => {
                let path = self.console.prompt("File name:")?;
                self.export_cards(Path::new(&path))?;
            },
            Command::Ask => self.ask()?,
            Command::Log => self.save_log()?,
            Command::HardestCard => self.report_hardest_cards()?,
            Command::ResetStats => {
                self.store.reset_stats();
                self.console.say("Card statistics have been reset.")?;
            },
            Command::Exit => {
                self.exit()?;
                return Ok(Flow::Exit);
            },
        }
        Ok(Flow::Continue)
    }

    /// Loads a card file and reports the outcome. A missing file is reported,
    /// not returned as an error.
    pub fn import_cards(&mut self, path: &Path) -> Result<()> {
        match self.store.import_from(path) {
            Ok(summary) => {
                for (line, reason) in &summary.rejected {
                    self.console
                        .say(format!("Line {} is malformed: {}", line, reason))?;
                }
                self.console
                    .say(format!("{} cards have been loaded.", summary.loaded))?;
            },
            Err(e) => {
                warn!("Import from {} failed: {}", path.display(), e);
                self.console.say("File not found.")?;
            },
        }
        Ok(())
    }

    /// Writes every card to `path` and reports the outcome. Write failures are
    /// reported, not returned as an error.
    pub fn export_cards(&mut self, path: &Path) -> Result<()> {
        match self.store.export_to(path) {
            Ok(written) => {
                self.console
                    .say(format!("{} cards have been saved.", written))?;
            },
            Err(e) => {
                warn!("Export to {:?} failed: {}", path, e);
                self.console.say("Can't open file.")?;
            },
        }
        Ok(())
    }

    fn add_card(&mut self) -> Result<()> {
        let term = self.console.prompt("The card:")?;
        if self.store.contains_term(&term) {
            return self
                .console
                .say(format!("The card \"{}\" already exists.", term));
        }

        let definition = self.console.prompt("The definition of the card:")?;
        let message = match self.store.add(&term, &definition) {
            Ok(()) => format!(
                "The pair (\"{}\":\"{}\") has been added.",
                term, definition
            ),
            Err(StoreError::TermExists(term)) => format!("The card \"{}\" already exists.", term),
            Err(StoreError::DefinitionExists(definition)) => {
                format!("The definition \"{}\" already exists.", definition)
            },
            Err(e) => return Err(e.into()),
        };
        self.console.say(message)
    }

    fn remove_card(&mut self) -> Result<()> {
        let term = self.console.prompt("Which card?")?;
        let message = match self.store.remove(&term) {
            Ok(_) => "The card has been removed.".to_string(),
            Err(StoreError::NoSuchCard(term)) => {
                format!("Can't remove \"{}\": there is no such card.", term)
            },
            Err(e) => return Err(e.into()),
        };
        self.console.say(message)
    }

    /// Quizzes the user on the first N cards in store order. N is clamped to
    /// the number of cards.
    fn ask(&mut self) -> Result<()> {
        let answer = self.console.prompt("How many times to ask?")?;
        let count: usize = answer
            .trim()
            .parse()
            .map_err(|_| AppError::InvalidCount(answer.clone()))?;

        if count > 0 && self.store.is_empty() {
            return self.console.say("There are no cards to ask.");
        }
        if count > self.store.len() {
            debug!(
                "Asked for {} questions but only {} cards exist",
                count,
                self.store.len()
            );
        }

        let terms: Vec<String> = self.store.terms().take(count).map(String::from).collect();
        for term in terms {
            self.ask_one(&term)?;
        }
        Ok(())
    }

    fn ask_one(&mut self, term: &str) -> Result<()> {
        let answer = self
            .console
            .prompt(format!("Print the definition of \"{}\":", term))?;
        let expected = self
            .store
            .lookup_definition(term)
            .unwrap_or_default()
            .to_string();

        if answer == expected {
            return self.console.say("Correct!");
        }

        self.store.record_wrong_answer(term);
        let message = match self.store.find_term_by_definition(&answer) {
            Some(other) => format!(
                "Wrong. The right answer is \"{}\", but your definition is correct for \"{}\".",
                expected, other
            ),
            None => format!("Wrong. The right answer is \"{}\".", expected),
        };
        self.console.say(message)
    }

    /// Saves the transcript, including the confirmation line itself.
    fn save_log(&mut self) -> Result<()> {
        let path = self.console.prompt("File name:")?;
        let file = match File::create(&path) {
            Ok(file) => file,
            Err(e) => {
                warn!("Cannot create log file {:?}: {}", path, e);
                return self.console.say("Can't open file");
            },
        };

        self.console.say("The log has been saved.")?;
        if let Err(e) = self.console.log().write_to(BufWriter::new(file)) {
            error!("Writing log file {:?} failed: {}", path, e);
            return self.console.say("Can't open file");
        }
        Ok(())
    }

    fn report_hardest_cards(&mut self) -> Result<()> {
        let hardest = self.store.hardest_cards();
        let message = match hardest.terms.as_slice() {
            [] => "There are no cards with errors.".to_string(),
            [term] => format!(
                "The hardest card is \"{}\". You have {} errors answering it.",
                term, hardest.wrong_count
            ),
            terms => format!(
                "The hardest cards are {}. You have {} errors answering them.",
                terms
                    .iter()
                    .map(|term| format!("\"{}\"", term))
                    .collect::<Vec<_>>()
                    .join(", "),
                hardest.wrong_count
            ),
        };
        self.console.say(message)
    }

    fn exit(&mut self) -> Result<()> {
        self.console.say("Bye bye!")?;
        let path = self.exit_export.clone();
        self.export_cards(&path)
    }
}
