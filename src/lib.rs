//! Live prefix autocomplete over a vocabulary loaded once at startup.
//!
//! [`autocomplete::Trie`] is the index. [`App`] owns it together with the raw
//! [`vocabulary::Vocabulary`] and lends both to the line reader through
//! [`Suggestions`] on every read, so the index is only ever written before the
//! prompt starts.

use std::ops::ControlFlow;

use autocomplete::Trie;
use command::{Command, HELP};
use prompt::FieldPrompt;
use readline::{signal::Signal, Completer, Readline};
use tokio::io::{self, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};
use vocabulary::Vocabulary;

pub mod autocomplete;
pub mod command;
pub mod config;
pub mod constants;
pub mod prompt;
pub mod readline;
pub mod vocabulary;

#[cfg(test)]
mod proptests;

#[derive(Debug)]
pub struct App {
    index: Trie,
    vocabulary: Vocabulary,
    limit: usize,
    selections: Vec<String>,
}

/// What the reader sees of an [`App`] while a line is being typed.
#[derive(Debug, Clone, Copy)]
pub struct Suggestions<'a> {
    index: &'a Trie,
    vocabulary: &'a Vocabulary,
    limit: usize,
}

impl Completer for Suggestions<'_> {
    fn complete(&self, typed: &str) -> Vec<String> {
        if typed.is_empty() {
            self.vocabulary.head(self.limit).to_vec()
        } else {
            self.index.search_prefix(typed, self.limit)
        }
    }
}

impl App {
    pub fn new(vocabulary: Vocabulary, limit: usize) -> Self {
        let index: Trie = vocabulary.iter().collect();
        info!(
            entries = vocabulary.len(),
            distinct = index.len(),
            limit,
            "built prefix index"
        );

        Self {
            index,
            vocabulary,
            limit,
            selections: vec![],
        }
    }

    pub fn index(&self) -> &Trie {
        &self.index
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn selections(&self) -> &[String] {
        &self.selections
    }

    pub fn suggestions(&self) -> Suggestions<'_> {
        Suggestions {
            index: &self.index,
            vocabulary: &self.vocabulary,
            limit: self.limit,
        }
    }

    pub async fn start(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout();
        let mut stderr = io::stderr();
        let mut readline = Readline::new_with_prompt(FieldPrompt::new("Drug Name"));
        let mut input = String::new();

        loop {
            let signal = readline.read(&self.suggestions(), &mut input).await?;
            if signal == Signal::CtrlD {
                break;
            }

            if !input.is_empty() {
                match Command::parse(&input) {
                    Ok(command) => {
                        if self.execute(command, &mut stdout).await?.is_break() {
                            break;
                        }
                    }
                    Err(err) => stderr.write_all(format!("{err}\r\n").as_bytes()).await?,
                }
                input.clear();
            }
        }

        self.write_selections(&mut stdout).await?;
        info!(selections = self.selections.len(), "session finished");

        Ok(())
    }

    pub async fn execute<S: AsyncWrite + Unpin>(
        &mut self,
        command: Command,
        out: &mut S,
    ) -> io::Result<ControlFlow<()>> {
        debug!(?command, "executing");
        match command {
            Command::Select { entry } => {
                if !self.index.contains(&entry) {
                    out.write_all(format!("note: {entry} is not in the vocabulary\r\n").as_bytes())
                        .await?;
                }
                info!(entry = %entry, "selected");
                self.selections.push(entry);
            }
            Command::Limit { limit } => {
                self.limit = limit;
                out.write_all(format!("showing at most {limit} suggestions\r\n").as_bytes())
                    .await?;
            }
            Command::List => {
                for entry in self.vocabulary.head(self.limit) {
                    out.write_all(format!("{entry}\r\n").as_bytes()).await?;
                }
            }
            Command::Count => {
                out.write_all(
                    format!(
                        "{} entries, {} distinct\r\n",
                        self.vocabulary.len(),
                        self.index.len()
                    )
                    .as_bytes(),
                )
                .await?;
            }
            Command::Selected => self.write_selections(out).await?,
            Command::Help => {
                out.write_all(format!("{}\r\n", HELP.replace('\n', "\r\n")).as_bytes())
                    .await?;
            }
            Command::Exit => return Ok(ControlFlow::Break(())),
        }
        out.flush().await?;

        Ok(ControlFlow::Continue(()))
    }

    async fn write_selections<S: AsyncWrite + Unpin>(&self, out: &mut S) -> io::Result<()> {
        for (i, entry) in self.selections.iter().enumerate() {
            out.write_all(format!("{}. {entry}\r\n", i + 1).as_bytes())
                .await?;
        }
        out.flush().await
    }
}
