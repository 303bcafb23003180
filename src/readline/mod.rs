use crate::{
    autocomplete::Trie,
    constants::DEFAULT_LIMIT,
    prompt::{DefaultPrompt, Prompt},
    readline::constants::{
        ACTIVE_MARKER, ARROW_ANCHOR, BACKSPACE, CSI, CTRL_C, CTRL_D, CTRL_H, DOWN_ARROW, END,
        HOME, INACTIVE_MARKER, KEY_TIMEOUT_DURATION, LEFT_ARROW, NEWLINE, RETURN, RIGHT_ARROW,
        TAB, TILDE, UP_ARROW,
    },
};

use crossterm::{
    cursor::MoveUp,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType},
};
use tokio::{
    io::{self, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt},
    time::timeout,
};
use tracing::debug;

pub mod constants;
pub mod signal;

use signal::Signal;

/// Source of suggestions for the text typed so far.
pub trait Completer {
    fn complete(&self, typed: &str) -> Vec<String>;
}

impl Completer for Trie {
    fn complete(&self, typed: &str) -> Vec<String> {
        self.search_prefix(typed, DEFAULT_LIMIT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionDirection {
    Up,
    Down,
}

/// Single-line editor that re-queries a [`Completer`] on every edit and draws
/// the suggestions below the input line.
#[derive(Debug)]
pub struct Readline<P> {
    pub prompt: Option<P>,
    pub input: Vec<char>,
    pub input_cursor: usize,
    pub suggestions: Vec<String>,
    pub suggestion_cursor: Option<usize>,
}

impl Readline<DefaultPrompt> {
    pub fn new() -> Readline<DefaultPrompt> {
        Readline::new_with_prompt(DefaultPrompt)
    }
}

impl Default for Readline<DefaultPrompt> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Prompt> Readline<P> {
    pub fn new_with_prompt(prompt: P) -> Readline<P> {
        Readline::<P> {
            prompt: Some(prompt),
            input: vec![],
            input_cursor: 0,
            suggestions: vec![],
            suggestion_cursor: None,
        }
    }

    /// Reads one line from the terminal in raw mode.
    pub async fn read<C: Completer>(
        &mut self,
        completer: &C,
        input: &mut String,
    ) -> io::Result<Signal> {
        enable_raw_mode()?;

        let mut stdin = io::stdin();
        let mut stdout = io::stdout();
        let signal = self
            .read_from(completer, &mut stdin, &mut stdout, input)
            .await;

        disable_raw_mode()?;
        signal
    }

    /// Reads one line from `source`, echoing to `sink`. End of input counts as Ctrl-D.
    pub async fn read_from<C, I, S>(
        &mut self,
        completer: &C,
        source: &mut I,
        sink: &mut S,
        input: &mut String,
    ) -> io::Result<Signal>
    where
        C: Completer,
        I: AsyncRead + Unpin,
        S: AsyncWrite + Unpin,
    {
        self.refresh(completer, sink).await?;

        loop {
            let byte = match source.read_u8().await {
                Ok(byte) => byte,
                Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
                    self.handle_ctrl_d(sink).await?;
                    return Ok(Signal::CtrlD);
                }
                Err(err) => return Err(err),
            };

            match byte {
                RETURN | NEWLINE => {
                    self.finish_line(sink).await?;
                    *input = self.input.drain(..).collect();
                    self.input_cursor = 0;
                    return Ok(Signal::Success);
                }
                CTRL_C => {
                    self.handle_ctrl_c();
                    self.refresh(completer, sink).await?;
                }
                CTRL_D => {
                    self.handle_ctrl_d(sink).await?;
                    return Ok(Signal::CtrlD);
                }
                BACKSPACE | CTRL_H => {
                    if self.handle_backspace() {
                        self.refresh(completer, sink).await?;
                    }
                }
                TAB => {
                    if self.handle_autocomplete() {
                        self.refresh(completer, sink).await?;
                    }
                }
                ARROW_ANCHOR => {
                    if self.handle_escape_sequence(source, sink).await? {
                        self.refresh(completer, sink).await?;
                    }
                }
                _ => {
                    if let Some(c) = read_char(byte, source).await? {
                        if !c.is_control() {
                            self.handle_char(c);
                            self.refresh(completer, sink).await?;
                        }
                    }
                }
            }
        }
    }

    /// Text typed so far.
    pub fn typed(&self) -> String {
        self.input.iter().collect()
    }

    async fn refresh<C: Completer, S: AsyncWrite + Unpin>(
        &mut self,
        completer: &C,
        sink: &mut S,
    ) -> io::Result<()> {
        let typed = self.typed();
        self.suggestions = completer.complete(&typed);
        self.suggestion_cursor = None;
        debug!(
            typed = %typed,
            suggestions = self.suggestions.len(),
            "refreshed suggestions"
        );
        self.redraw(sink).await
    }

    async fn redraw<S: AsyncWrite + Unpin>(&self, sink: &mut S) -> io::Result<()> {
        let mut temp_buf = vec![];
        execute!(temp_buf, Clear(ClearType::FromCursorDown))?;
        sink.write_all(b"\r").await?;
        sink.write_all(&temp_buf).await?;
        self.draw_line(sink, self.input.len()).await?;

        for (i, suggestion) in self.suggestions.iter().enumerate() {
            let marker = if self.suggestion_cursor == Some(i) {
                ACTIVE_MARKER
            } else {
                INACTIVE_MARKER
            };
            sink.write_all(format!("\r\n{marker}{suggestion}").as_bytes())
                .await?;
        }

        if !self.suggestions.is_empty() {
            temp_buf.clear();
            let rows = u16::try_from(self.suggestions.len()).unwrap_or(u16::MAX);
            execute!(temp_buf, MoveUp(rows))?;
            sink.write_all(&temp_buf).await?;
        }

        // redraw up to the cursor so the terminal cursor lands on it
        sink.write_all(b"\r").await?;
        self.draw_line(sink, self.input_cursor).await?;
        sink.flush().await?;

        Ok(())
    }

    async fn draw_line<S: AsyncWrite + Unpin>(&self, sink: &mut S, upto: usize) -> io::Result<()> {
        if let Some(prompt) = &self.prompt {
            prompt.draw(&mut *sink).await?;
        }
        let text: String = self.input[..upto].iter().collect();
        sink.write_all(text.as_bytes()).await?;

        Ok(())
    }

    /// Clears the suggestion list and moves to a fresh line.
    async fn finish_line<S: AsyncWrite + Unpin>(&mut self, sink: &mut S) -> io::Result<()> {
        self.suggestions.clear();
        self.suggestion_cursor = None;

        let mut temp_buf = vec![];
        execute!(temp_buf, Clear(ClearType::FromCursorDown))?;
        sink.write_all(b"\r").await?;
        sink.write_all(&temp_buf).await?;
        self.draw_line(sink, self.input.len()).await?;
        sink.write_all(b"\r\n").await?;
        sink.flush().await?;

        Ok(())
    }

    /// Replaces the input with the highlighted suggestion, or the first one if
    /// nothing is highlighted.
    fn handle_autocomplete(&mut self) -> bool {
        let Some(choice) = self
            .suggestions
            .get(self.suggestion_cursor.unwrap_or(0))
            .cloned()
        else {
            return false;
        };

        self.input = choice.chars().collect();
        self.input_cursor = self.input.len();
        true
    }

    pub fn move_selection(&mut self, direction: SelectionDirection) {
        if self.suggestions.is_empty() {
            return;
        }
        let last = self.suggestions.len() - 1;
        self.suggestion_cursor = Some(match (direction, self.suggestion_cursor) {
            (SelectionDirection::Down, None) => 0,
            (SelectionDirection::Down, Some(i)) if i >= last => 0,
            (SelectionDirection::Down, Some(i)) => i + 1,
            (SelectionDirection::Up, None) | (SelectionDirection::Up, Some(0)) => last,
            (SelectionDirection::Up, Some(i)) => i - 1,
        });
    }

    fn handle_ctrl_c(&mut self) {
        self.input.clear();
        self.input_cursor = 0;
    }

    async fn handle_ctrl_d<S: AsyncWrite + Unpin>(&mut self, sink: &mut S) -> io::Result<()> {
        self.input.clear();
        self.input_cursor = 0;
        self.finish_line(sink).await
    }

    fn handle_backspace(&mut self) -> bool {
        if self.input_cursor == 0 {
            return false;
        }
        self.input_cursor -= 1;
        self.input.remove(self.input_cursor);
        true
    }

    fn handle_delete(&mut self) -> bool {
        if self.input_cursor == self.input.len() {
            return false;
        }
        self.input.remove(self.input_cursor);
        true
    }

    fn handle_char(&mut self, c: char) {
        self.input.insert(self.input_cursor, c);
        self.input_cursor += 1;
    }

    /// Consumes a whole CSI sequence (`ESC [ params final`), so keys this
    /// editor does not handle never leak bytes into the input. Returns `true`
    /// if the text changed.
    async fn handle_escape_sequence<S: AsyncWrite + Unpin, I: AsyncRead + Unpin>(
        &mut self,
        input: &mut I,
        sink: &mut S,
    ) -> io::Result<bool> {
        // a lone Esc press is not followed by anything
        match timeout(KEY_TIMEOUT_DURATION, input.read_u8()).await {
            Ok(Ok(CSI)) => {}
            _ => return Ok(false),
        }

        let mut params = vec![];
        let last = loop {
            match input.read_u8().await {
                Ok(byte @ 0x30..=0x3f) => params.push(byte),
                Ok(byte) => break byte,
                Err(_) => return Ok(false),
            }
        };

        match (params.as_slice(), last) {
            ([], UP_ARROW) => self.move_selection(SelectionDirection::Up),
            ([], DOWN_ARROW) => self.move_selection(SelectionDirection::Down),
            ([], LEFT_ARROW) if self.input_cursor > 0 => self.input_cursor -= 1,
            ([], RIGHT_ARROW) if self.input_cursor < self.input.len() => self.input_cursor += 1,
            ([], HOME) | ([b'1' | b'7'], TILDE) => self.input_cursor = 0,
            ([], END) | ([b'4' | b'8'], TILDE) => self.input_cursor = self.input.len(),
            ([b'3'], TILDE) => return Ok(self.handle_delete()),
            _ => return Ok(false),
        }

        self.redraw(sink).await?;
        Ok(false)
    }
}

/// Completes a UTF-8 sequence whose first byte has already been read.
async fn read_char<I: AsyncRead + Unpin>(first: u8, source: &mut I) -> io::Result<Option<char>> {
    let width = match first {
        0x00..=0x7f => 1,
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        _ => return Ok(None),
    };
    let mut buf = [first, 0, 0, 0];
    source.read_exact(&mut buf[1..width]).await?;

    Ok(std::str::from_utf8(&buf[..width])
        .ok()
        .and_then(|s| s.chars().next()))
}
