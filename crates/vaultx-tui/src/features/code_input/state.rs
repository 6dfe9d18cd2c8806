//! Segmented code input state.
//!
//! N independently addressable single-digit cells with one focused cell.
//! Every mutation that can fill the last empty cell returns the completed
//! code, so the caller never has to poll for completion.

/// Default number of cells.
pub const DEFAULT_CODE_LENGTH: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeInputState {
    cells: Vec<Option<char>>,
    focus: usize,
    errored: bool,
    disabled: bool,
}

impl Default for CodeInputState {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

impl CodeInputState {
    /// Creates an empty input. A length of 0 is bumped to 1.
    pub fn new(length: usize) -> Self {
        Self {
            cells: vec![None; length.max(1)],
            focus: 0,
            errored: false,
            disabled: false,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    pub fn cells(&self) -> &[Option<char>] {
        &self.cells
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn is_errored(&self) -> bool {
        self.errored
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Concatenation of the filled cells, in order.
    pub fn value(&self) -> String {
        self.cells.iter().flatten().collect()
    }

    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Writes `value` into the cell at `index`.
    ///
    /// An empty value clears the cell. More than one character, or a
    /// non-digit, is rejected and leaves the state untouched.
    pub fn edit(&mut self, index: usize, value: &str) -> Option<String> {
        if self.disabled || index >= self.cells.len() {
            return None;
        }
        let mut chars = value.chars();
        let ch = chars.next();
        if chars.next().is_some() {
            return None;
        }
        if let Some(ch) = ch
            && !ch.is_ascii_digit()
        {
            return None;
        }

        self.cells[index] = ch;
        self.errored = false;
        self.focus = if ch.is_some() && index + 1 < self.cells.len() {
            index + 1
        } else {
            index
        };
        self.completion()
    }

    /// Backspace at `index`: deletes a filled cell, or steps back from an
    /// empty one without deleting.
    pub fn backspace(&mut self, index: usize) -> Option<String> {
        if self.disabled || index >= self.cells.len() {
            return None;
        }
        if self.cells[index].is_none() {
            if index > 0 {
                self.focus = index - 1;
            }
            return None;
        }
        self.edit(index, "")
    }

    /// Distributes the digits of `text` over cells `0..k`.
    pub fn paste(&mut self, text: &str) -> Option<String> {
        if self.disabled {
            return None;
        }
        let digits: Vec<char> = text
            .chars()
            .filter(char::is_ascii_digit)
            .take(self.cells.len())
            .collect();
        if digits.is_empty() {
            return None;
        }

        for (cell, digit) in self.cells.iter_mut().zip(&digits) {
            *cell = Some(*digit);
        }
        self.focus = digits.len() - 1;
        self.errored = false;
        self.completion()
    }

    /// Clears every cell, refocuses the first one and marks the input errored.
    pub fn signal_error(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
        self.focus = 0;
        self.errored = true;
    }

    /// Clears every cell without marking an error.
    pub fn reset(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
        self.focus = 0;
        self.errored = false;
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn move_left(&mut self) {
        self.focus = self.focus.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.focus + 1 < self.cells.len() {
            self.focus += 1;
        }
    }

    fn completion(&self) -> Option<String> {
        self.is_complete().then(|| self.value())
    }
}
