//! Command-history navigation
//!
//! The history list itself lives on the server (newest first); this is
//! the cursor used by an input box to walk it with the arrow keys. The
//! in-progress draft is stashed when navigation starts and restored when
//! the cursor returns to the bottom.

/// Direction of a history navigation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryDirection {
    /// Towards older entries
    Up,
    /// Back towards the draft
    Down,
}

/// Cursor over a newest-first command history list
#[derive(Debug, Clone, Default)]
pub struct CommandHistory {
    /// Current position; `None` means "at the draft", 0 the newest entry
    index: Option<usize>,
    /// Draft stashed when navigation left the bottom
    draft: String,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position in the history list, `None` when at the draft
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Step the cursor and return the text the input box should show.
    ///
    /// `current_draft` is what the user has typed right now; it is stashed
    /// when the first Up step leaves the bottom and handed back when Down
    /// returns there. The cursor clamps at the oldest entry and at the
    /// draft.
    pub fn navigate(
        &mut self,
        direction: HistoryDirection,
        current_draft: &str,
        history: &[String],
    ) -> String {
        match direction {
            HistoryDirection::Up => {
                if self.index.is_none() && !current_draft.is_empty() {
                    self.draft = current_draft.to_string();
                }

                if history.is_empty() {
                    self.index = None;
                    return self.draft.clone();
                }

                let next = match self.index {
                    None => 0,
                    Some(i) => (i + 1).min(history.len() - 1),
                };
                self.index = Some(next);
                history[next].clone()
            }
            HistoryDirection::Down => {
                match self.index {
                    None | Some(0) => {
                        self.index = None;
                        self.draft.clone()
                    }
                    Some(i) => {
                        self.index = Some(i - 1);
                        history[i - 1].clone()
                    }
                }
            }
        }
    }

    /// Forget position and stashed draft, e.g. after a submit
    pub fn reset(&mut self) {
        self.index = None;
        self.draft.clear();
    }
}
