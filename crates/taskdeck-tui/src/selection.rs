/// Cursor over a list of rows that may shrink or grow under it.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selected_index: Option<usize>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn set(&mut self, index: Option<usize>) {
        self.selected_index = index;
    }

    pub fn next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected_index = Some(match self.selected_index {
            Some(idx) => (idx + 1).min(len - 1),
            None => 0,
        });
    }

    pub fn prev(&mut self) {
        self.selected_index = Some(self.selected_index.map_or(0, |idx| idx.saturating_sub(1)));
    }

    pub fn jump_to_first(&mut self, len: usize) {
        self.selected_index = (len > 0).then_some(0);
    }

    pub fn jump_to_last(&mut self, len: usize) {
        self.selected_index = len.checked_sub(1);
    }

    /// Keeps the cursor on a valid row after the list was rebuilt.
    pub fn clamp(&mut self, len: usize) {
        self.selected_index = match (self.selected_index, len) {
            (_, 0) => None,
            (None, _) => Some(0),
            (Some(idx), len) => Some(idx.min(len - 1)),
        };
    }
}
