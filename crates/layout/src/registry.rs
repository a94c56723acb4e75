use crate::{LayoutError, MAX_PANELS};

/// Ordered panels with one active. Never empty; panel 0 is permanent.
#[derive(Debug, Clone)]
pub struct PanelRegistry<P> {
    panels: Vec<P>,
    active_index: usize,
}

impl<P> PanelRegistry<P> {
    /// Create a registry holding its permanent first panel.
    pub fn new(first: P) -> Self {
        Self {
            panels: vec![first],
            active_index: 0,
        }
    }

    /// Append a panel and focus it. Returns its index.
    pub fn add_panel(&mut self, panel: P) -> Result<usize, LayoutError> {
        if self.panels.len() >= MAX_PANELS {
            return Err(LayoutError::CapacityExceeded { max: MAX_PANELS });
        }
        self.panels.push(panel);
        self.active_index = self.panels.len() - 1;
        Ok(self.active_index)
    }

    /// Remove a panel other than the first.
    pub fn remove_panel(&mut self, index: usize) -> Result<P, LayoutError> {
        if self.panels.len() <= 1 {
            return Err(LayoutError::NothingToClose);
        }
        if index == 0 || index >= self.panels.len() {
            return Err(LayoutError::InvalidIndex(index));
        }

        let panel = self.panels.remove(index);
        if index <= self.active_index {
            self.active_index = self.active_index.min(self.panels.len() - 1);
        }
        Ok(panel)
    }

    /// Focus the next panel, wrapping around. `false` with a single panel.
    pub fn next(&mut self) -> bool {
        if self.panels.len() <= 1 {
            return false;
        }
        self.active_index = (self.active_index + 1) % self.panels.len();
        true
    }

    /// Focus the previous panel, wrapping around. `false` with a single panel.
    pub fn previous(&mut self) -> bool {
        if self.panels.len() <= 1 {
            return false;
        }
        self.active_index = if self.active_index == 0 {
            self.panels.len() - 1
        } else {
            self.active_index - 1
        };
        true
    }

    pub fn set_active(&mut self, index: usize) {
        if index < self.panels.len() {
            self.active_index = index;
        }
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active(&self) -> &P {
        &self.panels[self.active_index]
    }

    pub fn active_mut(&mut self) -> &mut P {
        &mut self.panels[self.active_index]
    }

    pub fn get(&self, index: usize) -> Option<&P> {
        self.panels.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut P> {
        self.panels.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &P> {
        self.panels.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut P> {
        self.panels.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.panels.len() >= MAX_PANELS
    }
}
