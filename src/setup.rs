use log::debug;

use crate::cooking::{
    Doneness, SteakConfig, SteakId, DEFAULT_THICKNESS_MM, MAX_THICKNESS_MM, MIN_THICKNESS_MM,
};
use crate::error::SteakError;

/// The order being put together before cooking starts
#[derive(Debug, Clone)]
pub struct SetupState {
    pub thickness_mm: u32,
    pub doneness: Doneness,
    steaks: Vec<SteakConfig>,
    selected: Option<usize>,
    next_id: u64,
}

impl Default for SetupState {
    fn default() -> Self {
        Self::new(DEFAULT_THICKNESS_MM, Doneness::default())
    }
}

impl SetupState {
    pub fn new(thickness_mm: u32, doneness: Doneness) -> Self {
        Self {
            thickness_mm: thickness_mm.clamp(MIN_THICKNESS_MM, MAX_THICKNESS_MM),
            doneness,
            steaks: Vec::new(),
            selected: None,
            next_id: 1,
        }
    }

    /// Move the thickness slider, staying inside its range
    pub fn adjust_thickness(&mut self, delta: i32) {
        let moved = i64::from(self.thickness_mm) + i64::from(delta);
        self.thickness_mm =
            moved.clamp(i64::from(MIN_THICKNESS_MM), i64::from(MAX_THICKNESS_MM)) as u32;
    }

    pub fn next_doneness(&mut self) {
        self.doneness = self.doneness.next();
    }

    pub fn prev_doneness(&mut self) {
        self.doneness = self.doneness.prev();
    }

    /// Add a steak with the current slider values to the order
    pub fn add_steak(&mut self) -> Result<SteakId, SteakError> {
        let id = SteakId(self.next_id);
        let steak = SteakConfig::new(id, self.thickness_mm, self.doneness)?;
        debug!(
            "ordered steak {:?}: {}mm {}",
            id, steak.thickness_mm, steak.doneness
        );
        self.next_id += 1;
        self.steaks.push(steak);
        self.selected = Some(self.steaks.len() - 1);
        Ok(id)
    }

    pub fn remove_steak(&mut self, id: SteakId) -> Option<SteakConfig> {
        let pos = self.steaks.iter().position(|s| s.id == id)?;
        let removed = self.steaks.remove(pos);
        self.selected = match self.steaks.len() {
            0 => None,
            len => Some(pos.min(len - 1)),
        };
        Some(removed)
    }

    pub fn remove_selected(&mut self) -> Option<SteakConfig> {
        let id = self.selected_steak()?.id;
        self.remove_steak(id)
    }

    pub fn select_next(&mut self) {
        if self.steaks.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1) % self.steaks.len(),
            None => 0,
        });
    }

    pub fn select_prev(&mut self) {
        if self.steaks.is_empty() {
            return;
        }
        let len = self.steaks.len();
        self.selected = Some(match self.selected {
            Some(i) => (i + len - 1) % len,
            None => len - 1,
        });
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_steak(&self) -> Option<&SteakConfig> {
        self.selected.and_then(|i| self.steaks.get(i))
    }

    pub fn steaks(&self) -> &[SteakConfig] {
        &self.steaks
    }

    pub fn can_start(&self) -> bool {
        !self.steaks.is_empty()
    }

    /// Synchronizing only means something with more than one steak
    pub fn needs_sync_prompt(&self) -> bool {
        self.steaks.len() > 1
    }

    /// Hand the order over for cooking, leaving the sliders as they were
    pub fn take_order(&mut self) -> Vec<SteakConfig> {
        self.selected = None;
        std::mem::take(&mut self.steaks)
    }
}
