use ratatui::Frame;

use crate::{
    ui::{cooking::render_cooking, setup::render_setup, setup::render_sync_prompt},
    App, AppState,
};

/// A UI Screen boundary: responsible for rendering one app state
pub trait Screen {
    fn render(&self, app: &mut App, f: &mut Frame);
}

/// Order builder: thickness, doneness and the list of steaks
pub struct SetupScreen;

impl Screen for SetupScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        render_setup(app, f);
    }
}

/// Setup screen with the synchronize question on top
pub struct SyncPromptScreen;

impl Screen for SyncPromptScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        render_setup(app, f);
        render_sync_prompt(f);
    }
}

pub struct CookingScreen;

impl Screen for CookingScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        render_cooking(app, f);
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::Setup => Box::new(SetupScreen),
        AppState::SyncPrompt => Box::new(SyncPromptScreen),
        AppState::Cooking => Box::new(CookingScreen),
    }
}
