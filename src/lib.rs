// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod config;
pub mod cooking;
pub mod cue;
pub mod error;
pub mod history;
pub mod logging;
pub mod runtime;
pub mod session;
pub mod setup;
pub mod sync;
pub mod timer;
pub mod util;

pub use cooking::{compute_steps, CookingStep, Doneness, SteakConfig, SteakId};
pub use error::SteakError;
pub use session::{CookingSession, SessionEvent};
pub use timer::{SessionTimer, TimerEvent, TimerState};
