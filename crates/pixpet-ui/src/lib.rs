//! Terminal rendering for pixpet.
//!
//! Provides the screen layout, the status bar and HUD chrome, the verbose
//! log panel, and the half-block sprite painter. All drawing uses
//! [`ratatui`]; the pet's state lives in the agent crate and arrives here
//! as a finished [`SpriteGrid`](pixpet_core::grid::SpriteGrid) plus palette.

pub mod layout;
pub mod logview;
pub mod shell;
pub mod sprite;
