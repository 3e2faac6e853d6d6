//! Interaction and synchronization systems.

pub mod input;
pub mod movement;
pub mod resize;
pub mod startup;
pub mod sync;

pub use input::{handle_square_clicks, keyboard_system, pointer_click_system};
pub use movement::{animate_piece_movement, apply_move_visuals, tick_pending_sync};
pub use resize::{handle_rerender_requests, resize_reactor};
pub use startup::{enter_game, initialize_engine, show_startup_failure};
pub use sync::full_sync_system;
