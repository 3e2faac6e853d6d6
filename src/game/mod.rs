//! Game interaction layer: resources, input handling, move application,
//! and synchronization of the visual tree with the rules engine.

pub mod components;
pub mod events;
pub mod plugin;
pub mod resources;
pub mod system_sets;
pub mod systems;

pub use plugin::GamePlugin;
pub use system_sets::GameSystems;
