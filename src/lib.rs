pub mod error;
pub mod events;
pub mod game;
pub mod helpers;
pub mod metadata;
pub mod model;
pub mod store;
