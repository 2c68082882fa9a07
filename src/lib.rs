pub mod camera;
pub mod cell;
pub mod config;
pub mod driver;
pub mod events;
pub mod io;
pub mod rules;
pub mod seeding;
pub mod world;

/// Terminal dimensions, as crossterm reports them
pub type ScreenSize = u16;
