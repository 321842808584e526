pub mod config;
pub mod model;
pub mod playback;
pub mod script;
pub mod sim;
pub mod surface;
pub mod trace;
