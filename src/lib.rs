pub mod camera;
pub mod hud;
pub mod motor;
pub mod physics;
pub mod player;
pub mod world;
