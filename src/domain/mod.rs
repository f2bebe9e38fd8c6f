pub mod ai;
pub mod entity;
pub mod maze;
pub mod mode;
pub mod physics;
pub mod rules;
pub mod tile;
