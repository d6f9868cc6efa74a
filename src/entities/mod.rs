pub mod catalog;
pub mod container;
pub mod item;
pub mod player;
pub mod tags;
