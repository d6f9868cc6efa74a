pub mod animation;
pub mod batch;
pub mod deposit;
pub mod range;
pub mod sprite;
pub mod toss;
