pub mod logic;
pub mod sort;
