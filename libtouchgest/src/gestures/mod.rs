pub mod movement;
pub mod rotate;
pub mod shove;
