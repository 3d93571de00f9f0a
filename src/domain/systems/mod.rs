pub mod falling;
pub mod net_control;
pub mod spawner;
