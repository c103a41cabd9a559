pub mod constants;
pub mod controller;
pub mod flight;
pub mod kinematics;
pub mod params;
pub mod state;
pub mod trajectory;
pub mod viewport;
