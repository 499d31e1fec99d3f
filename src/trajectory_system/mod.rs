pub mod aerodynamics;
pub mod drag_model;
pub mod kinematics;
pub mod parameters;
pub mod sample;
pub mod solver;
