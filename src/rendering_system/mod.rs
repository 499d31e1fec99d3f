pub mod canvas;
pub mod frame;
pub mod renderer;
pub mod text;
