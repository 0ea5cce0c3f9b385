pub mod canvas;
pub mod clock;
