pub mod display;
pub mod drive;
pub mod encoder_read;
pub mod go_button;
pub mod line_sense;
pub mod orchestrate;
pub mod steer;
