mod text;

pub use text::{display_width, strip_control_chars, truncate_to_width};
