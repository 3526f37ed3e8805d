pub const BAR_WIDTH: usize = 24;
pub const BAR_FILLED: char = '#';
pub const BAR_EMPTY: char = '.';

pub const SPINNER_FRAMES: [char; 4] = ['|', '/', '-', '\\'];
pub const CHECKMARK: &str = "ok";
