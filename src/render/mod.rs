/// Text-mode rendering that tests points against the rule directly.

pub mod ascii;
