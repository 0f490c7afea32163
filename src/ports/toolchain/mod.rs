mod animation_encoder;
mod code_formatter;

pub use animation_encoder::AnimationEncoder;
pub use code_formatter::CodeFormatter;
