pub mod gop_formatter;

pub use gop_formatter::GopFormatter;
