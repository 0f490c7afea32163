pub mod formatter;
pub mod media;
pub mod persistence;
pub mod storage;
