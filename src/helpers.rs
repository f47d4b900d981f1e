pub mod converters;
pub mod payload;
