pub mod attributes;
pub mod compat;
pub mod stream;
pub mod tag_block;
pub mod tag_code;
