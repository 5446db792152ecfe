//! Utility functions

pub mod binary;
pub mod path;

pub use binary::{
    align_padding, read_cstr, read_u16_array, read_u32_array, stream_len, write_cstr,
    write_padding, write_u16_array, write_u32_array,
};
pub use path::{has_extension, with_appended, with_new_suffix};
