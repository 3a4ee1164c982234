//! Validation, coercion and filesystem helpers
//!
//! The helper functions are grouped by concern; the most commonly used ones
//! are re-exported here.

pub mod coerce;
pub mod fs;
pub mod numbers;
pub mod strings;
pub mod validators;

// Re-export commonly used utilities
pub use validators::{test_email, test_number, test_sha2, test_uuid};

pub use coerce::{
    get_int_from_str,
    get_json_value,
    get_num_from_str,
    get_specified_str,
    get_tokens,
    get_valid_arr,
    get_valid_bool,
    get_valid_int,
    get_valid_int_range,
    get_valid_num,
    get_valid_num_range,
    get_valid_obj,
    get_valid_str,
    get_valid_str_expr,
    get_valid_str_range,
    get_valid_tokens,
    parse_json,
};

pub use strings::{base64_decode_lazy, convert_utf8_to_ascii, decode_base64_lazy};
pub use numbers::{parse_float, parse_int};
pub use fs::{
    create_directory_if_not_exists,
    is_dir,
    is_file,
    join_paths,
    mkdir_sync_recursively,
};
