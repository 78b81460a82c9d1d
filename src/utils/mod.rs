pub mod string_utils;
pub mod token_utils;
