//! Core type definitions for cinejoin.
//!
//! Relations are plain slices of fixed-layout rows owned by the caller. The
//! engines borrow them, never copy them, and allocate only [`ResultRow`]s.

pub mod budget;
pub mod fixed_str;
pub mod fold;
pub mod rows;

pub use budget::ThreadBudget;
pub use fixed_str::FixedStr;
pub use fold::{FOLD_FANOUT, OTHER_BUCKET, fold_byte, is_folded_prefix};
pub use rows::{
    CastRow, IMDB_INDEX_CAPACITY, JoinKey, MD5SUM_CAPACITY, NOTE_CAPACITY, PHONETIC_CODE_CAPACITY,
    ResultRow, SERIES_YEARS_CAPACITY, TITLE_CAPACITY, TitleRow,
};
