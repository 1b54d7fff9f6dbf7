//! Row layouts for the `cast_info` and `title` relations and their join result.

use crate::fixed_str::FixedStr;

pub const NOTE_CAPACITY: usize = 100;
pub const TITLE_CAPACITY: usize = 200;
pub const IMDB_INDEX_CAPACITY: usize = 12;
pub const PHONETIC_CODE_CAPACITY: usize = 6;
pub const SERIES_YEARS_CAPACITY: usize = 49;
pub const MD5SUM_CAPACITY: usize = 33;

/// Access to the integer equi-join key of a row.
pub trait JoinKey {
    fn join_key(&self) -> i32;
}

/// One row of `cast_info`, joined on `movie_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CastRow {
    pub cast_id: i32,
    pub person_id: i32,
    pub movie_id: i32,
    pub person_role_id: i32,
    pub note: FixedStr<NOTE_CAPACITY>,
    pub nr_order: i32,
    pub role_id: i32,
}

impl JoinKey for CastRow {
    #[inline]
    fn join_key(&self) -> i32 {
        self.movie_id
    }
}

/// One row of `title`, joined on `title_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TitleRow {
    pub title_id: i32,
    pub title: FixedStr<TITLE_CAPACITY>,
    pub imdb_index: FixedStr<IMDB_INDEX_CAPACITY>,
    pub kind_id: i32,
    pub production_year: i32,
    pub imdb_id: i32,
    pub phonetic_code: FixedStr<PHONETIC_CODE_CAPACITY>,
    pub episode_of_id: i32,
    pub season_nr: i32,
    pub episode_nr: i32,
    pub series_years: FixedStr<SERIES_YEARS_CAPACITY>,
    pub md5sum: FixedStr<MD5SUM_CAPACITY>,
}

impl JoinKey for TitleRow {
    #[inline]
    fn join_key(&self) -> i32 {
        self.title_id
    }
}

/// A matched (cast, title) pair, flattened.
///
/// Cast columns come first, followed by every title column. A result row has
/// no identity beyond the pair that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ResultRow {
    pub cast_id: i32,
    pub person_id: i32,
    pub movie_id: i32,
    pub person_role_id: i32,
    pub note: FixedStr<NOTE_CAPACITY>,
    pub nr_order: i32,
    pub role_id: i32,
    pub title_id: i32,
    pub title: FixedStr<TITLE_CAPACITY>,
    pub imdb_index: FixedStr<IMDB_INDEX_CAPACITY>,
    pub kind_id: i32,
    pub production_year: i32,
    pub imdb_id: i32,
    pub phonetic_code: FixedStr<PHONETIC_CODE_CAPACITY>,
    pub episode_of_id: i32,
    pub season_nr: i32,
    pub episode_nr: i32,
    pub series_years: FixedStr<SERIES_YEARS_CAPACITY>,
    pub md5sum: FixedStr<MD5SUM_CAPACITY>,
}

impl ResultRow {
    /// Copy the columns of a matched pair into a new result row.
    #[must_use]
    pub fn from_pair(cast: &CastRow, title: &TitleRow) -> Self {
        Self {
            cast_id: cast.cast_id,
            person_id: cast.person_id,
            movie_id: cast.movie_id,
            person_role_id: cast.person_role_id,
            note: cast.note,
            nr_order: cast.nr_order,
            role_id: cast.role_id,
            title_id: title.title_id,
            title: title.title,
            imdb_index: title.imdb_index,
            kind_id: title.kind_id,
            production_year: title.production_year,
            imdb_id: title.imdb_id,
            phonetic_code: title.phonetic_code,
            episode_of_id: title.episode_of_id,
            season_nr: title.season_nr,
            episode_nr: title.episode_nr,
            series_years: title.series_years,
            md5sum: title.md5sum,
        }
    }

    /// `(cast_id, title_id)`, the identity of the pair that produced this row.
    #[must_use]
    pub const fn pair_id(&self) -> (i32, i32) {
        (self.cast_id, self.title_id)
    }
}
