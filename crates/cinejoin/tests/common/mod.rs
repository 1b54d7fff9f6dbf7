#![allow(dead_code)]

use cinejoin::{CastRow, ResultRow, TitleRow};
use tracing_subscriber::filter::LevelFilter;

/// Route engine logs to the test writer. Later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(LevelFilter::DEBUG)
        .try_init();
}

#[allow(clippy::too_many_arguments)]
pub fn title_row(
    title_id: i32,
    title: &str,
    imdb_index: &str,
    kind_id: i32,
    production_year: i32,
    imdb_id: i32,
    phonetic_code: &str,
    series_years: &str,
    md5sum: &str,
) -> TitleRow {
    TitleRow {
        title_id,
        title: title.into(),
        imdb_index: imdb_index.into(),
        kind_id,
        production_year,
        imdb_id,
        phonetic_code: phonetic_code.into(),
        series_years: series_years.into(),
        md5sum: md5sum.into(),
        ..TitleRow::default()
    }
}

pub fn cast_row(
    cast_id: i32,
    person_id: i32,
    movie_id: i32,
    person_role_id: i32,
    note: &str,
    nr_order: i32,
    role_id: i32,
) -> CastRow {
    CastRow {
        cast_id,
        person_id,
        movie_id,
        person_role_id,
        note: note.into(),
        nr_order,
        role_id,
    }
}

/// Ten well-known films, keyed 1..=10.
pub fn sample_titles() -> Vec<TitleRow> {
    [
        ("The Matrix", 1999, "TMX"),
        ("Inception", 2010, "INC"),
        ("The Godfather", 1972, "TGF"),
        ("Interstellar", 2014, "IST"),
        ("Pulp Fiction", 1994, "PFN"),
        ("The Dark Knight", 2008, "TDK"),
        ("Fight Club", 1999, "FCB"),
        ("Forrest Gump", 1994, "FGP"),
        ("The Shawshank Redemption", 1994, "TSR"),
        ("The Lord of the Rings", 2001, "LOTR"),
    ]
    .into_iter()
    .zip(1..)
    .map(|((name, year, phonetic), id)| {
        let imdb_index = format!("I{id}");
        let md5sum = format!("md5sum{id:026}");
        let years = year.to_string();
        title_row(id, name, &imdb_index, 1, year, 100 + id, phonetic, &years, &md5sum)
    })
    .collect()
}

/// One lead role per sample title; cast `1000 + k` plays in title `k`.
pub fn sample_cast() -> Vec<CastRow> {
    vec![
        cast_row(1001, 201, 1, 301, "Neo", 1, 401),
        cast_row(1002, 202, 2, 302, "Dom Cobb", 1, 402),
        cast_row(1003, 203, 3, 303, "Don Vito", 1, 403),
        cast_row(1004, 204, 4, 304, "Cooper", 1, 404),
        cast_row(1005, 205, 5, 305, "Jules", 1, 405),
        cast_row(1006, 206, 6, 306, "Batman", 1, 406),
        cast_row(1007, 207, 7, 307, "Tyler Durden", 1, 407),
        cast_row(1008, 208, 8, 308, "Forrest", 1, 408),
        cast_row(1009, 209, 9, 309, "Andy", 1, 409),
        cast_row(1010, 210, 10, 310, "Frodo", 1, 410),
    ]
}

pub fn sorted_pairs(rows: &[ResultRow]) -> Vec<(i32, i32)> {
    let mut pairs: Vec<_> = rows.iter().map(ResultRow::pair_id).collect();
    pairs.sort_unstable();
    pairs
}
