//! Column positions of the city's "Dam levels update 2012-2018.csv" export.
//!
//! The source spreadsheet carries several columns per dam (height, storage,
//! percent full, ...). Only the storage column of each dam is read; everything
//! else, including the spreadsheet's own percentages and big-six total, is
//! recomputed.

pub const DATE_COLUMN: usize = 0;

/// Storage (Ml) column of each dam reported on its own.
pub const STORAGE_COLUMNS: [(&str, usize); 13] = [
    ("Wemmershoek", 2),
    ("Steensbras Lower", 6),
    ("Steensbras Upper", 10),
    ("Voëlvlei", 14),
    ("Hely-Hutchinson", 18),
    ("Woodhead", 22),
    ("Victoria", 26),
    ("De Villiers", 34),
    ("Kleinplaats", 38),
    ("Lewis Gay", 42),
    ("Theewaterskloof", 46),
    ("Berg River", 50),
    ("Land-en-Zeezicht", 58),
];

/// Storage column that only counts towards the small-dams total. This dam
/// has no capacity of its own in the table, so it gets no columns of its own.
pub const SMALL_TOTAL_ONLY_COLUMN: (&str, usize) = ("Alexandra", 30);

/// Dam whose history starts late; its missing readings count as zero.
pub const LATE_START_DAM: &str = "Land-en-Zeezicht";
