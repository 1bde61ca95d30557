use chrono::NaiveDate;

/// One saint listed on the daily lives page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaintEntry {
    pub name: String,
    pub detail_path: String, // site-relative, may be empty
    pub icon_url: String,    // absolute, may be empty
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HymnPair {
    pub troparion: String,
    pub kontakion: String,
}

/// Everything the formatter needs for one post.
#[derive(Debug, Clone)]
pub struct OutputDocument {
    pub saint: SaintEntry,
    pub hymns: HymnPair,
    pub life_url: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Top,
    Random,
    OnlyOne,
}
