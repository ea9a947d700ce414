use super::error::ParseError;
use super::model::{ContentRecord, ContentTable, ContentType};

const MINUTES_UNIT: &str = "min";
const SEASONS_UNITS: [&str; 2] = ["Seasons", "Season"];

/// Parse a raw duration under the unit rule of `kind`.
///
/// * Movie: `"90 min"` → 90 (minutes)
/// * TV Show: `"1 Season"` → 1, `"3 Seasons"` → 3 (season count)
pub fn parse_duration(kind: ContentType, raw: &str) -> Result<u32, ParseError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ParseError::Empty);
    }

    let (digits, unit) = match kind {
        ContentType::Movie => (text.strip_suffix(MINUTES_UNIT), MINUTES_UNIT),
        ContentType::TvShow => (
            SEASONS_UNITS.iter().find_map(|u| text.strip_suffix(*u)),
            "Season",
        ),
    };

    let digits = digits.ok_or_else(|| ParseError::MissingUnit {
        kind,
        raw: raw.to_string(),
        unit,
    })?;

    let digits = digits.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::NotANumber {
            kind,
            raw: raw.to_string(),
        });
    }
    digits.parse().map_err(|_| ParseError::NotANumber {
        kind,
        raw: raw.to_string(),
    })
}

/// One record in a normalized-duration view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationPoint {
    pub show_id: String,
    pub title: String,
    pub release_year: i32,
    /// Minutes for movies, season count for TV shows.
    pub value: u32,
}

/// A record left out of the numeric view and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    pub show_id: String,
    pub error: ParseError,
}

/// Durations of a single content type, in that type's unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedDurations {
    pub kind: ContentType,
    pub points: Vec<DurationPoint>,
    pub rejected: Vec<Rejected>,
}

impl TypedDurations {
    fn from_records<'a>(kind: ContentType, records: impl Iterator<Item = &'a ContentRecord>) -> Self {
        let mut points = Vec::new();
        let mut rejected = Vec::new();

        for rec in records.filter(|r| r.kind == kind) {
            match parse_duration(kind, &rec.duration) {
                Ok(value) => points.push(DurationPoint {
                    show_id: rec.show_id.clone(),
                    title: rec.title.clone(),
                    release_year: rec.release_year,
                    value,
                }),
                Err(error) => {
                    log::debug!("Excluding {} from {kind} durations: {error}", rec.show_id);
                    rejected.push(Rejected {
                        show_id: rec.show_id.clone(),
                        error,
                    });
                }
            }
        }

        TypedDurations {
            kind,
            points,
            rejected,
        }
    }

    /// Unit label for axis titles.
    pub fn unit(&self) -> &'static str {
        match self.kind {
            ContentType::Movie => "minutes",
            ContentType::TvShow => "seasons",
        }
    }
}

/// The canonical output: one view per type, never merged back together
/// because minutes and season counts are not comparable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedDurations {
    pub movies: TypedDurations,
    pub tv_shows: TypedDurations,
}

impl NormalizedDurations {
    pub fn get(&self, kind: ContentType) -> &TypedDurations {
        match kind {
            ContentType::Movie => &self.movies,
            ContentType::TvShow => &self.tv_shows,
        }
    }

    pub fn rejected_count(&self) -> usize {
        self.movies.rejected.len() + self.tv_shows.rejected.len()
    }
}

/// Split `table` by type and normalize each subset with its own unit rule.
/// Records whose duration cannot be parsed are excluded, not fatal.
pub fn normalize_durations(table: &ContentTable) -> NormalizedDurations {
    let movies = TypedDurations::from_records(ContentType::Movie, table.records().iter());
    let tv_shows = TypedDurations::from_records(ContentType::TvShow, table.records().iter());

    let normalized = NormalizedDurations { movies, tv_shows };
    if normalized.rejected_count() > 0 {
        log::warn!(
            "Excluded {} movie(s) and {} TV show(s) with unparsable durations",
            normalized.movies.rejected.len(),
            normalized.tv_shows.rejected.len()
        );
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    #[test]
    fn movie_minutes() {
        assert_eq!(parse_duration(ContentType::Movie, "90 min"), Ok(90));
        assert_eq!(parse_duration(ContentType::Movie, "312 min"), Ok(312));
    }

    #[test]
    fn tv_seasons_singular_and_plural() {
        assert_eq!(parse_duration(ContentType::TvShow, "1 Season"), Ok(1));
        assert_eq!(parse_duration(ContentType::TvShow, "3 Seasons"), Ok(3));
    }

    #[test]
    fn units_do_not_cross_types() {
        assert!(matches!(
            parse_duration(ContentType::Movie, "2 Seasons"),
            Err(ParseError::MissingUnit { .. })
        ));
        assert!(matches!(
            parse_duration(ContentType::TvShow, "90 min"),
            Err(ParseError::MissingUnit { .. })
        ));
    }

    #[test]
    fn missing_digits_fail() {
        assert_eq!(parse_duration(ContentType::Movie, ""), Err(ParseError::Empty));
        assert_eq!(parse_duration(ContentType::Movie, "   "), Err(ParseError::Empty));
        assert!(matches!(
            parse_duration(ContentType::Movie, " min"),
            Err(ParseError::NotANumber { .. })
        ));
        assert!(matches!(
            parse_duration(ContentType::TvShow, "a few Seasons"),
            Err(ParseError::NotANumber { .. })
        ));
        assert!(matches!(
            parse_duration(ContentType::Movie, "-5 min"),
            Err(ParseError::NotANumber { .. })
        ));
    }

    #[test]
    fn failing_records_are_excluded_not_fatal() {
        let mut broken = record("s3", ContentType::Movie, 2018, "R");
        broken.duration = String::new();
        let table = ContentTable::from_records(vec![
            record("s1", ContentType::Movie, 2020, "PG"),
            record("s2", ContentType::TvShow, 2020, "TV-MA"),
            broken,
        ]);

        let normalized = normalize_durations(&table);
        assert_eq!(normalized.movies.points.len(), 1);
        assert_eq!(normalized.movies.points[0].value, 90);
        assert_eq!(normalized.movies.rejected[0].show_id, "s3");
        assert_eq!(normalized.movies.rejected[0].error, ParseError::Empty);
        assert_eq!(normalized.tv_shows.points.len(), 1);
        assert_eq!(normalized.tv_shows.points[0].value, 2);
        assert_eq!(normalized.rejected_count(), 1);
    }

    #[test]
    fn each_view_holds_a_single_type() {
        let table = ContentTable::from_records(vec![
            record("s1", ContentType::TvShow, 2020, "TV-MA"),
            record("s2", ContentType::Movie, 2021, "PG"),
            record("s3", ContentType::TvShow, 2019, "TV-14"),
        ]);
        let normalized = normalize_durations(&table);
        let tv_ids: Vec<_> = normalized.tv_shows.points.iter().map(|p| p.show_id.as_str()).collect();
        assert_eq!(tv_ids, vec!["s1", "s3"]);
        assert_eq!(normalized.get(ContentType::Movie).unit(), "minutes");
        assert_eq!(normalized.get(ContentType::TvShow).unit(), "seasons");
    }
}
