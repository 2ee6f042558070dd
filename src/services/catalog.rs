use std::{fs::File, io::Read, path::Path};

use csv::StringRecord;

use crate::{error::CatalogError, models::CatalogRecord};

/// Genre marker for rows that never enter the index
const EXCLUDED_GENRE: &str = "animation";

/// Cell values read as missing and replaced by an empty string
const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Loads and normalizes the catalog from a CSV file
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Vec<CatalogRecord>, CatalogError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;

    load_from_reader(file)
}

/// Loads and normalizes the catalog from any CSV source
///
/// Row order is preserved and excluded rows leave no gaps, so the position in the
/// returned vector is the row index used by the similarity matrix.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<CatalogRecord>, CatalogError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let columns = ColumnMap::new(&headers)?;

    let mut rows = Vec::new();
    for row in reader.records() {
        rows.push(columns.project(&row?));
    }

    if let Some(ratings) = normalize_numeric_column(rows.iter().map(|r| r.rating.as_str())) {
        for (record, rating) in rows.iter_mut().zip(ratings) {
            record.rating = rating;
        }
    }

    let total = rows.len();
    let records: Vec<CatalogRecord> = rows.into_iter().filter(|r| !is_excluded(r)).collect();
    let excluded = total - records.len();

    tracing::info!(
        loaded = records.len(),
        excluded,
        "Catalog loaded"
    );

    Ok(records)
}

/// Applies list decoding, exclusion and key derivation to records built in memory
pub fn normalize_records(records: Vec<CatalogRecord>) -> Vec<CatalogRecord> {
    records
        .into_iter()
        .map(|mut record| {
            record.writer = clean_list_field(&record.writer);
            record.director = clean_list_field(&record.director);
            record.with_title_key()
        })
        .filter(|record| !is_excluded(record))
        .collect()
}

/// True when the record's genres mention animation in any casing
pub fn is_excluded(record: &CatalogRecord) -> bool {
    record.genres.to_lowercase().contains(EXCLUDED_GENRE)
}

/// Header positions for the columns the catalog cares about
struct ColumnMap {
    title: usize,
    rating: Option<usize>,
    genres: Option<usize>,
    synopsis: Option<usize>,
    main_lead1: Option<usize>,
    main_lead2: Option<usize>,
    writer: Option<usize>,
    director: Option<usize>,
    image_url: Option<usize>,
}

impl ColumnMap {
    fn new(headers: &StringRecord) -> Result<Self, CatalogError> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        Ok(Self {
            title: find("title").ok_or_else(|| CatalogError::MissingColumn("title".to_string()))?,
            rating: find("rating"),
            genres: find("genres"),
            synopsis: find("synopsis"),
            main_lead1: find("mainLead1"),
            main_lead2: find("mainLead2"),
            writer: find("writer"),
            director: find("director"),
            image_url: find("image_url"),
        })
    }

    fn project(&self, row: &StringRecord) -> CatalogRecord {
        let field = |idx: Option<usize>| {
            let value = idx.and_then(|i| row.get(i)).unwrap_or_default();
            if MISSING_MARKERS.contains(&value) {
                String::new()
            } else {
                value.to_string()
            }
        };

        CatalogRecord {
            title: field(Some(self.title)),
            title_key: String::new(),
            rating: field(self.rating),
            genres: field(self.genres),
            synopsis: field(self.synopsis),
            main_lead1: field(self.main_lead1),
            main_lead2: field(self.main_lead2),
            writer: clean_list_field(&field(self.writer)),
            director: clean_list_field(&field(self.director)),
            image_url: field(self.image_url),
        }
        .with_title_key()
    }
}

/// Reformats a column whose present values are all numeric
///
/// An all-integer column without gaps keeps integer text; otherwise every value is
/// written as a float (`9` becomes `9.0`, `8.80` becomes `8.8`). Returns `None` when
/// any present value is not a number, leaving the column as text.
pub fn normalize_numeric_column<'a>(
    values: impl Iterator<Item = &'a str> + Clone,
) -> Option<Vec<String>> {
    let has_gaps = values.clone().any(str::is_empty);

    let integers: Option<Vec<i64>> = values.clone().map(|v| v.trim().parse().ok()).collect();
    if let (false, Some(integers)) = (has_gaps, integers) {
        return Some(integers.iter().map(i64::to_string).collect());
    }

    let floats: Option<Vec<Option<f64>>> = values
        .map(|v| match v {
            "" => Some(None),
            v => v.trim().parse::<f64>().ok().filter(|f| f.is_finite()).map(Some),
        })
        .collect();

    let floats = floats?;
    // a column with nothing but gaps stays text
    if floats.iter().all(Option::is_none) {
        return None;
    }

    Some(
        floats
            .into_iter()
            .map(|f| f.map(format_float).unwrap_or_default())
            .collect(),
    )
}

/// Shortest round-trip float text that always carries a fractional part
fn format_float(value: f64) -> String {
    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

/// Joins a list-encoded value with spaces, or returns it untouched
pub fn clean_list_field(value: &str) -> String {
    match try_decode_list(value) {
        Some(items) => items.join(" "),
        None => value.to_string(),
    }
}

/// Decodes a bracketed list of quoted strings such as `['Kim Eun Sook', "Lee Eung Bok"]`
///
/// Returns `None` for anything that is not exactly a list of string literals.
pub fn try_decode_list(value: &str) -> Option<Vec<String>> {
    let mut chars = value.trim().chars().peekable();
    if chars.next()? != '[' {
        return None;
    }

    let mut items = Vec::new();
    loop {
        skip_whitespace(&mut chars);
        match chars.next()? {
            ']' => break,
            quote @ ('\'' | '"') => {
                items.push(read_string_literal(&mut chars, quote)?);
                skip_whitespace(&mut chars);
                match chars.next()? {
                    ',' => continue,
                    ']' => break,
                    _ => return None,
                }
            }
            _ => return None,
        }
    }

    // nothing may follow the closing bracket
    if chars.next().is_some() {
        return None;
    }

    Some(items)
}

fn skip_whitespace(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) {
    while chars.peek().is_some_and(|c| c.is_whitespace()) {
        chars.next();
    }
}

fn read_string_literal(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    quote: char,
) -> Option<String> {
    let mut out = String::new();
    loop {
        match chars.next()? {
            c if c == quote => return Some(out),
            '\\' => match chars.next()? {
                'n' => out.push('\n'),
                't' => out.push('\t'),
                'r' => out.push('\r'),
                '0' => out.push('\0'),
                c @ ('\\' | '\'' | '"') => out.push(c),
                // unknown escapes are kept verbatim
                c => {
                    out.push('\\');
                    out.push(c);
                }
            },
            '\n' => return None,
            c => out.push(c),
        }
    }
}
