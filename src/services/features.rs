use crate::models::CatalogRecord;

/// How many times genres are repeated to upweight genre overlap
const GENRE_WEIGHT: usize = 3;

/// Builds the text blob a record is vectorized from
///
/// Genres are repeated, then synopsis, leads, writer, director and rating follow,
/// every field terminated or joined by a single space.
pub fn compose(record: &CatalogRecord) -> String {
    let mut blob = format!("{} ", record.genres).repeat(GENRE_WEIGHT);

    let tail = [
        record.synopsis.as_str(),
        record.main_lead1.as_str(),
        record.main_lead2.as_str(),
        record.writer.as_str(),
        record.director.as_str(),
        record.rating.as_str(),
    ];
    blob.push_str(&tail.join(" "));

    blob
}

pub fn compose_all(records: &[CatalogRecord]) -> Vec<String> {
    records.iter().map(compose).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_layout() {
        let record = CatalogRecord {
            title: "Goblin".to_string(),
            rating: "8.8".to_string(),
            genres: "Fantasy".to_string(),
            synopsis: "A goblin".to_string(),
            main_lead1: "Gong Yoo".to_string(),
            main_lead2: "Kim Go Eun".to_string(),
            writer: "Kim Eun Sook".to_string(),
            director: "Lee Eung Bok".to_string(),
            ..Default::default()
        };

        assert_eq!(
            compose(&record),
            "Fantasy Fantasy Fantasy A goblin Gong Yoo Kim Go Eun Kim Eun Sook Lee Eung Bok 8.8"
        );
    }

    #[test]
    fn test_compose_empty_fields_keep_separators() {
        let record = CatalogRecord {
            genres: "Drama".to_string(),
            ..Default::default()
        };

        assert_eq!(compose(&record), "Drama Drama Drama      ");
    }

    #[test]
    fn test_compose_ignores_title_and_image() {
        let a = CatalogRecord {
            title: "One".to_string(),
            image_url: "a.jpg".to_string(),
            genres: "Drama".to_string(),
            ..Default::default()
        };
        let b = CatalogRecord {
            title: "Two".to_string(),
            image_url: "b.jpg".to_string(),
            ..a.clone()
        };

        assert_eq!(compose(&a), compose(&b));
        assert_eq!(compose_all(&[a, b]).len(), 2);
    }
}
