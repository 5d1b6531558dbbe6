use crate::domain::model::{Product, ProductCategory, SourceRecord};
use crate::utils::validation::is_secure_url;
use std::collections::HashSet;

const OUTERWEAR_WORDS: [&str; 4] = ["jacket", "coat", "blazer", "vest"];
const BOTTOMS_WORDS: [&str; 5] = ["pant", "jeans", "trousers", "shorts", "skirt"];
const STOP_WORDS: [&str; 7] = ["a", "the", "and", "for", "in", "with", "new"];
const MARKER_KEYWORDS: [&str; 2] = ["fashion", "style"];

/// Why a record did not make it into the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NotClothing,
    MissingImage,
    InvalidRecord,
}

/// Infers the category from the title. Anything unmatched is a top.
pub fn assign_category(title: &str) -> ProductCategory {
    let lower = title.to_lowercase();
    if OUTERWEAR_WORDS.iter().any(|w| lower.contains(w)) {
        ProductCategory::Outerwear
    } else if BOTTOMS_WORDS.iter().any(|w| lower.contains(w)) {
        ProductCategory::Bottoms
    } else {
        ProductCategory::Tops
    }
}

/// Marker keywords followed by the title's longer words, first occurrence wins.
pub fn assign_keywords(title: &str) -> Vec<String> {
    let lower = title.to_lowercase();
    let words = lower
        .split_whitespace()
        .filter(|w| w.chars().count() > 3 && !STOP_WORDS.contains(w));

    let mut seen = HashSet::new();
    MARKER_KEYWORDS
        .into_iter()
        .chain(words)
        .filter(|w| seen.insert(*w))
        .map(str::to_string)
        .collect()
}

/// Turns a raw record into a `Product`, or says why it was dropped.
pub fn normalize_record(
    record: SourceRecord,
    source: &str,
    id_offset: u64,
) -> Result<Product, Rejection> {
    if !record.clothing {
        return Err(Rejection::NotClothing);
    }

    let image_url = match record.image_url {
        Some(url) if is_secure_url(&url) => url,
        _ => return Err(Rejection::MissingImage),
    };

    let price = match record.price {
        Some(price) if price.is_finite() && price >= 0.0 => price,
        _ => return Err(Rejection::InvalidRecord),
    };
    if record.title.trim().is_empty() {
        return Err(Rejection::InvalidRecord);
    }

    let id = record
        .native_id
        .and_then(|native| native.checked_add(id_offset))
        .ok_or(Rejection::InvalidRecord)?;

    Ok(Product {
        id,
        category: assign_category(&record.title),
        style_keywords: assign_keywords(&record.title),
        name: record.title,
        price,
        image_url,
        source: source.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, image: Option<&str>) -> SourceRecord {
        SourceRecord {
            native_id: Some(4),
            title: title.to_string(),
            price: Some(49.5),
            image_url: image.map(str::to_string),
            clothing: true,
        }
    }

    #[test]
    fn test_outerwear_keywords_any_case() {
        for title in [
            "Classic Denim JACKET",
            "Wool Overcoat",
            "Navy Blazer",
            "Quilted Vest",
        ] {
            assert_eq!(assign_category(title), ProductCategory::Outerwear, "{title}");
        }
    }

    #[test]
    fn test_bottoms_keywords() {
        for title in [
            "Cargo Pants",
            "Slim Jeans",
            "Linen Trousers",
            "Running Shorts",
            "Pleated Skirt",
        ] {
            assert_eq!(assign_category(title), ProductCategory::Bottoms, "{title}");
        }
    }

    #[test]
    fn test_outerwear_wins_over_bottoms() {
        assert_eq!(
            assign_category("Jacket and Pants Set"),
            ProductCategory::Outerwear
        );
    }

    #[test]
    fn test_unmatched_titles_default_to_tops() {
        assert_eq!(assign_category("Cotton T-Shirt"), ProductCategory::Tops);
        assert_eq!(assign_category("Cozy Hoodie"), ProductCategory::Tops);
        assert_eq!(assign_category(""), ProductCategory::Tops);
    }

    #[test]
    fn test_keywords_keep_apostrophes() {
        assert_eq!(
            assign_keywords("Men's Slim Fit Jacket"),
            vec!["fashion", "style", "men's", "slim", "jacket"]
        );
    }

    #[test]
    fn test_keywords_drop_stop_words_and_duplicates() {
        assert_eq!(
            assign_keywords("New Style Hoodie with Hoodie  Pocket for Fashion"),
            vec!["fashion", "style", "hoodie", "pocket"]
        );
    }

    #[test]
    fn test_normalize_applies_offset() {
        let product = normalize_record(
            record("Rain Coat", Some("https://cdn.example.com/c.jpg")),
            "FakeStore",
            1000,
        )
        .unwrap();
        assert_eq!(product.id, 1004);
        assert_eq!(product.category, ProductCategory::Outerwear);
        assert_eq!(product.name, "Rain Coat");
        assert_eq!(product.source, "FakeStore");
    }

    #[test]
    fn test_normalize_rejections() {
        let mut not_clothing = record("Laptop", Some("https://cdn.example.com/l.jpg"));
        not_clothing.clothing = false;
        assert_eq!(
            normalize_record(not_clothing, "Platzi", 0),
            Err(Rejection::NotClothing)
        );

        assert_eq!(
            normalize_record(record("Tee", Some("")), "Platzi", 0),
            Err(Rejection::MissingImage)
        );
        assert_eq!(
            normalize_record(record("Tee", None), "Platzi", 0),
            Err(Rejection::MissingImage)
        );
        assert_eq!(
            normalize_record(record("Tee", Some("http://cdn.example.com/t.jpg")), "Platzi", 0),
            Err(Rejection::MissingImage)
        );

        let mut negative = record("Tee", Some("https://cdn.example.com/t.jpg"));
        negative.price = Some(-1.0);
        assert_eq!(
            normalize_record(negative, "Platzi", 0),
            Err(Rejection::InvalidRecord)
        );
    }

    #[test]
    fn test_missing_id_or_price_is_invalid() {
        let mut no_price = record("Tee", Some("https://cdn.example.com/t.jpg"));
        no_price.price = None;
        assert_eq!(
            normalize_record(no_price, "Platzi", 0),
            Err(Rejection::InvalidRecord)
        );

        let mut no_id = record("Tee", Some("https://cdn.example.com/t.jpg"));
        no_id.native_id = None;
        assert_eq!(
            normalize_record(no_id, "Platzi", 0),
            Err(Rejection::InvalidRecord)
        );
    }

    #[test]
    fn test_zero_price_is_valid() {
        let mut free = record("Tee", Some("https://cdn.example.com/t.jpg"));
        free.price = Some(0.0);
        assert!(normalize_record(free, "Platzi", 0).is_ok());
    }
}
