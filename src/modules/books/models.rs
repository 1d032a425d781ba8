use serde::{Deserialize, Serialize};

/// Persisted book row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    /// Server-generated primary key
    pub id: i64,
    pub author: Option<String>,
    pub title: Option<String>,
    pub publisher: Option<String>,
}

/// Body of a create request. Absent fields are stored as NULL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
}

impl NewBook {
    /// Attach an id, producing the row as it will read back.
    pub fn into_book(self, id: i64) -> Book {
        Book {
            id,
            author: self.author,
            title: self.title,
            publisher: self.publisher,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_book_tolerates_missing_and_extra_fields() {
        let book: NewBook = serde_json::from_value(json!({
            "title": "T",
            "isbn": "ignored"
        }))
        .unwrap();
        assert_eq!(
            book,
            NewBook {
                author: None,
                title: Some("T".to_string()),
                publisher: None,
            }
        );
    }

    #[test]
    fn book_serializes_absent_fields_as_null() {
        let book = NewBook {
            author: Some("A".to_string()),
            ..NewBook::default()
        }
        .into_book(7);
        assert_eq!(
            serde_json::to_value(book).unwrap(),
            json!({ "id": 7, "author": "A", "title": null, "publisher": null })
        );
    }
}
