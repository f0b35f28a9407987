use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::BookError;

/// Server-assigned book identifier, treated as opaque
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BookId(String);

impl BookId {
    pub fn new(id: impl Into<String>) -> Self {
        BookId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for BookId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Mongo-style string ids, but numeric ids are accepted too
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => BookId(s),
            RawId::Number(n) => BookId(n.to_string()),
        })
    }
}

/// A book record as returned by the server
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Book {
    #[serde(rename = "_id", alias = "id")]
    pub id: BookId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub author: String,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient_stock")]
    pub stock: u32,
}

impl Book {
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    pub fn display_price(&self) -> String {
        format_price(self.price)
    }
}

/// Body of the list endpoint
#[derive(Debug, Default, Deserialize)]
pub struct BookList {
    #[serde(default)]
    pub books: Vec<Book>,
}

/// Request body for create and update
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub price: f64,
    pub stock: u32,
}

impl BookDraft {
    /// Validate the form and convert its raw text into a request body.
    ///
    /// Title and author must be non-blank. Numeric fields never fail: anything
    /// that does not parse as a non-negative number becomes 0.
    pub fn from_form(form: &BookForm) -> Result<Self, BookError> {
        let title = form.title.trim();
        let author = form.author.trim();
        if title.is_empty() || author.is_empty() {
            return Err(BookError::Validation);
        }

        Ok(BookDraft {
            title: title.to_string(),
            author: author.to_string(),
            price: parse_amount(&form.price),
            stock: parse_count(&form.stock),
        })
    }
}

/// Sort key for the derived view
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Title,
    Author,
}

impl SortKey {
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Title => "Título",
            SortKey::Author => "Autor",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            SortKey::Title => 0,
            SortKey::Author => 1,
        }
    }
}

/// Form field
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    Title,
    Author,
    Price,
    Stock,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Title,
        FormField::Author,
        FormField::Price,
        FormField::Stock,
    ];

    pub fn next(&self) -> FormField {
        match self {
            FormField::Title => FormField::Author,
            FormField::Author => FormField::Price,
            FormField::Price => FormField::Stock,
            FormField::Stock => FormField::Title,
        }
    }

    pub fn prev(&self) -> FormField {
        match self {
            FormField::Title => FormField::Stock,
            FormField::Author => FormField::Title,
            FormField::Price => FormField::Author,
            FormField::Stock => FormField::Price,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Title => "Título *",
            FormField::Author => "Autor *",
            FormField::Price => "Precio",
            FormField::Stock => "Stock",
        }
    }
}

/// Raw text of the book form
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub price: String,
    pub stock: String,
    pub focus: FormField,
}

impl BookForm {
    /// Pre-populate from an existing book. Zero amounts show as empty fields.
    pub fn from_book(book: &Book) -> Self {
        BookForm {
            title: book.title.clone(),
            author: book.author.clone(),
            price: if book.price > 0.0 { book.price.to_string() } else { String::new() },
            stock: if book.stock > 0 { book.stock.to_string() } else { String::new() },
            focus: FormField::Title,
        }
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Author => &self.author,
            FormField::Price => &self.price,
            FormField::Stock => &self.stock,
        }
    }

    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Title => &mut self.title,
            FormField::Author => &mut self.author,
            FormField::Price => &mut self.price,
            FormField::Stock => &mut self.stock,
        }
    }
}

/// Which mode the book form is in
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Browsing,
    Creating,
    Editing(BookId),
}

impl FormMode {
    pub fn is_open(&self) -> bool {
        !matches!(self, FormMode::Browsing)
    }

    pub fn edit_target(&self) -> Option<&BookId> {
        match self {
            FormMode::Editing(id) => Some(id),
            _ => None,
        }
    }
}

/// Parse a user or server supplied amount. Blank, garbage, negative and
/// non-finite values all become 0.
pub fn parse_amount(text: &str) -> f64 {
    text.trim().parse::<f64>().map(sanitize_amount).unwrap_or(0.0)
}

/// Like [`parse_amount`] but truncated to a whole count
pub fn parse_count(text: &str) -> u32 {
    amount_to_count(parse_amount(text))
}

fn sanitize_amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn amount_to_count(value: f64) -> u32 {
    // `as` saturates at u32::MAX
    value.trunc() as u32
}

/// Price as shown in the list: whole numbers without decimals
pub fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("${:.0}", price)
    } else {
        format!("${:.2}", price)
    }
}

fn value_to_amount(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().map(sanitize_amount).unwrap_or(0.0),
        Value::String(s) => parse_amount(s),
        _ => 0.0,
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(value_to_amount(&Value::deserialize(deserializer)?))
}

fn lenient_stock<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(amount_to_count(value_to_amount(&Value::deserialize(deserializer)?)))
}
