// src/record.rs
use crate::config::consts::LIST_SEP;

/// One scraped product page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductRecord {
    pub url: String,
    pub name: String,
    /// Overview (Levi, ShopDuer) or description (G-Star)
    pub overview: String,
    /// "How it fits" text, or G-Star feature bullets
    pub fit: Vec<String>,
    /// Composition & care text, or G-Star fabric bullets
    pub composition: Vec<String>,
    /// G-Star dimension bullets
    pub sizing: Vec<String>,
    pub images: Vec<String>,
    pub price: String,
}

/// Which record field a column shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Url,
    Name,
    Overview,
    Fit,
    Composition,
    Sizing,
    Images,
    Price,
}

/// Header label + field, in sheet order.
pub type Column = (&'static str, Field);

impl ProductRecord {
    /// Flatten one field into a cell; lists are joined with `LIST_SEP`.
    pub fn cell(&self, field: Field) -> String {
        match field {
            Field::Url => self.url.clone(),
            Field::Name => self.name.clone(),
            Field::Overview => self.overview.clone(),
            Field::Fit => self.fit.join(LIST_SEP),
            Field::Composition => self.composition.join(LIST_SEP),
            Field::Sizing => self.sizing.join(LIST_SEP),
            Field::Images => self.images.join(LIST_SEP),
            Field::Price => self.price.clone(),
        }
    }

    pub fn row(&self, columns: &[Column]) -> Vec<String> {
        columns.iter().map(|(_, f)| self.cell(*f)).collect()
    }
}
