pub mod catalog;
pub mod features;
pub mod index;
pub mod recommendations;
pub mod sequence_match;
pub mod similarity;
pub mod title_search;
pub mod vectorizer;

pub use index::CatalogIndex;
