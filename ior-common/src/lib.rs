mod catalog;
mod form;
mod material;

pub use catalog::{categories, CatalogFilter};
pub use form::{FormError, MaterialForm};
pub use material::{Material, MaterialDraft, MaterialPatch, RequiredField};
