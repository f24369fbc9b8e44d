//! Parameter sources: the catalog seam, the NASA Exoplanet Archive client and
//! the defaulting resolver built on top of them.

pub mod archive;
pub mod catalog;
pub mod resolver;

pub use archive::ArchiveClient;
pub use catalog::{Catalog, CatalogError, CatalogRecord};
pub use resolver::{ParameterDefaults, ParameterResolver, ResolutionError};
