//! Effects - side effects declared by the reducer

use crate::catalog::CatalogSource;

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Read the catalog document once
    LoadCatalog { source: CatalogSource },
}
