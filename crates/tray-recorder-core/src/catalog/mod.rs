mod catalog_snapshot;
mod device_catalog;

pub use {catalog_snapshot::CatalogSnapshot, device_catalog::DeviceCatalog};
