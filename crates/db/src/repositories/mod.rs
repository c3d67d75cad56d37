//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` (or an executor, where the call can run inside a
//! transaction) as the first argument.

pub mod asset_brand_repo;
pub mod asset_repo;
pub mod brand_repo;
pub mod designer_repo;
pub mod provider_repo;

pub use asset_brand_repo::AssetBrandRepo;
pub use asset_repo::AssetRepo;
pub use brand_repo::BrandRepo;
pub use designer_repo::DesignerRepo;
pub use provider_repo::ProviderRepo;
