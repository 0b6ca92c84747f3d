pub mod memo;

mod macros;

pub use memo::Cache;
pub use memo::CacheKey;
