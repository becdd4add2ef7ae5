//! Parameter file handling and namespace injection

mod namespace;
mod params;

pub use namespace::*;
pub use params::*;
