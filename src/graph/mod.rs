pub mod conversion;
pub mod model;

pub use conversion::*;
pub use model::*;
