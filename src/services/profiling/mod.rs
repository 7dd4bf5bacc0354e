pub mod column;
pub mod dataset;
pub mod inference;
pub mod utils;

pub use column::profile_column;
pub use dataset::build_profile;
pub use inference::infer_column_type;
