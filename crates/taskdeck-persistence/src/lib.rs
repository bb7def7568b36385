pub mod backup;
pub mod serialization;
pub mod store;
pub mod traits;

pub use backup::{backup_file, backup_path};
pub use serialization::*;
pub use store::*;
pub use traits::*;
