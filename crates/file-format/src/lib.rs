pub mod errors;
pub mod load;
pub mod records;
pub mod save;

pub use errors::{LoadError, SaveError};
pub use load::{load_project, load_project_file};
pub use records::{FloorRecord, OpeningRecord, PlenumRecord, VentRecord, WallRecord};
pub use save::{save_project, save_project_file};
