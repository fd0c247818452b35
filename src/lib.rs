pub mod canonical;
pub mod classifier;
pub mod config;
pub mod curator;
pub mod models;
pub mod pokedex;
pub mod prompt;
pub mod report;
pub mod tags;

pub use config::{AbsorbSet, Config};
pub use curator::{CurateError, Curator, CuratorBuilder};
pub use models::{ClassifiedFolder, FolderFormat, SubjectName};
pub use pokedex::{NameValidator, Pokedex};
pub use report::{CurationReport, SkipReason};
pub use tags::TagProcessor;
