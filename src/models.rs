mod folder_format;
mod subject;

pub use folder_format::{ClassifiedFolder, FolderFormat};
pub use subject::SubjectName;
