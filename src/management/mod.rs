mod archive;
mod manifest;
mod secrets;

pub use archive::ArchiveAssembler;
pub use archive::ArchiveError;
pub use archive::AssembledArchive;
pub use archive::VARIANT_FILE_MARKERS;
pub use archive::is_variant_file;
pub use manifest::ManifestBuilder;
pub use manifest::ManifestError;
pub use manifest::order_elements;
pub use manifest::variant_filenames;
pub use secrets::DeviceSecretsStore;
pub use secrets::PersistedSecrets;
