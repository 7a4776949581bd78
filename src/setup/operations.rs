pub mod archive;
pub mod download;
pub mod plugin;
pub mod prompt;

pub use archive::{extract_zip, make_executable};
pub use download::{download_file, fetch_release, http_client};
pub use plugin::{installed_plugin_jars, read_installed_version, remove_plugin_jars, write_installed_version};
pub use prompt::confirm;
