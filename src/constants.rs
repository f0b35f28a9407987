//! Application constants
//!
//! Centralized location for configuration defaults and user-facing strings.

/// Default base URL of the book collection endpoint
pub const DEFAULT_API_URL: &str = "https://backlibros.onrender.com/api/books";

/// Default HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default log file (relative to the working directory)
pub const DEFAULT_LOG_FILE: &str = "bookshelf.log";

/// Default tracing filter directive
pub const DEFAULT_LOG_FILTER: &str = "info";

// Environment keys
pub const ENV_API_URL: &str = "BOOKSHELF_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "BOOKSHELF_TIMEOUT_SECS";
pub const ENV_LOG_FILE: &str = "BOOKSHELF_LOG_FILE";
pub const ENV_LOG_FILTER: &str = "BOOKSHELF_LOG";

/// Application title shown in the header
pub const APP_TITLE: &str = "Administración de Libros";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// Banner messages
pub const MSG_REQUIRED_FIELDS: &str = "Título y autor son requeridos";
pub const MSG_LOAD_FAILED: &str = "Error al cargar los libros";
pub const MSG_SAVE_FAILED: &str = "Error al guardar el libro";
pub const MSG_DELETE_FAILED: &str = "Error al eliminar el libro";

pub const CONFIRM_DELETE_PROMPT: &str = "¿Estás seguro de eliminar este libro?";
