//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the entry form, listing view and spreadsheet download to Dart
//!   via FRB.
//! - Keep error semantics simple: every call returns an envelope with an
//!   `ok` flag and a notice the UI can show as-is.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Listing store selection is resolved once per process.

use jobboard_core::export::EXPORT_MIME_TYPE;
use jobboard_core::service::listing_service::{NO_DATA_NOTICE, UPLOAD_OK_NOTICE};
use jobboard_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, open_repository,
    ping as ping_inner, Backend, CompanyRole, ConfigError, JobBoardConfig, ListingForm,
    ListingRepository, ListingService, ListingServiceError, Location,
};
use log::warn;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Env var naming an optional TOML config file.
const ENV_CONFIG_PATH: &str = "JOBBOARD_CONFIG";
const ENTRY_DB_FILE_NAME: &str = "jobboard_entry.sqlite3";
static ENTRY_SETTINGS: OnceLock<EntrySettings> = OnceLock::new();

#[derive(Debug, Clone)]
struct EntrySettings {
    backend: Backend,
    export_file_name: String,
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Generic action response envelope for the entry form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingActionResponse {
    /// Whether the listing was stored.
    pub ok: bool,
    /// Notice for the UI.
    pub message: String,
}

impl ListingActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Listing table rendered as display strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingTableResponse {
    pub ok: bool,
    /// The 8 display column labels in fixed order.
    pub headers: Vec<String>,
    /// One entry per listing; each row has one string per header.
    pub rows: Vec<Vec<String>>,
    /// Empty on success with rows, a notice otherwise.
    pub message: String,
}

/// Result of writing the spreadsheet download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingExportResponse {
    pub ok: bool,
    /// Absolute path of the written workbook.
    pub path: Option<String>,
    pub mime_type: String,
    pub message: String,
}

/// Submits one listing from the entry form.
///
/// `location` and `role` accept the display names shown in the form
/// (`Chennai`, `Product Based`, ...), case-insensitive.
///
/// # FFI contract
/// - Sync call, performs blocking store I/O.
/// - Never panics.
#[allow(clippy::too_many_arguments)]
#[flutter_rust_bridge::frb(sync)]
pub fn submit_listing(
    company_name: String,
    phone_number: String,
    location: String,
    role: String,
    cyber_security: bool,
    python_backend: bool,
    net_backend: bool,
    ai_developer: bool,
) -> ListingActionResponse {
    let location = match location.parse::<Location>() {
        Ok(location) => location,
        Err(err) => return ListingActionResponse::failure(err.to_string()),
    };
    let role = match role.parse::<CompanyRole>() {
        Ok(role) => role,
        Err(err) => return ListingActionResponse::failure(err.to_string()),
    };
    let form = ListingForm {
        company_name,
        phone_number,
        location,
        role,
        cyber_security,
        python_backend,
        net_backend,
        ai_developer,
    };

    match with_listing_service(|service| service.submit(form).map_err(|err| err.notice())) {
        Ok(_) => ListingActionResponse::success(UPLOAD_OK_NOTICE),
        Err(message) => ListingActionResponse::failure(message),
    }
}

/// Loads every stored listing for the view panel.
///
/// # FFI contract
/// - Sync call, performs blocking store I/O.
/// - Never panics; an empty store is `ok` with the "No data found." notice.
#[flutter_rust_bridge::frb(sync)]
pub fn load_listings() -> ListingTableResponse {
    match with_listing_service(|service| service.load_table().map_err(|err| err.to_string())) {
        Ok(table) => {
            let message = if table.is_empty() {
                NO_DATA_NOTICE.to_string()
            } else {
                String::new()
            };
            ListingTableResponse {
                ok: true,
                headers: table.headers().iter().map(|label| label.to_string()).collect(),
                rows: table
                    .rows()
                    .iter()
                    .map(|row| row.iter().map(ToString::to_string).collect())
                    .collect(),
                message,
            }
        }
        Err(message) => ListingTableResponse {
            ok: false,
            headers: Vec::new(),
            rows: Vec::new(),
            message: format!("load_listings failed: {message}"),
        },
    }
}

/// Writes the current listings as an `.xlsx` workbook into `dir`.
///
/// The file name comes from configuration (`job_data.xlsx` by default) and
/// an existing file is replaced. An empty store writes no file and answers
/// `ok` with no path and the "No data found." notice.
///
/// # FFI contract
/// - Sync call, performs blocking store and file I/O.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn export_listings(dir: String) -> ListingExportResponse {
    let failure = |message: String| ListingExportResponse {
        ok: false,
        path: None,
        mime_type: EXPORT_MIME_TYPE.to_string(),
        message,
    };

    let dir = dir.trim();
    if dir.is_empty() || !Path::new(dir).is_absolute() {
        return failure(format!(
            "export_listings failed: dir must be an absolute path, got `{dir}`"
        ));
    }
    let path = Path::new(dir).join(&entry_settings().export_file_name);

    match with_listing_service(|service| Ok(export_into(service, &path))) {
        Ok(response) => response,
        Err(message) => failure(format!("export_listings failed: {message}")),
    }
}

fn export_into<R: ListingRepository>(
    service: &ListingService<R>,
    path: &Path,
) -> ListingExportResponse {
    let (ok, written, message) = match service.export_to(path) {
        Ok(rows) => (true, true, format!("Exported {rows} listing(s).")),
        // Nothing to download; the UI shows the notice instead.
        Err(ListingServiceError::NoData) => (true, false, NO_DATA_NOTICE.to_string()),
        Err(err) => (false, false, format!("export_listings failed: {err}")),
    };
    ListingExportResponse {
        ok,
        path: written.then(|| path.display().to_string()),
        mime_type: EXPORT_MIME_TYPE.to_string(),
        message,
    }
}

fn entry_settings() -> &'static EntrySettings {
    ENTRY_SETTINGS.get_or_init(resolve_entry_settings)
}

fn resolve_entry_settings() -> EntrySettings {
    let config_path = std::env::var(ENV_CONFIG_PATH)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .map(PathBuf::from);

    let mut config = match JobBoardConfig::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            warn!("event=config_load module=ffi status=error error={err}");
            JobBoardConfig::default()
        }
    };
    config.apply_env_overrides();

    let backend = config.backend().unwrap_or_else(|err| {
        if !matches!(err, ConfigError::NoBackend) {
            warn!("event=config_backend module=ffi status=error error={err}");
        }
        Backend::Local {
            db_path: std::env::temp_dir().join(ENTRY_DB_FILE_NAME),
        }
    });

    EntrySettings {
        backend,
        export_file_name: config.export.file_name,
    }
}

fn with_listing_service<T>(
    f: impl FnOnce(&ListingService<Box<dyn ListingRepository>>) -> Result<T, String>,
) -> Result<T, String> {
    let repo = open_repository(&entry_settings().backend)
        .map_err(|err| format!("listing store open failed: {err}"))?;
    let service = ListingService::new(repo);
    f(&service)
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, entry_settings, export_into, export_listings, init_logging, load_listings,
        ping, submit_listing, ENV_CONFIG_PATH,
    };
    use jobboard_core::config::{ENV_DB_PATH, ENV_STORE_URL};
    use jobboard_core::export::EXPORT_MIME_TYPE;
    use jobboard_core::service::listing_service::{
        MISSING_FIELDS_NOTICE, NO_DATA_NOTICE, UPLOAD_OK_NOTICE,
    };
    use jobboard_core::{read_table, Backend, ListingService, SqliteListingRepository};
    use std::sync::OnceLock;
    use std::time::{SystemTime, UNIX_EPOCH};

    static TEST_STORE: OnceLock<tempfile::TempDir> = OnceLock::new();

    /// Points the process-wide entry settings at a fresh database for this
    /// test binary. Must run before the first `entry_settings()` call.
    fn use_test_store() -> &'static tempfile::TempDir {
        TEST_STORE.get_or_init(|| {
            let dir = tempfile::tempdir().expect("create test store dir");
            std::env::remove_var(ENV_CONFIG_PATH);
            std::env::remove_var(ENV_STORE_URL);
            std::env::set_var(ENV_DB_PATH, dir.path().join("entry.sqlite3"));
            dir
        })
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn entry_settings_follow_db_path_override() {
        let dir = use_test_store();
        assert_eq!(
            entry_settings().backend,
            Backend::Local {
                db_path: dir.path().join("entry.sqlite3")
            }
        );
    }

    #[test]
    fn submit_then_load_shows_the_listing() {
        use_test_store();
        let company = unique_token("ffi-submit");
        let response = submit_listing(
            company.clone(),
            "555-0100".to_string(),
            "chennai".to_string(),
            "Freelance".to_string(),
            true,
            false,
            false,
            false,
        );
        assert!(response.ok, "{}", response.message);
        assert_eq!(response.message, UPLOAD_OK_NOTICE);

        let table = load_listings();
        assert!(table.ok, "{}", table.message);
        assert_eq!(table.headers.len(), 8);
        assert_eq!(table.headers[0], "Company Name");
        assert_eq!(table.headers[6], "Cyber Security Engineer");
        let row = table
            .rows
            .iter()
            .find(|row| row[0] == company)
            .expect("submitted listing should be listed");
        assert_eq!(row[2], "Chennai");
        assert_eq!(row[4], "false");
        assert_eq!(row[6], "true");
    }

    #[test]
    fn submit_with_blank_company_is_rejected_with_notice() {
        use_test_store();
        let response = submit_listing(
            "  ".to_string(),
            "555".to_string(),
            "Hyderabad".to_string(),
            "Service Based".to_string(),
            false,
            false,
            false,
            false,
        );
        assert!(!response.ok);
        assert_eq!(response.message, MISSING_FIELDS_NOTICE);
    }

    #[test]
    fn submit_with_unknown_location_is_rejected() {
        use_test_store();
        let response = submit_listing(
            "Acme".to_string(),
            "555".to_string(),
            "Atlantis".to_string(),
            "Freelance".to_string(),
            false,
            false,
            false,
            false,
        );
        assert!(!response.ok);
        assert!(response.message.contains("Atlantis"));
    }

    #[test]
    fn export_writes_workbook_into_directory() {
        use_test_store();
        let company = unique_token("ffi-export");
        let submitted = submit_listing(
            company.clone(),
            "1".to_string(),
            "Bengaluru".to_string(),
            "Product Based".to_string(),
            false,
            true,
            false,
            true,
        );
        assert!(submitted.ok, "{}", submitted.message);

        let dir = tempfile::tempdir().unwrap();
        let response = export_listings(dir.path().to_str().unwrap().to_string());
        assert!(response.ok, "{}", response.message);
        assert_eq!(response.mime_type, EXPORT_MIME_TYPE);

        let path = response.path.expect("export should return the file path");
        assert!(path.ends_with("job_data.xlsx"));
        let table = read_table(&std::fs::read(&path).unwrap()).unwrap();
        assert!(table
            .rows()
            .iter()
            .any(|row| row[0].to_string() == company));
    }

    #[test]
    fn export_of_empty_store_offers_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let repo = SqliteListingRepository::open(dir.path().join("empty.sqlite3")).unwrap();
        let path = dir.path().join("job_data.xlsx");

        let response = export_into(&ListingService::new(repo), &path);
        assert!(response.ok, "{}", response.message);
        assert_eq!(response.path, None);
        assert_eq!(response.message, NO_DATA_NOTICE);
        assert!(!path.exists());
    }

    #[test]
    fn export_rejects_relative_directory() {
        let response = export_listings("exports".to_string());
        assert!(!response.ok);
        assert!(response.path.is_none());
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
