//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose scenting/medley use cases to Dart via FRB.
//! - Flatten core types into string-keyed envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Ids cross the boundary as UUID strings; enums as their persisted form,
//!   decoded with fallback so unknown strings never fail a call.

use chrono::Local;
use log::warn;
use parfum_core::db::open_db;
use parfum_core::{
    core_version as core_version_inner, elapsed_calendar_days,
    init_logging as init_logging_inner, is_submittable, ping as ping_inner, IngredientDraft,
    Medley, MedleyDraft, MedleyService, Period, PersistedEnum, Scenting, ScentingService,
    SqliteMedleyRepository, SqliteScentingRepository, Status, SubmissionCheck, Unit,
};
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::OnceLock;
use uuid::Uuid;

const DB_FILE_NAME: &str = "parfum_vi.sqlite3";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
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
/// # FFI contract
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    /// Id of the created or affected entity.
    pub id: Option<String>,
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: String) -> Self {
        Self {
            ok: true,
            id: Some(id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// One selectable enum value for pickers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumOption {
    /// Persisted form, passed back on writes.
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IngredientItem {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub unit: String,
    /// Unit noun agreeing with `amount`, e.g. `drop` or `drops`.
    pub unit_display: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MedleyItem {
    pub id: String,
    pub scenting_id: String,
    pub name: String,
    pub created_at_ms: i64,
    pub period: String,
    pub status: String,
    pub status_label: String,
    pub update: String,
    pub destination: String,
    pub maturity: u32,
    /// Maturity with its period noun, e.g. `14 days`.
    pub maturity_display: String,
    pub conclusion: String,
    pub ingredients: Vec<IngredientItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScentingItem {
    pub id: String,
    pub name: String,
    pub medley_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScentingListResponse {
    pub ok: bool,
    /// Sorted by name ascending.
    pub items: Vec<ScentingItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MedleyListResponse {
    pub ok: bool,
    /// Sorted by name ascending.
    pub items: Vec<MedleyItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MedleyGetResponse {
    pub ok: bool,
    /// `None` when the medley does not exist or the call failed.
    pub item: Option<MedleyItem>,
    pub message: String,
}

/// Ingredient row as edited in the medley form.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientInput {
    /// Existing row id; `None` for a row added in this form session.
    pub id: Option<String>,
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

/// Medley form contents.
#[derive(Debug, Clone, PartialEq)]
pub struct MedleyInput {
    pub name: String,
    pub period: String,
    pub status: String,
    pub update: String,
    pub destination: String,
    pub maturity: u32,
    pub conclusion: String,
    pub ingredients: Vec<IngredientInput>,
}

/// Per-rule result of the medley submission gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormCheckResponse {
    pub ok: bool,
    pub submittable: bool,
    pub name_ok: bool,
    pub destination_ok: bool,
    pub maturity_ok: bool,
    pub has_ingredients: bool,
    pub ingredients_complete: bool,
    pub ingredient_names_distinct: bool,
    pub ingredient_ids_distinct: bool,
    pub message: String,
}

impl FormCheckResponse {
    fn from_check(check: SubmissionCheck) -> Self {
        Self {
            ok: true,
            submittable: check.is_submittable(),
            name_ok: check.name_ok,
            destination_ok: check.destination_ok,
            maturity_ok: check.maturity_ok,
            has_ingredients: check.has_ingredients,
            ingredients_complete: check.ingredients_complete,
            ingredient_names_distinct: check.ingredient_names_distinct,
            ingredient_ids_distinct: check.ingredient_ids_distinct,
            message: String::new(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            submittable: false,
            name_ok: false,
            destination_ok: false,
            maturity_ok: false,
            has_ingredients: false,
            ingredients_complete: false,
            ingredient_names_distinct: false,
            ingredient_ids_distinct: false,
            message: message.into(),
        }
    }
}

/// Name rule shared by every add/rename form.
///
/// Blank candidates are refused; `exemption` (the entity's current name)
/// is always accepted; otherwise the candidate must not be in `existing`.
#[flutter_rust_bridge::frb(sync)]
pub fn name_check(candidate: String, existing: Vec<String>, exemption: Option<String>) -> bool {
    is_submittable(candidate.as_str(), &existing, exemption.as_deref())
}

/// Evaluates the medley submission gate for form input.
///
/// `medley_id` is set in the edit flow so the current name is exempt.
#[flutter_rust_bridge::frb(sync)]
pub fn medley_form_check(
    scenting_id: String,
    medley_id: Option<String>,
    input: MedleyInput,
) -> FormCheckResponse {
    let result = (|| -> Result<SubmissionCheck, String> {
        let scenting_id = parse_id(&scenting_id, "scenting_id")?;
        let draft = to_draft(&input)?;
        let conn = open_store()?;
        let service = medley_service(&conn)?;
        let editing = match medley_id {
            Some(raw) => {
                let id = parse_id(&raw, "medley_id")?;
                service.get_medley(id).map_err(|err| err.to_string())?
            }
            None => None,
        };
        service
            .check_draft(scenting_id, &draft, editing.as_ref())
            .map_err(|err| err.to_string())
    })();

    match result {
        Ok(check) => FormCheckResponse::from_check(check),
        Err(err) => FormCheckResponse::failure(call_failed("medley_form_check", &err)),
    }
}

/// Lists every scenting with its medley names.
#[flutter_rust_bridge::frb(sync)]
pub fn scenting_list() -> ScentingListResponse {
    let result = with_scenting_service(|service| {
        service.list_scentings().map_err(|err| err.to_string())
    });
    match result {
        Ok(scentings) => ScentingListResponse {
            ok: true,
            message: format!("Found {} scenting(s).", scentings.len()),
            items: scentings.iter().map(to_scenting_item).collect(),
        },
        Err(err) => ScentingListResponse {
            ok: false,
            items: Vec::new(),
            message: call_failed("scenting_list", &err),
        },
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn scenting_add(name: String) -> ActionResponse {
    match with_scenting_service(|service| {
        service.add_scenting(name).map_err(|err| err.to_string())
    }) {
        Ok(scenting) => ActionResponse::success("Scenting added.", scenting.id.to_string()),
        Err(err) => ActionResponse::failure(call_failed("scenting_add", &err)),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn scenting_rename(scenting_id: String, name: String) -> ActionResponse {
    match with_scenting_service(|service| {
        let id = parse_id(&scenting_id, "scenting_id")?;
        service.rename_scenting(id, name).map_err(|err| err.to_string())
    }) {
        Ok(scenting) => ActionResponse::success("Scenting renamed.", scenting.id.to_string()),
        Err(err) => ActionResponse::failure(call_failed("scenting_rename", &err)),
    }
}

/// Deletes a scenting; refused while it still owns medleys.
#[flutter_rust_bridge::frb(sync)]
pub fn scenting_delete(scenting_id: String) -> ActionResponse {
    match with_scenting_service(|service| {
        let id = parse_id(&scenting_id, "scenting_id")?;
        service.delete_scenting(id).map_err(|err| err.to_string())?;
        Ok(id)
    }) {
        Ok(id) => ActionResponse::success("Scenting deleted.", id.to_string()),
        Err(err) => ActionResponse::failure(call_failed("scenting_delete", &err)),
    }
}

/// Lists medleys, optionally under one scenting.
#[flutter_rust_bridge::frb(sync)]
pub fn medley_list(scenting_id: Option<String>) -> MedleyListResponse {
    let result = with_medley_service(|service| {
        let filter = scenting_id
            .as_deref()
            .map(|raw| parse_id(raw, "scenting_id"))
            .transpose()?;
        service.list_medleys(filter).map_err(|err| err.to_string())
    });
    match result {
        Ok(medleys) => MedleyListResponse {
            ok: true,
            message: format!("Found {} medley(s).", medleys.len()),
            items: medleys.iter().map(to_medley_item).collect(),
        },
        Err(err) => MedleyListResponse {
            ok: false,
            items: Vec::new(),
            message: call_failed("medley_list", &err),
        },
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn medley_get(medley_id: String) -> MedleyGetResponse {
    let result = with_medley_service(|service| {
        let id = parse_id(&medley_id, "medley_id")?;
        service.get_medley(id).map_err(|err| err.to_string())
    });
    match result {
        Ok(Some(medley)) => MedleyGetResponse {
            ok: true,
            item: Some(to_medley_item(&medley)),
            message: String::new(),
        },
        Ok(None) => MedleyGetResponse {
            ok: true,
            item: None,
            message: "Medley not found.".to_string(),
        },
        Err(err) => MedleyGetResponse {
            ok: false,
            item: None,
            message: call_failed("medley_get", &err),
        },
    }
}

/// Creates a medley under `scenting_id` when the form passes the gate.
#[flutter_rust_bridge::frb(sync)]
pub fn medley_add(scenting_id: String, input: MedleyInput) -> ActionResponse {
    match with_medley_service(|service| {
        let scenting_id = parse_id(&scenting_id, "scenting_id")?;
        let draft = to_draft(&input)?;
        service
            .add_medley(scenting_id, &draft)
            .map_err(|err| err.to_string())
    }) {
        Ok(medley) => ActionResponse::success("Medley added.", medley.id.to_string()),
        Err(err) => ActionResponse::failure(call_failed("medley_add", &err)),
    }
}

/// Saves an edited medley; ingredient rows are merged by id.
#[flutter_rust_bridge::frb(sync)]
pub fn medley_save(medley_id: String, input: MedleyInput) -> ActionResponse {
    match with_medley_service(|service| {
        let id = parse_id(&medley_id, "medley_id")?;
        let draft = to_draft(&input)?;
        service.save_medley(id, &draft).map_err(|err| err.to_string())
    }) {
        Ok(medley) => ActionResponse::success("Medley saved.", medley.id.to_string()),
        Err(err) => ActionResponse::failure(call_failed("medley_save", &err)),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn medley_delete(medley_id: String) -> ActionResponse {
    match with_medley_service(|service| {
        let id = parse_id(&medley_id, "medley_id")?;
        service.delete_medley(id).map_err(|err| err.to_string())?;
        Ok(id)
    }) {
        Ok(id) => ActionResponse::success("Medley deleted.", id.to_string()),
        Err(err) => ActionResponse::failure(call_failed("medley_delete", &err)),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn unit_options() -> Vec<EnumOption> {
    enum_options::<Unit>()
}

#[flutter_rust_bridge::frb(sync)]
pub fn period_options() -> Vec<EnumOption> {
    enum_options::<Period>()
}

#[flutter_rust_bridge::frb(sync)]
pub fn status_options() -> Vec<EnumOption> {
    enum_options::<Status>()
}

/// Whole local calendar days since `created_at_ms`, never negative.
#[flutter_rust_bridge::frb(sync)]
pub fn medley_elapsed_days(created_at_ms: i64) -> i64 {
    elapsed_calendar_days(created_at_ms, &Local::now())
}

/// Logs a failed call and builds its envelope message.
fn call_failed(call: &'static str, err: &str) -> String {
    warn!("event=ffi_call module=ffi status=error call={call} error={err}");
    format!("{call} failed: {err}")
}

fn enum_options<E: PersistedEnum>() -> Vec<EnumOption> {
    E::all()
        .into_iter()
        .map(|value| EnumOption {
            value: value.encode().to_string(),
            label: value.label().to_string(),
        })
        .collect()
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("PARFUM_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn open_store() -> Result<Connection, String> {
    open_db(resolve_db_path()).map_err(|err| format!("store open failed: {err}"))
}

fn medley_service(conn: &Connection) -> Result<MedleyService<SqliteMedleyRepository<'_>>, String> {
    let repo = SqliteMedleyRepository::try_new(conn)
        .map_err(|err| format!("medley repo init failed: {err}"))?;
    Ok(MedleyService::new(repo))
}

fn with_scenting_service<T>(
    f: impl FnOnce(&ScentingService<SqliteScentingRepository<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let conn = open_store()?;
    let repo = SqliteScentingRepository::try_new(&conn)
        .map_err(|err| format!("scenting repo init failed: {err}"))?;
    f(&ScentingService::new(repo))
}

fn with_medley_service<T>(
    f: impl FnOnce(&MedleyService<SqliteMedleyRepository<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let conn = open_store()?;
    f(&medley_service(&conn)?)
}

fn parse_id(raw: &str, field: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid {field}: `{raw}`"))
}

fn to_draft(input: &MedleyInput) -> Result<MedleyDraft, String> {
    let ingredients = input
        .ingredients
        .iter()
        .map(|row| {
            let id = match row.id.as_deref() {
                Some(raw) => parse_id(raw, "ingredient id")?,
                None => Uuid::new_v4(),
            };
            Ok(IngredientDraft {
                id,
                name: row.name.clone(),
                amount: row.amount,
                unit: Unit::decode(&row.unit),
            })
        })
        .collect::<Result<Vec<_>, String>>()?;

    Ok(MedleyDraft {
        name: input.name.clone(),
        period: Period::decode(&input.period),
        status: Status::decode(&input.status),
        update: input.update.clone(),
        destination: input.destination.clone(),
        maturity: input.maturity,
        conclusion: input.conclusion.clone(),
        ingredients,
    })
}

fn to_scenting_item(scenting: &Scenting) -> ScentingItem {
    ScentingItem {
        id: scenting.id.to_string(),
        name: scenting.name.clone(),
        medley_names: scenting.medley_names(),
    }
}

fn to_medley_item(medley: &Medley) -> MedleyItem {
    MedleyItem {
        id: medley.id.to_string(),
        scenting_id: medley.scenting_id.to_string(),
        name: medley.name.clone(),
        created_at_ms: medley.created_at,
        period: medley.period.encode().to_string(),
        status: medley.status.encode().to_string(),
        status_label: medley.status.label().to_string(),
        update: medley.update.clone(),
        destination: medley.destination.clone(),
        maturity: medley.maturity,
        maturity_display: medley.maturity_display(),
        conclusion: medley.conclusion.clone(),
        ingredients: medley
            .ingredients
            .iter()
            .map(|ingredient| IngredientItem {
                id: ingredient.id.to_string(),
                name: ingredient.name.clone(),
                amount: ingredient.amount,
                unit: ingredient.unit.encode().to_string(),
                unit_display: ingredient.unit_display().to_string(),
            })
            .collect(),
    }
}
