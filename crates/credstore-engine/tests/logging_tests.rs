//! Operation lifecycle logging
//!
//! All tests share one global capture buffer, so each filters on its own
//! usernames.

use credstore_core::config::{BackendKind, StoreConfig};
use credstore_core::logging_facility::test_capture::init_test_capture;
use credstore_core::errors::ExErrorKind;
use credstore_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_AUTHENTICATED, FIELD_BACKEND, FIELD_COMPONENT,
    FIELD_DURATION_MS, FIELD_ERR_CODE, FIELD_ERR_DETAIL, FIELD_ERR_KIND, FIELD_MATCH_COUNT,
    FIELD_OP, FIELD_PRODUCT_COUNT, FIELD_PRODUCT_ID, FIELD_TERM, FIELD_USERNAME,
};
use credstore_core_types::Sensitive;
use credstore_engine::{RegistrationForm, Services};
use tempfile::TempDir;

fn setup_services(backend: BackendKind) -> (Services, TempDir) {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig {
        backend,
        database_path: dir.path().join("users.db"),
        document_root: dir.path().join("docs"),
        ..StoreConfig::default()
    };
    (Services::from_config(&config).unwrap(), dir)
}

#[test]
fn test_register_emits_start_and_end() {
    let capture = init_test_capture();
    let (services, _dir) = setup_services(BackendKind::Sqlite);

    services
        .credentials
        .register("log_start_end_user", &Sensitive::from("secret1"))
        .unwrap();

    let events: Vec<_> = capture
        .events_for("register")
        .into_iter()
        .filter(|e| e.mentions("log_start_end_user"))
        .collect();
    let kinds: Vec<_> = events.iter().filter_map(|e| e.event.clone()).collect();
    assert_eq!(kinds, vec![EVENT_START.to_string(), EVENT_END.to_string()]);
    assert!(events[1].fields.contains_key(FIELD_DURATION_MS));

    let start = &events[0];
    assert_eq!(start.fields.get(FIELD_OP).map(String::as_str), Some("register"));
    assert_eq!(
        start.fields.get(FIELD_USERNAME).map(String::as_str),
        Some("log_start_end_user")
    );
    assert_eq!(start.fields.get(FIELD_BACKEND).map(String::as_str), Some("sqlite"));
    assert_eq!(
        start.fields.get(FIELD_COMPONENT).map(String::as_str),
        Some("credstore_engine::commands::credentials")
    );
}

#[test]
fn test_validation_failure_emits_end_error() {
    let capture = init_test_capture();
    let (services, _dir) = setup_services(BackendKind::Document);

    let _ = services
        .credentials
        .register("log_short_pw_user", &Sensitive::from("1234"));

    let errors: Vec<_> = capture
        .events_for("register")
        .into_iter()
        .filter(|e| e.mentions("log_short_pw_user"))
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].fields.get(FIELD_ERR_CODE).map(String::as_str),
        Some("ERR_PASSWORD_TOO_SHORT")
    );
    assert_eq!(
        errors[0].fields.get(FIELD_ERR_KIND).map(String::as_str),
        Some("PasswordTooShort")
    );
    assert!(!errors[0].fields.contains_key(FIELD_ERR_DETAIL));
    assert_eq!(errors[0].level, tracing::Level::WARN);
}

#[test]
fn test_open_failure_logs_detail() {
    let capture = init_test_capture();
    let dir = TempDir::new().unwrap();
    let config = StoreConfig {
        backend: BackendKind::Sqlite,
        database_path: dir.path().to_path_buf(),
        ..StoreConfig::default()
    };

    let err = Services::from_config(&config).unwrap_err();
    assert!(!err.is_validation());

    let failures: Vec<_> = capture
        .events_for("open_services")
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].level, tracing::Level::ERROR);
    assert_eq!(
        failures[0].fields.get(FIELD_BACKEND).map(String::as_str),
        Some("sqlite")
    );
    let detail = failures[0]
        .fields
        .get(FIELD_ERR_DETAIL)
        .expect("error detail field");
    assert!(detail.contains(err.code()));
    assert_ne!(detail.as_str(), err.user_message());
}

#[test]
fn test_form_registration_is_one_operation() {
    let capture = init_test_capture();
    let (services, _dir) = setup_services(BackendKind::Document);
    let store = &services.credentials;

    let form = RegistrationForm::new("log_form_user", "secret1", "secret1");
    store.register_form(&form).unwrap();
    let err = store.register_form(&form).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::UsernameTaken);

    let mine = |op: &str, event: &str| {
        capture.count_events(|e| {
            e.op.as_deref() == Some(op)
                && e.event.as_deref() == Some(event)
                && e.mentions("log_form_user")
        })
    };
    assert_eq!(mine("register_form", EVENT_START), 2);
    assert_eq!(mine("register_form", EVENT_END), 1);
    assert_eq!(mine("register_form", EVENT_END_ERROR), 1);
    assert_eq!(mine("register", EVENT_START), 0);
    assert_eq!(mine("register", EVENT_END_ERROR), 0);
}

#[test]
fn test_search_records_term_and_match_count() {
    let capture = init_test_capture();
    let (services, _dir) = setup_services(BackendKind::Sqlite);
    let store = &services.credentials;
    for name in ["logsrch_a", "logsrch_b", "other_user"] {
        store.register(name, &Sensitive::from("secret1")).unwrap();
    }

    assert_eq!(store.search_prefix("logsrch_").unwrap().len(), 2);

    let end = capture
        .events_for("search_prefix")
        .into_iter()
        .find(|e| {
            e.event.as_deref() == Some(EVENT_END)
                && e.fields.get(FIELD_TERM).map(String::as_str) == Some("logsrch_")
        })
        .expect("search end event");
    assert_eq!(end.fields.get(FIELD_MATCH_COUNT).map(String::as_str), Some("2"));
}

#[test]
fn test_passwords_never_logged() {
    let capture = init_test_capture();
    let secret = "pl41ntext-never-logged";

    for backend in [BackendKind::Sqlite, BackendKind::Document] {
        let (services, _dir) = setup_services(backend);
        let store = &services.credentials;

        store
            .register("log_secret_user", &Sensitive::from(secret))
            .unwrap();
        let _ = store.register("log_secret_user", &Sensitive::from(secret));
        store
            .authenticate("log_secret_user", &Sensitive::from(secret))
            .unwrap();
        store
            .authenticate("log_secret_user", &Sensitive::from("wrong-pl41ntext"))
            .unwrap();
        let _ = store.register_form(&RegistrationForm::new(
            "log_secret_form",
            secret,
            "mismatch-pl41ntext",
        ));
    }

    assert!(capture.count_events(|e| e.mentions("log_secret_user")) > 0);
    assert_eq!(capture.count_events(|e| e.mentions("pl41ntext")), 0);
}

#[test]
fn test_authenticate_records_outcome() {
    let capture = init_test_capture();
    let (services, _dir) = setup_services(BackendKind::Sqlite);

    let ok = services
        .credentials
        .authenticate("log_nobody_user", &Sensitive::from("secret1"))
        .unwrap();
    assert!(!ok);

    let end = capture
        .events_for("authenticate")
        .into_iter()
        .find(|e| e.mentions("log_nobody_user") && e.event.as_deref() == Some(EVENT_END))
        .expect("end event");
    assert_eq!(end.fields.get(FIELD_AUTHENTICATED).map(String::as_str), Some("false"));
}

#[test]
fn test_catalog_operations_logged() {
    let capture = init_test_capture();
    let (services, _dir) = setup_services(BackendKind::Document);

    let product = services
        .catalog
        .register_product("Estojo", "2", "7.25")
        .unwrap();

    let product_id = product.id.to_string();
    let found = capture.count_events(|e| {
        e.op.as_deref() == Some("register_product")
            && e.event.as_deref() == Some(EVENT_END)
            && e.fields.get(FIELD_PRODUCT_ID) == Some(&product_id)
    });
    assert!(found >= 1);
    capture.assert_event_exists("register_product", EVENT_START);

    let listed = services.catalog.list_products().unwrap();
    assert_eq!(listed.len(), 1);
    let count = capture.count_events(|e| {
        e.op.as_deref() == Some("list_products")
            && e.event.as_deref() == Some(EVENT_END)
            && e.fields.get(FIELD_PRODUCT_COUNT).map(String::as_str) == Some("1")
    });
    assert!(count >= 1);
}
