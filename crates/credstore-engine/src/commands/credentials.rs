//! Credential operations: registration, authentication, username lookup.
//!
//! Plaintext passwords arrive wrapped in [`Sensitive`] and are dropped as
//! soon as they are digested. Only usernames, counts and error codes are
//! ever logged.

#![allow(clippy::result_large_err)]

use super::elapsed_ms;
use credstore_core::config::CredentialPolicy;
use credstore_core::digest::PasswordDigest;
use credstore_core::errors::ExError;
use credstore_core::model::UserRecord;
use credstore_core::repository::UserRepository;
use credstore_core::rules::validation::{check_confirmation, check_credentials};
use credstore_core::{log_op_end, log_op_error, log_op_start};
use credstore_core_types::Sensitive;
use credstore_store::errors::Result;
use std::time::Instant;

/// Registration and login against one user repository
pub struct CredentialStore {
    users: Box<dyn UserRepository>,
    policy: CredentialPolicy,
    search_limit: usize,
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("backend", &self.users.backend_name())
            .field("policy", &self.policy)
            .field("search_limit", &self.search_limit)
            .finish()
    }
}

impl CredentialStore {
    pub fn new(
        users: Box<dyn UserRepository>,
        policy: CredentialPolicy,
        search_limit: usize,
    ) -> Self {
        Self {
            users,
            policy,
            search_limit,
        }
    }

    pub fn policy(&self) -> &CredentialPolicy {
        &self.policy
    }

    /// Register a new user
    ///
    /// ## Errors
    ///
    /// - `UsernameTooShort` / `PasswordTooShort`: below the policy minimum
    /// - `UsernameTaken`: the username already exists
    /// - internal kinds on storage faults
    pub fn register(&self, username: &str, password: &Sensitive<String>) -> Result<()> {
        log_op_start!(
            "register",
            username = username,
            backend = self.users.backend_name()
        );
        let start = Instant::now();

        self.register_impl(username, password).map_err(|e| {
            log_op_error!(
                "register",
                e.clone(),
                duration_ms = elapsed_ms(start),
                username = username
            );
            e
        })?;

        log_op_end!(
            "register",
            duration_ms = elapsed_ms(start),
            username = username
        );
        Ok(())
    }

    fn register_impl(&self, username: &str, password: &Sensitive<String>) -> Result<()> {
        check_credentials(&self.policy, username, password.expose())
            .map_err(|e| ExError::from(e).with_op("register"))?;
        self.store_user(username, password)
    }

    /// Digest and insert an already validated pair
    fn store_user(&self, username: &str, password: &Sensitive<String>) -> Result<()> {
        let record = UserRecord::new(username, PasswordDigest::compute(password.expose()));
        self.users.insert_user(&record)
    }

    /// Register from the raw fields of a sign-up form
    ///
    /// All fields are trimmed; length rules are checked before the
    /// confirmation so users see errors in form order.
    ///
    /// ## Errors
    ///
    /// As [`CredentialStore::register`], plus `PasswordMismatch`.
    pub fn register_form(&self, form: &RegistrationForm) -> Result<()> {
        let username = form.username.trim();
        log_op_start!(
            "register_form",
            username = username,
            backend = self.users.backend_name()
        );
        let start = Instant::now();

        self.register_form_impl(username, form).map_err(|e| {
            log_op_error!(
                "register_form",
                e.clone(),
                duration_ms = elapsed_ms(start),
                username = username
            );
            e
        })?;

        log_op_end!(
            "register_form",
            duration_ms = elapsed_ms(start),
            username = username
        );
        Ok(())
    }

    fn register_form_impl(&self, username: &str, form: &RegistrationForm) -> Result<()> {
        let password = form.password.trimmed();
        let confirm = form.confirm.trimmed();

        check_credentials(&self.policy, username, password.expose())
            .and_then(|()| check_confirmation(password.expose(), confirm.expose()))
            .map_err(|e| ExError::from(e).with_op("register_form"))?;

        self.store_user(username, &password)
    }

    /// Check a username/password pair
    ///
    /// Unknown users and wrong passwords both yield `Ok(false)`.
    ///
    /// ## Errors
    ///
    /// Internal kinds on storage faults; these are never folded into `false`.
    pub fn authenticate(&self, username: &str, password: &Sensitive<String>) -> Result<bool> {
        log_op_start!(
            "authenticate",
            username = username,
            backend = self.users.backend_name()
        );
        let start = Instant::now();

        let candidate = PasswordDigest::compute(password.expose());
        let authenticated = self
            .users
            .find_digest(username)
            .map(|stored| stored.map(|d| d.matches(&candidate)).unwrap_or(false))
            .map_err(|e| {
                log_op_error!(
                    "authenticate",
                    e.clone(),
                    duration_ms = elapsed_ms(start),
                    username = username
                );
                e
            })?;

        log_op_end!(
            "authenticate",
            duration_ms = elapsed_ms(start),
            username = username,
            authenticated = authenticated
        );
        Ok(authenticated)
    }

    /// Usernames starting with `term`, for autocomplete
    ///
    /// Case-sensitive, literal match, sorted, at most `search_limit` names.
    ///
    /// ## Errors
    ///
    /// Internal kinds on storage faults.
    pub fn search_prefix(&self, term: &str) -> Result<Vec<String>> {
        log_op_start!("search_prefix", term = term);
        let start = Instant::now();

        let names = self
            .users
            .usernames_with_prefix(term, self.search_limit)
            .map_err(|e| {
                log_op_error!(
                    "search_prefix",
                    e.clone(),
                    duration_ms = elapsed_ms(start),
                    term = term
                );
                e
            })?;

        log_op_end!(
            "search_prefix",
            duration_ms = elapsed_ms(start),
            term = term,
            match_count = names.len()
        );
        Ok(names)
    }
}

/// Raw sign-up form input, before trimming
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    pub username: String,
    pub password: Sensitive<String>,
    pub confirm: Sensitive<String>,
}

impl RegistrationForm {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<Sensitive<String>>,
        confirm: impl Into<Sensitive<String>>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            confirm: confirm.into(),
        }
    }
}
