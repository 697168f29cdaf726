//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for varcart operations, whatever the UI.
//!
//! The facade:
//! - **Dispatches** to the appropriate command function
//! - **Opens and saves** editing sessions, wiring the store's catalog and the
//!   configured inactive-value policy into them
//! - **Returns structured types** (`Result<CmdResult>`, [`EditSession`])
//!
//! It does no business logic and no terminal I/O.
//!
//! ## Generic Over DataStore
//!
//! `VarcartApi<S: DataStore>` is generic over the storage backend:
//! - Production: `VarcartApi<FileStore>`
//! - Testing: `VarcartApi<InMemoryStore>`
//!
//! ## Testing Strategy
//!
//! API tests verify dispatch and session wiring. Command logic is tested in the
//! command modules.

use crate::commands;
use crate::config::VarcartConfig;
use crate::error::{Result, VarcartError};
use crate::selection::SelectionState;
use crate::session::EditSession;
use crate::store::DataStore;
use crate::table::{is_reserved_column, Row};
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct VarcartApi<S: DataStore> {
    store: S,
    config_dir: PathBuf,
}

impl<S: DataStore> VarcartApi<S> {
    pub fn new(store: S, config_dir: PathBuf) -> Self {
        Self { store, config_dir }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn list_catalog(&self, query: Option<&str>) -> Result<commands::CmdResult> {
        commands::catalog::list(&self.store, query)
    }

    pub fn add_attribute_type(&mut self, name: &str) -> Result<commands::CmdResult> {
        commands::catalog::add_type(&mut self.store, name)
    }

    pub fn add_attribute_value(
        &mut self,
        type_name: &str,
        name: Option<&str>,
        color_code: Option<&str>,
    ) -> Result<commands::CmdResult> {
        commands::catalog::add_value(&mut self.store, type_name, name, color_code)
    }

    pub fn set_attribute_active(
        &mut self,
        type_name: &str,
        value: Option<&str>,
        active: bool,
    ) -> Result<commands::CmdResult> {
        commands::catalog::set_active(&mut self.store, type_name, value, active)
    }

    pub fn remove_attribute(
        &mut self,
        type_name: &str,
        value: Option<&str>,
    ) -> Result<commands::CmdResult> {
        commands::catalog::remove(&mut self.store, type_name, value)
    }

    pub fn create_product(&mut self, title: &str) -> Result<commands::CmdResult> {
        commands::product::create(&mut self.store, title)
    }

    pub fn list_products(&self) -> Result<commands::CmdResult> {
        commands::product::list(&self.store)
    }

    pub fn get_product(&self, id: &Uuid) -> Result<commands::CmdResult> {
        commands::product::get(&self.store, id)
    }

    pub fn delete_product(&mut self, id: &Uuid) -> Result<commands::CmdResult> {
        commands::product::delete(&mut self.store, id)
    }

    /// Opens an editing session on a stored product.
    ///
    /// A catalog that fails to load does not fail the call: the session comes
    /// back in the `Failed` catalog state and can be retried with
    /// [`VarcartApi::reload_catalog`].
    pub fn open_session(&self, id: &Uuid) -> Result<EditSession> {
        let product = self.store.get_product(id)?;
        let config = VarcartConfig::load(&self.config_dir)?;
        let mut session = EditSession::open(&product, config.inactive_values);
        if let Err(err) = session.load_catalog(self.store.load_catalog()) {
            tracing::debug!(product = %id, error = %err, "session opened without catalog");
        }
        Ok(session)
    }

    pub fn reload_catalog(&self, session: &mut EditSession) -> Result<commands::TableChange> {
        session.load_catalog(self.store.load_catalog())
    }

    pub fn save_session(&mut self, session: &EditSession) -> Result<commands::CmdResult> {
        if session.is_closed() {
            return Err(VarcartError::SessionClosed);
        }
        commands::product::save_table(
            &mut self.store,
            &session.product_id(),
            session.selection(),
            session.rows(),
        )
    }

    pub fn close_session(&self, mut session: EditSession) -> Result<()> {
        session.close()
    }

    /// Previews the table for ad-hoc factors, all rows at price 0 and stock 0.
    /// Nothing is checked against the catalog and nothing is stored, but each
    /// type may appear once and must not shadow a row field.
    pub fn generate_preview(
        &self,
        factors: &[(String, Vec<String>)],
    ) -> Result<(SelectionState, Vec<Row>)> {
        let mut selection = SelectionState::new();
        for (type_name, values) in factors {
            if is_reserved_column(type_name) {
                return Err(VarcartError::ReservedAttributeName(type_name.clone()));
            }
            if selection.is_selected(type_name) {
                return Err(VarcartError::Api(format!(
                    "Attribute type given more than once: {type_name}"
                )));
            }
            let types: Vec<&str> = selection
                .types()
                .iter()
                .map(String::as_str)
                .chain([type_name.as_str()])
                .collect();
            selection = selection
                .with_types(types)
                .with_values(type_name, values.iter().cloned())?;
        }
        let combinations = commands::generate::from_selection(&selection);
        let rows = commands::reconcile::run(&combinations, &[]);
        Ok((selection, rows))
    }

    pub fn load_config(&self) -> Result<VarcartConfig> {
        VarcartConfig::load(&self.config_dir)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.config_dir, action)
    }

    #[cfg(any(test, feature = "test_utils"))]
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel, TableChange};
