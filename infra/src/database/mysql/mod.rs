//! MySQL store implementations

mod credential_store_impl;
mod revocation_ledger_impl;

pub use credential_store_impl::MySqlCredentialStore;
pub use revocation_ledger_impl::MySqlRevocationLedger;
