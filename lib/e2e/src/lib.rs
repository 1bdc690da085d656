//! End-to-end testing helpers: funded accounts on a live node and receipt
//! assertions.
mod account;
mod event;

pub use account::Account;
pub use event::Ext as EventExt;
