pub(crate) mod service;
pub(crate) mod state;
pub(crate) mod store;
