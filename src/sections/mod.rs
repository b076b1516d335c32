pub(crate) mod example;
pub(crate) mod model;
pub(crate) mod registry;
pub(crate) mod schema;
pub(crate) mod validate;
