pub(crate) mod info;
pub(crate) mod migrate;
pub(crate) mod sql;
