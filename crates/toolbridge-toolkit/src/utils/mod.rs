pub(crate) mod constant;
pub(crate) mod http;
