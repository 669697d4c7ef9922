pub(crate) mod dispatch;
pub(crate) mod helpers;
pub(crate) mod rules;
