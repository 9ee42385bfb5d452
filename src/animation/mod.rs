pub(crate) mod ease;
pub(crate) mod lipsync;
pub(crate) mod modifier;
