pub(crate) mod face;
