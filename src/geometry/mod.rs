pub(crate) mod outline;
pub(crate) mod shapes;
