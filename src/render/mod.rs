pub(crate) mod decorator;
pub(crate) mod decorators;
pub(crate) mod face;
pub(crate) mod layer;
pub(crate) mod renderer;
