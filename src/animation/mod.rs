pub(crate) mod anim;
pub(crate) mod ops;
pub(crate) mod spring;
