// Library entry exposing translator modules.
pub mod core;
pub mod translator;
