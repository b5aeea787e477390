pub mod methods;
pub mod signature;
