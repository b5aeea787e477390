pub mod config;
pub mod error;
pub mod ir;
pub mod parse;
pub mod store;
pub mod transform;

pub use error::GeneratorError;

/// A generated file with path and content.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Trait for code generators that produce files from parsed operation descriptors.
pub trait CodeGenerator {
    type Config;

    fn generate(
        &self,
        descriptors: &[ir::OperationDescriptor],
        config: &Self::Config,
    ) -> Result<Vec<GeneratedFile>, GeneratorError>;
}
