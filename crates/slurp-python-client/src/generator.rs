use slurp_core::config::ClientConfig;
use slurp_core::ir::OperationDescriptor;
use slurp_core::{CodeGenerator, GeneratedFile, GeneratorError};

use crate::emitters;

/// Name of the emitted file of client methods.
pub const METHODS_FILE: &str = "client_methods.py";

/// Generates Python client methods to paste into the client class.
pub struct PythonClientGenerator;

impl CodeGenerator for PythonClientGenerator {
    type Config = ClientConfig;

    fn generate(
        &self,
        descriptors: &[OperationDescriptor],
        config: &ClientConfig,
    ) -> Result<Vec<GeneratedFile>, GeneratorError> {
        Ok(vec![GeneratedFile {
            path: METHODS_FILE.to_string(),
            content: emitters::methods::emit_methods(descriptors, config)?,
        }])
    }
}
