use log::debug;
use minijinja::{Environment, context};
use serde::Serialize;
use slurp_core::GeneratorError;
use slurp_core::config::ClientConfig;
use slurp_core::ir::OperationDescriptor;

use super::signature::{docstring, request_call, signature};

#[derive(Debug, Serialize)]
struct Banner {
    fence: String,
    category: String,
}

impl Banner {
    fn new(category: &str) -> Self {
        Self {
            fence: "#".repeat(category.chars().count() + 4),
            category: category.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct MethodContext {
    banner: Option<Banner>,
    identifier: String,
    signature: String,
    returns: Option<String>,
    docstring: Option<String>,
    call: String,
}

fn template_error(e: minijinja::Error) -> GeneratorError {
    GeneratorError::Template(e.to_string())
}

/// Emit client methods ordered by category then title, with a banner
/// before the first method of each category.
pub fn emit_methods(
    descriptors: &[OperationDescriptor],
    config: &ClientConfig,
) -> Result<String, GeneratorError> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.add_template(
        "client_methods.py.j2",
        include_str!("../../templates/client_methods.py.j2"),
    )
    .map_err(template_error)?;
    let tmpl = env
        .get_template("client_methods.py.j2")
        .map_err(template_error)?;

    let mut ordered: Vec<&OperationDescriptor> = descriptors.iter().collect();
    ordered.sort_by(|a, b| a.source_order(b));

    let mut methods = Vec::with_capacity(ordered.len());
    let mut prev_category: Option<&str> = None;
    for descriptor in ordered {
        let banner = if prev_category != Some(descriptor.category.as_str()) {
            debug!("starting category {}", descriptor.category);
            prev_category = Some(descriptor.category.as_str());
            Some(Banner::new(&descriptor.category))
        } else {
            None
        };
        methods.push(MethodContext {
            banner,
            identifier: descriptor.identifier.clone(),
            signature: signature(descriptor, config),
            returns: (!descriptor.is_void()).then(|| descriptor.response.clone()),
            docstring: docstring(descriptor),
            call: request_call(descriptor, config),
        });
    }

    tmpl.render(context! { methods => methods })
        .map_err(template_error)
}
