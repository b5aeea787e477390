use slurp_core::config::ClientConfig;
use slurp_core::ir::{OperationDescriptor, Parameter};

/// Formal parameter lists longer than this go one per line.
const INLINE_PARAM_LIMIT: usize = 3;

const PARAM_INDENT: &str = "\n        ";
const BODY_ENTRY_INDENT: &str = "\n            ";

/// Escape triple-quote sequences that would prematurely close Python docstrings.
fn escape_docstring(value: &str) -> String {
    value.replace("\"\"\"", "\\\"\\\"\\\"")
}

/// One formal parameter, e.g. `name: str` or `color: str = NotProvided`.
fn formal_param(param: &Parameter, config: &ClientConfig) -> String {
    if param.required {
        format!("{}: {}", param.ident(), param.type_name)
    } else {
        format!(
            "{}: {} = {}",
            param.ident(),
            param.type_name,
            config.omitted_sentinel
        )
    }
}

/// The parameter list that follows `self` in the method header.
///
/// Short lists of required parameters stay on one line; anything else is
/// split one parameter per line, with optional ones marked for type checkers.
pub fn signature(descriptor: &OperationDescriptor, config: &ClientConfig) -> String {
    let params = &descriptor.params;
    if params.is_empty() {
        return String::new();
    }

    let formals: Vec<String> = params.iter().map(|p| formal_param(p, config)).collect();
    if params.len() <= INLINE_PARAM_LIMIT && params.iter().all(|p| p.required) {
        return format!(", {}", formals.join(", "));
    }

    let last = params.len() - 1;
    let mut out = String::from(",");
    for (i, (param, formal)) in params.iter().zip(&formals).enumerate() {
        out.push_str(PARAM_INDENT);
        out.push_str(formal);
        if i != last {
            out.push(',');
        }
        if !param.required {
            out.push_str(" # type: ignore");
        }
    }
    out.push_str("\n    ");
    out
}

/// The docstring, unindented, or `None` when there is nothing to say.
pub fn docstring(descriptor: &OperationDescriptor) -> Option<String> {
    let mut sections = Vec::new();
    if !descriptor.description.is_empty() {
        sections.push(escape_docstring(&descriptor.description.join("\n")));
    }
    if !descriptor.params.is_empty() {
        let lines: Vec<String> = descriptor
            .params
            .iter()
            .map(|p| format!("param {}: {}", p.ident(), escape_docstring(&p.desc)))
            .collect();
        sections.push(lines.join("\n"));
    }
    if sections.is_empty() {
        return None;
    }

    let text = sections.join("\n\n");
    if text.contains('\n') {
        Some(format!("\"\"\"\n{text}\n\"\"\""))
    } else {
        Some(format!("\"\"\"{text}\"\"\""))
    }
}

/// The request expression, e.g. `self.get("/labels/{id}".format(id=id))`.
pub fn request_call(descriptor: &OperationDescriptor, config: &ClientConfig) -> String {
    let mut call = format!(
        "self.{}(\"{}\"",
        descriptor.http_verb.as_str(),
        descriptor.url_path
    );

    let url_args: Vec<String> = descriptor
        .url_params()
        .map(|p| format!("{0}={0}", p.ident()))
        .collect();
    if !url_args.is_empty() {
        call.push_str(&format!(".format({})", url_args.join(",")));
    }

    let body_entries: Vec<String> = descriptor
        .body_params()
        .map(|p| format!("'{0}': {0}", p.ident()))
        .collect();
    if !body_entries.is_empty() {
        call.push_str(&format!(
            ", {}({{{BODY_ENTRY_INDENT}{}\n        }})",
            config.body_filter,
            body_entries.join(&format!(",{BODY_ENTRY_INDENT}"))
        ));
    }

    call.push(')');
    if !descriptor.is_void() {
        call.push_str(".json()");
    }
    call
}

#[cfg(test)]
mod tests {
    use super::*;
    use slurp_core::ir::HttpVerb;

    fn param(name: &str, type_name: &str, required: bool, body_param: bool) -> Parameter {
        Parameter {
            name: name.to_string(),
            type_name: type_name.to_string(),
            desc: if required {
                format!("Required. The {name}.")
            } else {
                format!("The {name}.")
            },
            required,
            body_param,
        }
    }

    fn descriptor(params: Vec<Parameter>, response: &str) -> OperationDescriptor {
        OperationDescriptor {
            title: "Update Category".to_string(),
            identifier: "updateCategory".to_string(),
            response: response.to_string(),
            params,
            description: Vec::new(),
            http_verb: HttpVerb::Put,
            url_path: "/categories/{category_public_id}".to_string(),
            category: "Categories".to_string(),
        }
    }

    #[test]
    fn test_empty_signature() {
        let d = descriptor(Vec::new(), "void");
        assert_eq!(signature(&d, &ClientConfig::default()), "");
        assert_eq!(docstring(&d), None);
    }

    #[test]
    fn test_inline_signature() {
        let d = descriptor(
            vec![
                param("category_public_id", "int", true, false),
                param("name", "str", true, true),
            ],
            "Category",
        );
        assert_eq!(
            signature(&d, &ClientConfig::default()),
            ", category_public_id: int, name: str"
        );
    }

    #[test]
    fn test_multiline_signature_with_optional() {
        let d = descriptor(
            vec![
                param("category_public_id", "int", true, false),
                param("archived", "bool", false, true),
                param("external-id", "str", false, true),
            ],
            "Category",
        );
        assert_eq!(
            signature(&d, &ClientConfig::default()),
            ",\n        category_public_id: int,\
             \n        archived: bool = NotProvided, # type: ignore\
             \n        external_id: str = NotProvided # type: ignore\n    "
        );
    }

    #[test]
    fn test_four_required_params_go_multiline() {
        let d = descriptor(
            vec![
                param("a", "int", true, false),
                param("b", "int", true, false),
                param("c", "int", true, false),
                param("d", "int", true, false),
            ],
            "void",
        );
        assert!(signature(&d, &ClientConfig::default()).starts_with(",\n        a: int,"));
    }

    #[test]
    fn test_custom_sentinel() {
        let config = ClientConfig {
            omitted_sentinel: "Omit".to_string(),
            ..ClientConfig::default()
        };
        let d = descriptor(vec![param("color", "str", false, true)], "Category");
        assert!(signature(&d, &config).contains("color: str = Omit # type: ignore"));
    }

    #[test]
    fn test_single_line_docstring() {
        let mut d = descriptor(Vec::new(), "void");
        d.description = vec!["Delete a Category.".to_string()];
        assert_eq!(docstring(&d).unwrap(), "\"\"\"Delete a Category.\"\"\"");
    }

    #[test]
    fn test_multiline_docstring() {
        let mut d = descriptor(vec![param("category_public_id", "int", true, false)], "void");
        d.description = vec!["Delete a Category.".to_string()];
        assert_eq!(
            docstring(&d).unwrap(),
            "\"\"\"\nDelete a Category.\n\nparam category_public_id: Required. The category_public_id.\n\"\"\""
        );
    }

    #[test]
    fn test_docstring_escapes_quotes() {
        let mut d = descriptor(Vec::new(), "void");
        d.description = vec!["Say \"\"\"hi\"\"\"".to_string()];
        assert_eq!(docstring(&d).unwrap(), r#""""Say \"\"\"hi\"\"\"""""#);
    }

    #[test]
    fn test_request_call_with_body() {
        let d = descriptor(
            vec![
                param("category_public_id", "int", true, false),
                param("archived", "bool", false, true),
                param("external-id", "str", false, true),
            ],
            "Category",
        );
        assert_eq!(
            request_call(&d, &ClientConfig::default()),
            "self.put(\"/categories/{category_public_id}\".format(category_public_id=category_public_id), PrepareLocals({\
             \n            'archived': archived,\
             \n            'external_id': external_id\
             \n        })).json()"
        );
    }

    #[test]
    fn test_void_request_call() {
        let mut d = descriptor(vec![param("category_public_id", "int", true, false)], "void");
        d.http_verb = HttpVerb::Delete;
        assert_eq!(
            request_call(&d, &ClientConfig::default()),
            "self.delete(\"/categories/{category_public_id}\".format(category_public_id=category_public_id))"
        );
    }
}
