pub mod rows;
pub mod section;

use log::{debug, trace};

use crate::error::DocError;
use crate::ir::{HttpVerb, OperationDescriptor, Parameter, UNCATEGORIZED};
use crate::transform::{TypeMap, identifier_from_title};
use section::{Section, section_for_marker};

/// Host and type settings for reading one API's documentation.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Substring every definition line must contain (case-insensitive).
    pub host: String,
    /// Prefix stripped from endpoint paths.
    pub base_prefix: String,
    pub types: TypeMap,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            host: "https://api.clubhouse.io/".to_string(),
            base_prefix: "https://api.clubhouse.io/api/v3".to_string(),
            types: TypeMap::default(),
        }
    }
}

/// Parse one copied documentation snippet into an operation descriptor.
pub fn read_api_doc(doc: &str, options: &ParseOptions) -> Result<OperationDescriptor, DocError> {
    let mut ctx = DocContext::default();
    for line in doc.lines() {
        ctx.feed(line, &options.types)?;
    }
    ctx.finish(options)
}

/// Everything collected from a snippet so far.
#[derive(Debug)]
struct DocContext {
    section: Section,
    title: String,
    description: Vec<String>,
    endpoint: String,
    response: String,
    params: Vec<Parameter>,
}

impl Default for DocContext {
    fn default() -> Self {
        Self {
            section: Section::Title,
            title: String::new(),
            description: Vec::new(),
            endpoint: String::new(),
            response: String::new(),
            params: Vec::new(),
        }
    }
}

impl DocContext {
    fn feed(&mut self, line: &str, types: &TypeMap) -> Result<(), DocError> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(());
        }

        if let Some(section) = section_for_marker(line) {
            debug!("section {:?} -> {:?}", self.section, section);
            self.section = section;
            return Ok(());
        }

        trace!("{:?}: {trimmed}", self.section);
        match self.section {
            // Only the first line that is not a marker is the title. No
            // marker leads back to this section.
            Section::Title => {
                self.take_title(trimmed)?;
                self.section = Section::Description;
            }
            Section::Description => self.description.push(trimmed.to_string()),
            // Definitions may wrap over several physical lines.
            Section::Endpoint => self.endpoint.push_str(trimmed),
            Section::Skip => {}
            Section::UrlParams => self.take_param(line, false, types),
            Section::BodyParams => self.take_param(line, true, types),
            Section::Responses => self.take_response(line, types),
        }
        Ok(())
    }

    fn take_title(&mut self, trimmed: &str) -> Result<(), DocError> {
        if rows::looks_like_response_row(trimmed) {
            return Err(DocError::ResponseInTitle(trimmed.to_string()));
        }
        self.title = trimmed.replace('.', "");
        Ok(())
    }

    fn take_param(&mut self, line: &str, body_param: bool, types: &TypeMap) {
        if rows::is_table_header(line, "Name", "Description") {
            return;
        }
        match rows::parse_param_row(line, body_param, types) {
            Some(param) => self.params.push(param),
            None => debug!("dropping malformed parameter row {line:?}"),
        }
    }

    fn take_response(&mut self, line: &str, types: &TypeMap) {
        if rows::is_table_header(line, "Code", "Description") {
            return;
        }
        match rows::parse_response_row(line, types) {
            // A later 2xx row replaces an earlier one.
            Some(Some(response)) => self.response = response,
            Some(None) => {}
            None => debug!("dropping malformed response row {line:?}"),
        }
    }

    fn finish(mut self, options: &ParseOptions) -> Result<OperationDescriptor, DocError> {
        if self.title.is_empty() {
            return Err(DocError::MissingTitle);
        }
        if self.endpoint.is_empty() || !self.endpoint.contains(' ') {
            return Err(DocError::MissingEndpoint);
        }
        if !self
            .endpoint
            .to_lowercase()
            .contains(&options.host.to_lowercase())
        {
            return Err(DocError::ForeignHost {
                host: options.host.clone(),
            });
        }
        if self.response.is_empty() {
            return Err(DocError::MissingResponse);
        }

        rewrite_hyphenated_placeholders(&mut self.endpoint, &mut self.params);

        let (verb, path) = self
            .endpoint
            .split_once(' ')
            .ok_or(DocError::MissingEndpoint)?;
        let path = path.trim();
        let url_path = path.strip_prefix(&options.base_prefix).unwrap_or(path);
        let http_verb = HttpVerb::from_token(verb)
            .ok_or_else(|| DocError::UnsupportedVerb(verb.to_lowercase()))?;

        self.params.sort_by(Parameter::doc_order);

        Ok(OperationDescriptor {
            identifier: identifier_from_title(&self.title),
            title: self.title,
            response: self.response,
            params: self.params,
            description: self.description,
            http_verb,
            url_path: url_path.to_string(),
            category: UNCATEGORIZED.to_string(),
        })
    }
}

/// Rename hyphenated URL parameters and their `{placeholder}`s together.
fn rewrite_hyphenated_placeholders(endpoint: &mut String, params: &mut [Parameter]) {
    for param in params.iter_mut().filter(|p| !p.body_param) {
        if !param.name.contains('-') {
            continue;
        }
        let renamed = param.ident();
        *endpoint = endpoint.replace(&format!("{{{}}}", param.name), &format!("{{{renamed}}}"));
        debug!("renamed URL parameter {} -> {renamed}", param.name);
        param.name = renamed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(lines: &[&str]) -> String {
        lines.join("\n")
    }

    #[test]
    fn test_minimal_snippet() {
        let text = doc(&[
            "Delete Label",
            "    Definition",
            "DELETE https://api.clubhouse.io/api/v3/labels/{label-public-id}",
            "URL Parameters",
            "Name \tDescription",
            "label-public-id Integer\tRequired. The unique ID of the Label.",
            "Responses",
            "Code \tDescription",
            "204\tNo Content",
        ]);
        let d = read_api_doc(&text, &ParseOptions::default()).unwrap();
        assert_eq!(d.identifier, "deleteLabel");
        assert_eq!(d.http_verb, HttpVerb::Delete);
        assert_eq!(d.url_path, "/labels/{label_public_id}");
        assert_eq!(d.params.len(), 1);
        assert_eq!(d.params[0].name, "label_public_id");
        assert!(d.is_void());
        assert_eq!(d.category, UNCATEGORIZED);
    }

    #[test]
    fn test_blank_lines_do_not_change_state() {
        let text = doc(&[
            "",
            "   ",
            "Get Member Info",
            "",
            "Returns information about the authenticated member.",
            "",
            "    Definition",
            "",
            "GET https://api.clubhouse.io/api/v3/member",
            "Responses",
            "200\tMemberInfo",
        ]);
        let d = read_api_doc(&text, &ParseOptions::default()).unwrap();
        assert_eq!(d.title, "Get Member Info");
        assert_eq!(
            d.description,
            vec!["Returns information about the authenticated member."]
        );
        assert!(d.params.is_empty());
    }

    #[test]
    fn test_marker_before_title_means_no_title() {
        let text = doc(&[
            "    Definition",
            "GET https://api.clubhouse.io/api/v3/member",
            "Responses",
            "200\tMemberInfo",
        ]);
        assert_eq!(
            read_api_doc(&text, &ParseOptions::default()),
            Err(DocError::MissingTitle)
        );
    }

    #[test]
    fn test_only_first_line_is_title() {
        let text = doc(&[
            "Get Member Info",
            "Get Member Info Again",
            "    Definition",
            "GET https://api.clubhouse.io/api/v3/member",
            "Responses",
            "200\tMemberInfo",
        ]);
        let d = read_api_doc(&text, &ParseOptions::default()).unwrap();
        assert_eq!(d.title, "Get Member Info");
        assert_eq!(d.description, vec!["Get Member Info Again"]);
    }

    #[test]
    fn test_response_row_after_title_is_description() {
        let text = doc(&[
            "Get Member Info",
            "200\tMemberInfo",
            "    Definition",
            "GET https://api.clubhouse.io/api/v3/member",
            "Responses",
            "200\tMemberInfo",
        ]);
        let d = read_api_doc(&text, &ParseOptions::default()).unwrap();
        assert_eq!(d.description, vec!["200\tMemberInfo"]);
    }

    #[test]
    fn test_body_params_keep_hyphens_in_name() {
        let text = doc(&[
            "Create Thing",
            "    Definition",
            "POST https://api.clubhouse.io/api/v3/things",
            "Body Parameters",
            "external-id String\tAn external ID.",
            "Responses",
            "201\tThing",
        ]);
        let d = read_api_doc(&text, &ParseOptions::default()).unwrap();
        assert_eq!(d.params[0].name, "external-id");
        assert_eq!(d.params[0].ident(), "external_id");
        assert!(d.params[0].body_param);
    }

    #[test]
    fn test_hyphen_rewrite_only_touches_matching_placeholder() {
        let mut endpoint = "GET https://h/a/{a-b}/c/{a-b}/{c-d}".to_string();
        let mut params = vec![Parameter {
            name: "a-b".to_string(),
            type_name: "int".to_string(),
            desc: String::new(),
            required: true,
            body_param: false,
        }];
        rewrite_hyphenated_placeholders(&mut endpoint, &mut params);
        assert_eq!(endpoint, "GET https://h/a/{a_b}/c/{a_b}/{c-d}");
        assert_eq!(params[0].name, "a_b");
    }
}
