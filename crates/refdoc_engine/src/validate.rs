/* 📖 # Why collect every authoring problem instead of stopping at the first?

Registries are written by hand. Reporting one mistake per run turns a batch of typos
into a tedious edit-run loop, so validation walks the whole registry and returns a list.
An empty list means the registry is safe to render.
*/

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use refdoc_base::RefdocError;

use crate::registry::{Endpoint, Parameter, Service};

static SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug regex is valid"));

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}/]*)\}").expect("placeholder regex is valid"));

/// Returns true if `id` can be used verbatim as a navigation anchor.
pub fn is_slug(id: &str) -> bool {
    SLUG.is_match(id)
}

/// Placeholder names in a path template, e.g. `["id"]` for `/areas/{id}/`.
pub fn path_placeholders(path: &str) -> Vec<&str> {
    PLACEHOLDER
        .captures_iter(path)
        .filter_map(|captures| captures.get(1))
        .map(|name| name.as_str())
        .collect()
}

/// Checks a list of services for authoring errors.
pub(crate) fn check_services(services: &[Service]) -> Vec<RefdocError> {
    let mut problems = Vec::new();
    let mut service_ids: HashMap<&str, usize> = HashMap::new();

    for (service_index, service) in services.iter().enumerate() {
        let location = format!("services[{}] ({})", service_index, service.id);

        if !is_slug(&service.id) {
            problems.push(RefdocError::authoring(
                &location,
                format!(
                    "service id '{}' must be lowercase letters and digits separated by single hyphens",
                    service.id
                ),
            ));
        }
        match service_ids.entry(service.id.as_str()) {
            Entry::Occupied(first) => problems.push(RefdocError::authoring(
                &location,
                format!(
                    "duplicate service id '{}', first defined at services[{}]",
                    service.id,
                    first.get()
                ),
            )),
            Entry::Vacant(slot) => {
                slot.insert(service_index);
            }
        }
        if service.name.trim().is_empty() {
            problems.push(RefdocError::authoring(&location, "service name is empty"));
        }

        for (endpoint_index, endpoint) in service.endpoints.iter().enumerate() {
            let endpoint_location = format!(
                "services[{}].endpoints[{}] ({} {})",
                service_index, endpoint_index, endpoint.method, endpoint.path
            );
            check_endpoint(endpoint, &endpoint_location, &mut problems);
        }
    }

    problems
}

fn check_endpoint(endpoint: &Endpoint, location: &str, problems: &mut Vec<RefdocError>) {
    if !endpoint.path.starts_with('/') {
        problems.push(RefdocError::authoring(location, "path must start with '/'"));
    }
    let stripped = PLACEHOLDER.replace_all(&endpoint.path, "");
    if stripped.contains(['{', '}']) {
        problems.push(RefdocError::authoring(
            location,
            "path contains an unbalanced or nested placeholder brace",
        ));
    }
    if path_placeholders(&endpoint.path)
        .iter()
        .any(|name| name.trim().is_empty())
    {
        problems.push(RefdocError::authoring(location, "path contains an empty placeholder"));
    }
    if endpoint.response.is_empty() {
        problems.push(RefdocError::authoring(
            location,
            "response must document at least one field",
        ));
    }

    let sections: [(&str, &[Parameter]); 3] = [
        ("pathParameters", endpoint.path_params()),
        ("parameters", endpoint.request_params()),
        ("response", &endpoint.response),
    ];
    for (section, parameters) in sections {
        check_parameters(parameters, &format!("{}.{}", location, section), problems);
    }
}

fn check_parameters(parameters: &[Parameter], location: &str, problems: &mut Vec<RefdocError>) {
    let mut names = HashSet::new();
    for (index, parameter) in parameters.iter().enumerate() {
        let parameter_location = format!("{}[{}]", location, index);
        if parameter.name.trim().is_empty() {
            problems.push(RefdocError::authoring(&parameter_location, "parameter name is empty"));
        } else if !names.insert(parameter.name.as_str()) {
            problems.push(RefdocError::authoring(
                &parameter_location,
                format!("duplicate parameter '{}'", parameter.name),
            ));
        }
        if parameter.type_label.trim().is_empty() {
            problems.push(RefdocError::authoring(&parameter_location, "parameter type is empty"));
        }
    }
}
