/* 📖 # Why is the registry an explicitly constructed value?

The registry is the whole catalog of documented services. It is built exactly once,
validated as part of construction, and then handed by reference to the renderer.
There is no global table to initialise in the right order and no way to observe a
half-validated registry: `Registry::new` either returns a fully checked value or a
fatal authoring error listing everything that is wrong.
*/

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use refdoc_base::{FilePath, PalHandle, RefdocError, RefdocResult, ResultExt};

use crate::validate;

/// HTTP method of a documented endpoint.
///
/// Deserializing any other method name fails, so an unsupported method can never reach
/// the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// All supported methods, in display order.
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
    ];

    /// Returns the canonical upper-case method name.
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single documented field of a request or response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Parameter {
    pub name: String,
    /// Free-text type label such as `string` or `datetime`. Display only.
    #[serde(rename = "type")]
    pub type_label: String,
    pub required: bool,
    #[serde(default)]
    pub description: Option<String>,
}

/// One documented HTTP operation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Endpoint {
    pub method: HttpMethod,
    /// URL template, e.g. `/api/v1/areas/{id}/`.
    pub path: String,
    pub description: String,
    #[serde(default)]
    pub path_parameters: Option<Vec<Parameter>>,
    /// Query or body fields.
    #[serde(default)]
    pub parameters: Option<Vec<Parameter>>,
    pub response: Vec<Parameter>,
    pub curl_example: String,
    pub response_example: String,
}

impl Endpoint {
    /// Declared path parameters; empty when the field is absent.
    pub fn path_params(&self) -> &[Parameter] {
        self.path_parameters.as_deref().unwrap_or_default()
    }

    /// Declared query/body parameters; empty when the field is absent.
    pub fn request_params(&self) -> &[Parameter] {
        self.parameters.as_deref().unwrap_or_default()
    }

    /// Placeholder names appearing in the path template, in order.
    pub fn placeholders(&self) -> Vec<&str> {
        validate::path_placeholders(&self.path)
    }
}

/// A named group of related endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Service {
    /// Slug used as the navigation anchor.
    pub id: String,
    pub name: String,
    pub description: String,
    pub endpoints: Vec<Endpoint>,
}

/// On-disk shape of a registry document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryDocument {
    pub services: Vec<Service>,
}

/// A path placeholder without a matching path parameter entry.
///
/// This is a documentation-quality finding, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderGap {
    pub service_id: String,
    pub method: HttpMethod,
    pub path: String,
    pub placeholder: String,
}

impl fmt::Display for PlaceholderGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}): placeholder '{{{}}}' has no path parameter entry",
            self.method, self.path, self.service_id, self.placeholder
        )
    }
}

/// The validated, immutable catalog of services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    services: Vec<Service>,
}

impl Registry {
    /// Validate `services` and build a registry from them.
    ///
    /// All authoring problems are collected and returned together as a single
    /// [`refdoc_base::ErrorKind::Multiple`] error.
    pub fn new(services: Vec<Service>) -> RefdocResult<Self> {
        let problems = validate::check_services(&services);
        if !problems.is_empty() {
            return Err(Box::new(
                RefdocError::multiple(problems).context("Registry validation failed"),
            ));
        }
        Ok(Self { services })
    }

    /// Services in registry order.
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// Looks up a service by its id.
    pub fn service(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|service| service.id == id)
    }

    /// All endpoints, flattened in service order and then endpoint order.
    pub fn endpoints(&self) -> impl Iterator<Item = &Endpoint> + '_ {
        self.services
            .iter()
            .flat_map(|service| service.endpoints.iter())
    }

    /// All endpoints paired with the service that owns them, in flattened order.
    pub fn endpoints_by_service(&self) -> impl Iterator<Item = (&Service, &Endpoint)> + '_ {
        self.services.iter().flat_map(|service| {
            service
                .endpoints
                .iter()
                .map(move |endpoint| (service, endpoint))
        })
    }

    /// Total number of endpoints across all services.
    pub fn endpoint_count(&self) -> usize {
        self.services
            .iter()
            .map(|service| service.endpoints.len())
            .sum()
    }

    /// Number of services.
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Returns true if the registry documents no services.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Path placeholders that lack a matching path parameter entry.
    pub fn placeholder_gaps(&self) -> Vec<PlaceholderGap> {
        self.endpoints_by_service()
            .flat_map(|(service, endpoint)| {
                endpoint
                    .placeholders()
                    .into_iter()
                    .filter(|placeholder| {
                        !endpoint
                            .path_params()
                            .iter()
                            .any(|param| param.name == *placeholder)
                    })
                    .map(|placeholder| PlaceholderGap {
                        service_id: service.id.clone(),
                        method: endpoint.method,
                        path: endpoint.path.clone(),
                        placeholder: placeholder.to_string(),
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

impl TryFrom<RegistryDocument> for Registry {
    type Error = Box<RefdocError>;

    fn try_from(document: RegistryDocument) -> RefdocResult<Self> {
        Registry::new(document.services)
    }
}

/// Serialization format of a registry document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryFormat {
    Json,
    Yaml,
}

impl RegistryFormat {
    /// Picks the format from the file extension.
    pub fn from_path(path: &FilePath) -> RefdocResult<Self> {
        match path.extension() {
            Some("json") => Ok(RegistryFormat::Json),
            Some("yaml") | Some("yml") => Ok(RegistryFormat::Yaml),
            other => Err(Box::new(RefdocError::authoring(
                path.to_string(),
                format!(
                    "unsupported registry extension {:?}, expected .json, .yaml or .yml",
                    other.unwrap_or("")
                ),
            ))),
        }
    }
}

/// Parse and validate a registry document.
pub fn parse_registry(text: &str, format: RegistryFormat) -> RefdocResult<Registry> {
    let document: RegistryDocument = match format {
        RegistryFormat::Json => serde_json::from_str(text)
            .map_err(|e| Box::new(RefdocError::message(e.to_string())))?,
        RegistryFormat::Yaml => serde_yaml::from_str(text)
            .map_err(|e| Box::new(RefdocError::message(e.to_string())))?,
    };
    Registry::try_from(document)
}

/// Load, parse and validate the registry document at `path`.
///
/// Placeholder gaps are logged as warnings; they never fail loading.
#[instrument(skip(pal), fields(path = %path))]
pub fn load_registry(pal: &PalHandle, path: &FilePath) -> RefdocResult<Registry> {
    let format = RegistryFormat::from_path(path)?;
    let text = pal
        .read_file_to_string(path)
        .with_context(|| format!("Failed to read registry {}", path))?;
    let registry =
        parse_registry(&text, format).with_context(|| format!("Invalid registry {}", path))?;

    for gap in registry.placeholder_gaps() {
        warn!("{}", gap);
    }
    info!(
        services = registry.len(),
        endpoints = registry.endpoint_count(),
        "registry loaded"
    );
    Ok(registry)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use refdoc_base::{ErrorKind, MockPal};

    pub(crate) const SAMPLE_REGISTRY: &str = include_str!("../../../data/api-endpoints.json");

    pub(crate) fn sample_registry() -> Registry {
        parse_registry(SAMPLE_REGISTRY, RegistryFormat::Json).unwrap()
    }

    pub(crate) fn param(name: &str, type_label: &str, required: bool) -> Parameter {
        Parameter {
            name: name.to_string(),
            type_label: type_label.to_string(),
            required,
            description: None,
        }
    }

    pub(crate) fn endpoint(method: HttpMethod, path: &str) -> Endpoint {
        Endpoint {
            method,
            path: path.to_string(),
            description: format!("{} {}", method, path),
            path_parameters: None,
            parameters: None,
            response: vec![param("id", "string", true)],
            curl_example: format!("curl -X {} 'https://api.example.com{}'", method, path),
            response_example: "{\"id\": \"x\"}".to_string(),
        }
    }

    pub(crate) fn service(id: &str, endpoints: Vec<Endpoint>) -> Service {
        Service {
            id: id.to_string(),
            name: id.to_uppercase(),
            description: format!("Manage {}", id),
            endpoints,
        }
    }

    #[test]
    fn test_sample_registry_loads() {
        let registry = sample_registry();
        let ids: Vec<&str> = registry.services().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "parent-company",
                "area",
                "subarea",
                "er-buffer",
                "census",
                "ancillary"
            ]
        );
        assert_eq!(registry.endpoint_count(), 31);
        assert!(registry.placeholder_gaps().is_empty());
    }

    #[test]
    fn test_sample_registry_every_response_documented() {
        let registry = sample_registry();
        for endpoint in registry.endpoints() {
            assert!(
                !endpoint.response.is_empty(),
                "{} {} has no response fields",
                endpoint.method,
                endpoint.path
            );
        }
    }

    #[test]
    fn test_sample_delete_endpoints_return_success_and_message() {
        let registry = sample_registry();
        for endpoint in registry
            .endpoints()
            .filter(|e| e.method == HttpMethod::Delete)
        {
            let names: Vec<&str> = endpoint.response.iter().map(|p| p.name.as_str()).collect();
            assert_eq!(names, ["success", "message"], "{}", endpoint.path);
        }
    }

    #[test]
    fn test_flatten_preserves_service_then_endpoint_order() {
        let registry = sample_registry();
        let flattened: Vec<&Endpoint> = registry.endpoints().collect();
        let concatenated: Vec<&Endpoint> = registry
            .services()
            .iter()
            .flat_map(|s| s.endpoints.iter())
            .collect();
        assert_eq!(flattened, concatenated);

        let parent_company = registry.service("parent-company").unwrap();
        let area = registry.service("area").unwrap();
        assert_eq!(parent_company.endpoints.len(), 6);
        assert_eq!(area.endpoints.len(), 5);
        let expected: Vec<&Endpoint> = parent_company
            .endpoints
            .iter()
            .chain(area.endpoints.iter())
            .collect();
        assert_eq!(&flattened[..11], &expected[..]);
    }

    #[test]
    fn test_endpoints_by_service_pairs_owner() {
        let registry = Registry::new(vec![
            service("alpha", vec![endpoint(HttpMethod::Get, "/a/")]),
            service(
                "beta",
                vec![
                    endpoint(HttpMethod::Get, "/b/"),
                    endpoint(HttpMethod::Post, "/b/"),
                ],
            ),
        ])
        .unwrap();

        let pairs: Vec<(&str, String)> = registry
            .endpoints_by_service()
            .map(|(s, e)| (s.id.as_str(), format!("{} {}", e.method, e.path)))
            .collect();
        assert_eq!(
            pairs,
            [
                ("alpha", "GET /a/".to_string()),
                ("beta", "GET /b/".to_string()),
                ("beta", "POST /b/".to_string()),
            ]
        );
    }

    #[test]
    fn test_service_lookup() {
        let registry = sample_registry();
        assert_eq!(registry.service("census").unwrap().name, "Census");
        assert!(registry.service("Census").is_none());
    }

    #[test]
    fn test_census_patch_parameters() {
        let registry = sample_registry();
        let patch = registry
            .service("census")
            .unwrap()
            .endpoints
            .iter()
            .find(|e| e.method == HttpMethod::Patch)
            .unwrap();

        assert_eq!(patch.path, "/api/v1/census/{id}/");
        assert_eq!(patch.placeholders(), ["id"]);
        assert_eq!(patch.path_params().len(), 1);
        assert_eq!(patch.path_params()[0].name, "id");
        let request: Vec<(&str, bool)> = patch
            .request_params()
            .iter()
            .map(|p| (p.name.as_str(), p.required))
            .collect();
        assert_eq!(request, [("census", false), ("am_policing_time", false)]);
    }

    #[test]
    fn test_unknown_method_fails_loading() {
        let text = r#"{
            "services": [{
                "id": "area",
                "name": "Area",
                "description": "Areas",
                "endpoints": [{
                    "method": "OPTIONS",
                    "path": "/api/v1/areas/",
                    "description": "Preflight",
                    "response": [{"name": "id", "type": "string", "required": true}],
                    "curlExample": "curl -X OPTIONS",
                    "responseExample": "{}"
                }]
            }]
        }"#;
        let err = parse_registry(text, RegistryFormat::Json).unwrap_err();
        assert!(err.to_string().contains("unknown variant `OPTIONS`"));
    }

    #[test]
    fn test_missing_required_field_fails_loading() {
        let text = r#"{
            "services": [{
                "id": "area",
                "name": "Area",
                "description": "Areas",
                "endpoints": [{
                    "method": "GET",
                    "path": "/api/v1/areas/",
                    "description": "List areas",
                    "response": [{"name": "id", "required": true}],
                    "curlExample": "curl",
                    "responseExample": "[]"
                }]
            }]
        }"#;
        let err = parse_registry(text, RegistryFormat::Json).unwrap_err();
        assert!(err.to_string().contains("missing field `type`"));
    }

    #[test]
    fn test_misspelled_field_fails_loading() {
        let text = r#"{
            "services": [{
                "id": "area",
                "name": "Area",
                "description": "Areas",
                "endpoints": [{
                    "method": "GET",
                    "path": "/api/v1/areas/{id}/",
                    "description": "Get area",
                    "pathParams": [{"name": "id", "type": "string", "required": true}],
                    "response": [{"name": "id", "type": "string", "required": true}],
                    "curlExample": "curl",
                    "responseExample": "{}"
                }]
            }]
        }"#;
        let err = parse_registry(text, RegistryFormat::Json).unwrap_err();
        assert!(err.to_string().contains("unknown field `pathParams`"));
    }

    #[test]
    fn test_duplicate_service_id_fails_construction() {
        let err = Registry::new(vec![
            service("area", vec![endpoint(HttpMethod::Get, "/a/")]),
            service("area", vec![endpoint(HttpMethod::Get, "/b/")]),
        ])
        .unwrap_err();

        assert_eq!(err.get_context(), ["Registry validation failed"]);
        match err.kind() {
            ErrorKind::Multiple { errors } => {
                assert_eq!(errors.len(), 1);
                assert_eq!(
                    errors[0].to_string(),
                    "services[1] (area): duplicate service id 'area', first defined at services[0]"
                );
            }
            _ => panic!("Expected Multiple variant"),
        }
    }

    #[test]
    fn test_shared_route_across_services_builds() {
        let registry = Registry::new(vec![
            service("area", vec![endpoint(HttpMethod::Get, "/api/v1/health/")]),
            service("census", vec![endpoint(HttpMethod::Get, "/api/v1/health/")]),
        ])
        .unwrap();
        assert_eq!(registry.endpoint_count(), 2);
    }

    #[test]
    fn test_yaml_and_json_load_the_same_registry() {
        let yaml = r#"
services:
  - id: census
    name: Census
    description: Manage census data for areas
    endpoints:
      - method: DELETE
        path: /api/v1/census/{id}/
        description: Delete a census record.
        pathParameters:
          - name: id
            type: string
            required: true
        response:
          - name: success
            type: boolean
            required: true
          - name: message
            type: string
            required: true
        curlExample: curl -X DELETE 'https://api.example.com/api/v1/census/census_13579/'
        responseExample: '{"success": true}'
"#;
        let from_yaml = parse_registry(yaml, RegistryFormat::Yaml).unwrap();
        let json = r#"{"services": [{
            "id": "census",
            "name": "Census",
            "description": "Manage census data for areas",
            "endpoints": [{
                "method": "DELETE",
                "path": "/api/v1/census/{id}/",
                "description": "Delete a census record.",
                "pathParameters": [{"name": "id", "type": "string", "required": true}],
                "response": [
                    {"name": "success", "type": "boolean", "required": true},
                    {"name": "message", "type": "string", "required": true}
                ],
                "curlExample": "curl -X DELETE 'https://api.example.com/api/v1/census/census_13579/'",
                "responseExample": "{\"success\": true}"
            }]
        }]}"#;
        let from_json = parse_registry(json, RegistryFormat::Json).unwrap();

        assert_eq!(from_yaml, from_json);
        assert_eq!(from_yaml.services()[0].endpoints[0].method, HttpMethod::Delete);
    }

    #[test]
    fn test_placeholder_gap_reported_not_fatal() {
        let mut get = endpoint(HttpMethod::Get, "/api/v1/sites/{site_id}/areas/{id}/");
        get.path_parameters = Some(vec![param("id", "string", true)]);
        let registry = Registry::new(vec![service("area", vec![get])]).unwrap();

        let gaps = registry.placeholder_gaps();
        assert_eq!(gaps.len(), 1);
        assert_eq!(
            gaps[0].to_string(),
            "GET /api/v1/sites/{site_id}/areas/{id}/ (area): placeholder '{site_id}' has no path parameter entry"
        );
    }

    #[test]
    fn test_registry_format_from_path() {
        assert_eq!(
            RegistryFormat::from_path(&FilePath::from("data/api.json")).unwrap(),
            RegistryFormat::Json
        );
        assert_eq!(
            RegistryFormat::from_path(&FilePath::from("data/api.yml")).unwrap(),
            RegistryFormat::Yaml
        );
        let err = RegistryFormat::from_path(&FilePath::from("data/api.ts")).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Authoring { .. }));
    }

    #[test]
    fn test_load_registry_through_pal() {
        let mock = MockPal::new();
        mock.add_file(
            FilePath::from("data/api-endpoints.json"),
            SAMPLE_REGISTRY.as_bytes().to_vec(),
        );
        let pal = PalHandle::new(mock);

        let registry = load_registry(&pal, &FilePath::from("data/api-endpoints.json")).unwrap();
        assert_eq!(registry, sample_registry());
    }

    #[test]
    fn test_load_registry_attaches_path_context() {
        let mock = MockPal::new();
        mock.add_file(FilePath::from("registry.json"), b"{\"services\": 3}".to_vec());
        let pal = PalHandle::new(mock);

        let err = load_registry(&pal, &FilePath::from("registry.json")).unwrap_err();
        assert_eq!(err.get_context(), ["Invalid registry registry.json"]);
    }

    #[test]
    fn test_method_names_round_trip_through_serde() {
        for method in HttpMethod::ALL {
            let json = serde_json::to_string(&method).unwrap();
            assert_eq!(json, format!("\"{}\"", method.as_str()));
        }
    }
}
