/* 📖 # Why render into a typed page tree instead of straight to HTML?

The renderer decides *what* appears on the reference page: which sections exist, in
which order, with which badge and requirement state. The HTML exporter only decides how
those blocks look. Keeping the decisions in plain data makes them directly testable
(a test can count parameter sections without parsing markup) and lets the same tree be
dumped as JSON for other display layers.

Optional request sections are `Option<ParameterTable>`: a table is only ever built from
a non-empty parameter list, so "absent" and "declared but empty" collapse into `None`
and no empty table can reach the output.
*/

use serde::Serialize;

use crate::config::Config;
use crate::nav::{NavEntry, navigation};
use crate::registry::{Endpoint, HttpMethod, Parameter, Registry, Service};

/// Page-level settings for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOptions {
    pub title: String,
    pub description: String,
    pub base_url: String,
}

impl From<&Config> for PageOptions {
    fn from(config: &Config) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            base_url: config.base_url.clone(),
        }
    }
}

/// The complete rendered reference page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferencePage {
    pub title: String,
    pub description: String,
    pub navigation: Vec<NavEntry>,
    pub blocks: Vec<Block>,
}

impl ReferencePage {
    /// Endpoint blocks in page order.
    pub fn endpoint_blocks(&self) -> impl Iterator<Item = &EndpointBlock> + '_ {
        self.blocks.iter().filter_map(|block| match block {
            Block::Endpoint(endpoint) => Some(endpoint),
            Block::ServiceHeader(_) | Block::Separator => None,
        })
    }
}

/// A top-level block of the reference page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    ServiceHeader(ServiceHeader),
    Endpoint(EndpointBlock),
    Separator,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceHeader {
    /// Anchor id, equal to the service id.
    pub anchor: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointBlock {
    pub badge: MethodBadge,
    pub path: String,
    pub description: String,
    pub path_parameters: Option<ParameterTable>,
    pub parameters: Option<ParameterTable>,
    pub response: ParameterTable,
    pub examples: ExamplePanel,
}

impl EndpointBlock {
    /// Request-side tables that are present, path parameters first.
    pub fn request_tables(&self) -> impl Iterator<Item = &ParameterTable> + '_ {
        self.path_parameters.iter().chain(self.parameters.iter())
    }

    /// All tables in display order, ending with the response table.
    pub fn tables(&self) -> impl Iterator<Item = &ParameterTable> + '_ {
        self.request_tables().chain(std::iter::once(&self.response))
    }
}

/// Method badge with its display category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MethodBadge {
    pub method: HttpMethod,
    pub category: BadgeCategory,
}

impl MethodBadge {
    pub fn new(method: HttpMethod) -> Self {
        Self {
            method,
            category: BadgeCategory::for_method(method),
        }
    }

    pub fn label(&self) -> &'static str {
        self.method.as_str()
    }
}

/// Visual category of a method badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeCategory {
    Read,
    Create,
    Replace,
    Update,
    Remove,
}

impl BadgeCategory {
    // Exhaustive on purpose: a new HttpMethod must pick a category here.
    pub fn for_method(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => BadgeCategory::Read,
            HttpMethod::Post => BadgeCategory::Create,
            HttpMethod::Put => BadgeCategory::Replace,
            HttpMethod::Patch => BadgeCategory::Update,
            HttpMethod::Delete => BadgeCategory::Remove,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            BadgeCategory::Read => "badge-read",
            BadgeCategory::Create => "badge-create",
            BadgeCategory::Replace => "badge-replace",
            BadgeCategory::Update => "badge-update",
            BadgeCategory::Remove => "badge-remove",
        }
    }
}

/// Which list of an endpoint a table documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    PathParameters,
    Parameters,
    Response,
}

impl TableKind {
    pub fn heading(self) -> &'static str {
        match self {
            TableKind::PathParameters => "Path Parameters",
            TableKind::Parameters => "Parameters",
            TableKind::Response => "Response",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            TableKind::PathParameters => "path-parameters",
            TableKind::Parameters => "parameters",
            TableKind::Response => "response",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterTable {
    pub kind: TableKind,
    pub rows: Vec<ParameterRow>,
}

impl ParameterTable {
    /// Builds a table, or `None` when there is nothing to show.
    pub fn from_parameters(kind: TableKind, parameters: &[Parameter]) -> Option<Self> {
        if parameters.is_empty() {
            return None;
        }
        Some(Self {
            kind,
            rows: parameters.iter().map(ParameterRow::from).collect(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterRow {
    pub name: String,
    pub type_label: String,
    pub requirement: Requirement,
    pub description: Option<String>,
}

impl From<&Parameter> for ParameterRow {
    fn from(parameter: &Parameter) -> Self {
        Self {
            name: parameter.name.clone(),
            type_label: parameter.type_label.clone(),
            requirement: Requirement::from(parameter.required),
            description: parameter.description.clone(),
        }
    }
}

/// The two display states of a parameter's `required` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    Required,
    Optional,
}

impl From<bool> for Requirement {
    fn from(required: bool) -> Self {
        if required {
            Requirement::Required
        } else {
            Requirement::Optional
        }
    }
}

impl Requirement {
    pub fn label(self) -> &'static str {
        match self {
            Requirement::Required => "required",
            Requirement::Optional => "optional",
        }
    }
}

/// The two mutually exclusive views of the example panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExampleView {
    Request,
    Response,
}

impl ExampleView {
    pub const ALL: [ExampleView; 2] = [ExampleView::Request, ExampleView::Response];

    pub fn label(self) -> &'static str {
        match self {
            ExampleView::Request => "cURL",
            ExampleView::Response => "Response",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            ExampleView::Request => "curl",
            ExampleView::Response => "response",
        }
    }
}

/// Literal request and response examples, one visible at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExamplePanel {
    pub request: String,
    pub response: String,
    pub default_view: ExampleView,
}

impl ExamplePanel {
    pub fn content(&self, view: ExampleView) -> &str {
        match view {
            ExampleView::Request => &self.request,
            ExampleView::Response => &self.response,
        }
    }

    pub fn is_visible_by_default(&self, view: ExampleView) -> bool {
        self.default_view == view
    }
}

/// Render the whole registry into a reference page.
///
/// Pure function of its inputs: rendering the same registry twice yields equal pages.
pub fn render_page(registry: &Registry, options: &PageOptions) -> ReferencePage {
    let mut blocks = Vec::with_capacity(registry.len() * 2 + registry.endpoint_count());
    for (index, service) in registry.services().iter().enumerate() {
        if index > 0 {
            blocks.push(Block::Separator);
        }
        blocks.extend(render_service(service));
    }

    ReferencePage {
        title: options.title.clone(),
        description: options.description.clone(),
        navigation: navigation(registry, &options.base_url),
        blocks,
    }
}

/// Render one service: its header followed by its endpoints in order.
pub fn render_service(service: &Service) -> Vec<Block> {
    let header = Block::ServiceHeader(ServiceHeader {
        anchor: service.id.clone(),
        name: service.name.clone(),
        description: service.description.clone(),
    });
    std::iter::once(header)
        .chain(
            service
                .endpoints
                .iter()
                .map(|endpoint| Block::Endpoint(render_endpoint(endpoint))),
        )
        .collect()
}

pub fn render_endpoint(endpoint: &Endpoint) -> EndpointBlock {
    EndpointBlock {
        badge: MethodBadge::new(endpoint.method),
        path: endpoint.path.clone(),
        description: endpoint.description.clone(),
        path_parameters: ParameterTable::from_parameters(
            TableKind::PathParameters,
            endpoint.path_params(),
        ),
        parameters: ParameterTable::from_parameters(
            TableKind::Parameters,
            endpoint.request_params(),
        ),
        response: ParameterTable {
            kind: TableKind::Response,
            rows: endpoint.response.iter().map(ParameterRow::from).collect(),
        },
        examples: ExamplePanel {
            request: endpoint.curl_example.clone(),
            response: endpoint.response_example.clone(),
            default_view: ExampleView::Request,
        },
    }
}
