pub mod config;
pub mod html;
pub mod nav;
pub mod registry;
pub mod render;
pub mod site;
pub mod validate;

pub use config::{CONFIG_FILE_NAME, Config, OutputConfig, load_config, parse_config};
pub use html::export_html;
pub use nav::{NavEntry, navigation};
pub use registry::{
    Endpoint, HttpMethod, Parameter, PlaceholderGap, Registry, RegistryDocument, RegistryFormat,
    Service, load_registry, parse_registry,
};
pub use render::{
    BadgeCategory, Block, EndpointBlock, ExamplePanel, ExampleView, MethodBadge, PageOptions,
    ParameterRow, ParameterTable, ReferencePage, Requirement, ServiceHeader, TableKind,
    render_endpoint, render_page, render_service,
};
pub use site::{BuildReport, build_site, render_outputs};
