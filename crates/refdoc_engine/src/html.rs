/* 📖 # Why a hand-written HTML writer?

The exported page is a single static file with a fixed structure, so a template engine
would add little. The writer emits markup block by block from the rendered page tree and
routes every piece of registry text through `escape_html`, so descriptions and examples
can never inject markup.

Only one example pane is visible at a time: the response pane is emitted with the
`hidden` attribute and a small inline script swaps visibility when a tab is clicked.
Without scripting, the request example stays visible.
*/

use std::fmt::{self, Write};

use pulldown_cmark_escape::{FmtWriter, escape_html};
use tracing::debug;

use refdoc_base::{RefdocError, RefdocResult};

use crate::render::{
    Block, EndpointBlock, ExamplePanel, ExampleView, ParameterRow, ParameterTable,
    ReferencePage, ServiceHeader,
};

const STYLE: &str = r#"body { font-family: system-ui, sans-serif; margin: 0; display: flex; }
.api-nav { position: sticky; top: 0; align-self: flex-start; min-width: 14rem; padding: 1rem; }
.api-nav ul { list-style: none; padding: 0; }
.api-reference { flex: 1; max-width: 60rem; padding: 1rem 2rem; }
.endpoint { margin: 1.5rem 0; }
.endpoint-summary code { font-size: 1.05rem; }
.badge { display: inline-block; padding: 0.1rem 0.5rem; border-radius: 0.25rem; font-size: 0.8rem; font-weight: 600; }
.badge-read { background: #dbeafe; color: #1e40af; }
.badge-create { background: #dcfce7; color: #166534; }
.badge-replace { background: #fef3c7; color: #92400e; }
.badge-update { background: #ede9fe; color: #5b21b6; }
.badge-remove { background: #fee2e2; color: #991b1b; }
.badge-type { background: #f3f4f6; color: #374151; }
.badge-required { background: #fee2e2; color: #991b1b; }
.badge-optional { background: #f3f4f6; color: #6b7280; }
.parameter { padding: 0.4rem 0; border-bottom: 1px solid #e5e7eb; }
.example-pane { background: #111827; color: #f9fafb; padding: 1rem; overflow-x: auto; }
.example-tabs button[aria-selected="true"] { font-weight: 700; }
"#;

const TAB_SCRIPT: &str = r#"document.querySelectorAll(".examples").forEach(function (panel) {
  var tabs = panel.querySelectorAll("[role=tab]");
  tabs.forEach(function (tab) {
    tab.addEventListener("click", function () {
      tabs.forEach(function (other) {
        other.setAttribute("aria-selected", String(other === tab));
      });
      panel.querySelectorAll(".example-pane").forEach(function (pane) {
        pane.hidden = pane.dataset.pane !== tab.dataset.pane;
      });
    });
  });
});
"#;

/// Export a rendered page as a standalone HTML5 document.
pub fn export_html(page: &ReferencePage) -> RefdocResult<String> {
    let mut out = String::new();
    write_document(&mut out, page)
        .map_err(|e| Box::new(RefdocError::message(format!("Failed to write HTML: {}", e))))?;
    debug!(bytes = out.len(), "html exported");
    Ok(out)
}

fn text(out: &mut String, text: &str) -> fmt::Result {
    escape_html(FmtWriter(&mut *out), text)
}

fn write_document(out: &mut String, page: &ReferencePage) -> fmt::Result {
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    out.push_str("<title>");
    text(out, &page.title)?;
    out.push_str("</title>\n");
    if !page.description.is_empty() {
        out.push_str("<meta name=\"description\" content=\"");
        text(out, &page.description)?;
        out.push_str("\">\n");
    }
    writeln!(out, "<style>\n{}</style>", STYLE)?;
    out.push_str("</head>\n<body>\n");

    write_navigation(out, page)?;

    out.push_str("<main class=\"api-reference\">\n<header>\n<h1>");
    text(out, &page.title)?;
    out.push_str("</h1>\n");
    if !page.description.is_empty() {
        out.push_str("<p>");
        text(out, &page.description)?;
        out.push_str("</p>\n");
    }
    out.push_str("</header>\n");
    for block in &page.blocks {
        write_block(out, block)?;
    }
    out.push_str("</main>\n");

    writeln!(out, "<script>\n{}</script>", TAB_SCRIPT)?;
    out.push_str("</body>\n</html>\n");
    Ok(())
}

fn write_navigation(out: &mut String, page: &ReferencePage) -> fmt::Result {
    out.push_str("<nav class=\"api-nav\">\n<ul>\n");
    for entry in &page.navigation {
        out.push_str("<li><a href=\"");
        text(out, &entry.href)?;
        out.push_str("\">");
        text(out, &entry.label)?;
        out.push_str("</a></li>\n");
    }
    out.push_str("</ul>\n</nav>\n");
    Ok(())
}

fn write_block(out: &mut String, block: &Block) -> fmt::Result {
    match block {
        Block::ServiceHeader(header) => write_service_header(out, header),
        Block::Endpoint(endpoint) => write_endpoint(out, endpoint),
        Block::Separator => {
            out.push_str("<hr class=\"service-separator\">\n");
            Ok(())
        }
    }
}

fn write_service_header(out: &mut String, header: &ServiceHeader) -> fmt::Result {
    out.push_str("<section class=\"service-header\" id=\"");
    text(out, &header.anchor)?;
    out.push_str("\">\n<h2>");
    text(out, &header.name)?;
    out.push_str("</h2>\n<p>");
    text(out, &header.description)?;
    out.push_str("</p>\n</section>\n");
    Ok(())
}

fn write_endpoint(out: &mut String, endpoint: &EndpointBlock) -> fmt::Result {
    out.push_str("<article class=\"endpoint\">\n<div class=\"endpoint-summary\">\n");
    writeln!(
        out,
        "<span class=\"badge {}\">{}</span>",
        endpoint.badge.category.css_class(),
        endpoint.badge.label()
    )?;
    out.push_str("<code class=\"endpoint-path\">");
    text(out, &endpoint.path)?;
    out.push_str("</code>\n<p>");
    text(out, &endpoint.description)?;
    out.push_str("</p>\n</div>\n");

    for table in endpoint.tables() {
        write_table(out, table)?;
    }
    write_examples(out, &endpoint.examples)?;
    out.push_str("</article>\n");
    Ok(())
}

fn write_table(out: &mut String, table: &ParameterTable) -> fmt::Result {
    writeln!(
        out,
        "<section class=\"parameter-table {}\">\n<h3>{}</h3>",
        table.kind.css_class(),
        table.kind.heading()
    )?;
    for row in &table.rows {
        write_row(out, row)?;
    }
    out.push_str("</section>\n");
    Ok(())
}

fn write_row(out: &mut String, row: &ParameterRow) -> fmt::Result {
    out.push_str("<div class=\"parameter\">\n<code class=\"parameter-name\">");
    text(out, &row.name)?;
    out.push_str("</code>\n<span class=\"badge badge-type\">");
    text(out, &row.type_label)?;
    out.push_str("</span>\n");
    let label = row.requirement.label();
    writeln!(out, "<span class=\"badge badge-{}\">{}</span>", label, label)?;
    if let Some(description) = &row.description {
        out.push_str("<p class=\"parameter-description\">");
        text(out, description)?;
        out.push_str("</p>\n");
    }
    out.push_str("</div>\n");
    Ok(())
}

fn write_examples(out: &mut String, examples: &ExamplePanel) -> fmt::Result {
    writeln!(
        out,
        "<div class=\"examples\">\n<div class=\"example-tabs\" role=\"tablist\">"
    )?;
    for view in ExampleView::ALL {
        writeln!(
            out,
            "<button type=\"button\" role=\"tab\" data-pane=\"{}\" aria-selected=\"{}\">{}</button>",
            view.key(),
            examples.is_visible_by_default(view),
            view.label()
        )?;
    }
    out.push_str("</div>\n");
    for view in ExampleView::ALL {
        let hidden = if examples.is_visible_by_default(view) {
            ""
        } else {
            " hidden"
        };
        write!(
            out,
            "<pre class=\"example-pane\" data-pane=\"{}\"{}><code>",
            view.key(),
            hidden
        )?;
        text(out, examples.content(view))?;
        out.push_str("</code></pre>\n");
    }
    out.push_str("</div>\n");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::HttpMethod;
    use crate::registry::tests::{endpoint, param, sample_registry};
    use crate::render::{PageOptions, render_endpoint, render_page};
    use expect_test::expect;

    fn endpoint_html(endpoint: &EndpointBlock) -> String {
        let mut out = String::new();
        write_endpoint(&mut out, endpoint).unwrap();
        out
    }

    #[test]
    fn test_endpoint_markup() {
        let mut get = endpoint(HttpMethod::Get, "/api/v1/areas/{id}/");
        get.path_parameters = Some(vec![param("id", "string", true)]);
        get.response[0].description = Some("Area identifier".to_string());

        expect![[r#"
            <article class="endpoint">
            <div class="endpoint-summary">
            <span class="badge badge-read">GET</span>
            <code class="endpoint-path">/api/v1/areas/{id}/</code>
            <p>GET /api/v1/areas/{id}/</p>
            </div>
            <section class="parameter-table path-parameters">
            <h3>Path Parameters</h3>
            <div class="parameter">
            <code class="parameter-name">id</code>
            <span class="badge badge-type">string</span>
            <span class="badge badge-required">required</span>
            </div>
            </section>
            <section class="parameter-table response">
            <h3>Response</h3>
            <div class="parameter">
            <code class="parameter-name">id</code>
            <span class="badge badge-type">string</span>
            <span class="badge badge-required">required</span>
            <p class="parameter-description">Area identifier</p>
            </div>
            </section>
            <div class="examples">
            <div class="example-tabs" role="tablist">
            <button type="button" role="tab" data-pane="curl" aria-selected="true">cURL</button>
            <button type="button" role="tab" data-pane="response" aria-selected="false">Response</button>
            </div>
            <pre class="example-pane" data-pane="curl"><code>curl -X GET &#39;https://api.example.com/api/v1/areas/{id}/&#39;</code></pre>
            <pre class="example-pane" data-pane="response" hidden><code>{&quot;id&quot;: &quot;x&quot;}</code></pre>
            </div>
            </article>
        "#]]
        .assert_eq(&endpoint_html(&render_endpoint(&get)));
    }

    #[test]
    fn test_optional_parameter_markup() {
        let mut post = endpoint(HttpMethod::Post, "/api/v1/areas/");
        post.parameters = Some(vec![param("floor", "integer", false)]);

        let html = endpoint_html(&render_endpoint(&post));
        assert!(html.contains("<span class=\"badge badge-create\">POST</span>"));
        assert!(html.contains("<h3>Parameters</h3>"));
        assert!(html.contains("<span class=\"badge badge-optional\">optional</span>"));
        assert!(!html.contains("Path Parameters"));
    }

    #[test]
    fn test_registry_text_is_escaped() {
        let mut post = endpoint(HttpMethod::Post, "/api/v1/areas/");
        post.description = "Creates <script>alert(1)</script> & more".to_string();

        let html = endpoint_html(&render_endpoint(&post));
        assert!(html.contains("Creates &lt;script&gt;alert(1)&lt;/script&gt; &amp; more"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_sample_page_document() {
        let registry = sample_registry();
        let page = render_page(
            &registry,
            &PageOptions {
                title: "API Reference".to_string(),
                description: "Complete reference documentation for all API endpoints."
                    .to_string(),
                base_url: "/api-reference".to_string(),
            },
        );
        let html = export_html(&page).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>\n"));
        assert!(html.ends_with("</html>\n"));
        assert!(html.contains("<title>API Reference</title>"));
        assert!(html.contains("<li><a href=\"/api-reference#census\">Census</a></li>"));
        assert!(html.contains("<section class=\"service-header\" id=\"er-buffer\">"));
        assert_eq!(
            html.matches("<hr class=\"service-separator\">").count(),
            registry.len() - 1
        );
        assert_eq!(
            html.matches("<article class=\"endpoint\">").count(),
            registry.endpoint_count()
        );
        assert_eq!(
            html.matches("data-pane=\"response\" hidden>").count(),
            registry.endpoint_count()
        );
        assert_eq!(html.matches("<script>").count(), 1);
    }

    #[test]
    fn test_empty_page_document() {
        let page = ReferencePage {
            title: "Empty".to_string(),
            description: String::new(),
            navigation: vec![],
            blocks: vec![],
        };
        let html = export_html(&page).unwrap();
        assert!(html.contains("<nav class=\"api-nav\">\n<ul>\n</ul>\n</nav>\n"));
        assert!(!html.contains("<meta name=\"description\""));
        assert!(!html.contains("<article"));
    }
}
