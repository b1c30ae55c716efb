//! # Pages
//!
//! Server-rendered HTML for browsing and creating products.

use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, Redirect},
    Form,
};
use catalog_core::validation::{
    parse_price_text, validate_name, validate_price, NAME_FIELD, PRICE_FIELD,
};
use catalog_core::{Product, ProductDraft, ProductInput, ValidationErrors};
use serde::Deserialize;
use tracing::{info, instrument, warn};

/// Fields posted by the create form
#[derive(Debug, Default, Deserialize)]
pub struct ProductForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: String,
}

impl ProductForm {
    /// Validate form text. An unparseable price is reported instead of the
    /// range check.
    pub fn to_draft(&self) -> Result<ProductDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(v) = validate_name(Some(&self.name)) {
            errors.push(v);
        }

        let price = match parse_price_text(&self.price) {
            Ok(price) => {
                if let Err(v) = validate_price(price) {
                    errors.push(v);
                }
                price
            }
            Err(v) => {
                errors.push(v);
                None
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        ProductInput {
            id: None,
            name: Some(self.name.clone()),
            price,
        }
        .validate()
    }
}

/// Product list page
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(&state.catalog.list()))
}

/// Empty create form
pub async fn create_form() -> Html<String> {
    Html(render_create(&ProductForm::default(), &ValidationErrors::new()))
}

/// Handle create form submission
#[instrument(skip(state, form))]
pub async fn create_submit(
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Result<Redirect, (StatusCode, Html<String>)> {
    match form.to_draft() {
        Ok(draft) => {
            let product = state.catalog.add(draft);
            info!("Created product {} from form: {}", product.id, product.name);
            Ok(Redirect::to("/products"))
        }
        Err(errors) => {
            warn!("Rejected product form: {}", errors);
            Err((StatusCode::BAD_REQUEST, Html(render_create(&form, &errors))))
        }
    }
}

// =============================================================================
// Rendering
// =============================================================================

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title} - Product Catalog</title>
</head>
<body style="font-family: system-ui; max-width: 720px; margin: 40px auto; padding: 0 16px;">
{body}
</body>
</html>
"#,
        title = escape(title),
        body = body
    )
}

fn render_index(products: &[Product]) -> String {
    let mut body = String::from("<h1>Products</h1>\n<p><a href=\"/products/create\">Create New</a></p>\n");

    if products.is_empty() {
        body.push_str("<p>No products yet.</p>\n");
    } else {
        body.push_str("<table>\n<thead><tr><th>Id</th><th>Name</th><th>Price</th></tr></thead>\n<tbody>\n");
        for p in products {
            body.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                p.id,
                escape(&p.name),
                p.price.display()
            ));
        }
        body.push_str("</tbody>\n</table>\n");
    }

    layout("Products", &body)
}

fn field_messages(errors: &ValidationErrors, field: &str) -> String {
    errors
        .messages_for(field)
        .map(|m| format!("<span class=\"field-error\" style=\"color: #b00;\">{}</span>", escape(m)))
        .collect::<Vec<_>>()
        .join("<br>")
}

fn render_create(form: &ProductForm, errors: &ValidationErrors) -> String {
    let summary = if errors.is_empty() {
        String::new()
    } else {
        let items: String = errors
            .iter()
            .map(|v| format!("<li>{}</li>", escape(&v.message)))
            .collect();
        format!("<ul class=\"validation-summary\" style=\"color: #b00;\">{}</ul>\n", items)
    };

    let body = format!(
        r#"<h1>Create Product</h1>
{summary}<form method="post" action="/products/create">
    <p>
        <label for="name">Name</label><br>
        <input id="name" name="name" maxlength="100" value="{name}"><br>
        {name_errors}
    </p>
    <p>
        <label for="price">Price</label><br>
        <input id="price" name="price" value="{price}"><br>
        {price_errors}
    </p>
    <p><button type="submit">Create</button></p>
</form>
<p><a href="/products">Back to List</a></p>
"#,
        summary = summary,
        name = escape(&form.name),
        name_errors = field_messages(errors, NAME_FIELD),
        price = escape(&form.price),
        price_errors = field_messages(errors, PRICE_FIELD),
    );

    layout("Create Product", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::{Price, ProductId};

    fn form(name: &str, price: &str) -> ProductForm {
        ProductForm {
            name: name.to_string(),
            price: price.to_string(),
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_form_to_draft() {
        let draft = form("Widget", "9.99").to_draft().unwrap();
        assert_eq!(draft.name(), "Widget");
        assert_eq!(draft.price().cents(), 999);
    }

    #[test]
    fn test_form_reports_unparseable_price_once() {
        let errors = form("Widget", "cheap").to_draft().unwrap_err();
        let messages: Vec<&str> = errors.messages_for("Price").collect();
        assert_eq!(messages, vec!["The value 'cheap' is not valid for Price."]);
    }

    #[test]
    fn test_form_blank_fields_are_required() {
        let errors = form("", "").to_draft().unwrap_err();
        assert_eq!(errors.fields(), vec!["Name", "Price"]);
        assert_eq!(errors.messages_for("Price").next(), Some("Price is required"));
    }

    #[test]
    fn test_render_index_escapes_names() {
        let html = render_index(&[Product {
            id: ProductId::new(1),
            name: "<script>".to_string(),
            price: Price::new(9.99),
        }]);

        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("$9.99"));
    }

    #[test]
    fn test_render_index_empty() {
        assert!(render_index(&[]).contains("No products yet."));
    }

    #[test]
    fn test_render_create_keeps_values_and_errors() {
        let submitted = form("Widget", "0");
        let errors = submitted.to_draft().unwrap_err();
        let html = render_create(&submitted, &errors);

        assert!(html.contains(r#"value="Widget""#));
        assert!(html.contains("Price must be between 0.01 and 999999.99"));
    }
}
