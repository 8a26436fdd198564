//! # HTML Views
//!
//! Plain server-rendered pages. Every user-supplied string goes through
//! [`escape`] before it reaches the markup.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Planogram Catalog                                           │
//! ├───────────────┬──────────────────────────────────────────────┤
//! │ [New]         │  flash message                               │
//! │ [Planograms]  │                                              │
//! │ [Edit]        │  page body (create form / list / detail)     │
//! └───────────────┴──────────────────────────────────────────────┘
//! ```

use std::fmt::Write;

use planogram_core::{Page, PlanogramRecord, PlanogramSummary};

use crate::state::{Flash, FlashKind};

const STYLE: &str = "\
body{font-family:sans-serif;margin:0;display:flex;min-height:100vh}\
nav{width:14rem;background:#f2f2f2;padding:1rem}\
nav form{margin:0 0 .5rem}nav button{width:100%}\
nav button.active{font-weight:bold}\
main{flex:1;padding:1rem 2rem}\
.flash{padding:.5rem 1rem;margin-bottom:1rem;border-radius:4px}\
.flash.success{background:#e3f6e3}.flash.error{background:#fbe3e3}\
.row{display:flex;gap:1rem;align-items:center;border-bottom:1px solid #ddd;padding:.5rem 0}\
.row img{max-width:160px;max-height:120px}\
label{display:block;margin:.5rem 0}\
figure img{max-width:100%}";

/// Escapes text for HTML element and attribute content.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Wraps a page body in the shared layout.
pub fn layout(active: Page, flash: Option<&Flash>, body: &str) -> String {
    let mut html = String::new();
    html.push_str("<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\">");
    let _ = write!(
        html,
        "<title>{} | Planogram Catalog</title><style>{}</style></head><body>",
        active.title(),
        STYLE
    );

    html.push_str("<nav><h2>Planogram Catalog</h2>");
    for page in Page::ALL {
        let class = if page == active { " class=\"active\"" } else { "" };
        let _ = write!(
            html,
            "<form method=\"post\" action=\"/nav/{}\"><button{}>{}</button></form>",
            page.slug(),
            class,
            page.title()
        );
    }
    html.push_str("</nav><main>");

    if let Some(flash) = flash {
        let kind = match flash.kind {
            FlashKind::Success => "success",
            FlashKind::Error => "error",
        };
        let _ = write!(
            html,
            "<div class=\"flash {}\" role=\"status\">{}</div>",
            kind,
            escape(&flash.message)
        );
    }

    let _ = write!(html, "<h1>{}</h1>", active.title());
    html.push_str(body);
    html.push_str("</main></body></html>");
    html
}

fn text_input(name: &str, label: &str, value: &str) -> String {
    format!(
        "<label>{} <input type=\"text\" name=\"{}\" value=\"{}\"></label>",
        label,
        name,
        escape(value)
    )
}

/// Form for a new planogram.
pub fn create_body() -> String {
    let mut html = String::from(
        "<form method=\"post\" action=\"/planograms\" enctype=\"multipart/form-data\">",
    );
    html.push_str(&text_input("name", "Name", ""));
    html.push_str(
        "<label>Image <input type=\"file\" name=\"image\" accept=\".jpg,.jpeg,.png\"></label>",
    );
    html.push_str(&text_input("store", "Store", ""));
    html.push_str(&text_input("aisle", "Aisle", ""));
    html.push_str(&text_input("shelf", "Shelf", ""));
    html.push_str("<button type=\"submit\">Save</button></form>");
    html
}

/// One row per planogram with a thumbnail and edit/delete actions.
pub fn list_body(rows: &[PlanogramSummary]) -> String {
    if rows.is_empty() {
        return "<p>No planograms yet.</p>".to_string();
    }

    let mut html = String::new();
    for row in rows {
        let _ = write!(
            html,
            "<div class=\"row\">\
             <img src=\"/planograms/{id}/image\" alt=\"{name}\">\
             <div><strong>{name}</strong><br><small>{caption}</small></div>\
             <form method=\"post\" action=\"/planograms/{id}/select\"><button>edit</button></form>\
             <form method=\"post\" action=\"/planograms/{id}/delete\"><button>delete</button></form>\
             </div>",
            id = row.id,
            name = escape(&row.name),
            caption = escape(&row.caption()),
        );
    }
    html
}

/// What the detail page knows about the stored image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePreview {
    Ready { width: u32, height: u32 },
    Broken(String),
}

/// Stored image, QR code, and the edit form for one planogram.
pub fn detail_body(record: &PlanogramRecord, preview: &ImagePreview, record_url: &str) -> String {
    let mut html = String::new();

    match preview {
        ImagePreview::Ready { width, height } => {
            let _ = write!(
                html,
                "<figure><img src=\"/planograms/{}/image\" alt=\"{}\">\
                 <figcaption>{} ({}×{})</figcaption></figure>",
                record.id,
                escape(&record.name),
                escape(&record.summary().caption()),
                width,
                height
            );
        }
        ImagePreview::Broken(reason) => {
            let _ = write!(
                html,
                "<div class=\"flash error\">Image cannot be displayed: {}</div>",
                escape(reason)
            );
        }
    }

    let _ = write!(
        html,
        "<figure><img src=\"/planograms/{}/qr.png\" alt=\"QR code\">\
         <figcaption><code>{}</code></figcaption></figure>",
        record.id,
        escape(record_url)
    );

    let _ = write!(
        html,
        "<form method=\"post\" action=\"/planograms/{}\" enctype=\"multipart/form-data\">",
        record.id
    );
    html.push_str(&text_input("name", "Name", &record.name));
    html.push_str(
        "<label>Replace image <input type=\"file\" name=\"image\" accept=\".jpg,.jpeg,.png\"></label>",
    );
    html.push_str(&text_input("store", "Store", &record.store));
    html.push_str(&text_input("aisle", "Aisle", &record.aisle));
    html.push_str(&text_input("shelf", "Shelf", &record.shelf));
    html.push_str("<button type=\"submit\">Update</button></form>");
    html
}
