use super::models::Document;
use crate::{
    components::{Component, EmptyRow, EmptyState},
    format,
    routes::Route,
};
use ammonia::{clean, clean_text};

pub struct DocumentRow<'a> {
    pub document: &'a Document,
}
impl Component for DocumentRow<'_> {
    fn render(&self) -> String {
        let document = self.document;
        let open = match document.link() {
            Some(url) => format!(
                r#"<a class="btn btn-outline btn-sm" href="{}" target="_blank" rel="noopener noreferrer">Open</a>"#,
                clean_text(url)
            ),
            None => format::NOT_AVAILABLE.to_string(),
        };
        format!(
            r#"
            <tr>
                <td>{name}</td>
                <td>{doc_type}</td>
                <td>{property}</td>
                <td>{uploaded}</td>
                <td>{open}</td>
            </tr>
            "#,
            name = clean(format::or_na(Some(document.name.as_str()))),
            doc_type = clean(format::or_na(Some(document.doc_type.as_str()))),
            property = clean(format::or_na(document.property_name())),
            uploaded = format::date(document.uploaded_at.as_ref()),
        )
    }
}

/// Rows for `#documentsList`.
pub struct DocumentRows<'a> {
    pub documents: &'a [Document],
}
impl Component for DocumentRows<'_> {
    fn render(&self) -> String {
        if self.documents.is_empty() {
            return EmptyRow {
                colspan: 5,
                state: EmptyState {
                    icon: "fa-folder-open",
                    title: "No Documents Found",
                    message: "Your documents will appear here",
                    action: None,
                },
            }
            .render();
        }
        self.documents
            .iter()
            .map(|document| DocumentRow { document }.render())
            .collect::<Vec<String>>()
            .join("")
    }
}

pub struct UploadButton;
impl Component for UploadButton {
    fn render(&self) -> String {
        let upload = Route::DocumentUpload;
        format!(
            r#"<button class="btn btn-primary" hx-post="{upload}" hx-swap="none"><i class="fas fa-upload"></i> Upload Document</button>"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rows_and_empty_state() {
        let html = DocumentRows { documents: &[] }.render();
        assert!(html.contains("No Documents Found"));
        assert!(html.contains(r#"colspan="5""#));

        let docs: Vec<Document> = serde_json::from_value(json!([
            {"_id": "d1", "name": "Lease", "docType": "lease", "url": "/files/d1.pdf"},
            {"_id": "d2", "name": "Notice", "url": "data:text/html,hi"}
        ]))
        .expect("documents");
        let html = DocumentRows { documents: &docs }.render();
        assert!(html.contains(r#"href="&#47;files&#47;d1.pdf""#));
        assert!(!html.contains("data:text"));
    }
}
