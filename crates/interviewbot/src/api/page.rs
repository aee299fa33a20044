use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_index_page_wires_the_api() {
        let Html(body) = index().await;
        assert!(body.contains("/api/options"));
        assert!(body.contains("/api/sessions"));
        assert!(body.contains("Thinking..."));
    }

    #[tokio::test]
    async fn test_index_page_uses_original_headings() {
        let Html(body) = index().await;
        assert!(body.contains("Interview Information"));
        assert!(body.contains("Choose your parameters"));
        assert!(body.contains("view.intro"));
    }

    #[tokio::test]
    async fn test_index_page_ends_session_and_keeps_failed_answer() {
        let Html(body) = index().await;
        assert!(body.contains(r#"addEventListener("pagehide""#));
        assert!(body.contains(r#"method: "DELETE""#));
        assert!(body.contains(r#"$("chat-input").value = content;"#));
    }
}
