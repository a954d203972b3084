//! Alert and pagination response headers.

use alunometa_core::query::Page;
use axum::http::header::{InvalidHeaderName, LINK};
use axum::http::{HeaderMap, HeaderName, HeaderValue};

pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

fn insert(headers: &mut HeaderMap, name: &HeaderName, value: &str) {
    if let Ok(value) = HeaderValue::from_str(value) {
        headers.insert(name.clone(), value);
    }
}

/// Builds the `X-<app>-alert`, `X-<app>-error` and `X-<app>-params` headers
#[derive(Debug, Clone)]
pub struct Alerts {
    app_name: String,
    alert: HeaderName,
    error: HeaderName,
    params: HeaderName,
}

impl Alerts {
    pub fn new(app_name: impl Into<String>) -> Result<Self, InvalidHeaderName> {
        let app_name = app_name.into();
        Ok(Self {
            alert: HeaderName::try_from(format!("x-{}-alert", app_name))?,
            error: HeaderName::try_from(format!("x-{}-error", app_name))?,
            params: HeaderName::try_from(format!("x-{}-params", app_name))?,
            app_name,
        })
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn alert_header(&self) -> &HeaderName {
        &self.alert
    }

    pub fn error_header(&self) -> &HeaderName {
        &self.error
    }

    pub fn params_header(&self) -> &HeaderName {
        &self.params
    }

    /// Success notification: message key plus an url-encoded parameter
    pub fn alert(&self, message_key: &str, param: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        insert(&mut headers, &self.alert, message_key);
        insert(&mut headers, &self.params, &urlencoding::encode(param));
        headers
    }

    pub fn entity_created(&self, entity_name: &str, id: &str) -> HeaderMap {
        self.alert(&format!("{}.{}.created", self.app_name, entity_name), id)
    }

    pub fn entity_updated(&self, entity_name: &str, id: &str) -> HeaderMap {
        self.alert(&format!("{}.{}.updated", self.app_name, entity_name), id)
    }

    pub fn entity_deleted(&self, entity_name: &str, id: &str) -> HeaderMap {
        self.alert(&format!("{}.{}.deleted", self.app_name, entity_name), id)
    }

    pub fn failure(&self, entity_name: &str, error_key: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        insert(&mut headers, &self.error, &format!("error.{}", error_key));
        insert(&mut headers, &self.params, entity_name);
        headers
    }
}

fn page_link(path: &str, kept: &str, page: u64, size: u32, rel: &str) -> String {
    format!("<{}?{}page={}&size={}>; rel=\"{}\"", path, kept, page, size, rel)
}

/// `X-Total-Count` plus a `Link` header with next/prev/last/first pages.
///
/// Links keep every request parameter except `page` and `size`.
pub fn pagination<T>(path: &str, query: &[(String, String)], page: &Page<T>) -> HeaderMap {
    let kept: String = query
        .iter()
        .filter(|(key, _)| key != "page" && key != "size")
        .map(|(key, value)| format!("{}={}&", urlencoding::encode(key), urlencoding::encode(value)))
        .collect();

    let current = u64::from(page.page);
    let last = page.total_pages().saturating_sub(1);

    let mut links = Vec::with_capacity(4);
    if page.has_next() {
        links.push(page_link(path, &kept, current + 1, page.size, "next"));
    }
    if page.has_previous() {
        links.push(page_link(path, &kept, current - 1, page.size, "prev"));
    }
    links.push(page_link(path, &kept, last, page.size, "last"));
    links.push(page_link(path, &kept, 0, page.size, "first"));

    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static(TOTAL_COUNT_HEADER),
        HeaderValue::from(page.total_elements),
    );
    insert(&mut headers, &LINK, &links.join(","));
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use alunometa_core::query::PageRequest;

    #[test]
    fn test_alert_headers() {
        let alerts = Alerts::new("alunometaApp").unwrap();
        let headers = alerts.entity_created("aluno", "12");

        assert_eq!(headers.get("x-alunometaapp-alert").unwrap(), "alunometaApp.aluno.created");
        assert_eq!(headers.get("X-alunometaApp-params").unwrap(), "12");

        let headers = alerts.alert("alunometaApp.aluno.updated", "a b");
        assert_eq!(headers.get(alerts.params_header()).unwrap(), "a%20b");
    }

    #[test]
    fn test_failure_headers() {
        let alerts = Alerts::new("alunometaApp").unwrap();
        let headers = alerts.failure("meta", "idnull");
        assert_eq!(headers.get(alerts.error_header()).unwrap(), "error.idnull");
        assert_eq!(headers.get(alerts.params_header()).unwrap(), "meta");
    }

    #[test]
    fn test_invalid_app_name_rejected() {
        assert!(Alerts::new("bad name").is_err());
    }

    #[test]
    fn test_pagination_links_keep_filters() {
        let query = vec![
            ("nome.contains".to_string(), "a b".to_string()),
            ("page".to_string(), "1".to_string()),
            ("size".to_string(), "2".to_string()),
        ];
        let page = Page::new(vec![1, 2], 5, &PageRequest::new(1, 2));
        let headers = pagination("/api/alunos", &query, &page);

        assert_eq!(headers.get(TOTAL_COUNT_HEADER).unwrap(), "5");
        assert_eq!(
            headers.get(LINK).unwrap(),
            "</api/alunos?nome.contains=a%20b&page=2&size=2>; rel=\"next\",\
             </api/alunos?nome.contains=a%20b&page=0&size=2>; rel=\"prev\",\
             </api/alunos?nome.contains=a%20b&page=2&size=2>; rel=\"last\",\
             </api/alunos?nome.contains=a%20b&page=0&size=2>; rel=\"first\""
        );
    }

    #[test]
    fn test_single_page_has_only_first_and_last() {
        let page: Page<i32> = Page::new(vec![], 0, &PageRequest::default());
        let headers = pagination("/api/metas", &[], &page);
        let link = headers.get(LINK).unwrap().to_str().unwrap();

        assert!(!link.contains("rel=\"next\""));
        assert!(!link.contains("rel=\"prev\""));
        assert!(link.contains("</api/metas?page=0&size=20>; rel=\"last\""));
    }
}
