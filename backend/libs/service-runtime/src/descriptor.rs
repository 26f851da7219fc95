/// Identity and URL layout of one service
///
/// Built once at process start from the service name; every path the router
/// mount exposes derives from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescriptor {
    pub name: String,
    pub url_prefix: String,
    pub docs_path: String,
    pub openapi_path: String,
    /// Documentation group for every operation of the service
    pub tag: String,
}

impl ServiceDescriptor {
    pub const API_BASE: &'static str = "/api/v1";

    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let url_prefix = format!("{}/{}", Self::API_BASE, name.trim_matches('/'));

        Self {
            docs_path: format!("{url_prefix}/docs"),
            openapi_path: format!("{url_prefix}/openapi.json"),
            tag: name.clone(),
            url_prefix,
            name,
        }
    }
}
