use crate::{
    apis::{
        HardwareProfileApi, ImageApi, InstanceApi, InstanceStateApi, KeyApi, RealmApi,
        StorageSnapshotApi, StorageVolumeApi,
    },
    auth::Authentication,
    error::{DeltacloudError, DeltacloudResult},
    models::{Feature, Link},
    xml::{self, Resource},
};
use log::{debug, info};
use reqwest::{Client, Method, RequestBuilder, Response};
use std::sync::Arc;
use url::Url;

/// Root tag of the entry-point document served at the API base URL
const ENTRY_POINT_TAG: &str = "api";

/// A named form parameter for create requests. A `None` value means the
/// name is omitted from the transmitted body entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateParameter {
    name: String,
    value: Option<String>,
}

impl CreateParameter {
    pub fn new(
        name: impl Into<String>,
        value: Option<impl Into<String>>,
    ) -> DeltacloudResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(DeltacloudError::invalid_arg(
                "parameter name may not be empty",
            ));
        }
        Ok(Self {
            name,
            value: value.map(Into::into),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

/// Main Deltacloud client.
///
/// Construction performs link discovery against the API entry point; a
/// client never exists with a partial link table. All fetch operations
/// borrow the client read-only, so a client can be shared across tasks.
#[derive(Debug, Clone)]
pub struct DeltacloudClient {
    client: Client,
    base_url: Url,
    auth: Arc<dyn Authentication>,
    links: Vec<Link>,
}

impl DeltacloudClient {
    /// Create a client and discover the server's advertised links
    pub async fn new(
        base_url: impl AsRef<str>,
        auth: impl Authentication + 'static,
    ) -> DeltacloudResult<Self> {
        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(DeltacloudError::Get)?;

        Self::with_client(client, base_url, auth).await
    }

    /// Create a client with a custom reqwest client (timeouts, proxies, ...)
    pub async fn with_client(
        client: Client,
        base_url: impl AsRef<str>,
        auth: impl Authentication + 'static,
    ) -> DeltacloudResult<Self> {
        let base_url = Url::parse(base_url.as_ref())?;

        let mut this = Self {
            client,
            base_url,
            auth: Arc::new(auth),
            links: Vec::new(),
        };

        info!("discovering links at {}", this.base_url);
        let body = this.fetch(this.base_url.clone()).await?;
        let body = classify_body(ENTRY_POINT_TAG, body)?;
        this.links = decode_entry_point(&body)?;
        debug!("discovered {} links", this.links.len());

        Ok(this)
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The discovered link table
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Look up a relation in the link table. First match wins if the
    /// server advertised duplicates.
    pub fn resolve(&self, rel: &str) -> DeltacloudResult<&Link> {
        resolve_link(&self.links, rel).ok_or_else(|| DeltacloudError::LinkNotFound(rel.to_string()))
    }

    /// Whether the server advertises the given relation. Callers probe
    /// optional capabilities with this before fetching, so an unsupported
    /// resource never has to look like a network error.
    pub fn supports(&self, rel: &str) -> bool {
        resolve_link(&self.links, rel).is_some()
    }

    /// Get Instance API
    pub fn instances(&self) -> InstanceApi<'_> {
        InstanceApi::new(self)
    }

    /// Get Realm API
    pub fn realms(&self) -> RealmApi<'_> {
        RealmApi::new(self)
    }

    /// Get Image API
    pub fn images(&self) -> ImageApi<'_> {
        ImageApi::new(self)
    }

    /// Get Instance State API
    pub fn instance_states(&self) -> InstanceStateApi<'_> {
        InstanceStateApi::new(self)
    }

    /// Get Storage Volume API
    pub fn storage_volumes(&self) -> StorageVolumeApi<'_> {
        StorageVolumeApi::new(self)
    }

    /// Get Storage Snapshot API
    pub fn storage_snapshots(&self) -> StorageSnapshotApi<'_> {
        StorageSnapshotApi::new(self)
    }

    /// Get Key API
    pub fn keys(&self) -> KeyApi<'_> {
        KeyApi::new(self)
    }

    /// Get Hardware Profile API
    pub fn hardware_profiles(&self) -> HardwareProfileApi<'_> {
        HardwareProfileApi::new(self)
    }

    /// Fetch every resource of type `R` advertised under its relation
    pub async fn get_collection<R: Resource>(&self) -> DeltacloudResult<Vec<R>> {
        let link = self.resolve(R::REL)?;
        let url = Url::parse(&link.href)?;
        debug!("GET {} ({})", url, R::REL);

        let body = self.fetch(url).await?;
        let body = classify_body(R::REL, body)?;
        xml::decode_collection(&body)
    }

    /// Fetch a single resource of type `R` by its id
    pub async fn get_by_id<R: Resource>(&self, id: &str) -> DeltacloudResult<R> {
        if id.is_empty() {
            return Err(DeltacloudError::invalid_arg("id may not be empty"));
        }

        let url = Url::parse(&format!(
            "{}/{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            R::REL,
            urlencoding::encode(id)
        ))?;
        debug!("GET {} ({} by id)", url, R::REL);

        let body = self.fetch(url).await?;
        let body = classify_body(R::REL, body)?;
        xml::decode_single(&body)
    }

    /// POST a form-encoded create request to the relation's endpoint.
    /// Returns the response body, if any; the caller decodes it.
    pub async fn create(
        &self,
        rel: &str,
        params: &[CreateParameter],
        extra_headers: &[(&str, &str)],
    ) -> DeltacloudResult<Option<String>> {
        let link = self.resolve(rel)?;
        let url = Url::parse(&link.href)?;
        let form = encode_params(params);
        debug!("POST {} body={}", url, form);

        let body = self.submit(url, form, extra_headers).await?;
        Self::classify_side_effect(body)
    }

    /// POST to an action href a resource advertises about itself.
    /// Returns the response body, if any.
    pub async fn post_action(&self, href: &str) -> DeltacloudResult<Option<String>> {
        let url = Url::parse(href)?;
        debug!("POST {} (action)", url);

        let body = self.submit(url, String::new(), &[]).await?;
        Self::classify_side_effect(body)
    }

    /// DELETE a resource at its own href
    pub async fn destroy(&self, href: &str) -> DeltacloudResult<()> {
        let url = Url::parse(href)?;
        debug!("DELETE {}", url);

        let body = self.remove(url).await?;
        Self::classify_side_effect(body)?;
        Ok(())
    }

    /// Create/action/destroy responses carry either nothing, a server
    /// error document, or a representation of the affected resource.
    fn classify_side_effect(body: String) -> DeltacloudResult<Option<String>> {
        if body.is_empty() {
            Ok(None)
        } else if xml::is_error_document(&body) {
            Err(DeltacloudError::Server(xml::error_document_message(&body)))
        } else {
            Ok(Some(body))
        }
    }

    async fn request(&self, method: Method, url: Url) -> DeltacloudResult<RequestBuilder> {
        let mut request = self.client.request(method, url);

        let mut headers = reqwest::header::HeaderMap::new();
        self.auth.apply_auth(&mut headers).await?;

        for (name, value) in headers.iter() {
            request = request.header(name, value);
        }

        Ok(request)
    }

    /// Authenticated GET returning the response body
    async fn fetch(&self, url: Url) -> DeltacloudResult<String> {
        let request = self.request(Method::GET, url).await?;
        let response = request.send().await.map_err(DeltacloudError::Get)?;
        Self::handle_response(response, DeltacloudError::Get).await
    }

    /// Authenticated form-encoded POST returning the response body
    async fn submit(
        &self,
        url: Url,
        form: String,
        extra_headers: &[(&str, &str)],
    ) -> DeltacloudResult<String> {
        let mut request = self.request(Method::POST, url).await?;
        request = request.header(
            reqwest::header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        );
        for (name, value) in extra_headers {
            request = request.header(*name, *value);
        }
        request = request.body(form);

        let response = request.send().await.map_err(DeltacloudError::Post)?;
        Self::handle_response(response, DeltacloudError::Post).await
    }

    /// Authenticated DELETE returning the response body
    async fn remove(&self, url: Url) -> DeltacloudResult<String> {
        let request = self.request(Method::DELETE, url).await?;
        let response = request.send().await.map_err(DeltacloudError::Delete)?;
        Self::handle_response(response, DeltacloudError::Delete).await
    }

    /// Map a response to its body. Non-2xx responses are translated from
    /// a server error document when one is present, otherwise surfaced as
    /// an API error carrying the status.
    async fn handle_response(
        response: Response,
        transport_err: fn(reqwest::Error) -> DeltacloudError,
    ) -> DeltacloudResult<String> {
        let status = response.status();
        let body = response.text().await.map_err(transport_err)?;

        if status.is_success() {
            Ok(body)
        } else if xml::is_error_document(&body) {
            Err(DeltacloudError::Server(xml::error_document_message(&body)))
        } else {
            Err(DeltacloudError::api_error(
                status.as_u16(),
                format!("HTTP {}", status),
            ))
        }
    }
}

/// A GET body is exactly one of: empty (the server dropped the data we
/// were promised), a server error document, or a decodable resource
/// document, checked in that order.
fn classify_body(relname: &str, body: String) -> DeltacloudResult<String> {
    if body.is_empty() {
        return Err(DeltacloudError::EmptyResponse(relname.to_string()));
    }
    if xml::is_error_document(&body) {
        return Err(DeltacloudError::Server(xml::error_document_message(&body)));
    }
    Ok(body)
}

fn resolve_link<'a>(links: &'a [Link], rel: &str) -> Option<&'a Link> {
    links.iter().find(|l| l.rel == rel)
}

/// URL-escape each present parameter value and join the pairs with `&`.
/// Parameters whose value is `None` send nothing, not an empty value.
fn encode_params(params: &[CreateParameter]) -> String {
    let mut form = String::new();
    for param in params {
        if let Some(value) = param.value() {
            if !form.is_empty() {
                form.push('&');
            }
            form.push_str(param.name());
            form.push('=');
            form.push_str(&urlencoding::encode(value));
        }
    }
    form
}

/// Decode the entry-point document into the link table
fn decode_entry_point(body: &str) -> DeltacloudResult<Vec<Link>> {
    let doc = roxmltree::Document::parse(body)
        .map_err(|e| DeltacloudError::Xml(format!("Failed to parse XML: {}", e)))?;
    let root = doc.root_element();
    if root.tag_name().name() != ENTRY_POINT_TAG {
        return Err(DeltacloudError::root_mismatch(
            ENTRY_POINT_TAG,
            root.tag_name().name(),
        ));
    }

    let mut links = Vec::new();
    for node in root.children() {
        if !node.is_element() || node.tag_name().name() != "link" {
            continue;
        }
        let rel = xml::attr(node, "rel").ok_or_else(|| {
            DeltacloudError::Xml("entry-point link is missing its 'rel' attribute".to_string())
        })?;
        let href = xml::attr(node, "href").ok_or_else(|| {
            DeltacloudError::Xml("entry-point link is missing its 'href' attribute".to_string())
        })?;

        let features = node
            .children()
            .filter(|c| c.is_element() && c.tag_name().name() == "feature")
            .filter_map(|c| xml::attr(c, "name"))
            .map(|name| Feature { name })
            .collect();

        links.push(Link {
            rel,
            href,
            features,
        });
    }

    Ok(links)
}
