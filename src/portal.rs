use url::Url;

/// Filter value for the index that lists every company.
pub const ALL_COMPANIES: &str = "AllCompanies";

/// URL layout of the placement portal's visitor pages.
#[derive(Debug, Clone)]
pub struct Portal {
    base: Url,
}

impl Portal {
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            base: Url::parse(base_url)?,
        })
    }

    /// `?page=company&start=<n>[&filter=<f>]`
    pub fn index_url(&self, start: usize, filter: Option<&str>) -> Url {
        let mut url = self.base.clone();
        {
            let mut q = url.query_pairs_mut();
            q.clear();
            q.append_pair("page", "company");
            q.append_pair("start", &start.to_string());
            if let Some(f) = filter {
                q.append_pair("filter", f);
            }
        }
        url
    }

    /// `?page=company&content=detail&CompanyID=<id>`
    pub fn detail_url(&self, id: &str) -> Url {
        let mut url = self.base.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("page", "company")
            .append_pair("content", "detail")
            .append_pair("CompanyID", id);
        url
    }
}
