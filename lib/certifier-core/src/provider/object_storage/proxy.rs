use url::Url;

use super::error::ObjectStorageError;

const DOWNLOAD_PATH: &str = "files/download";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectLocation {
    pub bucket: String,
    pub path: String,
}

/// Maps storage locations to the backend download proxy and back:
/// `{backendBase}/files/download/{bucket}/{objectPath}`
#[derive(Clone, Debug)]
pub struct ProxyUrlResolver {
    prefix: String,
}

impl ProxyUrlResolver {
    pub fn new(backend_base_url: &Url) -> Self {
        Self {
            prefix: format!(
                "{}/{DOWNLOAD_PATH}/",
                backend_base_url.as_str().trim_end_matches('/')
            ),
        }
    }

    pub fn to_proxy_url(&self, bucket: &str, path: &str) -> String {
        format!("{}{bucket}/{path}", self.prefix)
    }

    pub fn resolve(&self, url: &str) -> Result<ObjectLocation, ObjectStorageError> {
        let foreign = || ObjectStorageError::ForeignUrl(url.to_owned());

        let (bucket, path) = url
            .strip_prefix(&self.prefix)
            .and_then(|rest| rest.split_once('/'))
            .ok_or_else(foreign)?;

        if bucket.is_empty()
            || path.is_empty()
            || path.split('/').any(|segment| segment.is_empty() || segment == "..")
        {
            return Err(foreign());
        }

        Ok(ObjectLocation {
            bucket: bucket.to_owned(),
            path: path.to_owned(),
        })
    }
}
