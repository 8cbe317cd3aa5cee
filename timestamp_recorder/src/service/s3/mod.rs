mod put;
use anyhow::Result;
use aws_sdk_s3 as s3;
use lambda_runtime::tracing;
#[allow(unused_imports)]
use mockall::automock;

#[cfg(test)]
pub use MockS3Client as S3;
#[cfg(not(test))]
pub use S3Client as S3;

#[derive(Clone, Debug)]
pub struct S3Client {
    /// Inner S3 client
    inner: s3::Client,
}

#[cfg_attr(test, automock)]
impl S3Client {
    pub fn new(inner: s3::Client) -> Self {
        Self { inner }
    }

    /// Puts a JSON document into the bucket at the provided key, with the
    /// provided object metadata pairs attached.
    #[tracing::instrument(skip(self, body))]
    pub async fn put_json(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        metadata: Vec<(String, String)>,
    ) -> Result<()> {
        put::put_json(&self.inner, bucket, key, body, metadata).await
    }
}
