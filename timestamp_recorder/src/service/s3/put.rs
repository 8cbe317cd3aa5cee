use anyhow::{Context, Result};
use aws_sdk_s3 as s3;
use lambda_runtime::tracing;

#[tracing::instrument(skip(client, body))]
pub async fn put_json(
    client: &s3::Client,
    bucket: &str,
    key: &str,
    body: Vec<u8>,
    metadata: Vec<(String, String)>,
) -> Result<()> {
    let mut request = client
        .put_object()
        .bucket(bucket)
        .key(key)
        .body(s3::primitives::ByteStream::from(body))
        .content_type("application/json");

    for (name, value) in metadata {
        request = request.metadata(name, value);
    }

    request
        .send()
        .await
        .context(format!("could not put object {key} into bucket {bucket}"))?;
    Ok(())
}
