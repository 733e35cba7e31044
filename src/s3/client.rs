// Implements the S3 Client
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::{
    anyhow,
    Result,
};
use aws_config::meta::region::RegionProviderChain;
use aws_config::BehaviorVersion;
use aws_sdk_s3::client::Client as S3Client;
use aws_sdk_s3::error::DisplayErrorContext;
use crate::common::{
    BucketNames,
    ClientConfig,
    ObjectEntry,
};
use tracing::debug;

/// The S3 `Client`.
pub struct Client {
    /// The AWS SDK `S3Client`.
    pub client: S3Client,

    /// Selected bucket name, if any.
    pub bucket_name: Option<String>,
}

impl Client {
    /// Return a new S3 `Client` with the given `ClientConfig`.
    pub async fn new(config: ClientConfig) -> Self {
        let bucket_name = config.bucket_name;
        let region      = config.region;

        debug!("new: Creating S3Client in region '{}'", region.name());

        // Our region goes first, anything the SDK can discover on its own is
        // the fallback.
        let region_provider = RegionProviderChain::first_try(region)
            .or_default_provider();

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .load()
            .await;

        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);

        // Custom endpoints are generally S3 compatible services which don't
        // do virtual host style addressing.
        if let Some(endpoint) = config.endpoint {
            debug!("new: Using custom endpoint '{}'", endpoint);

            builder = builder
                .endpoint_url(endpoint)
                .force_path_style(true);
        }

        let client = S3Client::from_conf(builder.build());

        Self {
            client,
            bucket_name,
        }
    }

    /// Returns a list of bucket names.
    ///
    /// If a bucket name was selected, the list is filtered down to it.
    pub async fn list_buckets(&self) -> Result<BucketNames> {
        debug!("list_buckets: Listing...");

        let output = self.client.list_buckets()
            .send()
            .await
            .map_err(|e| anyhow!("{}", DisplayErrorContext(&e)))?;

        let mut bucket_names: BucketNames = output.buckets()
            .iter()
            .filter_map(|b| b.name().map(ToOwned::to_owned))
            .collect();

        // If we were provided with a specific bucket name on the CLI, filter
        // out buckets that don't match.
        if let Some(bucket_name) = self.bucket_name.as_ref() {
            debug!("Filtering bucket list for '{}'", bucket_name);

            bucket_names.retain(|b| b == bucket_name);
        }

        Ok(bucket_names)
    }

    /// Returns every current object in `bucket` along with its size.
    ///
    /// Continuation tokens are followed until the listing is no longer
    /// truncated.
    pub async fn list_objects(&self, bucket: &str) -> Result<Vec<ObjectEntry>> {
        debug!("list_objects for '{}'", bucket);

        let mut continuation_token = None;
        let mut objects            = Vec::new();

        // Loop until all objects are processed.
        loop {
            let output = self.client.list_objects_v2()
                .bucket(bucket)
                .set_continuation_token(continuation_token)
                .send()
                .await
                .map_err(|e| anyhow!("{}", DisplayErrorContext(&e)))?;

            // Negative sizes shouldn't happen, treat them like a missing size.
            objects.extend(output.contents()
                .iter()
                .map(|o| {
                    let key  = o.key().unwrap_or_default();
                    let size = o.size().and_then(|s| u64::try_from(s).ok());

                    ObjectEntry::new(key, size)
                })
            );

            // If the output was truncated (Some(true)), we should have a
            // next_continuation_token.
            // If it wasn't, (Some(false) | None) we're done and can break.
            match output.is_truncated() {
                Some(true) => {
                    let nct = output.next_continuation_token()
                        .map(ToOwned::to_owned);

                    // Guard against a truncated listing without a token,
                    // which would otherwise loop forever.
                    if nct.is_none() {
                        break;
                    }

                    continuation_token = nct;
                },
                _ => break,
            }
        }

        debug!("list_objects: '{}' has {} objects", bucket, objects.len());

        Ok(objects)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use aws_sdk_s3::config::{
        Config as S3Config,
        Credentials,
    };
    use aws_smithy_http_client::test_util::{
        ReplayEvent,
        StaticReplayClient,
    };
    use aws_smithy_types::body::SdkBody;
    use pretty_assertions::assert_eq;

    pub enum ResponseType<'a> {
        Body(&'a str),
        WithStatus(u16),
    }

    pub const LIST_BUCKETS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ListAllMyBucketsResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
  <Owner>
    <ID>1936a5d8a2b189cda450d1d1d514f3861b3adc2df515</ID>
    <DisplayName>aws</DisplayName>
  </Owner>
  <Buckets>
    <Bucket>
      <Name>a-bucket-name</Name>
      <CreationDate>2020-03-12T14:45:00.000Z</CreationDate>
    </Bucket>
    <Bucket>
      <Name>another-bucket-name</Name>
      <CreationDate>2020-03-11T14:45:00.000Z</CreationDate>
    </Bucket>
  </Buckets>
</ListAllMyBucketsResult>"#;

    const LIST_OBJECTS_PAGE_1: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ListBucketResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
  <Name>test-bucket</Name>
  <Prefix></Prefix>
  <KeyCount>2</KeyCount>
  <MaxKeys>2</MaxKeys>
  <IsTruncated>true</IsTruncated>
  <NextContinuationToken>page-2</NextContinuationToken>
  <Contents>
    <Key>first.zip</Key>
    <LastModified>2020-03-12T14:45:00.000Z</LastModified>
    <ETag>"d41d8cd98f00b204e9800998ecf8427e"</ETag>
    <Size>1024</Size>
    <StorageClass>STANDARD</StorageClass>
  </Contents>
  <Contents>
    <Key>second.zip</Key>
    <LastModified>2020-03-12T14:45:00.000Z</LastModified>
    <ETag>"d41d8cd98f00b204e9800998ecf8427e"</ETag>
    <Size>2048</Size>
    <StorageClass>STANDARD</StorageClass>
  </Contents>
</ListBucketResult>"#;

    const LIST_OBJECTS_PAGE_2: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ListBucketResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
  <Name>test-bucket</Name>
  <Prefix></Prefix>
  <KeyCount>1</KeyCount>
  <MaxKeys>2</MaxKeys>
  <IsTruncated>false</IsTruncated>
  <Contents>
    <Key>third.zip</Key>
    <LastModified>2020-03-12T14:45:00.000Z</LastModified>
    <ETag>"d41d8cd98f00b204e9800998ecf8427e"</ETag>
    <Size>30720</Size>
    <StorageClass>STANDARD</StorageClass>
  </Contents>
</ListBucketResult>"#;

    // Create a mock S3 client, replaying the given responses in order.
    pub fn mock_client(
        responses:   Vec<ResponseType<'_>>,
        bucket_name: Option<&str>,
    ) -> Client {
        let events = responses
            .iter()
            .map(|r| {
                let (status, body) = match r {
                    ResponseType::Body(body)         => (200, body.to_string()),
                    ResponseType::WithStatus(status) => (*status, String::new()),
                };

                ReplayEvent::new(
                    http::Request::builder()
                        .body(SdkBody::empty())
                        .unwrap(),

                    http::Response::builder()
                        .status(status)
                        .body(SdkBody::from(body))
                        .unwrap(),
                )
            })
            .collect();

        let http_client = StaticReplayClient::new(events);

        let creds = Credentials::new(
            "ATESTCLIENT",
            "atestsecretkey",
            Some("atestsessiontoken".to_string()),
            None,
            "tests",
        );

        let conf = S3Config::builder()
            .behavior_version_latest()
            .credentials_provider(creds)
            .http_client(http_client)
            .region(aws_sdk_s3::config::Region::new("eu-west-1"))
            .build();

        Client {
            client:      S3Client::from_conf(conf),
            bucket_name: bucket_name.map(ToOwned::to_owned),
        }
    }

    #[tokio::test]
    async fn test_list_buckets() {
        let client = mock_client(vec![ResponseType::Body(LIST_BUCKETS)], None);

        let mut ret = client.list_buckets().await.unwrap();
        ret.sort();

        let expected: Vec<String> = vec![
            "a-bucket-name".into(),
            "another-bucket-name".into(),
        ];

        assert_eq!(ret, expected);
    }

    #[tokio::test]
    async fn test_list_buckets_filtered() {
        let client = mock_client(
            vec![ResponseType::Body(LIST_BUCKETS)],
            Some("another-bucket-name"),
        );

        let ret = client.list_buckets().await.unwrap();

        assert_eq!(ret, vec!["another-bucket-name".to_string()]);
    }

    #[tokio::test]
    async fn test_list_objects_follows_continuation() {
        let client = mock_client(
            vec![
                ResponseType::Body(LIST_OBJECTS_PAGE_1),
                ResponseType::Body(LIST_OBJECTS_PAGE_2),
            ],
            None,
        );

        let ret = client.list_objects("test-bucket").await.unwrap();

        let expected = vec![
            ObjectEntry::new("first.zip", Some(1024)),
            ObjectEntry::new("second.zip", Some(2048)),
            ObjectEntry::new("third.zip", Some(30720)),
        ];

        assert_eq!(ret, expected);
    }

    #[tokio::test]
    async fn test_list_objects_access_denied() {
        let client = mock_client(vec![ResponseType::WithStatus(403)], None);

        let ret = client.list_objects("test-bucket").await;

        assert!(ret.is_err());
    }
}
