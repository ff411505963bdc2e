use educe::Educe;

use crate::transform::RenamePipeline;

pub const S3_PLATFORM: &str = "s3";

pub const S3_BUCKET_KEY: &str = "s3.bucket.name";
pub const TOPICS_DIR_KEY: &str = "topics.dir";

#[derive(Educe, Clone)]
#[educe(Debug, Default)]
pub struct S3SinkConf {
    #[educe(Default(expression = S3_PLATFORM))]
    pub target_platform: &'static str,
    pub bucket: String,
    #[educe(Default = "topics")]
    pub topics_dir: String,
    pub rename: RenamePipeline,
}

impl S3SinkConf {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            ..Self::default()
        }
    }
}
